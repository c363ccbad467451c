use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::common::{error::Error, hash::keccak256};

#[derive(Clone, Copy, Default, Hash, Eq, PartialEq)]
pub struct Address(pub [u8; 20]);

impl Address {
    /// EIP-55 mixed-case encoding.
    pub fn to_checksum(&self) -> String {
        let lower = hex::encode(self.0);
        let hash = keccak256(lower.as_bytes());

        let mut ret = String::with_capacity(42);
        ret.push_str("0x");
        for (i, c) in lower.chars().enumerate() {
            let nibble = (hash[i / 2] >> (if i % 2 == 0 { 4 } else { 0 })) & 0x0f;
            if c.is_ascii_alphabetic() && nibble >= 8 {
                ret.push(c.to_ascii_uppercase());
            } else {
                ret.push(c);
            }
        }
        ret
    }
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_checksum())
    }
}

impl std::fmt::Debug for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Address({})", self.to_checksum())
    }
}

impl From<[u8; 20]> for Address {
    fn from(value: [u8; 20]) -> Self {
        Self(value)
    }
}

impl TryFrom<&str> for Address {
    type Error = Error;

    /// Accepts any letter case, with or without the `0x` prefix.
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let hex = value.strip_prefix("0x").unwrap_or(value);
        if hex.len() != 40 {
            return Err(Error::InvalidAddress(value.to_string()));
        }
        let mut bytes = [0u8; 20];
        hex::decode_to_slice(hex, &mut bytes)
            .map_err(|_| Error::InvalidAddress(value.to_string()))?;
        Ok(Address(bytes))
    }
}

impl FromStr for Address {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Address::try_from(s)
    }
}

impl Serialize for Address {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_checksum())
    }
}

#[cfg(test)]
pub const fn addr(s: &str) -> Address {
    Address(crate::common::decode(s))
}
