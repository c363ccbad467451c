use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::common::error::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlockTag {
    Latest,
    Earliest,
    Pending,
    Safe,
    Finalized,
}

impl BlockTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            BlockTag::Latest => "latest",
            BlockTag::Earliest => "earliest",
            BlockTag::Pending => "pending",
            BlockTag::Safe => "safe",
            BlockTag::Finalized => "finalized",
        }
    }
}

/// Pins a historical chain state for a read query.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlockId {
    Number(u64),
    Tag(BlockTag),
    Hash([u8; 32]),
}

impl BlockId {
    /// Block parameter as accepted by `eth_getBalance` and friends.
    /// Hashes use the EIP-1898 object form.
    pub fn to_param(&self) -> serde_json::Value {
        match self {
            BlockId::Number(n) => serde_json::json!(format!("{n:#x}")),
            BlockId::Tag(tag) => serde_json::json!(tag.as_str()),
            BlockId::Hash(hash) => serde_json::json!({
                "blockHash": format!("0x{}", hex::encode(hash)),
            }),
        }
    }
}

impl std::fmt::Display for BlockId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BlockId::Number(n) => write!(f, "{n}"),
            BlockId::Tag(tag) => f.write_str(tag.as_str()),
            BlockId::Hash(hash) => write!(f, "0x{}", hex::encode(hash)),
        }
    }
}

impl FromStr for BlockId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = match s {
            "latest" => Some(BlockTag::Latest),
            "earliest" => Some(BlockTag::Earliest),
            "pending" => Some(BlockTag::Pending),
            "safe" => Some(BlockTag::Safe),
            "finalized" => Some(BlockTag::Finalized),
            _ => None,
        };
        if let Some(tag) = tag {
            return Ok(BlockId::Tag(tag));
        }

        let invalid = || Error::InvalidBlock(s.to_string());
        if let Some(hex) = s.strip_prefix("0x") {
            if hex.len() == 64 {
                let mut hash = [0u8; 32];
                hex::decode_to_slice(hex, &mut hash).map_err(|_| invalid())?;
                return Ok(BlockId::Hash(hash));
            }
            if hex.is_empty() {
                return Err(invalid());
            }
            let n = u64::from_str_radix(hex, 16).map_err(|_| invalid())?;
            return Ok(BlockId::Number(n));
        }

        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        s.parse::<u64>().map(BlockId::Number).map_err(|_| invalid())
    }
}

/// Heights are written as JSON numbers, tags and hashes as strings.
impl Serialize for BlockId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            BlockId::Number(n) => serializer.serialize_u64(*n),
            other => serializer.serialize_str(&other.to_string()),
        }
    }
}
