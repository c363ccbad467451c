use serde::{Serialize, Serializer};

type U256 = primitive_types::U256;

/// 256-bit unsigned integer: balances, storage slot indices and storage values.
#[derive(Default, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct Word(U256);

impl std::fmt::Debug for Word {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::LowerHex::fmt(&self.0, f)
    }
}

impl std::fmt::Display for Word {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::LowerHex::fmt(&self.0, f)
    }
}

impl std::fmt::LowerHex for Word {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::LowerHex::fmt(&self.0, f)
    }
}

impl Word {
    pub fn into_bytes(&self) -> [u8; 32] {
        self.0.to_big_endian()
    }

    pub fn zero() -> Self {
        Self(primitive_types::U256::zero())
    }

    pub fn one() -> Self {
        Self(primitive_types::U256::one())
    }

    #[cfg(test)]
    pub fn max() -> Self {
        Self(primitive_types::U256::max_value())
    }

    pub fn from_hex(hex: &str) -> eyre::Result<Self> {
        let hex = hex.strip_prefix("0x").unwrap_or(hex);
        if hex.is_empty() {
            return Ok(Self::zero());
        }
        let word = primitive_types::U256::from_str_radix(hex, 16);
        Ok(Self(
            word.map_err(|_| eyre::eyre!("Invalid U256: '{hex}'."))?,
        ))
    }

    /// Minimal JSON-RPC quantity encoding: `0x0`, `0x1`, `0x2a`.
    pub fn to_quantity(&self) -> String {
        let hex = hex::encode(self.into_bytes());
        let hex = hex.trim_start_matches('0');
        if hex.is_empty() {
            "0x0".to_string()
        } else {
            format!("0x{hex}")
        }
    }

    /// Full 32-byte encoding, the way storage values are returned.
    pub fn to_padded_hex(&self) -> String {
        format!("0x{}", hex::encode(self.into_bytes()))
    }

    /// Decimal rendering, exact for the whole 256-bit range.
    pub fn to_dec_string(&self) -> String {
        self.0.to_string()
    }

    /// Nearest `f64`. Exact up to 2^53.
    pub fn as_f64(&self) -> f64 {
        self.to_dec_string().parse().unwrap_or(f64::INFINITY)
    }
}

impl From<u8> for Word {
    fn from(value: u8) -> Self {
        Self(primitive_types::U256::from(value))
    }
}

impl From<u64> for Word {
    fn from(value: u64) -> Self {
        Self(primitive_types::U256::from(value))
    }
}

impl From<u128> for Word {
    fn from(value: u128) -> Self {
        Self(primitive_types::U256::from(value))
    }
}

impl std::ops::Add<Word> for Word {
    type Output = Word;

    fn add(self, rhs: Word) -> Self::Output {
        Word(self.0 + rhs.0)
    }
}

impl std::ops::Div<Word> for Word {
    type Output = Word;

    fn div(self, rhs: Word) -> Self::Output {
        Word(self.0 / rhs.0)
    }
}

impl std::ops::Rem<Word> for Word {
    type Output = Word;

    fn rem(self, rhs: Word) -> Self::Output {
        Word(self.0 % rhs.0)
    }
}

impl Serialize for Word {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_padded_hex())
    }
}
