use super::error::EcosystemError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const KIB: u64 = 1024;
const MIB: u64 = 1024 * KIB;
const GIB: u64 = 1024 * MIB;

/// Memory ceiling in pm2 notation (`300M`, `1G`, `512K` or plain bytes).
/// Crossing it makes the supervisor restart the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MemoryLimit {
    bytes: u64,
}

impl MemoryLimit {
    pub fn from_bytes(bytes: u64) -> Self {
        Self { bytes }
    }

    pub fn megabytes(mb: u64) -> Self {
        Self { bytes: mb * MIB }
    }

    pub fn bytes(&self) -> u64 {
        self.bytes
    }
}

impl FromStr for MemoryLimit {
    type Err = EcosystemError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let invalid = || EcosystemError::InvalidMemoryLimit(s.to_string());

        let (digits, unit) = match trimmed.chars().last() {
            Some(c) if c.is_ascii_alphabetic() => (&trimmed[..trimmed.len() - 1], Some(c)),
            Some(_) => (trimmed, None),
            None => return Err(invalid()),
        };

        let value: u64 = digits.trim().parse().map_err(|_| invalid())?;
        let multiplier = match unit.map(|c| c.to_ascii_uppercase()) {
            None => 1,
            Some('K') => KIB,
            Some('M') => MIB,
            Some('G') => GIB,
            Some(_) => return Err(invalid()),
        };

        value
            .checked_mul(multiplier)
            .map(Self::from_bytes)
            .ok_or_else(invalid)
    }
}

impl TryFrom<String> for MemoryLimit {
    type Error = EcosystemError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<MemoryLimit> for String {
    fn from(limit: MemoryLimit) -> Self {
        limit.to_string()
    }
}

impl fmt::Display for MemoryLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let b = self.bytes;
        if b != 0 && b % GIB == 0 {
            write!(f, "{}G", b / GIB)
        } else if b != 0 && b % MIB == 0 {
            write!(f, "{}M", b / MIB)
        } else if b != 0 && b % KIB == 0 {
            write!(f, "{}K", b / KIB)
        } else {
            write!(f, "{}", b)
        }
    }
}
