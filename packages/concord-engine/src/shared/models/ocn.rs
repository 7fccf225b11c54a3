use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// OCLC control number.
///
/// Non-negative integer identity of a bibliographic record. Ordering and
/// hashing follow the numeric value, so sorted OCN lists read in natural
/// ascending order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ocn(pub u64);

impl Ocn {
    pub fn new(value: u64) -> Self {
        Ocn(value)
    }

    pub fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for Ocn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for Ocn {
    fn from(value: u64) -> Self {
        Ocn(value)
    }
}

impl FromStr for Ocn {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u64>().map(Ocn)
    }
}

/// Render a list of OCNs as `[1, 2, 3]` for error messages and logs.
pub fn format_ocn_list(ocns: &[Ocn]) -> String {
    let joined = ocns
        .iter()
        .map(|o| o.to_string())
        .collect::<Vec<_>>()
        .join(", ");
    format!("[{joined}]")
}
