//! Bids: a promised trick count paired with the trump suit.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::domain::cards::Suit;
use crate::errors::domain::DomainError;

/// A bid, card-shaped: `pip` is the number of faced cards the napoleon
/// forces promise to capture (1..=20), `suit` becomes the trump.
/// Strictly totally ordered by pip then suit via the same integer
/// encoding as cards; only a strictly greater declaration may replace
/// the current one.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Declaration {
    pub pip: u8,
    pub suit: Suit,
}

impl Declaration {
    pub fn new(pip: u8, suit: Suit) -> Result<Self, DomainError> {
        if !(1..=20).contains(&pip) {
            return Err(DomainError::integrity(format!(
                "declaration pip must be 1..=20, got {pip}"
            )));
        }
        Ok(Self { pip, suit })
    }

    pub fn code(self) -> u8 {
        self.suit.index() + (self.pip - 1) * 4
    }

    pub fn from_code(code: u8) -> Result<Self, DomainError> {
        if !(1..=80).contains(&code) {
            return Err(DomainError::integrity(format!(
                "bad declaration code {code}"
            )));
        }
        let pip = (code - 1) / 4 + 1;
        let suit = Suit::from_index((code - 1) % 4 + 1)?;
        Ok(Self { pip, suit })
    }

    /// Whether this bid may replace `current`.
    pub fn supersedes(self, current: Option<Declaration>) -> bool {
        match current {
            None => true,
            Some(c) => self > c,
        }
    }
}

impl Ord for Declaration {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.code().cmp(&other.code())
    }
}

impl PartialOrd for Declaration {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Declaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.suit, self.pip)
    }
}

impl Serialize for Declaration {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u8(self.code())
    }
}

impl<'de> Deserialize<'de> for Declaration {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let code = u8::deserialize(deserializer)?;
        Declaration::from_code(code).map_err(|e| serde::de::Error::custom(e.to_string()))
    }
}
