//! Card, suit, and joker types plus the integer wire encoding.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::domain::DomainError;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Suit {
    Club,
    Diamond,
    Heart,
    Spade,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Club, Suit::Diamond, Suit::Heart, Suit::Spade];

    /// 1-based index used by the wire encoding.
    pub fn index(self) -> u8 {
        match self {
            Suit::Club => 1,
            Suit::Diamond => 2,
            Suit::Heart => 3,
            Suit::Spade => 4,
        }
    }

    pub fn from_index(index: u8) -> Result<Self, DomainError> {
        match index {
            1 => Ok(Suit::Club),
            2 => Ok(Suit::Diamond),
            3 => Ok(Suit::Heart),
            4 => Ok(Suit::Spade),
            other => Err(DomainError::integrity(format!("bad suit index {other}"))),
        }
    }

    /// Same-color counterpart: club↔spade, diamond↔heart.
    pub fn opposite(self) -> Suit {
        match self {
            Suit::Club => Suit::Spade,
            Suit::Spade => Suit::Club,
            Suit::Diamond => Suit::Heart,
            Suit::Heart => Suit::Diamond,
        }
    }

    pub fn is_red(self) -> bool {
        matches!(self, Suit::Diamond | Suit::Heart)
    }

    pub fn is_black(self) -> bool {
        !self.is_red()
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = match self {
            Suit::Club => 'C',
            Suit::Diamond => 'D',
            Suit::Heart => 'H',
            Suit::Spade => 'S',
        };
        write!(f, "{c}")
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Joker {
    Red,
    Black,
}

impl Joker {
    pub fn code(self) -> u8 {
        match self {
            Joker::Red => 53,
            Joker::Black => 54,
        }
    }
}

/// A suited card. `pip` is 1..=13 with 1 = ace; trick strength is
/// ace-high (see `domain::tricks`).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct PlainCard {
    pub pip: u8,
    pub suit: Suit,
}

impl PlainCard {
    /// Faced cards (10, J, Q, K, A) are the ones the win condition
    /// counts; there are exactly 20 in the deck.
    pub fn is_faced(self) -> bool {
        matches!(self.pip, 10..=13 | 1)
    }

    /// Ace-high strength for in-suit comparisons.
    pub fn strength(self) -> u8 {
        if self.pip == 1 {
            14
        } else {
            self.pip
        }
    }
}

/// A deck entry: plain card or joker. Encoded on the wire and in the
/// store as `suit_index + (pip - 1) * 4` (1..=52), jokers 53/54.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Card {
    Plain(PlainCard),
    Joker(Joker),
}

pub const ALMIGHTY: Card = Card::Plain(PlainCard {
    pip: 1,
    suit: Suit::Spade,
});

/// The only card that beats the Almighty, and only when both are played.
pub const QUEEN_OF_HEARTS: Card = Card::Plain(PlainCard {
    pip: 12,
    suit: Suit::Heart,
});

/// Leading this forces joker holders to play a joker.
pub const CLUB_THREE: Card = Card::Plain(PlainCard {
    pip: 3,
    suit: Suit::Club,
});

/// Leading this can flip the player's side (betrayal).
pub const CLUB_TEN: Card = Card::Plain(PlainCard {
    pip: 10,
    suit: Suit::Club,
});

impl Card {
    pub fn plain(pip: u8, suit: Suit) -> Result<Self, DomainError> {
        if !(1..=13).contains(&pip) {
            return Err(DomainError::integrity(format!("bad pip {pip}")));
        }
        Ok(Card::Plain(PlainCard { pip, suit }))
    }

    pub fn code(self) -> u8 {
        match self {
            Card::Plain(c) => c.suit.index() + (c.pip - 1) * 4,
            Card::Joker(j) => j.code(),
        }
    }

    pub fn from_code(code: u8) -> Result<Self, DomainError> {
        match code {
            1..=52 => {
                let pip = (code - 1) / 4 + 1;
                let suit = Suit::from_index((code - 1) % 4 + 1)?;
                Ok(Card::Plain(PlainCard { pip, suit }))
            }
            53 => Ok(Card::Joker(Joker::Red)),
            54 => Ok(Card::Joker(Joker::Black)),
            other => Err(DomainError::integrity(format!("bad card code {other}"))),
        }
    }

    pub fn suit(self) -> Option<Suit> {
        match self {
            Card::Plain(c) => Some(c.suit),
            Card::Joker(_) => None,
        }
    }

    pub fn pip(self) -> Option<u8> {
        match self {
            Card::Plain(c) => Some(c.pip),
            Card::Joker(_) => None,
        }
    }

    pub fn is_joker(self) -> bool {
        matches!(self, Card::Joker(_))
    }

    pub fn is_faced(self) -> bool {
        match self {
            Card::Plain(c) => c.is_faced(),
            Card::Joker(_) => false,
        }
    }

    /// Jack of the trump suit, the second-strongest elevated card.
    pub fn right_jack(trump: Suit) -> Card {
        Card::Plain(PlainCard {
            pip: 11,
            suit: trump,
        })
    }

    /// Jack of the trump's same-color counterpart suit.
    pub fn counter_jack(trump: Suit) -> Card {
        Card::Plain(PlainCard {
            pip: 11,
            suit: trump.opposite(),
        })
    }
}

// Ord on Card is only for stable storage sorting: pip order then suit
// order, jokers last. Never use it for trick strength.
impl Ord for Card {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.code().cmp(&other.code())
    }
}

impl PartialOrd for Card {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Card::Joker(Joker::Red) => write!(f, "JR"),
            Card::Joker(Joker::Black) => write!(f, "JB"),
            Card::Plain(c) => {
                let pip = match c.pip {
                    1 => "A".to_string(),
                    11 => "J".to_string(),
                    12 => "Q".to_string(),
                    13 => "K".to_string(),
                    n => n.to_string(),
                };
                write!(f, "{}{}", c.suit, pip)
            }
        }
    }
}

impl Serialize for Card {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u8(self.code())
    }
}

impl<'de> Deserialize<'de> for Card {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let code = u8::deserialize(deserializer)?;
        Card::from_code(code).map_err(|e| serde::de::Error::custom(e.to_string()))
    }
}

/// Decode a list of stored card codes.
pub fn from_codes(codes: &[u8]) -> Result<Vec<Card>, DomainError> {
    codes.iter().map(|&c| Card::from_code(c)).collect()
}
