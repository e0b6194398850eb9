use std::ops::RangeInclusive;

use crate::errors::domain::DomainError;

/// 52 plain cards plus two jokers.
pub const DECK_SIZE: usize = 54;

/// 10, J, Q, K, A of each suit.
pub const FACE_CARDS: u32 = 20;

pub const PLAYER_RANGE: RangeInclusive<usize> = 3..=8;

/// Cards withheld from the deal, by player count. Hand size per player
/// is (54 - rest) / n, exactly divisible for every entry.
const REST: [(usize, usize); 6] = [(3, 6), (4, 6), (5, 4), (6, 6), (7, 5), (8, 6)];

pub fn rest_size(player_count: usize) -> Result<usize, DomainError> {
    REST.iter()
        .find(|(n, _)| *n == player_count)
        .map(|(_, rest)| *rest)
        .ok_or_else(|| {
            DomainError::configuration(format!(
                "player count must be in {PLAYER_RANGE:?}, got {player_count}"
            ))
        })
}

pub fn hand_size(player_count: usize) -> Result<usize, DomainError> {
    let rest = rest_size(player_count)?;
    Ok((DECK_SIZE - rest) / player_count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rest_table_is_exact() {
        let expected = [(3, 6), (4, 6), (5, 4), (6, 6), (7, 5), (8, 6)];
        for (n, rest) in expected {
            assert_eq!(rest_size(n).unwrap(), rest);
            // Hands divide evenly once the rest is withheld.
            assert_eq!((DECK_SIZE - rest) % n, 0);
        }
        assert!(rest_size(2).is_err());
        assert!(rest_size(9).is_err());
    }

    #[test]
    fn hand_sizes() {
        assert_eq!(hand_size(3).unwrap(), 16);
        assert_eq!(hand_size(5).unwrap(), 10);
        assert_eq!(hand_size(8).unwrap(), 6);
    }
}
