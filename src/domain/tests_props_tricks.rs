//! Property tests for trick resolution and play legality.

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::domain::cards::{Card, ALMIGHTY, QUEEN_OF_HEARTS};
use crate::domain::tricks::{decide, possible_cards};
use crate::domain::{dealing, Suit};

fn shuffled(seed: u64) -> Vec<Card> {
    let mut deck = dealing::full_deck();
    deck.shuffle(&mut StdRng::seed_from_u64(seed));
    deck
}

fn trump(idx: u8) -> Suit {
    Suit::from_index(idx).unwrap()
}

proptest! {
    #[test]
    fn the_winner_was_actually_played(
        seed in any::<u64>(),
        n in 3usize..=8,
        trump_idx in 1u8..=4,
        first in any::<bool>(),
    ) {
        let board = shuffled(seed)[..n].to_vec();
        let winning = decide(&board, trump(trump_idx), first);
        prop_assert!(winning.is_some_and(|c| board.contains(&c)));
    }

    #[test]
    fn legal_plays_are_held_and_never_empty(
        seed in any::<u64>(),
        board_len in 1usize..=7,
        hand_len in 1usize..=16,
        trump_idx in 1u8..=4,
    ) {
        let deck = shuffled(seed);
        let board = deck[..board_len].to_vec();
        let hand = deck[board_len..board_len + hand_len].to_vec();
        let legal = possible_cards(&board, &hand, trump(trump_idx));
        prop_assert!(!legal.is_empty());
        prop_assert!(legal.iter().all(|c| hand.contains(c)));
    }

    #[test]
    fn following_is_forced_when_possible(
        seed in any::<u64>(),
        board_len in 1usize..=7,
        hand_len in 1usize..=16,
        trump_idx in 1u8..=4,
    ) {
        let deck = shuffled(seed);
        let board = deck[..board_len].to_vec();
        let hand = deck[board_len..board_len + hand_len].to_vec();
        let t = trump(trump_idx);

        let Some(lead_suit) = board[0].suit() else { return Ok(()) };
        if board[0] == crate::domain::cards::CLUB_THREE && hand.iter().any(|c| c.is_joker()) {
            return Ok(());
        }
        if !hand.iter().any(|c| c.suit() == Some(lead_suit)) {
            return Ok(());
        }
        let counter = Card::counter_jack(t);
        for card in possible_cards(&board, &hand, t) {
            prop_assert!(
                card.suit() == Some(lead_suit) || card.is_joker() || card == counter,
                "{card} escapes a followable {lead_suit} lead"
            );
        }
    }

    #[test]
    fn the_almighty_loses_only_to_the_queen(
        seed in any::<u64>(),
        n in 3usize..=8,
        trump_idx in 1u8..=4,
        first in any::<bool>(),
    ) {
        let others: Vec<Card> = shuffled(seed)
            .into_iter()
            .filter(|c| *c != ALMIGHTY && *c != QUEEN_OF_HEARTS)
            .collect();

        let mut board = others[..n - 1].to_vec();
        board.push(ALMIGHTY);
        prop_assert_eq!(decide(&board, trump(trump_idx), first), Some(ALMIGHTY));

        let mut board = others[..n - 2].to_vec();
        board.push(ALMIGHTY);
        board.push(QUEEN_OF_HEARTS);
        prop_assert_eq!(
            decide(&board, trump(trump_idx), first),
            Some(QUEEN_OF_HEARTS)
        );
    }

    #[test]
    fn dealing_partitions_the_deck(
        seed in any::<u64>(),
        n in 3usize..=8,
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let (hands, rest) = dealing::deal(n, &mut rng).unwrap();
        let mut all: Vec<Card> = hands.into_iter().flatten().collect();
        all.extend(rest);
        all.sort();
        prop_assert_eq!(all, dealing::full_deck());
    }
}
