//! Deck construction and dealing.

use rand::prelude::*;

use crate::domain::cards::{Card, Joker, PlainCard, Suit};
use crate::domain::rules::{rest_size, DECK_SIZE};
use crate::errors::domain::DomainError;

/// The full 54-card deck in code order.
pub fn full_deck() -> Vec<Card> {
    let mut deck = Vec::with_capacity(DECK_SIZE);
    for pip in 1..=13u8 {
        for suit in Suit::ALL {
            deck.push(Card::Plain(PlainCard { pip, suit }));
        }
    }
    deck.push(Card::Joker(Joker::Red));
    deck.push(Card::Joker(Joker::Black));
    deck
}

/// Shuffle and split the deck: one sorted hand per player plus the
/// withheld rest that the napoleon later picks up.
pub fn deal<R: Rng>(
    player_count: usize,
    rng: &mut R,
) -> Result<(Vec<Vec<Card>>, Vec<Card>), DomainError> {
    let rest_len = rest_size(player_count)?;
    let per_player = (DECK_SIZE - rest_len) / player_count;

    let mut deck = full_deck();
    deck.shuffle(rng);

    let mut rest: Vec<Card> = deck[..rest_len].to_vec();
    rest.sort();

    let mut hands = Vec::with_capacity(player_count);
    for i in 0..player_count {
        let start = rest_len + i * per_player;
        let mut hand = deck[start..start + per_player].to_vec();
        hand.sort();
        hands.push(hand);
    }

    Ok((hands, rest))
}
