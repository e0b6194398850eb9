//! Trick resolution and legal-play computation.

use std::collections::HashMap;

use crate::domain::cards::{Card, ALMIGHTY, CLUB_THREE, QUEEN_OF_HEARTS};
use crate::domain::Suit;
use crate::errors::domain::DomainError;

fn highest_of_suit(cards: &[Card], suit: Suit) -> Option<Card> {
    cards
        .iter()
        .filter(|c| c.suit() == Some(suit))
        .max_by_key(|c| match c {
            Card::Plain(p) => p.strength(),
            Card::Joker(_) => 0,
        })
        .copied()
}

/// Pick the winning card among the cards of one trick.
///
/// Precedence, strongest first: Almighty (unless the queen of hearts is
/// also on the board, which uniquely beats it), jokers (both present:
/// the one matching the trump color; one present: itself), the right
/// jack, the counter jack, the first-round same-two, the highest trump,
/// and finally the highest card following the lead suit. `cards` must
/// be in play order; the first entry is the lead.
pub fn decide(cards: &[Card], trump: Suit, is_first_round: bool) -> Option<Card> {
    let lead = *cards.first()?;

    if cards.contains(&ALMIGHTY) {
        if cards.contains(&QUEEN_OF_HEARTS) {
            return Some(QUEEN_OF_HEARTS);
        }
        return Some(ALMIGHTY);
    }

    let jokers: Vec<Card> = cards.iter().filter(|c| c.is_joker()).copied().collect();
    match jokers.len() {
        2 => {
            let want_black = trump.is_black();
            return jokers.into_iter().find(|c| {
                matches!(
                    (c, want_black),
                    (Card::Joker(crate::domain::cards::Joker::Black), true)
                        | (Card::Joker(crate::domain::cards::Joker::Red), false)
                )
            });
        }
        1 => return jokers.into_iter().next(),
        _ => {}
    }

    let right = Card::right_jack(trump);
    if cards.contains(&right) {
        return Some(right);
    }
    let counter = Card::counter_jack(trump);
    if cards.contains(&counter) {
        return Some(counter);
    }

    // Same-two: in the first trick only, the two of the lead suit wins
    // when the whole trick followed the lead.
    if is_first_round {
        if let Some(lead_suit) = lead.suit() {
            let two = Card::Plain(crate::domain::cards::PlainCard {
                pip: 2,
                suit: lead_suit,
            });
            if cards.contains(&two) && cards.iter().all(|c| c.suit() == Some(lead_suit)) {
                return Some(two);
            }
        }
    }

    if let Some(best_trump) = highest_of_suit(cards, trump) {
        return Some(best_trump);
    }

    match lead.suit() {
        Some(lead_suit) => highest_of_suit(cards, lead_suit),
        // Joker lead with no other joker and no trump on the board:
        // nothing outranks it, the lead joker takes the trick.
        None => Some(lead),
    }
}

/// Resolve a completed trick to the user id that played the winning
/// card. `player_cards` maps each user to the card they played this
/// trick; a winning card with no owner is a data-integrity failure.
pub fn winner(
    board: &[Card],
    player_cards: &HashMap<i64, Card>,
    trump: Suit,
    is_first_round: bool,
) -> Result<i64, DomainError> {
    let winning = decide(board, trump, is_first_round)
        .ok_or_else(|| DomainError::integrity("cannot resolve an empty trick"))?;
    player_cards
        .iter()
        .find(|(_, c)| **c == winning)
        .map(|(uid, _)| *uid)
        .ok_or_else(|| {
            DomainError::integrity(format!("winning card {winning} has no recorded owner"))
        })
}

/// Legal plays for a hand against the current board.
///
/// Empty board: anything. Club-three lead: a held joker must be played.
/// Otherwise follow the lead suit when possible; jokers and the counter
/// jack are escape valves that are always legal. A hand void in the
/// lead suit may play anything.
pub fn possible_cards(board: &[Card], hand: &[Card], trump: Suit) -> Vec<Card> {
    let Some(lead) = board.first().copied() else {
        return hand.to_vec();
    };

    if lead == CLUB_THREE {
        let jokers: Vec<Card> = hand.iter().filter(|c| c.is_joker()).copied().collect();
        if !jokers.is_empty() {
            return jokers;
        }
    }

    let Some(lead_suit) = lead.suit() else {
        // Joker lead imposes no suit.
        return hand.to_vec();
    };

    let mut legal: Vec<Card> = hand
        .iter()
        .filter(|c| c.suit() == Some(lead_suit))
        .copied()
        .collect();
    if legal.is_empty() {
        return hand.to_vec();
    }

    let counter = Card::counter_jack(trump);
    for card in hand {
        let escape = card.is_joker() || *card == counter;
        if escape && !legal.contains(card) {
            legal.push(*card);
        }
    }
    legal
}
