//! Deterministic heuristic strategy.
//!
//! Taro passes the bidding, sheds weak cards, and keeps the secret
//! partner card in hand as long as an alternative exists so its side
//! is not revealed early.

use crate::ai::{legal_plays, AiStrategy};
use crate::domain::cards::Card;
use crate::domain::rules::rest_size;
use crate::domain::state::{Phase, RoomState};
use crate::protocol::ActionMessage;

pub struct Taro;

impl Taro {
    pub const NAME: &'static str = "taro";

    /// Throwaway value: low pips first, faced cards and jokers last.
    fn throwaway_rank(card: Card) -> u8 {
        match card {
            Card::Joker(_) => 60,
            Card::Plain(c) if c.is_faced() => 40 + c.strength(),
            Card::Plain(c) => c.strength(),
        }
    }

    fn pick(&self, state: &RoomState, mut possible: Vec<Card>) -> Option<Card> {
        if possible.is_empty() {
            return None;
        }
        possible.sort_by_key(|&c| Self::throwaway_rank(c));
        // Hold the adjutant card back if anything else is legal.
        if let Some(adjutant) = state.adjutant {
            if possible.len() > 1 {
                possible.retain(|&c| c != adjutant);
            }
        }
        possible.first().copied()
    }
}

impl AiStrategy for Taro {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn propose(&self, state: &RoomState, user_id: i64) -> Option<ActionMessage> {
        match state.phase {
            Phase::Declare => {
                if state.passed.contains(&user_id) || state.is_napoleon(user_id) {
                    return None;
                }
                Some(ActionMessage::Pass)
            }
            Phase::Adjutant => {
                if !state.is_napoleon(user_id) {
                    return None;
                }
                let hand = &state.player(user_id)?.hand;
                let adjutant = crate::domain::cards::from_codes(
                    &(1..=54u8).collect::<Vec<_>>(),
                )
                .ok()?
                .into_iter()
                .find(|c| !hand.contains(c))?;
                Some(ActionMessage::Adjutant { adjutant })
            }
            Phase::Discard => {
                if !state.is_napoleon(user_id) {
                    return None;
                }
                let count = rest_size(state.players.len()).ok()?;
                let mut hand = state.player(user_id)?.hand.clone();
                hand.sort_by_key(|&c| Self::throwaway_rank(c));
                hand.truncate(count);
                Some(ActionMessage::Discard { unused: hand })
            }
            Phase::FirstRound | Phase::Rounds => {
                if state.turn != Some(user_id) {
                    return None;
                }
                let selected = self.pick(state, legal_plays(state, user_id))?;
                Some(ActionMessage::Select { selected })
            }
            Phase::Init | Phase::Finished => None,
        }
    }
}
