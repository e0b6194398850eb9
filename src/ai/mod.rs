//! Seat-filling strategies.
//!
//! A strategy is a pure decision function over the room state; it never
//! touches the store. The coordinator feeds proposals through the same
//! dispatcher as human messages, so a strategy cannot make an illegal
//! move stick.

pub mod random;
pub mod registry;
pub mod taro;

use crate::domain::state::RoomState;
use crate::protocol::ActionMessage;

pub use registry::{by_name, AiFactory, DEFAULT_STRATEGY, FACTORIES};

pub trait AiStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    /// The action this seat wants to take right now, or `None` when it
    /// is not this seat's moment to act.
    fn propose(&self, state: &RoomState, user_id: i64) -> Option<ActionMessage>;
}

/// Shared gating: what a seat is allowed to decide about in the current
/// phase. Strategies build on this so they all agree on when to act.
pub(crate) fn legal_plays(state: &RoomState, user_id: i64) -> Vec<crate::domain::Card> {
    if state.waiting_next_turn {
        // The resolved trick is about to be cleared; the winner leads
        // from their whole hand.
        return state
            .player(user_id)
            .map(|p| p.hand.clone())
            .unwrap_or_default();
    }
    state.possible_cards_for(user_id)
}
