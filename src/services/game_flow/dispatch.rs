//! Static phase gating and phase progression.
//!
//! `GATE` is the single source of truth for which action each phase
//! accepts; `next_phase` is a pure function of the post-mutation state,
//! so a transition can never depend on which action ran, only on what
//! the state now says.

use crate::domain::rules::rest_size;
use crate::domain::scoring;
use crate::domain::state::{Phase, RoomState};
use crate::protocol::ActionKind;

const GATE: &[(Phase, ActionKind)] = &[
    (Phase::Init, ActionKind::Start),
    (Phase::Declare, ActionKind::Declare),
    (Phase::Declare, ActionKind::Pass),
    (Phase::Adjutant, ActionKind::Adjutant),
    (Phase::Discard, ActionKind::Discard),
    (Phase::FirstRound, ActionKind::Select),
    (Phase::Rounds, ActionKind::Select),
    // A finished room can be restarted in place.
    (Phase::Finished, ActionKind::Start),
];

/// Whether `kind` is accepted while the room is in `phase`. Chat is
/// phase-independent.
pub fn is_allowed(phase: Phase, kind: ActionKind) -> bool {
    kind == ActionKind::Chat || GATE.contains(&(phase, kind))
}

/// Compute the phase the room should be in, given its current phase and
/// freshly mutated state.
pub fn next_phase(state: &RoomState) -> Phase {
    match state.phase {
        Phase::Init | Phase::Finished => {
            let dealt = state.players.iter().any(|p| !p.hand.is_empty());
            if dealt && state.declaration.is_none() {
                Phase::Declare
            } else {
                state.phase
            }
        }
        Phase::Declare => {
            if state.all_passed() {
                // Nobody wants the crown; back to the lobby for a restart.
                Phase::Init
            } else if state.napoleon_determined() {
                Phase::Adjutant
            } else {
                Phase::Declare
            }
        }
        Phase::Adjutant => {
            if state.adjutant.is_some() {
                Phase::Discard
            } else {
                Phase::Adjutant
            }
        }
        Phase::Discard => {
            let done = rest_size(state.players.len())
                .map(|expected| state.unused.len() == expected)
                .unwrap_or(false);
            if done {
                Phase::FirstRound
            } else {
                Phase::Discard
            }
        }
        Phase::FirstRound | Phase::Rounds => {
            if !state.waiting_next_turn {
                return state.phase;
            }
            // A resolved trick is the only point a game can end.
            if scoring::evaluate(state).is_some() {
                Phase::Finished
            } else {
                Phase::Rounds
            }
        }
    }
}
