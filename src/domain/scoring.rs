//! Win-condition evaluation.

use serde::{Deserialize, Serialize};

use crate::domain::rules::FACE_CARDS;
use crate::domain::state::{Role, RoomState};

/// Exactly one of these holds when the phase reaches Finished.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    NapoleonForcesWin,
    AlliedForcesWin,
    /// Every hand is empty and neither side met its condition.
    HandsExhausted,
}

/// Evaluate the room at a trick boundary. With target `t` (the declared
/// pip), napoleon tally `n` and allied tally `a`:
/// napoleon forces win when `n >= t` short of a clean sweep; the allies
/// win when `a > 20 - t`, or when the napoleon forces sweep all 20
/// faced cards (the clean-sweep rule hands a sweep to the allies).
pub fn evaluate(state: &RoomState) -> Option<Outcome> {
    let Some(declaration) = state.declaration else {
        return state.hands_exhausted().then_some(Outcome::HandsExhausted);
    };

    let n = state.faces_of(Role::NapoleonForces);
    let a = state.faces_of(Role::AlliedForces);
    let target = declaration.pip as u32;

    if n == FACE_CARDS {
        return Some(Outcome::AlliedForcesWin);
    }
    if n >= target {
        return Some(Outcome::NapoleonForcesWin);
    }
    if a > FACE_CARDS - target {
        return Some(Outcome::AlliedForcesWin);
    }
    if state.hands_exhausted() {
        return Some(Outcome::HandsExhausted);
    }
    None
}
