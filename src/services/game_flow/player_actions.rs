//! Per-action mutation of the room aggregate.

use tracing::info;

use super::{dispatch, GameFlowService};
use crate::domain::rules::PLAYER_RANGE;
use crate::domain::state::RoomState;
use crate::errors::domain::DomainError;
use crate::protocol::ActionMessage;

impl GameFlowService {
    /// Apply one action to the aggregate. Gating and turn ownership are
    /// enforced here; game legality inside an action is enforced by the
    /// aggregate's mutators. The caller recomputes the phase and
    /// flushes afterwards.
    pub(super) fn apply_action(
        &self,
        state: &mut RoomState,
        user_id: i64,
        action: &ActionMessage,
    ) -> Result<(), DomainError> {
        let kind = action.kind();
        if !dispatch::is_allowed(state.phase, kind) {
            return Err(DomainError::illegal_move(format!(
                "action {kind} not accepted in phase {}",
                state.phase.as_str()
            )));
        }
        if state.player(user_id).is_none() {
            return Err(DomainError::illegal_move(format!(
                "user {user_id} is not seated in room {}",
                state.room_id
            )));
        }

        match action {
            ActionMessage::Start => {
                if !PLAYER_RANGE.contains(&state.players.len()) {
                    return Err(DomainError::illegal_move(format!(
                        "cannot start with {} players",
                        state.players.len()
                    )));
                }
                let mut rng = self.rng.lock();
                state.deal_new_round(&mut *rng)?;
                info!(
                    room_id = state.room_id,
                    players = state.players.len(),
                    "round dealt"
                );
                Ok(())
            }
            ActionMessage::Declare { declaration } => {
                if state.passed.contains(&user_id) {
                    return Err(DomainError::illegal_move(
                        "a passed player cannot declare",
                    ));
                }
                state.declare(user_id, *declaration)?;
                info!(
                    room_id = state.room_id,
                    user_id,
                    declaration = %declaration,
                    "declaration accepted"
                );
                Ok(())
            }
            ActionMessage::Pass => state.pass(user_id),
            ActionMessage::Adjutant { adjutant } => {
                state.decide_adjutant(user_id, *adjutant)?;
                info!(room_id = state.room_id, user_id, "adjutant chosen");
                Ok(())
            }
            ActionMessage::Discard { unused } => state.discard(user_id, unused.clone()),
            ActionMessage::Select { selected } => {
                if state.turn != Some(user_id) {
                    return Err(DomainError::illegal_move(format!(
                        "it is not user {user_id}'s turn"
                    )));
                }
                // The previous trick is cleared the moment its winner
                // leads the next one.
                if state.waiting_next_turn {
                    state.next_round();
                }
                state.select(user_id, *selected)?;
                state.advance_turn(user_id)?;
                Ok(())
            }
            // Chat never touches game state.
            ActionMessage::Chat { .. } => Ok(()),
        }
    }
}
