//! AI turn driving.
//!
//! After every human action the coordinator scans the seats in order,
//! lets the first AI with something to do act through the same
//! apply/flush path as a human message, and repeats until no AI wants
//! to move. Loop-based rather than recursive; a full AI round of
//! tricks is a long chain.

use tracing::{debug, warn};

use super::{dispatch, GameFlowService};
use crate::ai;
use crate::domain::state::{Phase, RoomState};
use crate::errors::domain::DomainError;
use crate::protocol::ActionMessage;
use crate::repos::{rooms, sessions};
use crate::services::game_flow::Broadcaster;

impl GameFlowService {
    pub(super) async fn run_ai_turns(
        &self,
        room_id: i64,
        broadcaster: &dyn Broadcaster,
    ) -> Result<(), DomainError> {
        loop {
            let state = rooms::load(self.store(), room_id).await?;
            if matches!(state.phase, Phase::Init | Phase::Finished) {
                return Ok(());
            }

            let Some((user_id, action)) = self.next_ai_proposal(&state, room_id).await? else {
                return Ok(());
            };
            debug!(room_id, user_id, action = %action.kind(), "ai acting");

            // Pacing so humans can follow the play.
            tokio::time::sleep(self.config.ai_pacing).await;

            let mut state = rooms::load(self.store(), room_id).await?;
            if let Err(e) = self.apply_action(&mut state, user_id, &action) {
                if e.is_client_fault() {
                    // A buggy strategy must not wedge the room.
                    warn!(room_id, user_id, error = %e, "ai proposed an illegal action");
                    return Ok(());
                }
                return Err(e);
            }
            state.phase = dispatch::next_phase(&state);
            rooms::save(self.store(), &state).await?;
            if let Some(ttl) = self.config.room_ttl {
                rooms::expire_room(self.store(), &state, ttl.as_secs()).await?;
            }
            self.broadcast_state(&state, broadcaster).await?;
        }
    }

    /// First seat, in seating order, whose strategy wants to act.
    async fn next_ai_proposal(
        &self,
        state: &RoomState,
        room_id: i64,
    ) -> Result<Option<(i64, ActionMessage)>, DomainError> {
        for player in state.players.iter().filter(|p| p.is_ai) {
            let name = sessions::ai_name(self.store(), room_id, player.user_id)
                .await?
                .unwrap_or_else(|| ai::DEFAULT_STRATEGY.to_string());
            let Some(strategy) = ai::by_name(&name, self.ai_seed(state, player.user_id)) else {
                warn!(room_id, user_id = player.user_id, name, "unknown ai strategy");
                continue;
            };
            if let Some(action) = strategy.propose(state, player.user_id) {
                return Ok(Some((player.user_id, action)));
            }
        }
        Ok(None)
    }

    /// Deterministic per-decision seed: same room, seat, and progress
    /// give the same choice, so replays reproduce.
    fn ai_seed(&self, state: &RoomState, user_id: i64) -> u64 {
        let progress: u64 = state
            .players
            .iter()
            .map(|p| p.hand.len() as u64)
            .sum::<u64>()
            + state.passed.len() as u64;
        (state.room_id as u64)
            .wrapping_mul(0x9e37_79b9_7f4a_7c15)
            .wrapping_add(user_id as u64)
            .rotate_left(17)
            .wrapping_add(progress)
    }
}
