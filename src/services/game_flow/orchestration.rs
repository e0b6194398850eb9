//! Inbound message handling: parse, authenticate, mutate, flush,
//! broadcast, then let AI seats take their turns.

use async_trait::async_trait;
use futures::future::try_join_all;
use tracing::{debug, warn};

use super::{dispatch, GameFlowService};
use crate::domain::player_view::RoomSnapshot;
use crate::errors::domain::DomainError;
use crate::protocol::{ActionMessage, Inbound, Outbound};
use crate::repos::chat::{self, ChatMessage};
use crate::repos::{rooms, sessions};

/// Transport seam. The engine builds one event per viewer; delivering
/// it (websocket, test buffer, ...) is the implementor's business.
///
/// State pushes cover seated players only. A transport carrying
/// spectator connections serves them itself with
/// [`RoomSnapshot::for_viewer`] and a viewer of `None`, which yields
/// the public projection.
#[async_trait]
pub trait Broadcaster: Send + Sync {
    async fn send(&self, room_id: i64, viewer: i64, event: &Outbound)
        -> Result<(), DomainError>;
}

impl GameFlowService {
    /// Entry point for one raw inbound frame.
    ///
    /// Client faults (bad JSON, unknown session, illegal moves) are
    /// logged and dropped without mutating anything; engine and store
    /// faults propagate to the caller.
    pub async fn handle_message(
        &self,
        room_id: i64,
        raw: &str,
        broadcaster: &dyn Broadcaster,
    ) -> Result<(), DomainError> {
        match self.process(room_id, raw, broadcaster).await {
            Ok(()) => Ok(()),
            Err(e) if e.is_client_fault() => {
                warn!(room_id, error = %e, "dropping inbound message");
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    async fn process(
        &self,
        room_id: i64,
        raw: &str,
        broadcaster: &dyn Broadcaster,
    ) -> Result<(), DomainError> {
        let inbound = Inbound::parse(raw)?;
        let user_id =
            sessions::user_id_for_session(self.store(), room_id, &inbound.session_id).await?;
        debug!(room_id, user_id, action = %inbound.action.kind(), "action received");

        if let ActionMessage::Chat { message } = &inbound.action {
            return self.handle_chat(room_id, user_id, message, broadcaster).await;
        }

        let mut state = rooms::load(self.store(), room_id).await?;
        self.apply_action(&mut state, user_id, &inbound.action)?;
        state.phase = dispatch::next_phase(&state);
        rooms::save(self.store(), &state).await?;
        if let Some(ttl) = self.config.room_ttl {
            rooms::expire_room(self.store(), &state, ttl.as_secs()).await?;
        }
        self.broadcast_state(&state, broadcaster).await?;

        self.run_ai_turns(room_id, broadcaster).await
    }

    async fn handle_chat(
        &self,
        room_id: i64,
        user_id: i64,
        message: &str,
        broadcaster: &dyn Broadcaster,
    ) -> Result<(), DomainError> {
        chat::push_message(self.store(), room_id, user_id, message).await?;
        let event = Outbound::Chat(ChatMessage {
            user_id,
            body: message.to_string(),
        });
        let state = rooms::load(self.store(), room_id).await?;
        try_join_all(
            state
                .player_ids()
                .into_iter()
                .map(|viewer| broadcaster.send(room_id, viewer, &event)),
        )
        .await?;
        Ok(())
    }

    /// One privilege-filtered snapshot per seated viewer.
    pub(super) async fn broadcast_state(
        &self,
        state: &crate::domain::state::RoomState,
        broadcaster: &dyn Broadcaster,
    ) -> Result<(), DomainError> {
        let sends = state.player_ids().into_iter().map(|viewer| {
            let snapshot = RoomSnapshot::for_viewer(state, Some(viewer));
            async move {
                broadcaster
                    .send(state.room_id, viewer, &Outbound::State(snapshot))
                    .await
            }
        });
        try_join_all(sends).await?;
        Ok(())
    }
}
