//! Session-to-user resolution and the AI seat roster.
//!
//! The room keeps a `map` hash of user id → session id. Inbound
//! messages carry only the session id; resolving it is the first step
//! of every action, and an unknown session is rejected before any state
//! is touched.

use crate::errors::domain::DomainError;
use crate::store::{room_key, user_key, Field, StateStore};

/// Resolve a session id to the seated user it belongs to.
pub async fn user_id_for_session(
    store: &dyn StateStore,
    room_id: i64,
    session_id: &str,
) -> Result<i64, DomainError> {
    let map = store.get_dict(&room_key(room_id, Field::SessionMap)).await?;
    for (uid, sid) in &map {
        if sid == session_id {
            return uid
                .parse()
                .map_err(|_| DomainError::integrity(format!("bad stored id {uid:?}")));
        }
    }
    Err(DomainError::invalid_session(format!(
        "session not registered in room {room_id}"
    )))
}

/// Bind a user's current session. A reconnect overwrites the old
/// session id, which invalidates it.
pub async fn register(
    store: &dyn StateStore,
    room_id: i64,
    user_id: i64,
    session_id: &str,
) -> Result<(), DomainError> {
    store
        .set_dict(
            &room_key(room_id, Field::SessionMap),
            &user_id.to_string(),
            session_id,
        )
        .await
}

pub async fn unregister(
    store: &dyn StateStore,
    room_id: i64,
    user_id: i64,
) -> Result<(), DomainError> {
    store
        .rem_dict(&room_key(room_id, Field::SessionMap), &user_id.to_string())
        .await
}

/// Mark a seat as AI-controlled and record its strategy name. The AI
/// session id is synthesized from the user id so the coordinator can
/// drive the seat through the same dispatcher as a human.
pub async fn register_ai(
    store: &dyn StateStore,
    room_id: i64,
    user_id: i64,
    strategy: &str,
) -> Result<(), DomainError> {
    store
        .set_dict(&room_key(room_id, Field::IsAi), &user_id.to_string(), "1")
        .await?;
    store
        .set(&user_key(room_id, user_id, Field::AiName), strategy)
        .await?;
    register(store, room_id, user_id, &ai_session_id(user_id)).await
}

/// Deterministic session id for an AI seat.
pub fn ai_session_id(user_id: i64) -> String {
    format!("ai:{user_id}")
}

/// AI-controlled user ids, in no particular order.
pub async fn ai_ids(store: &dyn StateStore, room_id: i64) -> Result<Vec<i64>, DomainError> {
    store
        .get_dict(&room_key(room_id, Field::IsAi))
        .await?
        .keys()
        .map(|uid| {
            uid.parse()
                .map_err(|_| DomainError::integrity(format!("bad stored id {uid:?}")))
        })
        .collect()
}

/// Registered strategy name for an AI seat.
pub async fn ai_name(
    store: &dyn StateStore,
    room_id: i64,
    user_id: i64,
) -> Result<Option<String>, DomainError> {
    store.get(&user_key(room_id, user_id, Field::AiName)).await
}
