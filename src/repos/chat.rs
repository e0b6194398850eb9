//! Room chat log: two parallel lists, sender ids and message bodies.

use serde::{Deserialize, Serialize};

use crate::errors::domain::DomainError;
use crate::store::{room_key, Field, StateStore};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub user_id: i64,
    pub body: String,
}

pub async fn push_message(
    store: &dyn StateStore,
    room_id: i64,
    user_id: i64,
    body: &str,
) -> Result<(), DomainError> {
    store
        .push_list(&room_key(room_id, Field::ChatUserIds), &user_id.to_string())
        .await?;
    store
        .push_list(&room_key(room_id, Field::ChatMessages), body)
        .await
}

/// The whole log in send order.
pub async fn history(
    store: &dyn StateStore,
    room_id: i64,
) -> Result<Vec<ChatMessage>, DomainError> {
    let ids = store.get_list(&room_key(room_id, Field::ChatUserIds)).await?;
    let bodies = store
        .get_list(&room_key(room_id, Field::ChatMessages))
        .await?;
    if ids.len() != bodies.len() {
        return Err(DomainError::integrity(format!(
            "chat lists out of sync in room {room_id}"
        )));
    }
    ids.iter()
        .zip(bodies)
        .map(|(uid, body)| {
            Ok(ChatMessage {
                user_id: uid
                    .parse()
                    .map_err(|_| DomainError::integrity(format!("bad stored id {uid:?}")))?,
                body,
            })
        })
        .collect()
}
