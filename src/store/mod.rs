//! Key-value state store: the trait the engine mutates through, plus
//! the Redis-backed and in-memory implementations.
//!
//! Keys are namespaced `{room_id}_{field}` or `{room_id}_{user_id}_{field}`
//! so unrelated rooms never interfere and a room can be torn down by
//! prefix. Fields are independently readable and writable with no
//! locking; there is no cross-field transaction, and callers must
//! tolerate the read-then-write race window.

mod memory;
mod redis_store;

use std::collections::HashMap;

use async_trait::async_trait;

use crate::errors::domain::DomainError;

pub use memory::MemoryStore;
pub use redis_store::RedisStore;

/// Every field the engine keeps in the store.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Field {
    Phase,
    Napoleon,
    PlayerIds,
    PassIds,
    Declaration,
    Turn,
    Board,
    Adjutant,
    Unused,
    Face,
    PlayerCards,
    WaitingNextTurn,
    Role,
    Rest,
    Hand,
    /// user id → session id hash.
    SessionMap,
    /// user id → "1" hash marking AI seats.
    IsAi,
    /// Per-user registered AI strategy name.
    AiName,
    ChatUserIds,
    ChatMessages,
}

impl Field {
    pub fn as_str(self) -> &'static str {
        match self {
            Field::Phase => "phase",
            Field::Napoleon => "napoleon",
            Field::PlayerIds => "player_ids",
            Field::PassIds => "pass_ids",
            Field::Declaration => "declaration",
            Field::Turn => "turn",
            Field::Board => "board",
            Field::Adjutant => "adjutant",
            Field::Unused => "unused",
            Field::Face => "face",
            Field::PlayerCards => "player_cards",
            Field::WaitingNextTurn => "waiting_next_turn",
            Field::Role => "role",
            Field::Rest => "rest",
            Field::Hand => "hand",
            Field::SessionMap => "map",
            Field::IsAi => "is_ai",
            Field::AiName => "ai_name",
            Field::ChatUserIds => "chat_user_ids",
            Field::ChatMessages => "chat_messages",
        }
    }

    fn user_scoped(self) -> bool {
        matches!(
            self,
            Field::Face | Field::Role | Field::Hand | Field::AiName
        )
    }
}

/// Build the store key for a room-level field.
pub fn room_key(room_id: i64, field: Field) -> String {
    debug_assert!(!field.user_scoped(), "{field:?} needs a user id");
    format!("{room_id}_{}", field.as_str())
}

/// Build the store key for a user-scoped field.
pub fn user_key(room_id: i64, user_id: i64, field: Field) -> String {
    debug_assert!(field.user_scoped(), "{field:?} is room-level");
    format!("{room_id}_{user_id}_{}", field.as_str())
}

/// Typed key-value access the engine is written against. Implementors
/// must keep list order stable (insertion order) and must not retry
/// failures; errors abort the current action.
#[async_trait]
pub trait StateStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, DomainError>;
    async fn set(&self, key: &str, value: &str) -> Result<(), DomainError>;
    async fn delete(&self, key: &str) -> Result<(), DomainError>;

    async fn get_list(&self, key: &str) -> Result<Vec<String>, DomainError>;
    /// Replace the whole list.
    async fn set_list(&self, key: &str, values: &[String]) -> Result<(), DomainError>;
    /// Append one element.
    async fn push_list(&self, key: &str, value: &str) -> Result<(), DomainError>;
    /// Remove all occurrences of one element.
    async fn rem_list(&self, key: &str, value: &str) -> Result<(), DomainError>;

    async fn get_dict(&self, key: &str) -> Result<HashMap<String, String>, DomainError>;
    async fn set_dict(&self, key: &str, field: &str, value: &str) -> Result<(), DomainError>;
    async fn rem_dict(&self, key: &str, field: &str) -> Result<(), DomainError>;

    /// Apply a TTL to every listed key.
    async fn expire(&self, keys: &[String], ttl_secs: u64) -> Result<(), DomainError>;

    /// Delete every key belonging to the room (teardown).
    async fn flush_room(&self, room_id: i64) -> Result<(), DomainError>;
}
