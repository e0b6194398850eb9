#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

//! Authoritative state engine for real-time multiplayer Napoleon, the
//! trick-taking card game. Rooms live in a key-value store; inbound
//! actions are validated, applied, and re-broadcast as per-viewer
//! snapshots, with AI seats driven through the same path.

pub mod ai;
pub mod config;
pub mod domain;
pub mod errors;
pub mod protocol;
pub mod repos;
pub mod services;
pub mod store;
pub mod telemetry;

#[cfg(test)]
pub mod test_bootstrap;

// Re-exports for public API
pub use config::EngineConfig;
pub use domain::{
    Card, Declaration, Outcome, Phase, PlayerView, Role, RoomSnapshot, RoomState, Suit,
};
pub use errors::DomainError;
pub use protocol::{ActionMessage, Inbound, Outbound};
pub use services::game_flow::{Broadcaster, GameFlowService};
pub use store::{MemoryStore, RedisStore, StateStore};

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    test_bootstrap::logging::init();
}
