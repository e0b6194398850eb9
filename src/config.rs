//! Runtime configuration from environment variables.

use std::env;
use std::time::Duration;

use crate::errors::domain::DomainError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Redis connection URL.
    pub redis_url: String,
    /// Delay between consecutive AI moves so humans can follow along.
    pub ai_pacing: Duration,
    /// Idle-room TTL refreshed on every action, for rooms that should
    /// evaporate when abandoned (anonymous play). `None` leaves
    /// teardown entirely to the external collaborator.
    pub room_ttl: Option<Duration>,
}

impl EngineConfig {
    pub fn from_env() -> Result<Self, DomainError> {
        Ok(Self {
            redis_url: redis_url(),
            ai_pacing: Duration::from_millis(int_var("AI_PACING_MS", 1000)?),
            room_ttl: opt_secs_var("ROOM_TTL_SECS")?,
        })
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            redis_url: "redis://localhost:6379".to_string(),
            ai_pacing: Duration::from_millis(1000),
            room_ttl: None,
        }
    }
}

/// Redis URL from environment (defaults to a local instance).
fn redis_url() -> String {
    env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string())
}

fn int_var(name: &str, default: u64) -> Result<u64, DomainError> {
    match env::var(name) {
        Err(_) => Ok(default),
        Ok(raw) => raw
            .parse()
            .map_err(|_| DomainError::configuration(format!("{name} must be an integer, got {raw:?}"))),
    }
}

fn opt_secs_var(name: &str) -> Result<Option<Duration>, DomainError> {
    match env::var(name) {
        Err(_) => Ok(None),
        Ok(raw) => raw
            .parse()
            .map(|secs| Some(Duration::from_secs(secs)))
            .map_err(|_| DomainError::configuration(format!("{name} must be an integer, got {raw:?}"))),
    }
}
