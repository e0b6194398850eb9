//! Game flow orchestration: inbound message handling, phase gating,
//! and AI turn driving over a shared state store.

mod ai_coordinator;
mod dispatch;
mod orchestration;
mod player_actions;

use std::sync::Arc;

use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::EngineConfig;
use crate::store::StateStore;

pub use dispatch::{is_allowed, next_phase};
pub use orchestration::Broadcaster;

pub struct GameFlowService {
    store: Arc<dyn StateStore>,
    config: EngineConfig,
    rng: Mutex<StdRng>,
}

impl GameFlowService {
    pub fn new(store: Arc<dyn StateStore>, config: EngineConfig) -> Self {
        Self {
            store,
            config,
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Seeded constructor so deals are reproducible.
    pub fn with_seed(store: Arc<dyn StateStore>, config: EngineConfig, seed: u64) -> Self {
        Self {
            store,
            config,
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    pub fn store(&self) -> &dyn StateStore {
        self.store.as_ref()
    }
}
