//! Static strategy registry. Strategies are registered by name here;
//! the roster stores the name and the coordinator rebuilds the
//! strategy per turn.

use crate::ai::random::RandomMan;
use crate::ai::taro::Taro;
use crate::ai::AiStrategy;

pub struct AiFactory {
    pub name: &'static str,
    pub build: fn(seed: u64) -> Box<dyn AiStrategy>,
}

pub static FACTORIES: &[AiFactory] = &[
    AiFactory {
        name: RandomMan::NAME,
        build: |seed| Box::new(RandomMan::new(seed)),
    },
    AiFactory {
        name: Taro::NAME,
        build: |_| Box::new(Taro),
    },
];

pub const DEFAULT_STRATEGY: &str = RandomMan::NAME;

pub fn by_name(name: &str, seed: u64) -> Option<Box<dyn AiStrategy>> {
    FACTORIES
        .iter()
        .find(|f| f.name == name)
        .map(|f| (f.build)(seed))
}
