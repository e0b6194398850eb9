//! Domain layer: pure game logic, no store or transport dependencies.

pub mod cards;
pub mod dealing;
pub mod declaration;
pub mod player_view;
pub mod rules;
pub mod scoring;
pub mod state;
pub mod tricks;

#[cfg(test)]
mod tests_game_flow;
#[cfg(test)]
mod tests_props_tricks;
#[cfg(test)]
mod tests_scoring;

// Re-exports for ergonomics
pub use cards::{Card, Joker, PlainCard, Suit};
pub use declaration::Declaration;
pub use player_view::{PlayerView, RoomSnapshot};
pub use scoring::Outcome;
pub use state::{Phase, PlayerState, Role, RoomState};
