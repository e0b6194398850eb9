//! Store access as free async functions over `&dyn StateStore`.

pub mod chat;
pub mod rooms;
pub mod sessions;
