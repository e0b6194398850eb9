//! Wire messages. JSON in both directions; cards, declarations, and
//! roles travel as their integer codes.

use serde::{Deserialize, Serialize};

use crate::domain::cards::Card;
use crate::domain::declaration::Declaration;
use crate::domain::player_view::RoomSnapshot;
use crate::errors::domain::DomainError;
use crate::repos::chat::ChatMessage;

/// One inbound frame. The session id authenticates the sender; the
/// action payload is flattened alongside it:
/// `{"session_id":"s1","action":"select","selected":37}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Inbound {
    pub session_id: String,
    #[serde(flatten)]
    pub action: ActionMessage,
}

impl Inbound {
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        serde_json::from_str(raw).map_err(|e| DomainError::malformed(e.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ActionMessage {
    /// Deal and open bidding. Also restarts after an all-pass round.
    Start,
    Declare { declaration: Declaration },
    Pass,
    Adjutant { adjutant: Card },
    Discard { unused: Vec<Card> },
    Select { selected: Card },
    Chat { message: String },
}

/// Action discriminant, used for phase gating.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum ActionKind {
    Start,
    Declare,
    Pass,
    Adjutant,
    Discard,
    Select,
    Chat,
}

impl ActionMessage {
    pub fn kind(&self) -> ActionKind {
        match self {
            ActionMessage::Start => ActionKind::Start,
            ActionMessage::Declare { .. } => ActionKind::Declare,
            ActionMessage::Pass => ActionKind::Pass,
            ActionMessage::Adjutant { .. } => ActionKind::Adjutant,
            ActionMessage::Discard { .. } => ActionKind::Discard,
            ActionMessage::Select { .. } => ActionKind::Select,
            ActionMessage::Chat { .. } => ActionKind::Chat,
        }
    }
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ActionKind::Start => "start",
            ActionKind::Declare => "declare",
            ActionKind::Pass => "pass",
            ActionKind::Adjutant => "adjutant",
            ActionKind::Discard => "discard",
            ActionKind::Select => "select",
            ActionKind::Chat => "chat",
        };
        f.write_str(s)
    }
}

/// One outbound frame. Snapshots differ per viewer; chat is identical
/// for everyone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Outbound {
    State(RoomSnapshot),
    Chat(ChatMessage),
}
