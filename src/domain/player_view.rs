//! Privilege-filtered projections of room state.
//!
//! Every exposed field and its visibility rule is listed explicitly
//! here; one snapshot is built per connected viewer because visibility
//! differs per viewer. A viewer of `None` is a spectator and sees only
//! public state.

use serde::{Deserialize, Serialize};

use crate::domain::cards::Card;
use crate::domain::declaration::Declaration;
use crate::domain::scoring::{self, Outcome};
use crate::domain::state::{Phase, PlayerState, Role, RoomState};

/// One seat as seen by a particular viewer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerView {
    pub user_id: i64,
    pub number_of_hand: usize,
    pub face: u32,
    pub is_ai: bool,
    pub is_passed: bool,
    pub is_napoleon: bool,
    /// The card this player put on the current trick. Public.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_card: Option<Card>,
    /// Owner-only until the game finishes, then public.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    /// Owner-only.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub hand: Vec<Card>,
    /// Owner-only.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub possible_cards: Vec<Card>,
}

/// Per-viewer broadcast payload.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoomSnapshot {
    pub room_id: i64,
    pub phase: Phase,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub turn: Option<i64>,
    pub board: Vec<Card>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub declaration: Option<Declaration>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub napoleon: Option<i64>,
    /// Secret partner card; napoleon-only until the game finishes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adjutant: Option<Card>,
    /// Withheld cards; napoleon-only, and only while discarding.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rest: Vec<Card>,
    /// Napoleon sees all discards; during the first trick everyone
    /// sees the faced ones (they join the first trick's tally).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unused: Vec<Card>,
    pub waiting_next_turn: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<Outcome>,
    pub players: Vec<PlayerView>,
}

fn view_player(state: &RoomState, player: &PlayerState, viewer: Option<i64>) -> PlayerView {
    let is_owner = viewer == Some(player.user_id);
    let finished = state.phase == Phase::Finished;
    PlayerView {
        user_id: player.user_id,
        number_of_hand: player.hand.len(),
        face: player.face,
        is_ai: player.is_ai,
        is_passed: state.passed.contains(&player.user_id),
        is_napoleon: state.is_napoleon(player.user_id),
        current_card: state.player_cards.get(&player.user_id).copied(),
        role: if is_owner || finished { player.role } else { None },
        hand: if is_owner {
            player.hand.clone()
        } else {
            Vec::new()
        },
        possible_cards: if is_owner {
            state.possible_cards_for(player.user_id)
        } else {
            Vec::new()
        },
    }
}

impl RoomSnapshot {
    pub fn for_viewer(state: &RoomState, viewer: Option<i64>) -> Self {
        let finished = state.phase == Phase::Finished;
        let viewer_is_napoleon =
            viewer.is_some() && state.napoleon.is_some() && viewer == state.napoleon;

        let rest = if viewer_is_napoleon && state.phase == Phase::Discard {
            state.rest.clone()
        } else {
            Vec::new()
        };

        let unused = if viewer_is_napoleon {
            state.unused.clone()
        } else if state.phase == Phase::FirstRound {
            state.unused.iter().filter(|c| c.is_faced()).copied().collect()
        } else {
            Vec::new()
        };

        let adjutant = if viewer_is_napoleon || finished {
            state.adjutant
        } else {
            None
        };

        RoomSnapshot {
            room_id: state.room_id,
            phase: state.phase,
            turn: state.turn,
            board: state.board.clone(),
            declaration: state.declaration,
            napoleon: state.napoleon,
            adjutant,
            rest,
            unused,
            waiting_next_turn: state.waiting_next_turn,
            outcome: scoring::evaluate(state).filter(|_| finished),
            players: state
                .players
                .iter()
                .map(|p| view_player(state, p, viewer))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cards::{Suit, ALMIGHTY};
    use crate::domain::state::PlayerState;

    fn sample_state() -> RoomState {
        let mut st = RoomState::new(7);
        st.players = vec![
            PlayerState::new(10, false),
            PlayerState::new(20, false),
            PlayerState::new(30, true),
        ];
        st.phase = Phase::Discard;
        st.napoleon = Some(10);
        st.declaration = Declaration::new(4, Suit::Club).ok();
        st.adjutant = Some(ALMIGHTY);
        st.rest = vec![Card::from_code(12).unwrap()];
        st.player_mut(10).unwrap().hand = vec![Card::from_code(5).unwrap()];
        st.player_mut(10).unwrap().role = Some(Role::NapoleonForces);
        st.player_mut(20).unwrap().hand = vec![Card::from_code(6).unwrap()];
        st.player_mut(20).unwrap().role = Some(Role::AlliedForces);
        st
    }

    #[test]
    fn hand_is_owner_only() {
        let st = sample_state();
        let own = RoomSnapshot::for_viewer(&st, Some(20));
        let other = RoomSnapshot::for_viewer(&st, Some(10));
        let me = own.players.iter().find(|p| p.user_id == 20).unwrap();
        assert_eq!(me.number_of_hand, 1);
        assert!(!me.hand.is_empty());
        let them = other.players.iter().find(|p| p.user_id == 20).unwrap();
        assert!(them.hand.is_empty());
        assert_eq!(them.number_of_hand, 1);
    }

    #[test]
    fn rest_and_adjutant_are_napoleon_only() {
        let st = sample_state();
        let napoleon = RoomSnapshot::for_viewer(&st, Some(10));
        assert!(!napoleon.rest.is_empty());
        assert_eq!(napoleon.adjutant, Some(ALMIGHTY));

        let ally = RoomSnapshot::for_viewer(&st, Some(20));
        assert!(ally.rest.is_empty());
        assert!(ally.adjutant.is_none());

        let spectator = RoomSnapshot::for_viewer(&st, None);
        assert!(spectator.rest.is_empty());
        assert!(spectator.adjutant.is_none());
    }

    #[test]
    fn role_becomes_public_when_finished() {
        let mut st = sample_state();
        let hidden = RoomSnapshot::for_viewer(&st, Some(10));
        let p20 = hidden.players.iter().find(|p| p.user_id == 20).unwrap();
        assert!(p20.role.is_none());

        st.phase = Phase::Finished;
        let open = RoomSnapshot::for_viewer(&st, Some(10));
        let p20 = open.players.iter().find(|p| p.user_id == 20).unwrap();
        assert_eq!(p20.role, Some(Role::AlliedForces));
        // Everyone, including spectators.
        let spectator = RoomSnapshot::for_viewer(&st, None);
        assert!(spectator
            .players
            .iter()
            .all(|p| p.role.is_some() || p.user_id == 30));
    }

    #[test]
    fn first_round_exposes_faced_discards_to_everyone() {
        let mut st = sample_state();
        st.phase = Phase::FirstRound;
        st.unused = vec![
            Card::plain(13, Suit::Diamond).unwrap(),
            Card::plain(4, Suit::Diamond).unwrap(),
        ];
        let ally = RoomSnapshot::for_viewer(&st, Some(20));
        assert_eq!(ally.unused, vec![Card::plain(13, Suit::Diamond).unwrap()]);
        let napoleon = RoomSnapshot::for_viewer(&st, Some(10));
        assert_eq!(napoleon.unused.len(), 2);
    }

    #[test]
    fn snapshot_serializes_cards_as_codes() {
        let st = sample_state();
        let snap = RoomSnapshot::for_viewer(&st, Some(10));
        let json = serde_json::to_value(&snap).unwrap();
        assert_eq!(json["phase"], "discard");
        assert_eq!(json["adjutant"], 4);
    }
}
