//! Baseline strategy: passes the bidding, plays a uniformly random
//! legal card. Seeded so runs are reproducible.

use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::ai::{legal_plays, AiStrategy};
use crate::domain::rules::rest_size;
use crate::domain::state::{Phase, RoomState};
use crate::protocol::ActionMessage;

pub struct RandomMan {
    rng: Mutex<StdRng>,
}

impl RandomMan {
    pub const NAME: &'static str = "random";

    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl AiStrategy for RandomMan {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn propose(&self, state: &RoomState, user_id: i64) -> Option<ActionMessage> {
        match state.phase {
            Phase::Declare => {
                if state.passed.contains(&user_id) || state.is_napoleon(user_id) {
                    return None;
                }
                Some(ActionMessage::Pass)
            }
            // Reachable only if this seat somehow became napoleon; pick
            // an arbitrary partner card and shed random cards.
            Phase::Adjutant => {
                if !state.is_napoleon(user_id) {
                    return None;
                }
                let hand = &state.player(user_id)?.hand;
                let adjutant = crate::domain::cards::from_codes(
                    &(1..=54u8).collect::<Vec<_>>(),
                )
                .ok()?
                .into_iter()
                .find(|c| !hand.contains(c))?;
                Some(ActionMessage::Adjutant { adjutant })
            }
            Phase::Discard => {
                if !state.is_napoleon(user_id) {
                    return None;
                }
                let count = rest_size(state.players.len()).ok()?;
                let mut hand = state.player(user_id)?.hand.clone();
                let mut rng = self.rng.lock();
                let mut unused = Vec::with_capacity(count);
                for _ in 0..count.min(hand.len()) {
                    let idx = rng.gen_range(0..hand.len());
                    unused.push(hand.remove(idx));
                }
                Some(ActionMessage::Discard { unused })
            }
            Phase::FirstRound | Phase::Rounds => {
                if state.turn != Some(user_id) {
                    return None;
                }
                let possible = legal_plays(state, user_id);
                if possible.is_empty() {
                    return None;
                }
                let idx = self.rng.lock().gen_range(0..possible.len());
                Some(ActionMessage::Select {
                    selected: possible[idx],
                })
            }
            Phase::Init | Phase::Finished => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cards::{Card, Suit};
    use crate::domain::declaration::Declaration;
    use crate::domain::state::PlayerState;

    fn trick_state() -> RoomState {
        let mut st = RoomState::new(1);
        st.players = vec![PlayerState::new(10, true), PlayerState::new(20, false)];
        st.phase = Phase::Rounds;
        st.declaration = Declaration::new(3, Suit::Spade).ok();
        st.turn = Some(10);
        st.board = vec![Card::plain(5, Suit::Club).unwrap()];
        st.player_mut(10).unwrap().hand = vec![
            Card::plain(7, Suit::Club).unwrap(),
            Card::plain(9, Suit::Heart).unwrap(),
        ];
        // Seat 10 did not lead; someone else's card opened the trick.
        st.player_cards.insert(20, Card::plain(5, Suit::Club).unwrap());
        st
    }

    #[test]
    fn passes_in_bidding_once() {
        let ai = RandomMan::new(7);
        let mut st = trick_state();
        st.phase = Phase::Declare;
        assert_eq!(ai.propose(&st, 10), Some(ActionMessage::Pass));
        st.passed.insert(10);
        assert_eq!(ai.propose(&st, 10), None);
    }

    #[test]
    fn plays_only_legal_cards() {
        let ai = RandomMan::new(7);
        let st = trick_state();
        // Must follow clubs.
        for _ in 0..20 {
            match ai.propose(&st, 10) {
                Some(ActionMessage::Select { selected }) => {
                    assert_eq!(selected, Card::plain(7, Suit::Club).unwrap());
                }
                other => panic!("unexpected proposal {other:?}"),
            }
        }
    }

    #[test]
    fn silent_off_turn() {
        let ai = RandomMan::new(7);
        let mut st = trick_state();
        st.turn = Some(20);
        assert_eq!(ai.propose(&st, 10), None);
    }

    #[test]
    fn same_seed_same_choices() {
        let mut st = trick_state();
        st.board.clear();
        st.player_cards.clear();
        let picks = |seed| {
            let ai = RandomMan::new(seed);
            (0..10).map(|_| ai.propose(&st, 10)).collect::<Vec<_>>()
        };
        assert_eq!(picks(42), picks(42));
    }
}
