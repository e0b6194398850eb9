//! Room-scoped game state as plain value objects.
//!
//! `RoomState` is hydrated from the store before an action is handled
//! and flushed back afterwards (see `repos::rooms`); nothing here
//! touches the store. Mutators enforce game legality and return
//! `DomainError` on violations.

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use crate::domain::cards::{Card, CLUB_TEN};
use crate::domain::declaration::Declaration;
use crate::domain::rules::rest_size;
use crate::domain::{dealing, tricks, Suit};
use crate::errors::domain::DomainError;

/// Game progression. Each phase has a stable store string form.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Room open, nothing dealt. Stored as "none".
    #[serde(rename = "none")]
    Init,
    /// Players bid to become napoleon.
    Declare,
    /// The napoleon names the secret partner card.
    Adjutant,
    /// The napoleon, holding hand + rest, discards back to size.
    Discard,
    /// The first trick, where the same-two rule and unused faced cards
    /// apply.
    FirstRound,
    /// All remaining tricks.
    Rounds,
    Finished,
}

impl Phase {
    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Init => "none",
            Phase::Declare => "declare",
            Phase::Adjutant => "adjutant",
            Phase::Discard => "discard",
            Phase::FirstRound => "first_round",
            Phase::Rounds => "rounds",
            Phase::Finished => "finished",
        }
    }

    pub fn from_str(s: &str) -> Result<Self, DomainError> {
        match s {
            "none" | "" => Ok(Phase::Init),
            "declare" => Ok(Phase::Declare),
            "adjutant" => Ok(Phase::Adjutant),
            "discard" => Ok(Phase::Discard),
            "first_round" => Ok(Phase::FirstRound),
            "rounds" => Ok(Phase::Rounds),
            "finished" => Ok(Phase::Finished),
            other => Err(DomainError::integrity(format!("bad phase {other:?}"))),
        }
    }

    /// Select is accepted in both trick phases.
    pub fn in_tricks(self) -> bool {
        matches!(self, Phase::FirstRound | Phase::Rounds)
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    NapoleonForces,
    AlliedForces,
}

impl Role {
    pub fn code(self) -> u8 {
        match self {
            Role::NapoleonForces => 1,
            Role::AlliedForces => 2,
        }
    }

    pub fn from_code(code: u8) -> Result<Self, DomainError> {
        match code {
            1 => Ok(Role::NapoleonForces),
            2 => Ok(Role::AlliedForces),
            other => Err(DomainError::integrity(format!("bad role code {other}"))),
        }
    }

    pub fn flipped(self) -> Role {
        match self {
            Role::NapoleonForces => Role::AlliedForces,
            Role::AlliedForces => Role::NapoleonForces,
        }
    }
}

/// One seated player. `hand` stays sorted by card code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerState {
    pub user_id: i64,
    pub hand: Vec<Card>,
    pub face: u32,
    pub role: Option<Role>,
    pub is_ai: bool,
}

impl PlayerState {
    pub fn new(user_id: i64, is_ai: bool) -> Self {
        Self {
            user_id,
            hand: Vec::new(),
            face: 0,
            role: None,
            is_ai,
        }
    }
}

/// The full per-room aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomState {
    pub room_id: i64,
    pub phase: Phase,
    pub napoleon: Option<i64>,
    pub declaration: Option<Declaration>,
    pub adjutant: Option<Card>,
    pub turn: Option<i64>,
    /// Cards of the current trick in play order; first entry is the lead.
    pub board: Vec<Card>,
    /// Who played which card this trick.
    pub player_cards: HashMap<i64, Card>,
    /// Cards withheld from the deal until the napoleon picks them up.
    pub rest: Vec<Card>,
    /// Cards the napoleon discarded; their faced members count toward
    /// the first trick's tally.
    pub unused: Vec<Card>,
    pub passed: BTreeSet<i64>,
    pub waiting_next_turn: bool,
    /// Seating order, fixed once play starts.
    pub players: Vec<PlayerState>,
}

impl RoomState {
    pub fn new(room_id: i64) -> Self {
        Self {
            room_id,
            phase: Phase::Init,
            napoleon: None,
            declaration: None,
            adjutant: None,
            turn: None,
            board: Vec::new(),
            player_cards: HashMap::new(),
            rest: Vec::new(),
            unused: Vec::new(),
            passed: BTreeSet::new(),
            waiting_next_turn: false,
            players: Vec::new(),
        }
    }

    pub fn player(&self, user_id: i64) -> Option<&PlayerState> {
        self.players.iter().find(|p| p.user_id == user_id)
    }

    pub fn player_mut(&mut self, user_id: i64) -> Option<&mut PlayerState> {
        self.players.iter_mut().find(|p| p.user_id == user_id)
    }

    fn require_player_mut(&mut self, user_id: i64) -> Result<&mut PlayerState, DomainError> {
        self.player_mut(user_id)
            .ok_or_else(|| DomainError::illegal_move(format!("user {user_id} is not seated")))
    }

    pub fn player_ids(&self) -> Vec<i64> {
        self.players.iter().map(|p| p.user_id).collect()
    }

    pub fn trump(&self) -> Option<Suit> {
        self.declaration.map(|d| d.suit)
    }

    pub fn is_napoleon(&self, user_id: i64) -> bool {
        self.napoleon == Some(user_id)
    }

    /// Bidding ends once someone declared and everyone else passed.
    pub fn napoleon_determined(&self) -> bool {
        self.napoleon.is_some() && self.passed.len() + 1 >= self.players.len()
    }

    pub fn all_passed(&self) -> bool {
        !self.players.is_empty() && self.passed.len() == self.players.len()
    }

    pub fn hands_exhausted(&self) -> bool {
        !self.players.is_empty() && self.players.iter().all(|p| p.hand.is_empty())
    }

    pub fn faces_of(&self, role: Role) -> u32 {
        self.players
            .iter()
            .filter(|p| p.role == Some(role))
            .map(|p| p.face)
            .sum()
    }

    pub fn allied_count(&self) -> usize {
        self.players
            .iter()
            .filter(|p| p.role == Some(Role::AlliedForces))
            .count()
    }

    /// Legal plays for one player right now. Everything is legal while
    /// the board is full (the play waits for `next_round`), nothing is
    /// legal before a declaration fixes the trump.
    pub fn possible_cards_for(&self, user_id: i64) -> Vec<Card> {
        let Some(player) = self.player(user_id) else {
            return Vec::new();
        };
        if self.board.len() == self.players.len() {
            return player.hand.clone();
        }
        match self.trump() {
            Some(trump) => tricks::possible_cards(&self.board, &player.hand, trump),
            None => Vec::new(),
        }
    }

    /// Reset bidding state and deal a fresh round to the seated
    /// players. Used by `start`, both initially and after an all-pass
    /// restart.
    pub fn deal_new_round<R: rand::Rng>(&mut self, rng: &mut R) -> Result<(), DomainError> {
        let n = self.players.len();
        let (hands, rest) = dealing::deal(n, rng)?;

        self.napoleon = None;
        self.declaration = None;
        self.adjutant = None;
        self.turn = None;
        self.board.clear();
        self.player_cards.clear();
        self.unused.clear();
        self.passed.clear();
        self.waiting_next_turn = false;
        self.rest = rest;
        for (player, hand) in self.players.iter_mut().zip(hands) {
            player.hand = hand;
            player.face = 0;
            player.role = None;
        }
        Ok(())
    }

    /// Place a bid. Only a strictly greater declaration is accepted;
    /// acceptance also makes the bidder the napoleon and gives them the
    /// turn.
    pub fn declare(&mut self, user_id: i64, declaration: Declaration) -> Result<(), DomainError> {
        if !declaration.supersedes(self.declaration) {
            return Err(DomainError::illegal_move(format!(
                "declaration {declaration} does not beat the current bid"
            )));
        }
        self.require_player_mut(user_id)?;
        self.declaration = Some(declaration);
        self.napoleon = Some(user_id);
        self.turn = Some(user_id);
        Ok(())
    }

    /// Pass leaves the current declaration untouched.
    pub fn pass(&mut self, user_id: i64) -> Result<(), DomainError> {
        self.require_player_mut(user_id)?;
        self.passed.insert(user_id);
        Ok(())
    }

    /// Record the secret partner card, assign sides, and move the rest
    /// into the napoleon's hand.
    pub fn decide_adjutant(&mut self, user_id: i64, adjutant: Card) -> Result<(), DomainError> {
        if !self.is_napoleon(user_id) {
            return Err(DomainError::illegal_move(
                "only the napoleon chooses the adjutant",
            ));
        }
        self.adjutant = Some(adjutant);
        self.assign_roles();

        let rest = self.rest.clone();
        let napoleon = self.require_player_mut(user_id)?;
        napoleon.hand.extend(rest);
        napoleon.hand.sort();
        Ok(())
    }

    /// The napoleon and whoever holds the adjutant card at this moment
    /// are napoleon forces; everyone else allies.
    pub fn assign_roles(&mut self) {
        let napoleon = self.napoleon;
        let adjutant = self.adjutant;
        for player in &mut self.players {
            let role = if napoleon == Some(player.user_id) {
                Role::NapoleonForces
            } else if adjutant.is_some_and(|c| player.hand.contains(&c)) {
                Role::NapoleonForces
            } else {
                Role::AlliedForces
            };
            player.role = Some(role);
        }
    }

    /// Discard exactly `rest_size` cards out of the enlarged hand.
    pub fn discard(&mut self, user_id: i64, unused: Vec<Card>) -> Result<(), DomainError> {
        if !self.is_napoleon(user_id) {
            return Err(DomainError::illegal_move("only the napoleon discards"));
        }
        let expected = rest_size(self.players.len())?;
        if unused.len() != expected {
            return Err(DomainError::illegal_discard(format!(
                "must discard exactly {expected} cards, got {}",
                unused.len()
            )));
        }
        let napoleon = self.require_player_mut(user_id)?;
        let mut hand = napoleon.hand.clone();
        for card in &unused {
            let Some(pos) = hand.iter().position(|c| c == card) else {
                return Err(DomainError::illegal_discard(format!(
                    "card {card} is not held"
                )));
            };
            hand.remove(pos);
        }
        napoleon.hand = hand;
        self.unused = unused;
        self.unused.sort();
        Ok(())
    }

    /// Play a card into the trick. Applies the club-ten betrayal before
    /// the card leaves the hand.
    pub fn select(&mut self, user_id: i64, card: Card) -> Result<(), DomainError> {
        if self.board.len() >= self.players.len() {
            return Err(DomainError::illegal_move(
                "board is full, trick must be resolved first",
            ));
        }
        if !self.possible_cards_for(user_id).contains(&card) {
            return Err(DomainError::illegal_move(format!(
                "card {card} is not a legal play"
            )));
        }

        if self.can_betray(user_id, card) {
            let player = self.require_player_mut(user_id)?;
            if let Some(role) = player.role {
                player.role = Some(role.flipped());
            }
        }

        let player = self.require_player_mut(user_id)?;
        if let Some(pos) = player.hand.iter().position(|c| *c == card) {
            player.hand.remove(pos);
        }
        self.board.push(card);
        self.player_cards.insert(user_id, card);
        Ok(())
    }

    /// Leading the club ten flips sides, but never for the napoleon and
    /// never when it would leave the allies with a single member.
    fn can_betray(&self, user_id: i64, card: Card) -> bool {
        card == CLUB_TEN
            && self.board.is_empty()
            && !self.is_napoleon(user_id)
            && self.allied_count() > 1
    }

    /// Advance the turn after `user_id` played. While the board is
    /// short, the next seat acts; a full board resolves the trick: the
    /// winner collects the faced cards on the board (plus the faced
    /// discards during the first trick), takes the turn, and the room
    /// waits for `next_round`.
    pub fn advance_turn(&mut self, user_id: i64) -> Result<Option<i64>, DomainError> {
        if self.board.len() < self.players.len() {
            self.turn = Some(self.next_seat_after(user_id)?);
            return Ok(None);
        }

        let trump = self
            .trump()
            .ok_or_else(|| DomainError::integrity("trick without a declaration"))?;
        let first_round = self.phase == Phase::FirstRound;
        let winner = tricks::winner(&self.board, &self.player_cards, trump, first_round)?;

        let mut faces = self.board.iter().filter(|c| c.is_faced()).count() as u32;
        if first_round {
            faces += self.unused.iter().filter(|c| c.is_faced()).count() as u32;
        }
        self.require_player_mut(winner)?.face += faces;
        self.turn = Some(winner);
        self.waiting_next_turn = true;
        Ok(Some(winner))
    }

    /// Clear the resolved trick so the winner can lead the next one.
    pub fn next_round(&mut self) {
        self.board.clear();
        self.player_cards.clear();
        self.waiting_next_turn = false;
    }

    fn next_seat_after(&self, user_id: i64) -> Result<i64, DomainError> {
        let idx = self
            .players
            .iter()
            .position(|p| p.user_id == user_id)
            .ok_or_else(|| DomainError::integrity(format!("user {user_id} not seated")))?;
        let next = (idx + 1) % self.players.len();
        Ok(self.players[next].user_id)
    }
}
