//! Room state hydration and flushing.
//!
//! `load` rebuilds a `RoomState` from the store's per-field keys;
//! `save` writes every field back. The two are deliberately total: a
//! room that was never written hydrates to a fresh `Phase::Init` state,
//! and absent optional fields stay absent in the store rather than
//! being written as sentinels.

use tracing::debug;

use crate::domain::cards::{self, Card};
use crate::domain::declaration::Declaration;
use crate::domain::state::{Phase, PlayerState, Role, RoomState};
use crate::errors::domain::DomainError;
use crate::store::{room_key, user_key, Field, StateStore};

fn parse_i64(raw: &str) -> Result<i64, DomainError> {
    raw.parse()
        .map_err(|_| DomainError::integrity(format!("bad stored id {raw:?}")))
}

fn parse_code(raw: &str) -> Result<u8, DomainError> {
    raw.parse()
        .map_err(|_| DomainError::integrity(format!("bad stored code {raw:?}")))
}

async fn card_list(
    store: &dyn StateStore,
    key: &str,
) -> Result<Vec<Card>, DomainError> {
    let codes = store
        .get_list(key)
        .await?
        .iter()
        .map(|s| parse_code(s))
        .collect::<Result<Vec<u8>, _>>()?;
    cards::from_codes(&codes)
}

fn codes_of(cards: &[Card]) -> Vec<String> {
    cards.iter().map(|c| c.code().to_string()).collect()
}

/// Rebuild the full room aggregate from the store.
pub async fn load(store: &dyn StateStore, room_id: i64) -> Result<RoomState, DomainError> {
    let mut state = RoomState::new(room_id);

    let phase = store.get(&room_key(room_id, Field::Phase)).await?;
    state.phase = Phase::from_str(phase.as_deref().unwrap_or(""))?;

    let ai_seats = store.get_dict(&room_key(room_id, Field::IsAi)).await?;
    for raw in store.get_list(&room_key(room_id, Field::PlayerIds)).await? {
        let user_id = parse_i64(&raw)?;
        let mut player = PlayerState::new(user_id, ai_seats.contains_key(&raw));
        player.hand = card_list(store, &user_key(room_id, user_id, Field::Hand)).await?;
        if let Some(face) = store.get(&user_key(room_id, user_id, Field::Face)).await? {
            player.face = face
                .parse()
                .map_err(|_| DomainError::integrity(format!("bad face tally {face:?}")))?;
        }
        if let Some(role) = store.get(&user_key(room_id, user_id, Field::Role)).await? {
            player.role = Some(Role::from_code(parse_code(&role)?)?);
        }
        state.players.push(player);
    }

    if let Some(raw) = store.get(&room_key(room_id, Field::Napoleon)).await? {
        state.napoleon = Some(parse_i64(&raw)?);
    }
    if let Some(raw) = store.get(&room_key(room_id, Field::Declaration)).await? {
        state.declaration = Some(Declaration::from_code(parse_code(&raw)?)?);
    }
    if let Some(raw) = store.get(&room_key(room_id, Field::Adjutant)).await? {
        state.adjutant = Some(Card::from_code(parse_code(&raw)?)?);
    }
    if let Some(raw) = store.get(&room_key(room_id, Field::Turn)).await? {
        state.turn = Some(parse_i64(&raw)?);
    }

    state.board = card_list(store, &room_key(room_id, Field::Board)).await?;
    state.rest = card_list(store, &room_key(room_id, Field::Rest)).await?;
    state.unused = card_list(store, &room_key(room_id, Field::Unused)).await?;

    for (uid, code) in store.get_dict(&room_key(room_id, Field::PlayerCards)).await? {
        state
            .player_cards
            .insert(parse_i64(&uid)?, Card::from_code(parse_code(&code)?)?);
    }
    for raw in store.get_list(&room_key(room_id, Field::PassIds)).await? {
        state.passed.insert(parse_i64(&raw)?);
    }
    state.waiting_next_turn = store
        .get(&room_key(room_id, Field::WaitingNextTurn))
        .await?
        .as_deref()
        == Some("1");

    Ok(state)
}

async fn set_or_delete(
    store: &dyn StateStore,
    key: &str,
    value: Option<String>,
) -> Result<(), DomainError> {
    match value {
        Some(v) => store.set(key, &v).await,
        None => store.delete(key).await,
    }
}

/// Write every field of the aggregate back to the store.
pub async fn save(store: &dyn StateStore, state: &RoomState) -> Result<(), DomainError> {
    let room_id = state.room_id;

    store
        .set(&room_key(room_id, Field::Phase), state.phase.as_str())
        .await?;
    set_or_delete(
        store,
        &room_key(room_id, Field::Napoleon),
        state.napoleon.map(|id| id.to_string()),
    )
    .await?;
    set_or_delete(
        store,
        &room_key(room_id, Field::Declaration),
        state.declaration.map(|d| d.code().to_string()),
    )
    .await?;
    set_or_delete(
        store,
        &room_key(room_id, Field::Adjutant),
        state.adjutant.map(|c| c.code().to_string()),
    )
    .await?;
    set_or_delete(
        store,
        &room_key(room_id, Field::Turn),
        state.turn.map(|id| id.to_string()),
    )
    .await?;

    store
        .set_list(&room_key(room_id, Field::Board), &codes_of(&state.board))
        .await?;
    store
        .set_list(&room_key(room_id, Field::Rest), &codes_of(&state.rest))
        .await?;
    store
        .set_list(&room_key(room_id, Field::Unused), &codes_of(&state.unused))
        .await?;
    store
        .set_list(
            &room_key(room_id, Field::PassIds),
            &state
                .passed
                .iter()
                .map(|id| id.to_string())
                .collect::<Vec<_>>(),
        )
        .await?;
    store
        .set(
            &room_key(room_id, Field::WaitingNextTurn),
            if state.waiting_next_turn { "1" } else { "0" },
        )
        .await?;

    // The trick map is rewritten whole so removals stick.
    store
        .delete(&room_key(room_id, Field::PlayerCards))
        .await?;
    for (uid, card) in &state.player_cards {
        store
            .set_dict(
                &room_key(room_id, Field::PlayerCards),
                &uid.to_string(),
                &card.code().to_string(),
            )
            .await?;
    }

    store
        .set_list(
            &room_key(room_id, Field::PlayerIds),
            &state
                .players
                .iter()
                .map(|p| p.user_id.to_string())
                .collect::<Vec<_>>(),
        )
        .await?;
    for player in &state.players {
        store
            .set_list(
                &user_key(room_id, player.user_id, Field::Hand),
                &codes_of(&player.hand),
            )
            .await?;
        store
            .set(
                &user_key(room_id, player.user_id, Field::Face),
                &player.face.to_string(),
            )
            .await?;
        set_or_delete(
            store,
            &user_key(room_id, player.user_id, Field::Role),
            player.role.map(|r| r.code().to_string()),
        )
        .await?;
    }

    debug!(room_id, phase = state.phase.as_str(), "room state flushed");
    Ok(())
}

/// Seat a user. Idempotent; joining twice keeps one seat.
pub async fn join(
    store: &dyn StateStore,
    room_id: i64,
    user_id: i64,
) -> Result<(), DomainError> {
    let key = room_key(room_id, Field::PlayerIds);
    let ids = store.get_list(&key).await?;
    if !ids.iter().any(|raw| raw == &user_id.to_string()) {
        store.push_list(&key, &user_id.to_string()).await?;
    }
    Ok(())
}

/// Unseat a user and drop their per-user keys.
pub async fn quit(
    store: &dyn StateStore,
    room_id: i64,
    user_id: i64,
) -> Result<(), DomainError> {
    let uid = user_id.to_string();
    store
        .rem_list(&room_key(room_id, Field::PlayerIds), &uid)
        .await?;
    store
        .rem_list(&room_key(room_id, Field::PassIds), &uid)
        .await?;
    store
        .rem_dict(&room_key(room_id, Field::PlayerCards), &uid)
        .await?;
    store
        .rem_dict(&room_key(room_id, Field::SessionMap), &uid)
        .await?;
    store
        .rem_dict(&room_key(room_id, Field::IsAi), &uid)
        .await?;
    for field in [Field::Hand, Field::Face, Field::Role, Field::AiName] {
        store.delete(&user_key(room_id, user_id, field)).await?;
    }
    Ok(())
}

/// Apply the idle-room TTL to every key the room owns.
pub async fn expire_room(
    store: &dyn StateStore,
    state: &RoomState,
    ttl_secs: u64,
) -> Result<(), DomainError> {
    let room_id = state.room_id;
    let mut keys: Vec<String> = [
        Field::Phase,
        Field::Napoleon,
        Field::PlayerIds,
        Field::PassIds,
        Field::Declaration,
        Field::Turn,
        Field::Board,
        Field::Adjutant,
        Field::Unused,
        Field::PlayerCards,
        Field::WaitingNextTurn,
        Field::Rest,
        Field::SessionMap,
        Field::IsAi,
        Field::ChatUserIds,
        Field::ChatMessages,
    ]
    .into_iter()
    .map(|f| room_key(room_id, f))
    .collect();
    for player in &state.players {
        for field in [Field::Hand, Field::Face, Field::Role, Field::AiName] {
            keys.push(user_key(room_id, player.user_id, field));
        }
    }
    store.expire(&keys, ttl_secs).await
}

/// Drop every key the room owns.
pub async fn destroy(store: &dyn StateStore, room_id: i64) -> Result<(), DomainError> {
    store.flush_room(room_id).await
}
