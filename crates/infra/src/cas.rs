//! Read-modify-write loops over versioned documents.
//!
//! Each attempt re-reads the current persisted document, applies a pure
//! mutation and commits with `ExpectedVersion::Exact(read_version)`. A lost
//! race re-reads and tries again; nothing is ever written from a stale copy.

use tracing::debug;

use yams_core::{Entity, ExpectedVersion, ItemId, PlayerId};
use yams_inventory::InventoryItem;
use yams_players::Player;

use crate::error::GameError;
use crate::store::{InventoryStore, PlayerStore, StoreError};

/// Default bound on conditional-write attempts per document.
pub const MAX_CAS_ATTEMPTS: usize = 16;

/// Outcome of a mutation closure.
pub enum Change<T> {
    /// Persist the mutated document and yield `T`.
    Commit(T),
    /// Leave the document untouched and yield `T`.
    Skip(T),
}

pub async fn modify_player<T>(
    players: &dyn PlayerStore,
    id: PlayerId,
    max_attempts: usize,
    mut mutate: impl FnMut(&mut Player) -> Result<Change<T>, GameError>,
) -> Result<(Player, T), GameError> {
    for attempt in 1..=max_attempts {
        let mut player = players
            .get_player(id)
            .await?
            .ok_or(GameError::PlayerNotFound)?;
        let expected = ExpectedVersion::Exact(player.version());

        let value = match mutate(&mut player)? {
            Change::Skip(value) => return Ok((player, value)),
            Change::Commit(value) => value,
        };

        match players.replace_player(player, expected).await {
            Ok(saved) => return Ok((saved, value)),
            Err(StoreError::Concurrency(reason)) => {
                debug!(player_id = %id, attempt, %reason, "player write lost a race, retrying");
            }
            Err(StoreError::NotFound) => return Err(GameError::PlayerNotFound),
            Err(e) => return Err(e.into()),
        }
    }

    Err(GameError::Conflict(format!(
        "player {id} still contended after {max_attempts} attempts"
    )))
}

/// Like [`modify_player`]; a vanished item yields `Ok(None)`.
pub async fn modify_item<T>(
    items: &dyn InventoryStore,
    id: ItemId,
    max_attempts: usize,
    mut mutate: impl FnMut(&mut InventoryItem) -> Change<T>,
) -> Result<Option<(InventoryItem, T)>, GameError> {
    for attempt in 1..=max_attempts {
        let Some(mut item) = items.get_item(id).await? else {
            return Ok(None);
        };
        let expected = ExpectedVersion::Exact(item.version());

        let value = match mutate(&mut item) {
            Change::Skip(value) => return Ok(Some((item, value))),
            Change::Commit(value) => value,
        };

        match items.replace_item(item, expected).await {
            Ok(saved) => return Ok(Some((saved, value))),
            Err(StoreError::Concurrency(reason)) => {
                debug!(item_id = %id, attempt, %reason, "item write lost a race, retrying");
            }
            Err(StoreError::NotFound) => return Ok(None),
            Err(e) => return Err(e.into()),
        }
    }

    Err(GameError::Conflict(format!(
        "item {id} still contended after {max_attempts} attempts"
    )))
}
