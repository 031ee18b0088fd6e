//! Inventory allocator: turns a payout tier into stock transfers.
//!
//! Each selected item is transferred independently and concurrently. A
//! transfer is committed as soon as its conditional write lands and is not
//! rolled back because another item was short. An item whose transfer cannot
//! be committed is left untouched and simply contributes nothing. If the
//! player cannot be credited at all, every committed transfer is given back
//! so awarded stock always matches credited winnings.

use std::sync::Arc;

use futures::future::join_all;
use tracing::{debug, error, warn};

use yams_core::{Entity, ItemId, PlayerId};
use yams_game::{PayoutTier, RandomSource};
use yams_players::{Award, Player};

use crate::cas::{Change, MAX_CAS_ATTEMPTS, modify_item, modify_player};
use crate::error::GameError;
use crate::store::{InventoryStore, PlayerStore};

/// Result of one allocation: what moved, and the player after crediting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Allocation {
    pub awards: Vec<Award>,
    pub player: Player,
}

impl Allocation {
    pub fn total(&self) -> u32 {
        self.awards.iter().map(|a| a.quantity).sum()
    }
}

#[derive(Clone)]
pub struct Allocator {
    items: Arc<dyn InventoryStore>,
    players: Arc<dyn PlayerStore>,
    rng: Arc<dyn RandomSource>,
    max_attempts: usize,
}

impl Allocator {
    pub fn new(
        items: Arc<dyn InventoryStore>,
        players: Arc<dyn PlayerStore>,
        rng: Arc<dyn RandomSource>,
    ) -> Self {
        Self {
            items,
            players,
            rng,
            max_attempts: MAX_CAS_ATTEMPTS,
        }
    }

    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    pub async fn allocate(
        &self,
        tier: PayoutTier,
        player_id: PlayerId,
    ) -> Result<Allocation, GameError> {
        let inventory = self.items.list_items().await?;

        // Fewer items than the tier asks for: draw every item once.
        let picks = self
            .rng
            .pick_distinct(inventory.len(), tier.select_count());
        let mut selected: Vec<ItemId> = Vec::with_capacity(picks.len());
        for idx in picks {
            match inventory.get(idx) {
                Some(item) if !selected.contains(&item.id()) => selected.push(item.id()),
                Some(_) => warn!(idx, "duplicate item pick skipped"),
                None => warn!(idx, bound = inventory.len(), "item pick out of range, skipped"),
            }
        }
        selected.truncate(tier.select_count());

        let quantity = tier.per_item_quantity();
        let transfers = selected.iter().map(|&id| self.transfer(id, quantity));
        let awards: Vec<Award> = join_all(transfers).await.into_iter().flatten().collect();

        let credit = modify_player(
            self.players.as_ref(),
            player_id,
            self.max_attempts,
            |player| {
                if awards.is_empty() {
                    Ok(Change::Skip(0))
                } else {
                    Ok(Change::Commit(player.credit(&awards)))
                }
            },
        )
        .await;

        let (player, credited) = match credit {
            Ok(done) => done,
            Err(e) => {
                if !awards.is_empty() {
                    warn!(player_id = %player_id, error = %e, "player credit failed, returning stock");
                    self.give_back(&awards).await;
                }
                return Err(e);
            }
        };

        debug!(player_id = %player_id, %tier, credited, items = awards.len(), "allocation complete");
        Ok(Allocation { awards, player })
    }

    /// Return the stock of awards that were never credited to anyone.
    async fn give_back(&self, awards: &[Award]) {
        let restores = awards.iter().map(|award| async move {
            let result = modify_item(self.items.as_ref(), award.item_id, self.max_attempts, |item| {
                Change::Commit(item.give_back(award.quantity))
            })
            .await;
            match result {
                Ok(Some((_, restored))) if restored == award.quantity => {}
                Ok(other) => error!(
                    item_id = %award.item_id,
                    quantity = award.quantity,
                    restored = other.map(|(_, r)| r).unwrap_or(0),
                    "stock only partly returned"
                ),
                Err(e) => error!(
                    item_id = %award.item_id,
                    quantity = award.quantity,
                    error = %e,
                    "stock could not be returned"
                ),
            }
        });
        join_all(restores).await;
    }

    /// Move up to `quantity` units of one item. `None` when nothing moved.
    async fn transfer(&self, item_id: ItemId, quantity: u32) -> Option<Award> {
        let result = modify_item(self.items.as_ref(), item_id, self.max_attempts, |item| {
            if item.is_exhausted() {
                Change::Skip(0)
            } else {
                Change::Commit(item.take(quantity))
            }
        })
        .await;

        match result {
            Ok(Some((item, moved))) if moved > 0 => {
                debug!(item_id = %item_id, moved, stock = item.stock(), "stock transferred");
                Some(Award {
                    item_id,
                    name: item.name().to_string(),
                    quantity: moved,
                    item_awarded_total: item.awarded(),
                })
            }
            Ok(Some(_)) => {
                debug!(item_id = %item_id, "item out of stock, skipped");
                None
            }
            Ok(None) => {
                warn!(item_id = %item_id, "selected item disappeared, skipped");
                None
            }
            Err(e) => {
                warn!(item_id = %item_id, error = %e, "item transfer aborted");
                None
            }
        }
    }
}
