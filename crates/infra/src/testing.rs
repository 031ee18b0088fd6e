//! Test fixtures shared by the infra unit tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::Utc;

use yams_core::{Entity, ExpectedVersion, ItemId, PlayerId};
use yams_inventory::InventoryItem;
use yams_players::{Player, STARTING_TURNS};

use crate::store::{InMemoryDocumentStore, InventoryStore, PlayerFilter, PlayerStore, StoreError};

/// Register a player and spend their turn counter down to `turns`.
pub async fn seeded_player(store: &InMemoryDocumentStore, turns: u32) -> PlayerId {
    assert!(turns <= STARTING_TURNS, "cannot seed more than the starting turns");
    let id = PlayerId::new();
    let email = format!("{id}@example.com");
    let mut player = Player::register(id, "Tester", email, "hash", Utc::now()).unwrap();
    while player.turns() > turns {
        player.spend_turn().unwrap();
    }
    store.insert_player(player).await.unwrap();
    id
}

pub async fn seeded_items(store: &InMemoryDocumentStore, stocks: &[u32]) -> Vec<ItemId> {
    let mut ids = Vec::new();
    for (n, stock) in stocks.iter().enumerate() {
        let item = InventoryItem::new(ItemId::new(), format!("Pastry #{n}"), *stock).unwrap();
        ids.push(store.insert_item(item).await.unwrap().id());
    }
    ids
}

/// Wraps a store and lets a rival writer bump the target document's version
/// right before each conditional write, so the caller's write loses.
pub struct ContendedStore {
    inner: Arc<InMemoryDocumentStore>,
    remaining: AtomicUsize,
    rival_writes: AtomicUsize,
}

impl ContendedStore {
    pub fn new(inner: Arc<InMemoryDocumentStore>, rivals: usize) -> Self {
        Self {
            inner,
            remaining: AtomicUsize::new(rivals),
            rival_writes: AtomicUsize::new(0),
        }
    }

    pub fn always(inner: Arc<InMemoryDocumentStore>) -> Self {
        Self::new(inner, usize::MAX)
    }

    pub fn rival_writes(&self) -> usize {
        self.rival_writes.load(Ordering::SeqCst)
    }

    fn take_rival(&self) -> bool {
        self.remaining
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
    }
}

#[async_trait::async_trait]
impl PlayerStore for ContendedStore {
    async fn insert_player(&self, player: Player) -> Result<Player, StoreError> {
        self.inner.insert_player(player).await
    }

    async fn get_player(&self, id: PlayerId) -> Result<Option<Player>, StoreError> {
        self.inner.get_player(id).await
    }

    async fn find_player_by_email(&self, email: &str) -> Result<Option<Player>, StoreError> {
        self.inner.find_player_by_email(email).await
    }

    async fn find_players(&self, filter: &PlayerFilter) -> Result<Vec<Player>, StoreError> {
        self.inner.find_players(filter).await
    }

    async fn replace_player(
        &self,
        player: Player,
        expected: ExpectedVersion,
    ) -> Result<Player, StoreError> {
        if self.take_rival() {
            if let Some(current) = self.inner.get_player(player.id()).await? {
                let version = current.version();
                self.inner
                    .replace_player(current, ExpectedVersion::Exact(version))
                    .await?;
                self.rival_writes.fetch_add(1, Ordering::SeqCst);
            }
        }
        self.inner.replace_player(player, expected).await
    }
}

#[async_trait::async_trait]
impl InventoryStore for ContendedStore {
    async fn insert_item(&self, item: InventoryItem) -> Result<InventoryItem, StoreError> {
        self.inner.insert_item(item).await
    }

    async fn get_item(&self, id: ItemId) -> Result<Option<InventoryItem>, StoreError> {
        self.inner.get_item(id).await
    }

    async fn list_items(&self) -> Result<Vec<InventoryItem>, StoreError> {
        self.inner.list_items().await
    }

    async fn replace_item(
        &self,
        item: InventoryItem,
        expected: ExpectedVersion,
    ) -> Result<InventoryItem, StoreError> {
        if self.take_rival() {
            if let Some(current) = self.inner.get_item(item.id()).await? {
                let version = current.version();
                self.inner
                    .replace_item(current, ExpectedVersion::Exact(version))
                    .await?;
                self.rival_writes.fetch_add(1, Ordering::SeqCst);
            }
        }
        self.inner.replace_item(item, expected).await
    }
}
