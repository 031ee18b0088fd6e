use std::collections::BTreeMap;
use std::sync::RwLock;

use yams_core::{Entity, ExpectedVersion, ItemId, PlayerId};
use yams_inventory::InventoryItem;
use yams_players::{Player, normalize_email};

use super::r#trait::{InventoryStore, PlayerFilter, PlayerStore, StoreError};

/// One versioned collection. Check-and-write happens under a single write
/// lock, which is what makes `replace` atomic.
#[derive(Debug)]
struct Collection<D: Entity> {
    docs: RwLock<BTreeMap<D::Id, D>>,
}

impl<D: Entity + Clone> Collection<D> {
    fn new() -> Self {
        Self {
            docs: RwLock::new(BTreeMap::new()),
        }
    }

    fn insert_unless(
        &self,
        mut doc: D,
        conflicts: impl Fn(&D) -> bool,
    ) -> Result<D, StoreError> {
        let mut docs = self
            .docs
            .write()
            .map_err(|_| StoreError::Unavailable("lock poisoned".to_string()))?;

        if docs.contains_key(&doc.id()) {
            return Err(StoreError::Duplicate(format!("id {:?}", doc.id())));
        }
        if docs.values().any(|d| conflicts(d)) {
            return Err(StoreError::Duplicate("unique field already taken".to_string()));
        }

        doc.set_version(1);
        docs.insert(doc.id(), doc.clone());
        Ok(doc)
    }

    fn get(&self, id: &D::Id) -> Result<Option<D>, StoreError> {
        let docs = self
            .docs
            .read()
            .map_err(|_| StoreError::Unavailable("lock poisoned".to_string()))?;
        Ok(docs.get(id).cloned())
    }

    fn filter(&self, keep: impl Fn(&D) -> bool) -> Result<Vec<D>, StoreError> {
        let docs = self
            .docs
            .read()
            .map_err(|_| StoreError::Unavailable("lock poisoned".to_string()))?;
        Ok(docs.values().filter(|d| keep(d)).cloned().collect())
    }

    fn replace(&self, mut doc: D, expected: ExpectedVersion) -> Result<D, StoreError> {
        let mut docs = self
            .docs
            .write()
            .map_err(|_| StoreError::Unavailable("lock poisoned".to_string()))?;

        let current = docs.get(&doc.id()).ok_or(StoreError::NotFound)?.version();
        if !expected.matches(current) {
            return Err(StoreError::Concurrency(format!(
                "expected {expected:?}, found {current}"
            )));
        }

        doc.set_version(current + 1);
        docs.insert(doc.id(), doc.clone());
        Ok(doc)
    }
}

/// In-memory document store for tests, the simulator and dev servers.
#[derive(Debug)]
pub struct InMemoryDocumentStore {
    players: Collection<Player>,
    items: Collection<InventoryItem>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self {
            players: Collection::new(),
            items: Collection::new(),
        }
    }
}

impl Default for InMemoryDocumentStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl PlayerStore for InMemoryDocumentStore {
    async fn insert_player(&self, player: Player) -> Result<Player, StoreError> {
        let email = player.email().to_string();
        self.players.insert_unless(player, |p| p.email() == email)
    }

    async fn get_player(&self, id: PlayerId) -> Result<Option<Player>, StoreError> {
        self.players.get(&id)
    }

    async fn find_player_by_email(&self, email: &str) -> Result<Option<Player>, StoreError> {
        let email = normalize_email(email);
        Ok(self
            .players
            .filter(|p| p.email() == email)?
            .into_iter()
            .next())
    }

    async fn find_players(&self, filter: &PlayerFilter) -> Result<Vec<Player>, StoreError> {
        self.players.filter(|p| filter.matches(p))
    }

    async fn replace_player(
        &self,
        player: Player,
        expected: ExpectedVersion,
    ) -> Result<Player, StoreError> {
        self.players.replace(player, expected)
    }
}

#[async_trait::async_trait]
impl InventoryStore for InMemoryDocumentStore {
    async fn insert_item(&self, item: InventoryItem) -> Result<InventoryItem, StoreError> {
        self.items.insert_unless(item, |_| false)
    }

    async fn get_item(&self, id: ItemId) -> Result<Option<InventoryItem>, StoreError> {
        self.items.get(&id)
    }

    async fn list_items(&self) -> Result<Vec<InventoryItem>, StoreError> {
        self.items.filter(|_| true)
    }

    async fn replace_item(
        &self,
        item: InventoryItem,
        expected: ExpectedVersion,
    ) -> Result<InventoryItem, StoreError> {
        self.items.replace(item, expected)
    }
}
