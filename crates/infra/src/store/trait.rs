use thiserror::Error;

use yams_core::{ExpectedVersion, ItemId, PlayerId};
use yams_inventory::InventoryItem;
use yams_players::{Player, normalize_email};

/// Storage operation error.
///
/// These are infrastructure failures, as opposed to domain errors
/// (validation, exhausted turns).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Conditional write lost against a concurrent writer.
    #[error("optimistic concurrency check failed: {0}")]
    Concurrency(String),

    /// A uniqueness constraint was violated (e.g. email already registered).
    #[error("duplicate: {0}")]
    Duplicate(String),

    /// Replace targeted a document that does not exist.
    #[error("document not found")]
    NotFound,

    /// The backend could not serve the request.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Query-by-filter over players. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerFilter {
    pub name: Option<String>,
    pub email: Option<String>,
    pub min_winnings: Option<u32>,
}

impl PlayerFilter {
    /// Players who have won at least one pastry.
    pub fn winners() -> Self {
        Self {
            min_winnings: Some(1),
            ..Default::default()
        }
    }

    pub fn matches(&self, player: &Player) -> bool {
        if let Some(name) = &self.name {
            if player.name() != name {
                return false;
            }
        }
        if let Some(email) = &self.email {
            if player.email() != normalize_email(email) {
                return false;
            }
        }
        if let Some(min) = self.min_winnings {
            if player.winnings() < min {
                return false;
            }
        }
        true
    }
}

/// Player documents.
///
/// `replace_player` is a compare-and-swap: it commits only when the stored
/// version still equals `expected`, and returns the document with its new
/// version.
#[async_trait::async_trait]
pub trait PlayerStore: Send + Sync {
    /// Insert a new player; fails with `Duplicate` if the email is taken.
    async fn insert_player(&self, player: Player) -> Result<Player, StoreError>;

    async fn get_player(&self, id: PlayerId) -> Result<Option<Player>, StoreError>;

    async fn find_player_by_email(&self, email: &str) -> Result<Option<Player>, StoreError>;

    /// Matching players in registration order.
    async fn find_players(&self, filter: &PlayerFilter) -> Result<Vec<Player>, StoreError>;

    async fn replace_player(
        &self,
        player: Player,
        expected: ExpectedVersion,
    ) -> Result<Player, StoreError>;
}

/// Inventory item documents. Same conditional-write contract as
/// [`PlayerStore`].
#[async_trait::async_trait]
pub trait InventoryStore: Send + Sync {
    async fn insert_item(&self, item: InventoryItem) -> Result<InventoryItem, StoreError>;

    async fn get_item(&self, id: ItemId) -> Result<Option<InventoryItem>, StoreError>;

    /// Every item, in a stable order (by id).
    async fn list_items(&self) -> Result<Vec<InventoryItem>, StoreError>;

    async fn replace_item(
        &self,
        item: InventoryItem,
        expected: ExpectedVersion,
    ) -> Result<InventoryItem, StoreError>;
}
