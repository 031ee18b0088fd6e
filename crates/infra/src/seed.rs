//! Demo pastry catalogue loaded into an empty store at start-up.

use tracing::info;

use yams_core::{DomainError, ItemId};
use yams_inventory::InventoryItem;

use crate::store::{InventoryStore, StoreError};

pub const DEMO_PASTRIES: &[(&str, u32)] = &[
    ("Fondant supreme", 10),
    ("Cake tout Chocolat", 10),
    ("Cake Framboise chocolat", 10),
    ("Brioche sucree avec chocolat", 10),
    ("Cheesecake", 10),
    ("Eclair au chocolat", 10),
    ("Tarte poire bourdaloue", 10),
    ("Tarte Normande", 10),
    ("Mille-feuille", 10),
    ("Paris-Brest", 10),
];

/// Insert `catalogue` unless the store already holds items.
///
/// Returns how many items were inserted.
pub async fn seed_inventory(
    items: &dyn InventoryStore,
    catalogue: &[(&str, u32)],
) -> Result<usize, StoreError> {
    if !items.list_items().await?.is_empty() {
        info!("inventory already populated, skipping seed");
        return Ok(0);
    }

    for (name, stock) in catalogue {
        let item = InventoryItem::new(ItemId::new(), *name, *stock)
            .map_err(|e: DomainError| StoreError::Unavailable(format!("bad seed entry: {e}")))?;
        items.insert_item(item).await?;
    }

    info!(count = catalogue.len(), "inventory seeded");
    Ok(catalogue.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryDocumentStore;

    #[tokio::test]
    async fn seeds_once() {
        let store = InMemoryDocumentStore::new();
        assert_eq!(seed_inventory(&store, DEMO_PASTRIES).await.unwrap(), DEMO_PASTRIES.len());
        assert_eq!(seed_inventory(&store, DEMO_PASTRIES).await.unwrap(), 0);
        assert_eq!(store.list_items().await.unwrap().len(), DEMO_PASTRIES.len());
    }

    #[tokio::test]
    async fn blank_names_are_rejected() {
        let store = InMemoryDocumentStore::new();
        let err = seed_inventory(&store, &[("  ", 1)]).await.unwrap_err();
        assert!(matches!(err, StoreError::Unavailable(_)));
    }
}
