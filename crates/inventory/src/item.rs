use serde::{Deserialize, Serialize};

use yams_core::{DomainError, DomainResult, Entity, ItemId};

/// A prize line in the inventory.
///
/// # Invariants
/// - `stock` never goes negative and only grows back through
///   [`InventoryItem::give_back`].
/// - `awarded` only decreases through [`InventoryItem::give_back`].
/// - `stock + awarded` is constant across `take` and `give_back`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryItem {
    id: ItemId,
    name: String,
    stock: u32,
    awarded: u32,
    version: u64,
}

impl InventoryItem {
    pub fn new(id: ItemId, name: impl Into<String>, stock: u32) -> DomainResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }
        Ok(Self {
            id,
            name,
            stock,
            awarded: 0,
            version: 0,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn stock(&self) -> u32 {
        self.stock
    }

    /// Cumulative units awarded to all players.
    pub fn awarded(&self) -> u32 {
        self.awarded
    }

    pub fn is_exhausted(&self) -> bool {
        self.stock == 0
    }

    /// Move up to `requested` units from stock to the awarded counter.
    ///
    /// Returns the quantity actually moved: `min(requested, stock)`.
    pub fn take(&mut self, requested: u32) -> u32 {
        let moved = requested.min(self.stock);
        self.stock -= moved;
        self.awarded += moved;
        moved
    }

    /// Undo an earlier [`take`](Self::take) whose winner was never credited.
    ///
    /// Returns the quantity actually restored: `min(quantity, awarded)`.
    pub fn give_back(&mut self, quantity: u32) -> u32 {
        let restored = quantity.min(self.awarded);
        self.awarded -= restored;
        self.stock += restored;
        restored
    }
}

impl Entity for InventoryItem {
    type Id = ItemId;

    fn id(&self) -> ItemId {
        self.id
    }

    fn version(&self) -> u64 {
        self.version
    }

    fn set_version(&mut self, version: u64) {
        self.version = version;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn item(stock: u32) -> InventoryItem {
        InventoryItem::new(ItemId::new(), "Eclair", stock).unwrap()
    }

    #[test]
    fn rejects_blank_name() {
        let err = InventoryItem::new(ItemId::new(), "  ", 3).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn take_is_capped_at_stock() {
        let mut it = item(2);
        assert_eq!(it.take(5), 2);
        assert_eq!(it.stock(), 0);
        assert_eq!(it.awarded(), 2);
        assert!(it.is_exhausted());
    }

    #[test]
    fn take_from_empty_moves_nothing() {
        let mut it = item(0);
        assert_eq!(it.take(4), 0);
        assert_eq!(it.awarded(), 0);
    }

    #[test]
    fn give_back_reverses_a_take() {
        let mut it = item(6);
        let moved = it.take(4);
        assert_eq!(it.give_back(moved), 4);
        assert_eq!(it.stock(), 6);
        assert_eq!(it.awarded(), 0);
        assert_eq!(it.give_back(3), 0);
        assert_eq!(it.stock(), 6);
    }

    proptest! {
        /// Property: any sequence of takes conserves stock + awarded and
        /// never moves more than was requested.
        #[test]
        fn takes_conserve_units(
            initial in 0u32..50,
            requests in prop::collection::vec(0u32..8, 0..20)
        ) {
            let mut it = item(initial);
            let mut moved_total = 0u32;
            for r in requests {
                let before = it.stock();
                let moved = it.take(r);
                prop_assert!(moved <= r);
                prop_assert!(it.stock() <= before);
                moved_total += moved;
            }
            prop_assert_eq!(it.stock() + it.awarded(), initial);
            prop_assert_eq!(it.awarded(), moved_total);
        }
    }
}
