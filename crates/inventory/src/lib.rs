//! Inventory domain module: the pastries that can be won.
//!
//! Pure, deterministic stock rules (no IO, no HTTP, no storage).

pub mod item;

pub use item::InventoryItem;
