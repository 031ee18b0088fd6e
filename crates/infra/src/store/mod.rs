//! Document storage for players and inventory.
//!
//! Both collections support atomic conditional replacement keyed on the
//! document version; that is the only concurrency primitive the game needs.

pub mod in_memory;
pub mod r#trait;

pub use in_memory::InMemoryDocumentStore;
pub use r#trait::{InventoryStore, PlayerFilter, PlayerStore, StoreError};
