//! Infrastructure layer: document storage and the game transaction.
//!
//! The ledger, allocator and dispatcher only talk to storage through the
//! `PlayerStore` / `InventoryStore` traits, so a database-backed store can
//! replace the in-memory one without touching game logic.

pub mod allocator;
pub mod cas;
pub mod error;
pub mod game;
pub mod seed;
pub mod store;
pub mod turn_ledger;

#[cfg(test)]
mod testing;

pub use allocator::{Allocation, Allocator};
pub use error::GameError;
pub use game::{GameDispatcher, GameOutcome};
pub use turn_ledger::TurnLedger;
