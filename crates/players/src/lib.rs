//! Player domain module: turns and the winnings ledger.

pub mod player;

pub use player::{Award, Player, STARTING_TURNS, normalize_email};
