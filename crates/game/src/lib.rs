//! Dice game rules: rolls, the payout table, and the randomness capability.
//!
//! Everything here is pure and deterministic given a [`RandomSource`]; no IO,
//! no storage.

pub mod dice;
pub mod payout;
pub mod rng;

pub use dice::{DICE_PER_ROLL, FACES, Roll};
pub use payout::PayoutTier;
pub use rng::{RandomSource, ScriptedRandom, SeededRandom, ThreadRandom};
