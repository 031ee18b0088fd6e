//! Randomness as an injectable capability.
//!
//! The game never calls a global RNG directly; the orchestrator holds an
//! `Arc<dyn RandomSource>` so rolls and item draws can be replayed in tests.

use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::dice::{DICE_PER_ROLL, FACES, Roll};

pub trait RandomSource: Send + Sync {
    /// Five independent, uniformly distributed faces.
    fn roll_dice(&self) -> Roll;

    /// `min(count, bound)` distinct indices in `[0, bound)`, sampled
    /// uniformly without replacement.
    fn pick_distinct(&self, bound: usize, count: usize) -> Vec<usize>;
}

fn roll_with<R: Rng + ?Sized>(rng: &mut R) -> Roll {
    let mut faces = [0u8; DICE_PER_ROLL];
    for face in faces.iter_mut() {
        *face = rng.random_range(1..=FACES);
    }
    Roll::from_valid(faces)
}

fn pick_with<R: Rng + ?Sized>(rng: &mut R, bound: usize, count: usize) -> Vec<usize> {
    let amount = count.min(bound);
    if amount == 0 {
        return Vec::new();
    }
    rand::seq::index::sample(rng, bound, amount).into_vec()
}

/// Thread-local OS-seeded RNG; the production default.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn roll_dice(&self) -> Roll {
        roll_with(&mut rand::rng())
    }

    fn pick_distinct(&self, bound: usize, count: usize) -> Vec<usize> {
        pick_with(&mut rand::rng(), bound, count)
    }
}

/// Reproducible RNG for simulations and property tests.
#[derive(Debug)]
pub struct SeededRandom {
    rng: Mutex<StdRng>,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl RandomSource for SeededRandom {
    fn roll_dice(&self) -> Roll {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        roll_with(&mut *rng)
    }

    fn pick_distinct(&self, bound: usize, count: usize) -> Vec<usize> {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        pick_with(&mut *rng, bound, count)
    }
}

/// Replays queued rolls and draws, then falls back to a seeded RNG.
///
/// Scripted draws are sanitised against the live bound: out-of-range and
/// repeated indices are dropped and the result is truncated to `count`.
#[derive(Debug)]
pub struct ScriptedRandom {
    rolls: Mutex<VecDeque<Roll>>,
    picks: Mutex<VecDeque<Vec<usize>>>,
    fallback: SeededRandom,
}

impl ScriptedRandom {
    pub fn new() -> Self {
        Self {
            rolls: Mutex::new(VecDeque::new()),
            picks: Mutex::new(VecDeque::new()),
            fallback: SeededRandom::new(0),
        }
    }

    pub fn with_rolls(self, rolls: impl IntoIterator<Item = Roll>) -> Self {
        self.rolls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .extend(rolls);
        self
    }

    pub fn with_picks(self, picks: impl IntoIterator<Item = Vec<usize>>) -> Self {
        self.picks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .extend(picks);
        self
    }
}

impl Default for ScriptedRandom {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomSource for ScriptedRandom {
    fn roll_dice(&self) -> Roll {
        let next = self
            .rolls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front();
        next.unwrap_or_else(|| self.fallback.roll_dice())
    }

    fn pick_distinct(&self, bound: usize, count: usize) -> Vec<usize> {
        let next = self
            .picks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front();
        match next {
            Some(script) => {
                let mut picked: Vec<usize> = Vec::with_capacity(count);
                for idx in script {
                    if idx < bound && !picked.contains(&idx) && picked.len() < count {
                        picked.push(idx);
                    }
                }
                picked
            }
            None => self.fallback.pick_distinct(bound, count),
        }
    }
}
