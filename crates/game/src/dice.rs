use serde::{Deserialize, Serialize};

use yams_core::{DomainError, DomainResult};

/// Number of dice thrown per turn.
pub const DICE_PER_ROLL: usize = 5;

/// Number of faces on each die (faces are `1..=FACES`).
pub const FACES: u8 = 6;

/// One throw of five six-sided dice.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "[u8; DICE_PER_ROLL]", into = "[u8; DICE_PER_ROLL]")]
pub struct Roll([u8; DICE_PER_ROLL]);

impl Roll {
    pub fn new(faces: [u8; DICE_PER_ROLL]) -> DomainResult<Self> {
        if let Some(bad) = faces.iter().find(|f| !(1..=FACES).contains(*f)) {
            return Err(DomainError::validation(format!(
                "die face must be between 1 and {FACES}, got {bad}"
            )));
        }
        Ok(Self(faces))
    }

    /// Caller guarantees every face is in `1..=FACES`.
    pub(crate) fn from_valid(faces: [u8; DICE_PER_ROLL]) -> Self {
        debug_assert!(faces.iter().all(|f| (1..=FACES).contains(f)));
        Self(faces)
    }

    pub fn faces(&self) -> [u8; DICE_PER_ROLL] {
        self.0
    }

    /// Occurrences of each face; index 0 is face 1.
    pub fn face_counts(&self) -> [u8; FACES as usize] {
        let mut counts = [0u8; FACES as usize];
        for face in self.0 {
            counts[(face - 1) as usize] += 1;
        }
        counts
    }
}

impl TryFrom<[u8; DICE_PER_ROLL]> for Roll {
    type Error = DomainError;

    fn try_from(value: [u8; DICE_PER_ROLL]) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Roll> for [u8; DICE_PER_ROLL] {
    fn from(value: Roll) -> Self {
        value.0
    }
}

impl core::fmt::Display for Roll {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let [a, b, c, d, e] = self.0;
        write!(f, "[{a} {b} {c} {d} {e}]")
    }
}
