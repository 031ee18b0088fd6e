//! The fixed payout table.

use serde::{Deserialize, Serialize};

use crate::dice::Roll;

/// Classification of a roll.
///
/// The winning tiers are mutually exclusive for a five-die roll, so
/// evaluation order never matters for correctness; it is kept highest first.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayoutTier {
    /// All five dice show the same face ("yams").
    FiveOfAKind,
    /// Four dice share a face ("carre").
    FourOfAKind,
    /// Exactly two faces appear exactly twice ("double").
    TwoPair,
    /// Anything else, including a full house.
    None,
}

impl PayoutTier {
    pub fn evaluate(roll: &Roll) -> Self {
        let counts = roll.face_counts();
        let max = counts.iter().copied().max().unwrap_or(0);
        let pairs = counts.iter().filter(|&&c| c == 2).count();

        if max == 5 {
            PayoutTier::FiveOfAKind
        } else if max == 4 {
            PayoutTier::FourOfAKind
        } else if pairs == 2 {
            PayoutTier::TwoPair
        } else {
            PayoutTier::None
        }
    }

    /// Units transferred from each selected item.
    pub fn per_item_quantity(self) -> u32 {
        match self {
            PayoutTier::FiveOfAKind => 5,
            PayoutTier::FourOfAKind => 4,
            PayoutTier::TwoPair => 1,
            PayoutTier::None => 0,
        }
    }

    /// Number of distinct inventory items to draw.
    pub fn select_count(self) -> usize {
        match self {
            PayoutTier::FiveOfAKind => 3,
            PayoutTier::FourOfAKind => 2,
            PayoutTier::TwoPair => 1,
            PayoutTier::None => 0,
        }
    }

    pub fn is_payout(self) -> bool {
        self != PayoutTier::None
    }

    /// Wire label reported to players; `None` has no label.
    pub fn label(self) -> Option<&'static str> {
        match self {
            PayoutTier::FiveOfAKind => Some("yams"),
            PayoutTier::FourOfAKind => Some("carre"),
            PayoutTier::TwoPair => Some("double"),
            PayoutTier::None => None,
        }
    }
}

impl core::fmt::Display for PayoutTier {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label().unwrap_or("none"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn tier_of(faces: [u8; 5]) -> PayoutTier {
        PayoutTier::evaluate(&Roll::new(faces).unwrap())
    }

    #[test]
    fn table_examples() {
        assert_eq!(tier_of([3, 3, 3, 3, 3]), PayoutTier::FiveOfAKind);
        assert_eq!(tier_of([2, 2, 2, 2, 5]), PayoutTier::FourOfAKind);
        assert_eq!(tier_of([1, 1, 2, 2, 6]), PayoutTier::TwoPair);
        assert_eq!(tier_of([1, 2, 3, 4, 5]), PayoutTier::None);
    }

    #[test]
    fn order_of_dice_is_irrelevant() {
        assert_eq!(tier_of([5, 2, 2, 2, 2]), PayoutTier::FourOfAKind);
        assert_eq!(tier_of([6, 2, 1, 2, 1]), PayoutTier::TwoPair);
    }

    #[test]
    fn full_house_and_three_of_a_kind_pay_nothing() {
        assert_eq!(tier_of([4, 4, 4, 6, 6]), PayoutTier::None);
        assert_eq!(tier_of([4, 4, 4, 1, 6]), PayoutTier::None);
        assert_eq!(tier_of([4, 4, 1, 2, 6]), PayoutTier::None);
    }

    #[test]
    fn table_quantities() {
        assert_eq!(
            (PayoutTier::FiveOfAKind.per_item_quantity(), PayoutTier::FiveOfAKind.select_count()),
            (5, 3)
        );
        assert_eq!(
            (PayoutTier::FourOfAKind.per_item_quantity(), PayoutTier::FourOfAKind.select_count()),
            (4, 2)
        );
        assert_eq!(
            (PayoutTier::TwoPair.per_item_quantity(), PayoutTier::TwoPair.select_count()),
            (1, 1)
        );
        assert_eq!(PayoutTier::None.select_count(), 0);
        assert!(!PayoutTier::None.is_payout());
    }

    proptest! {
        /// Property: the tier agrees with an independent reading of the
        /// sorted multiset of face counts.
        #[test]
        fn tier_matches_count_signature(faces in prop::array::uniform5(1u8..=6)) {
            let roll = Roll::new(faces).unwrap();
            let mut sig: Vec<u8> = roll.face_counts().into_iter().filter(|c| *c > 0).collect();
            sig.sort_unstable_by(|a, b| b.cmp(a));

            let expected = match sig.as_slice() {
                [5] => PayoutTier::FiveOfAKind,
                [4, 1] => PayoutTier::FourOfAKind,
                [2, 2, 1] => PayoutTier::TwoPair,
                _ => PayoutTier::None,
            };
            prop_assert_eq!(PayoutTier::evaluate(&roll), expected);
        }
    }
}
