use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use yams_core::{DomainError, DomainResult, Entity, ItemId, PlayerId};

/// Turns granted at registration.
pub const STARTING_TURNS: u32 = 3;

/// One quantity moved out of an inventory item for a player.
///
/// Players keep these append-only as their winnings records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Award {
    pub item_id: ItemId,
    pub name: String,
    /// Units moved by this award.
    pub quantity: u32,
    /// The item's cumulative awarded counter right after this award.
    pub item_awarded_total: u32,
}

/// A registered player.
///
/// # Invariants
/// - `turns` never goes below zero; spending at zero fails.
/// - `winnings` equals the sum of `quantity` over `records`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    id: PlayerId,
    name: String,
    email: String,
    password_hash: String,
    turns: u32,
    winnings: u32,
    records: Vec<Award>,
    registered_at: DateTime<Utc>,
    version: u64,
}

impl Player {
    pub fn register(
        id: PlayerId,
        name: impl Into<String>,
        email: impl Into<String>,
        password_hash: impl Into<String>,
        registered_at: DateTime<Utc>,
    ) -> DomainResult<Self> {
        let name = name.into();
        let email = normalize_email(&email.into());
        if name.trim().is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }
        if email.is_empty() || !email.contains('@') {
            return Err(DomainError::validation("email is not valid"));
        }
        Ok(Self {
            id,
            name,
            email,
            password_hash: password_hash.into(),
            turns: STARTING_TURNS,
            winnings: 0,
            records: Vec::new(),
            registered_at,
            version: 0,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    pub fn turns(&self) -> u32 {
        self.turns
    }

    pub fn winnings(&self) -> u32 {
        self.winnings
    }

    pub fn records(&self) -> &[Award] {
        &self.records
    }

    pub fn registered_at(&self) -> DateTime<Utc> {
        self.registered_at
    }

    /// Consume one turn. Returns the turns left.
    pub fn spend_turn(&mut self) -> DomainResult<u32> {
        if self.turns == 0 {
            return Err(DomainError::NoTurnsRemaining);
        }
        self.turns -= 1;
        Ok(self.turns)
    }

    /// Credit a batch of awards: winnings grow by their total quantity and
    /// each award with a non-zero quantity is appended as a record.
    pub fn credit(&mut self, awards: &[Award]) -> u32 {
        let mut total = 0;
        for award in awards.iter().filter(|a| a.quantity > 0) {
            total += award.quantity;
            self.records.push(award.clone());
        }
        self.winnings += total;
        total
    }
}

/// Emails are matched case-insensitively.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

impl Entity for Player {
    type Id = PlayerId;

    fn id(&self) -> PlayerId {
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

    fn player() -> Player {
        Player::register(PlayerId::new(), "Ada", " Ada@Example.com ", "hash", Utc::now()).unwrap()
    }

    fn award(quantity: u32, total: u32) -> Award {
        Award {
            item_id: ItemId::new(),
            name: "Paris-Brest".to_string(),
            quantity,
            item_awarded_total: total,
        }
    }

    #[test]
    fn registration_grants_starting_turns() {
        let p = player();
        assert_eq!(p.turns(), STARTING_TURNS);
        assert_eq!(p.winnings(), 0);
        assert!(p.records().is_empty());
        assert_eq!(p.email(), "ada@example.com");
    }

    #[test]
    fn registration_validates_fields() {
        let now = Utc::now();
        assert!(Player::register(PlayerId::new(), "", "a@b.c", "h", now).is_err());
        assert!(Player::register(PlayerId::new(), "Ada", "nope", "h", now).is_err());
    }

    #[test]
    fn spending_stops_at_zero() {
        let mut p = player();
        assert_eq!(p.spend_turn(), Ok(2));
        assert_eq!(p.spend_turn(), Ok(1));
        assert_eq!(p.spend_turn(), Ok(0));
        assert_eq!(p.spend_turn(), Err(DomainError::NoTurnsRemaining));
        assert_eq!(p.turns(), 0);
    }

    #[test]
    fn credit_sums_quantities_and_skips_empty_awards() {
        let mut p = player();
        let credited = p.credit(&[award(5, 5), award(0, 9), award(2, 7)]);
        assert_eq!(credited, 7);
        assert_eq!(p.winnings(), 7);
        assert_eq!(p.records().len(), 2);
        assert_eq!(p.records()[1].item_awarded_total, 7);

        let sum: u32 = p.records().iter().map(|r| r.quantity).sum();
        assert_eq!(sum, p.winnings());
    }

    #[test]
    fn records_keep_the_credited_awards_verbatim() {
        let mut p = player();
        let won = [award(4, 4), award(1, 12)];
        p.credit(&won);
        assert_eq!(p.records(), &won[..]);
    }
}
