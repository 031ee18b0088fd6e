use serde::Deserialize;
use serde_json::{json, Value};

use yams_core::Entity;
use yams_infra::GameOutcome;
use yams_infra::store::PlayerFilter;
use yams_inventory::InventoryItem;
use yams_players::{Award, Player};

pub const MISS_MESSAGE: &str = "None of the conditions met.";

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl RegisterRequest {
    /// Name of the first blank field, if any.
    pub fn missing_field(&self) -> Option<&'static str> {
        [
            ("name", &self.name),
            ("email", &self.email),
            ("password", &self.password),
        ]
        .into_iter()
        .find(|(_, v)| v.trim().is_empty())
        .map(|(k, _)| k)
    }
}

#[derive(Debug, Deserialize)]
pub struct SignInRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Optional body of `GET /user/winners`.
#[derive(Debug, Default, Deserialize)]
pub struct WinnersQuery {
    pub name: Option<String>,
    pub email: Option<String>,
}

impl From<WinnersQuery> for PlayerFilter {
    fn from(q: WinnersQuery) -> Self {
        PlayerFilter {
            name: q.name,
            email: q.email,
            ..PlayerFilter::winners()
        }
    }
}

// -------------------------
// Response mapping
// -------------------------

/// Public view of a player. The password hash never leaves the server.
pub fn player_to_json(p: &Player) -> Value {
    json!({
        "id": p.id().to_string(),
        "name": p.name(),
        "email": p.email(),
        "turns": p.turns(),
        "winnings": p.winnings(),
        "records": p.records().iter().map(|r| json!({
            "item_id": r.item_id.to_string(),
            "name": r.name,
            "quantity": r.quantity,
            "item_awarded_total": r.item_awarded_total,
        })).collect::<Vec<_>>(),
        "registered_at": p.registered_at().to_rfc3339(),
    })
}

pub fn pastry_to_json(item: &InventoryItem) -> Value {
    json!({
        "id": item.id().to_string(),
        "name": item.name(),
        "stock": item.stock(),
        "awarded": item.awarded(),
    })
}

pub fn award_to_json(a: &Award) -> Value {
    json!({
        "item_id": a.item_id.to_string(),
        "name": a.name,
        "quantity": a.quantity,
    })
}

pub fn outcome_to_json(outcome: &GameOutcome) -> Value {
    let dice = outcome.roll.faces();
    match outcome.tier.label() {
        Some(label) => json!({
            "pastries": outcome
                .inventory
                .as_deref()
                .unwrap_or_default()
                .iter()
                .map(pastry_to_json)
                .collect::<Vec<_>>(),
            "message": label,
            "dice": dice,
            "awards": outcome.awards.iter().map(award_to_json).collect::<Vec<_>>(),
            "turns": outcome.player.turns(),
        }),
        None => json!({
            "result": MISS_MESSAGE,
            "dice": dice,
            "turns": outcome.player.turns(),
        }),
    }
}
