//! Game transaction orchestrator.
//!
//! One `play` call is one request: spend a turn, roll, evaluate and, for a
//! winning tier, allocate pastries. The turn is persisted before the dice are
//! rolled and is never refunded.

use std::sync::Arc;

use tracing::info;

use yams_core::PlayerId;
use yams_game::{PayoutTier, RandomSource, Roll};
use yams_inventory::InventoryItem;
use yams_players::{Award, Player};

use crate::allocator::Allocator;
use crate::error::GameError;
use crate::store::{InventoryStore, PlayerStore};
use crate::turn_ledger::TurnLedger;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameOutcome {
    pub roll: Roll,
    pub tier: PayoutTier,
    pub awards: Vec<Award>,
    /// Player as persisted at the end of the transaction.
    pub player: Player,
    /// Inventory after allocation; `None` when nothing was won.
    pub inventory: Option<Vec<InventoryItem>>,
}

impl GameOutcome {
    pub fn is_win(&self) -> bool {
        self.tier.is_payout()
    }
}

#[derive(Clone)]
pub struct GameDispatcher {
    ledger: TurnLedger,
    allocator: Allocator,
    items: Arc<dyn InventoryStore>,
    rng: Arc<dyn RandomSource>,
}

impl GameDispatcher {
    pub fn new(
        players: Arc<dyn PlayerStore>,
        items: Arc<dyn InventoryStore>,
        rng: Arc<dyn RandomSource>,
    ) -> Self {
        Self {
            ledger: TurnLedger::new(players.clone()),
            allocator: Allocator::new(items.clone(), players, rng.clone()),
            items,
            rng,
        }
    }

    pub async fn play(&self, player_id: PlayerId) -> Result<GameOutcome, GameError> {
        let player = self.ledger.spend_turn(player_id).await?;

        let roll = self.rng.roll_dice();
        let tier = PayoutTier::evaluate(&roll);
        info!(player_id = %player_id, %roll, %tier, turns_left = player.turns(), "dice rolled");

        if !tier.is_payout() {
            return Ok(GameOutcome {
                roll,
                tier,
                awards: Vec::new(),
                player,
                inventory: None,
            });
        }

        let allocation = self.allocator.allocate(tier, player_id).await?;
        let inventory = self.items.list_items().await?;
        info!(
            player_id = %player_id,
            %tier,
            won = allocation.total(),
            "payout allocated"
        );

        Ok(GameOutcome {
            roll,
            tier,
            awards: allocation.awards,
            player: allocation.player,
            inventory: Some(inventory),
        })
    }
}
