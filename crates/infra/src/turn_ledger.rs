//! Turn ledger: the per-player remaining-turns counter.

use std::sync::Arc;

use tracing::debug;

use yams_core::PlayerId;
use yams_players::Player;

use crate::cas::{Change, MAX_CAS_ATTEMPTS, modify_player};
use crate::error::GameError;
use crate::store::PlayerStore;

#[derive(Clone)]
pub struct TurnLedger {
    players: Arc<dyn PlayerStore>,
    max_attempts: usize,
}

impl TurnLedger {
    pub fn new(players: Arc<dyn PlayerStore>) -> Self {
        Self {
            players,
            max_attempts: MAX_CAS_ATTEMPTS,
        }
    }

    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    /// Consume one turn and persist it.
    ///
    /// Always decides on the currently persisted counter, so a replayed
    /// request after the last turn was spent fails instead of decrementing
    /// twice. Returns the player as stored after the decrement.
    pub async fn spend_turn(&self, player_id: PlayerId) -> Result<Player, GameError> {
        let (player, turns_left) = modify_player(
            self.players.as_ref(),
            player_id,
            self.max_attempts,
            |player| Ok(Change::Commit(player.spend_turn()?)),
        )
        .await?;

        debug!(player_id = %player_id, turns_left, "turn spent");
        Ok(player)
    }
}
