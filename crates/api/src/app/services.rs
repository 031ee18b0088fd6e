use std::sync::Arc;

use yams_auth::Hs256Tokens;
use yams_game::RandomSource;
use yams_infra::GameDispatcher;
use yams_infra::store::{InMemoryDocumentStore, InventoryStore, PlayerStore};

use crate::config::AppConfig;

/// Everything the handlers need, shared behind an `Arc`.
#[derive(Clone)]
pub struct AppServices {
    pub players: Arc<dyn PlayerStore>,
    pub items: Arc<dyn InventoryStore>,
    pub game: GameDispatcher,
    pub tokens: Arc<Hs256Tokens>,
}

impl AppServices {
    pub fn new(
        players: Arc<dyn PlayerStore>,
        items: Arc<dyn InventoryStore>,
        tokens: Hs256Tokens,
        rng: Arc<dyn RandomSource>,
    ) -> Self {
        let game = GameDispatcher::new(players.clone(), items.clone(), rng);
        Self {
            players,
            items,
            game,
            tokens: Arc::new(tokens),
        }
    }

    /// Services over a fresh in-memory document store.
    pub fn in_memory(config: &AppConfig, rng: Arc<dyn RandomSource>) -> Self {
        let store = Arc::new(InMemoryDocumentStore::new());
        let tokens = Hs256Tokens::new(config.jwt_secret.as_bytes(), config.token_ttl);
        Self::new(store.clone(), store, tokens, rng)
    }
}
