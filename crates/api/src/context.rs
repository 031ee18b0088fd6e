use yams_core::PlayerId;

/// Authenticated player for a request, derived from the access token.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PlayerContext {
    player_id: PlayerId,
}

impl PlayerContext {
    pub fn new(player_id: PlayerId) -> Self {
        Self { player_id }
    }

    pub fn player_id(&self) -> PlayerId {
        self.player_id
    }
}
