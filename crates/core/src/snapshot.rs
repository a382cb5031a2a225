use serde::{Deserialize, Serialize};

use crate::types::{Block, GameSpec, PieceKind};

/// Read-only view of the game handed to the rendering collaborator
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSnapshot {
    pub game_spec: GameSpec,
    pub is_paused: bool,
    pub game_lost: bool,
    pub seconds_elapsed: u32,
    pub live_piece: Vec<Block>,
    pub dead_pieces: Vec<Block>,
    pub queued_piece: Vec<Block>,
    pub live_kind: Option<PieceKind>,
    pub queued_kind: Option<PieceKind>,
}

impl GameSnapshot {
    pub fn playable(&self) -> bool {
        !self.game_lost && !self.is_paused
    }
}
