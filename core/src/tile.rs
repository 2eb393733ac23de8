use serde::{Deserialize, Serialize};

/// Canonical player-visible state of a single tile.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum TileCell {
    Free,
    Matched,
}

impl TileCell {
    pub const fn is_matched(self) -> bool {
        matches!(self, Self::Matched)
    }
}

impl Default for TileCell {
    fn default() -> Self {
        Self::Free
    }
}
