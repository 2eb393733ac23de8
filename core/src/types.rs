/// Number of characters in a playable word.
pub type WordLen = u8;

/// Index of a tile within a round's shuffled tile row.
pub type TileIx = u8;

/// Whole seconds of countdown time.
pub type Seconds = u32;

/// Pair-match total accumulated over the rounds of one session.
pub type Score = u32;
