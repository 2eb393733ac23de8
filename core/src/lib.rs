#![no_std]

extern crate alloc;

use alloc::boxed::Box;
use alloc::vec::Vec;
use rand::Rng;
use serde::{Deserialize, Serialize};

pub use cache::*;
pub use difficulty::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use pool::*;
pub use session::*;
pub use tile::*;
pub use types::*;
pub use versus::*;

mod cache;
mod difficulty;
mod engine;
mod error;
mod generator;
mod pool;
mod session;
mod tile;
mod types;
mod versus;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoundConfig {
    pub words_per_round: u8,
    pub round_secs: Seconds,
    pub pool_size: usize,
}

impl RoundConfig {
    /// Most words whose tiles stay addressable by `TileIx`.
    pub const MAX_WORDS: u8 = u8::MAX / 2;

    pub const fn new_unchecked(words_per_round: u8, round_secs: Seconds, pool_size: usize) -> Self {
        Self {
            words_per_round,
            round_secs,
            pool_size,
        }
    }

    pub fn new(words_per_round: u8, round_secs: Seconds, pool_size: usize) -> Self {
        let words_per_round = words_per_round.clamp(1, Self::MAX_WORDS);
        let round_secs = round_secs.max(1);
        let pool_size = pool_size.max(1);
        Self::new_unchecked(words_per_round, round_secs, pool_size)
    }

    pub const fn tile_count(&self) -> u8 {
        self.words_per_round * 2
    }
}

/// Fixed output of round generation: the words to rebuild and their halves
/// laid out in shuffled order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoundLayout {
    words: Box<[Box<str>]>,
    tiles: Box<[Box<str>]>,
    word_len: WordLen,
}

impl RoundLayout {
    /// Splits every word at its midpoint and shuffles the halves into the
    /// tile row. All words must share one even length.
    pub fn build<R: Rng + ?Sized>(words: Vec<Box<str>>, rng: &mut R) -> Result<Self> {
        use rand::seq::SliceRandom;

        let Some(first) = words.first() else {
            return Err(GameError::EmptyWordList);
        };
        let word_len: WordLen = first
            .chars()
            .count()
            .try_into()
            .map_err(|_| GameError::UnsplittableWordLen)?;
        if word_len == 0 || word_len % 2 != 0 {
            return Err(GameError::UnsplittableWordLen);
        }
        if words
            .iter()
            .any(|word| word.chars().count() != usize::from(word_len))
        {
            return Err(GameError::MixedWordLengths);
        }
        if words.len() > usize::from(RoundConfig::MAX_WORDS) {
            return Err(GameError::TooManyWords);
        }

        let mut tiles: Vec<Box<str>> = Vec::with_capacity(words.len() * 2);
        for word in &words {
            let (head, tail) = split_word(word, word_len / 2);
            tiles.push(Box::from(head));
            tiles.push(Box::from(tail));
        }
        tiles.shuffle(rng);

        Ok(Self {
            words: words.into_boxed_slice(),
            tiles: tiles.into_boxed_slice(),
            word_len,
        })
    }

    pub fn word_count(&self) -> u8 {
        self.words.len() as u8
    }

    pub fn tile_count(&self) -> u8 {
        self.tiles.len() as u8
    }

    pub const fn word_len(&self) -> WordLen {
        self.word_len
    }

    pub const fn half_len(&self) -> WordLen {
        self.word_len / 2
    }

    pub fn validate_tile(&self, ix: TileIx) -> Result<TileIx> {
        if usize::from(ix) < self.tiles.len() {
            Ok(ix)
        } else {
            Err(GameError::InvalidTile)
        }
    }

    pub fn tile_text(&self, ix: TileIx) -> &str {
        &self.tiles[usize::from(ix)]
    }

    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(|word| &**word)
    }

    pub fn tiles(&self) -> impl Iterator<Item = &str> {
        self.tiles.iter().map(|tile| &**tile)
    }

    /// Whether the two selected halves, joined in selection order, spell one
    /// of this round's words.
    pub fn is_round_word(&self, candidate: &str) -> bool {
        self.words.iter().any(|word| &**word == candidate)
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum SelectOutcome {
    NoChange,
    Armed,
    Disarmed,
    Paired,
    Won,
    Mismatch,
}

impl SelectOutcome {
    pub const fn has_update(self) -> bool {
        use SelectOutcome::*;
        match self {
            NoChange => false,
            Armed => true,
            Disarmed => true,
            Paired => true,
            Won => true,
            Mismatch => true,
        }
    }

    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Won | Self::Mismatch)
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum TickOutcome {
    /// Tick arrived while no countdown was live; always inert.
    Stale,
    /// Countdown moved, carrying the seconds left.
    Counting(Seconds),
    /// Countdown hit zero and ended the round.
    Expired,
}

impl TickOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::Stale)
    }
}
