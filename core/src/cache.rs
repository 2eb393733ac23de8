use alloc::string::String;
use serde::{Deserialize, Serialize};

use crate::{WordLen, WordPool};

/// Bump when the stored shape or the load-time filtering changes; older
/// entries are then treated as absent.
pub const WORD_CACHE_VERSION: u32 = 1;

/// Versioned storage envelope for the raw word-list text.
///
/// Strictly best effort: anything mismatched or unreadable decodes to
/// `None` and the host falls back to a fresh fetch.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CachedWordList {
    pub version: u32,
    pub word_len: WordLen,
    pub text: String,
}

impl CachedWordList {
    pub fn wrap(text: String, word_len: WordLen) -> Self {
        Self {
            version: WORD_CACHE_VERSION,
            word_len,
            text,
        }
    }

    /// Rebuilds the pool when the entry matches the running cache version
    /// and the expected word length. Anything else counts as a miss.
    pub fn into_pool(self, word_len: WordLen) -> Option<WordPool> {
        if self.version != WORD_CACHE_VERSION || self.word_len != word_len {
            log::debug!(
                "cached word list rejected: version {}, word length {}",
                self.version,
                self.word_len
            );
            return None;
        }
        WordPool::from_text(&self.text, word_len).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // typed local storage keeps the envelope as JSON text
    #[test]
    fn round_trips_through_json_and_back_to_a_pool() {
        let entry = CachedWordList::wrap(String::from("absolute\nnotebook\n"), 8);

        let json = serde_json::to_string(&entry).unwrap();
        let decoded: CachedWordList = serde_json::from_str(&json).unwrap();
        let pool = decoded.into_pool(8).unwrap();

        assert_eq!(pool.len(), 2);
        assert_eq!(pool.word_len(), 8);
    }

    #[test]
    fn version_mismatch_counts_as_absent() {
        let mut entry = CachedWordList::wrap(String::from("absolute\n"), 8);
        entry.version = WORD_CACHE_VERSION + 1;

        assert!(entry.into_pool(8).is_none());
    }

    #[test]
    fn word_length_mismatch_counts_as_absent() {
        let entry = CachedWordList::wrap(String::from("absolute\n"), 8);

        assert!(entry.into_pool(6).is_none());
    }

    #[test]
    fn unreadable_entries_fail_to_decode() {
        assert!(serde_json::from_str::<CachedWordList>("definitely not json").is_err());
        assert!(serde_json::from_str::<CachedWordList>("{\"version\":1}").is_err());
    }

    #[test]
    fn corrupt_text_counts_as_absent() {
        let entry = CachedWordList::wrap(String::from("tiny\n"), 8);

        assert!(entry.into_pool(8).is_none());
    }
}
