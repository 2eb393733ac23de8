use alloc::boxed::Box;
use alloc::vec::Vec;
use rand::Rng;

use crate::*;

/// Canonical list of playable words, all sharing one length.
///
/// Built once from a newline separated text source and never mutated after.
/// Rounds draw from a prefix of the list, so its order doubles as a
/// difficulty ranking with the most common words first.
#[derive(Clone, Debug, PartialEq)]
pub struct WordPool {
    words: Vec<Box<str>>,
    word_len: WordLen,
}

impl WordPool {
    /// Parses a one-word-per-line source, keeping only words of exactly
    /// `word_len` characters. Case is taken as-is.
    pub fn from_text(text: &str, word_len: WordLen) -> Result<Self> {
        if word_len == 0 || word_len % 2 != 0 {
            return Err(GameError::UnsplittableWordLen);
        }

        let words: Vec<Box<str>> = text
            .lines()
            .map(str::trim)
            .filter(|line| line.chars().count() == usize::from(word_len))
            .map(Box::from)
            .collect();
        if words.is_empty() {
            return Err(GameError::EmptyWordList);
        }

        log::debug!(
            "loaded {} words of length {}",
            words.len(),
            word_len
        );
        Ok(Self { words, word_len })
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub const fn word_len(&self) -> WordLen {
        self.word_len
    }

    pub const fn half_len(&self) -> WordLen {
        self.word_len / 2
    }

    pub fn word(&self, ix: usize) -> Option<&str> {
        self.words.get(ix).map(|word| &**word)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(|word| &**word)
    }

    /// Draws up to `count` distinct words uniformly, without replacement,
    /// from the first `min(pool_bound, len)` entries. Yields fewer than
    /// `count` words when the bounded prefix is too short.
    pub fn sample<R: Rng + ?Sized>(
        &self,
        count: usize,
        pool_bound: usize,
        rng: &mut R,
    ) -> Vec<Box<str>> {
        use rand::seq::IndexedRandom;

        let eligible = &self.words[..pool_bound.min(self.words.len())];
        eligible
            .choose_multiple(rng, count.min(eligible.len()))
            .cloned()
            .collect()
    }
}

/// Splits a word after `half_chars` characters, so multi-byte words cut at
/// a character boundary rather than a byte offset.
pub fn split_word(word: &str, half_chars: WordLen) -> (&str, &str) {
    let mid = word
        .char_indices()
        .nth(usize::from(half_chars))
        .map_or(word.len(), |(ix, _)| ix);
    word.split_at(mid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::format;
    use alloc::string::String;
    use core::fmt::Write;

    fn numbered(n: usize) -> String {
        let mut text = String::new();
        for i in 0..n {
            let _ = writeln!(text, "{:04}{:04}", 2 * i, 2 * i + 1);
        }
        text
    }

    #[test]
    fn from_text_keeps_only_words_of_the_required_length() {
        let text = "absolute\ncat\nnotebook\r\nlong-words\nSANDWICH\n";
        let pool = WordPool::from_text(text, 8).unwrap();

        assert_eq!(pool.len(), 3);
        assert_eq!(pool.word(0), Some("absolute"));
        assert_eq!(pool.word(2), Some("SANDWICH"));
        assert_eq!(pool.word_len(), 8);
        assert_eq!(pool.half_len(), 4);
    }

    #[test]
    fn from_text_rejects_unsplittable_lengths() {
        assert_eq!(
            WordPool::from_text("cat\n", 3).unwrap_err(),
            GameError::UnsplittableWordLen
        );
        assert_eq!(
            WordPool::from_text("cat\n", 0).unwrap_err(),
            GameError::UnsplittableWordLen
        );
    }

    #[test]
    fn from_text_with_no_matching_words_fails_fast() {
        assert_eq!(
            WordPool::from_text("cat\ndog\n", 8).unwrap_err(),
            GameError::EmptyWordList
        );
    }

    #[test]
    fn sample_draws_distinct_words_from_the_bounded_prefix() {
        use rand::prelude::*;

        let pool = WordPool::from_text(&numbered(50), 8).unwrap();
        let mut rng = SmallRng::seed_from_u64(11);

        for _ in 0..20 {
            let words = pool.sample(6, 10, &mut rng);
            assert_eq!(words.len(), 6);

            for word in &words {
                let position = (0..pool.len())
                    .find(|&ix| pool.word(ix) == Some(&**word))
                    .unwrap();
                assert!(position < 10);
            }

            let mut unique = words.clone();
            unique.sort();
            unique.dedup();
            assert_eq!(unique.len(), words.len());
        }

        // sampling never disturbs the pool itself
        assert_eq!(pool.len(), 50);
    }

    #[test]
    fn sample_degrades_when_the_bounded_prefix_is_short() {
        use rand::prelude::*;

        let pool = WordPool::from_text(&numbered(3), 8).unwrap();
        let mut rng = SmallRng::seed_from_u64(3);

        assert_eq!(pool.sample(6, 10, &mut rng).len(), 3);
        assert_eq!(pool.sample(6, 2, &mut rng).len(), 2);
    }

    #[test]
    fn split_word_cuts_at_the_character_midpoint() {
        assert_eq!(split_word("notebook", 4), ("note", "book"));
        assert_eq!(split_word("abcde", 2), ("ab", "cde"));
    }

    #[test]
    fn split_word_counts_characters_not_bytes() {
        assert_eq!(split_word("ねこいぬ", 2), ("ねこ", "いぬ"));
    }

    #[test]
    fn split_then_join_returns_every_pool_word() {
        let pool = WordPool::from_text(&numbered(30), 8).unwrap();
        for word in pool.iter() {
            let (head, tail) = split_word(word, pool.half_len());
            assert_eq!(format!("{head}{tail}"), word);
        }
    }
}
