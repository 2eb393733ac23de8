use super::*;

/// Generation strategy that draws uniformly from the difficulty-bounded head
/// of the pool and shuffles the split halves, all from one seed.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RandomRoundGenerator {
    seed: u64,
}

impl RandomRoundGenerator {
    pub const fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl RoundGenerator for RandomRoundGenerator {
    fn generate(self, pool: &WordPool, config: RoundConfig) -> Result<RoundLayout> {
        use rand::prelude::*;

        let mut rng = SmallRng::seed_from_u64(self.seed);
        let words = pool.sample(
            usize::from(config.words_per_round),
            config.pool_size,
            &mut rng,
        );
        if words.len() < usize::from(config.words_per_round) {
            log::warn!(
                "round degraded to {} words, requested {}",
                words.len(),
                config.words_per_round
            );
        }
        RoundLayout::build(words, &mut rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::boxed::Box;
    use alloc::string::String;
    use alloc::vec;
    use alloc::vec::Vec;
    use core::fmt::Write;

    fn pool(n: usize) -> WordPool {
        let mut text = String::new();
        for i in 0..n {
            let _ = writeln!(text, "{:04}{:04}", 2 * i, 2 * i + 1);
        }
        WordPool::from_text(&text, 8).unwrap()
    }

    #[test]
    fn same_seed_reproduces_the_same_round() {
        let pool = pool(100);
        let config = RoundConfig::new(6, 30, 40);

        let first = RandomRoundGenerator::new(42).generate(&pool, config).unwrap();
        let second = RandomRoundGenerator::new(42).generate(&pool, config).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn tiles_are_exactly_the_halves_of_the_round_words() {
        let pool = pool(100);
        let layout = RandomRoundGenerator::new(9)
            .generate(&pool, RoundConfig::new(6, 30, 100))
            .unwrap();

        let mut expected: Vec<String> = layout
            .words()
            .flat_map(|word| {
                let (head, tail) = split_word(word, layout.half_len());
                [String::from(head), String::from(tail)]
            })
            .collect();
        let mut tiles: Vec<String> = layout.tiles().map(String::from).collect();
        expected.sort();
        tiles.sort();

        assert_eq!(tiles, expected);
        assert_eq!(layout.tile_count(), 12);
    }

    #[test]
    fn round_words_are_distinct() {
        let pool = pool(100);

        for seed in 0..10 {
            let layout = RandomRoundGenerator::new(seed)
                .generate(&pool, RoundConfig::new(6, 30, 10))
                .unwrap();
            let mut words: Vec<&str> = layout.words().collect();
            words.sort();
            words.dedup();
            assert_eq!(words.len(), 6);
        }
    }

    #[test]
    fn short_pools_still_build_a_playable_round() {
        let pool = pool(3);
        let layout = RandomRoundGenerator::new(1)
            .generate(&pool, RoundConfig::new(6, 30, 500))
            .unwrap();

        assert_eq!(layout.word_count(), 3);
        assert_eq!(layout.tile_count(), 6);
    }

    #[test]
    fn config_clamps_to_playable_values() {
        let config = RoundConfig::new(0, 0, 0);
        assert_eq!(config.words_per_round, 1);
        assert_eq!(config.round_secs, 1);
        assert_eq!(config.pool_size, 1);

        assert_eq!(
            RoundConfig::new(200, 30, 10).words_per_round,
            RoundConfig::MAX_WORDS
        );
    }

    #[test]
    fn mixed_length_word_sets_are_rejected() {
        use rand::prelude::*;
        let mut rng = SmallRng::seed_from_u64(0);

        let words = vec![Box::from("ABCDEFGH"), Box::from("ABCD")];
        assert_eq!(
            RoundLayout::build(words, &mut rng).unwrap_err(),
            GameError::MixedWordLengths
        );
    }

    #[test]
    fn odd_and_empty_word_sets_are_rejected() {
        use rand::prelude::*;
        let mut rng = SmallRng::seed_from_u64(0);

        assert_eq!(
            RoundLayout::build(vec![Box::from("ABCDE")], &mut rng).unwrap_err(),
            GameError::UnsplittableWordLen
        );
        assert_eq!(
            RoundLayout::build(Vec::new(), &mut rng).unwrap_err(),
            GameError::EmptyWordList
        );
    }
}
