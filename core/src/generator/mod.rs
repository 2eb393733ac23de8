use crate::*;
pub use random::*;

mod random;

/// Builds the word set and shuffled tile row for one round.
pub trait RoundGenerator {
    fn generate(self, pool: &WordPool, config: RoundConfig) -> Result<RoundLayout>;
}
