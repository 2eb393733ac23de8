use alloc::boxed::Box;
use alloc::format;
use alloc::vec;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum RoundState {
    /// Tiles are dealt and visible but the countdown has not started.
    Setup,
    Running,
    Won,
    LostMismatch,
    LostTimeout,
    Aborted,
}

impl RoundState {
    pub const fn is_running(self) -> bool {
        matches!(self, Self::Running)
    }

    pub const fn is_final(self) -> bool {
        matches!(
            self,
            Self::Won | Self::LostMismatch | Self::LostTimeout | Self::Aborted
        )
    }
}

impl Default for RoundState {
    fn default() -> Self {
        Self::Setup
    }
}

/// Why a round ended.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum EndReason {
    /// Every pair was matched.
    Complete,
    /// The countdown reached zero.
    Time,
    /// A selected pair spelled nothing in the round, carrying the rejected
    /// text for display.
    Wrong { attempted: Box<str> },
    /// The host forced the round over, for turn timers, skips, and the like.
    Abort { cause: Box<str> },
}

impl EndReason {
    pub const fn is_win(&self) -> bool {
        matches!(self, Self::Complete)
    }

    /// Stable label for logs and host-side dispatch.
    pub fn label(&self) -> &str {
        match self {
            Self::Complete => "complete",
            Self::Time => "time",
            Self::Wrong { .. } => "wrong",
            Self::Abort { cause } => cause,
        }
    }
}

/// Terminal notification payload. Every round produces exactly one.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoundEnd {
    pub won: bool,
    pub reason: EndReason,
}

/// One round from dealt tiles to terminal outcome.
///
/// The engine is tick-driven: the host feeds it whole-second `tick` calls
/// and player selections, and it reports every change through outcome
/// values. Once a final state is reached the record in `end` never changes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoundEngine {
    layout: RoundLayout,
    board: Vec<TileCell>,
    selected: Option<TileIx>,
    matched_pairs: u8,
    remaining_secs: Seconds,
    state: RoundState,
    locked: bool,
    end: Option<RoundEnd>,
}

impl RoundEngine {
    pub fn new(layout: RoundLayout) -> Self {
        let board = vec![TileCell::Free; usize::from(layout.tile_count())];
        Self {
            layout,
            board,
            selected: None,
            matched_pairs: 0,
            remaining_secs: 0,
            state: Default::default(),
            locked: false,
            end: None,
        }
    }

    pub fn state(&self) -> RoundState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_final()
    }

    pub fn layout(&self) -> &RoundLayout {
        &self.layout
    }

    pub fn word_count(&self) -> u8 {
        self.layout.word_count()
    }

    pub fn tile_count(&self) -> u8 {
        self.layout.tile_count()
    }

    pub fn matched_pairs(&self) -> u8 {
        self.matched_pairs
    }

    pub fn remaining_secs(&self) -> Seconds {
        self.remaining_secs
    }

    pub fn selected_tile(&self) -> Option<TileIx> {
        self.selected
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn end(&self) -> Option<&RoundEnd> {
        self.end.as_ref()
    }

    pub fn cell_at(&self, ix: TileIx) -> TileCell {
        self.board[usize::from(ix)]
    }

    pub fn tile_text(&self, ix: TileIx) -> &str {
        self.layout.tile_text(ix)
    }

    /// Arms a first pick, toggles it off, or tries the pair. A complete
    /// no-op while the gate is locked or on an already matched tile.
    pub fn select_tile(&mut self, ix: TileIx) -> Result<SelectOutcome> {
        use SelectOutcome::*;

        let ix = self.layout.validate_tile(ix)?;
        self.check_not_finished()?;

        if self.locked || self.cell_at(ix).is_matched() {
            return Ok(NoChange);
        }

        let Some(first) = self.selected.take() else {
            self.selected = Some(ix);
            log::trace!("tile {} armed: {:?}", ix, self.tile_text(ix));
            return Ok(Armed);
        };

        if first == ix {
            return Ok(Disarmed);
        }

        let candidate = format!("{}{}", self.tile_text(first), self.tile_text(ix));
        if !self.layout.is_round_word(&candidate) {
            log::debug!("pair rejected: {:?}", candidate);
            self.end_round(EndReason::Wrong {
                attempted: candidate.into_boxed_str(),
            });
            return Ok(Mismatch);
        }

        self.board[usize::from(first)] = TileCell::Matched;
        self.board[usize::from(ix)] = TileCell::Matched;
        self.matched_pairs += 1;
        log::debug!(
            "pair matched: {:?} ({}/{})",
            candidate,
            self.matched_pairs,
            self.word_count()
        );

        if self.matched_pairs == self.word_count() {
            self.end_round(EndReason::Complete);
            Ok(Won)
        } else {
            Ok(Paired)
        }
    }

    /// Starts the countdown at `secs`, moving `Setup` to `Running`.
    pub fn start_timer(&mut self, secs: Seconds) -> Result<()> {
        self.check_not_finished()?;
        if self.state.is_running() {
            return Err(GameError::TimerAlreadyRunning);
        }

        self.remaining_secs = secs.max(1);
        self.state = RoundState::Running;
        Ok(())
    }

    /// Extends a live countdown without resetting it.
    pub fn add_time(&mut self, secs: Seconds) -> Result<()> {
        self.check_not_finished()?;
        if !self.state.is_running() {
            return Err(GameError::TimerNotRunning);
        }

        self.remaining_secs = self.remaining_secs.saturating_add(secs);
        Ok(())
    }

    /// One whole-second countdown step. The decrement and the timeout check
    /// are a single step, so ticks that arrive after the round left
    /// `Running` are inert and the terminal transition cannot fire twice.
    pub fn tick(&mut self) -> TickOutcome {
        if !self.state.is_running() {
            return TickOutcome::Stale;
        }

        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs == 0 {
            self.end_round(EndReason::Time);
            TickOutcome::Expired
        } else {
            TickOutcome::Counting(self.remaining_secs)
        }
    }

    /// Forces the round over from any live state.
    pub fn abort_round(&mut self, cause: &str) -> Result<()> {
        self.check_not_finished()?;
        self.end_round(EndReason::Abort {
            cause: Box::from(cause),
        });
        Ok(())
    }

    /// Suppresses tile selection until `unlock`. Both are idempotent.
    pub fn lock(&mut self) {
        self.locked = true;
    }

    pub fn unlock(&mut self) {
        self.locked = false;
    }

    fn end_round(&mut self, reason: EndReason) {
        if self.state.is_final() {
            return;
        }

        self.state = match &reason {
            EndReason::Complete => RoundState::Won,
            EndReason::Time => RoundState::LostTimeout,
            EndReason::Wrong { .. } => RoundState::LostMismatch,
            EndReason::Abort { .. } => RoundState::Aborted,
        };
        self.selected = None;
        log::debug!("round over: {}", reason.label());
        self.end = Some(RoundEnd {
            won: reason.is_win(),
            reason,
        });
    }

    fn check_not_finished(&self) -> Result<()> {
        if self.state.is_final() {
            Err(GameError::AlreadyEnded)
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed_layout(words: &[&str]) -> RoundLayout {
        use rand::prelude::*;

        let words: Vec<Box<str>> = words.iter().map(|&word| Box::from(word)).collect();
        let mut rng = SmallRng::seed_from_u64(7);
        RoundLayout::build(words, &mut rng).unwrap()
    }

    fn tile_named(engine: &RoundEngine, text: &str) -> TileIx {
        (0..engine.tile_count())
            .find(|&ix| engine.tile_text(ix) == text && !engine.cell_at(ix).is_matched())
            .unwrap()
    }

    fn select_pair(engine: &mut RoundEngine, head: &str, tail: &str) -> SelectOutcome {
        let first = tile_named(engine, head);
        assert_eq!(engine.select_tile(first).unwrap(), SelectOutcome::Armed);
        let second = tile_named(engine, tail);
        engine.select_tile(second).unwrap()
    }

    #[test]
    fn matching_every_pair_wins_the_round() {
        let mut engine = RoundEngine::new(fixed_layout(&["ABCDEFGH", "IJKLMNOP"]));

        assert_eq!(
            select_pair(&mut engine, "ABCD", "EFGH"),
            SelectOutcome::Paired
        );
        assert_eq!(engine.matched_pairs(), 1);
        assert_eq!(select_pair(&mut engine, "IJKL", "MNOP"), SelectOutcome::Won);

        assert_eq!(engine.state(), RoundState::Won);
        let end = engine.end().unwrap();
        assert!(end.won);
        assert_eq!(end.reason, EndReason::Complete);
    }

    #[test]
    fn wrong_pair_ends_the_round_with_the_attempted_text() {
        let mut engine = RoundEngine::new(fixed_layout(&["ABCDEFGH", "IJKLMNOP"]));

        assert_eq!(
            select_pair(&mut engine, "ABCD", "MNOP"),
            SelectOutcome::Mismatch
        );

        assert_eq!(engine.state(), RoundState::LostMismatch);
        let end = engine.end().unwrap();
        assert!(!end.won);
        assert_eq!(
            end.reason,
            EndReason::Wrong {
                attempted: Box::from("ABCDMNOP")
            }
        );
        assert_eq!(engine.select_tile(0).unwrap_err(), GameError::AlreadyEnded);
    }

    #[test]
    fn halves_only_match_in_selection_order() {
        let mut engine = RoundEngine::new(fixed_layout(&["ABCDEFGH", "IJKLMNOP"]));

        // EFGH then ABCD spells "EFGHABCD", which is not a round word
        assert_eq!(
            select_pair(&mut engine, "EFGH", "ABCD"),
            SelectOutcome::Mismatch
        );
    }

    #[test]
    fn selecting_the_armed_tile_again_disarms_it() {
        let mut engine = RoundEngine::new(fixed_layout(&["ABCDEFGH"]));
        let ix = tile_named(&engine, "ABCD");

        assert_eq!(engine.select_tile(ix).unwrap(), SelectOutcome::Armed);
        assert_eq!(engine.selected_tile(), Some(ix));
        assert_eq!(engine.select_tile(ix).unwrap(), SelectOutcome::Disarmed);
        assert_eq!(engine.selected_tile(), None);
    }

    #[test]
    fn matched_tiles_are_permanently_inert() {
        let mut engine = RoundEngine::new(fixed_layout(&["ABCDEFGH", "IJKLMNOP"]));
        assert_eq!(
            select_pair(&mut engine, "ABCD", "EFGH"),
            SelectOutcome::Paired
        );

        let matched = (0..engine.tile_count())
            .find(|&ix| engine.cell_at(ix).is_matched())
            .unwrap();
        assert_eq!(
            engine.select_tile(matched).unwrap(),
            SelectOutcome::NoChange
        );
        assert_eq!(engine.selected_tile(), None);
    }

    #[test]
    fn shared_halves_match_through_any_owning_word() {
        let mut engine = RoundEngine::new(fixed_layout(&["AABBCCDD", "AABBZZYY"]));

        assert_eq!(
            select_pair(&mut engine, "AABB", "ZZYY"),
            SelectOutcome::Paired
        );
        assert_eq!(select_pair(&mut engine, "AABB", "CCDD"), SelectOutcome::Won);
    }

    #[test]
    fn lock_gates_selection_and_unlock_restores_it() {
        let mut engine = RoundEngine::new(fixed_layout(&["ABCDEFGH"]));
        let ix = tile_named(&engine, "ABCD");

        engine.lock();
        engine.lock();
        assert!(engine.is_locked());
        assert_eq!(engine.select_tile(ix).unwrap(), SelectOutcome::NoChange);
        assert_eq!(engine.selected_tile(), None);

        engine.unlock();
        assert_eq!(engine.select_tile(ix).unwrap(), SelectOutcome::Armed);
    }

    #[test]
    fn countdown_expires_exactly_once_and_stale_ticks_are_inert() {
        let mut engine = RoundEngine::new(fixed_layout(&["ABCDEFGH"]));
        engine.start_timer(2).unwrap();

        assert_eq!(engine.tick(), TickOutcome::Counting(1));
        assert_eq!(engine.tick(), TickOutcome::Expired);
        assert_eq!(engine.state(), RoundState::LostTimeout);
        assert_eq!(engine.end().unwrap().reason, EndReason::Time);

        assert_eq!(engine.tick(), TickOutcome::Stale);
        assert_eq!(engine.end().unwrap().reason, EndReason::Time);
    }

    #[test]
    fn ticks_before_the_timer_starts_are_stale() {
        let mut engine = RoundEngine::new(fixed_layout(&["ABCDEFGH"]));

        assert_eq!(engine.tick(), TickOutcome::Stale);
        assert_eq!(engine.state(), RoundState::Setup);
    }

    #[test]
    fn rounds_can_be_solved_before_the_timer_starts() {
        let mut engine = RoundEngine::new(fixed_layout(&["ABCDEFGH"]));

        assert_eq!(select_pair(&mut engine, "ABCD", "EFGH"), SelectOutcome::Won);
        assert_eq!(engine.state(), RoundState::Won);
    }

    #[test]
    fn timer_misuse_is_rejected() {
        let mut engine = RoundEngine::new(fixed_layout(&["ABCDEFGH"]));

        assert_eq!(engine.add_time(5).unwrap_err(), GameError::TimerNotRunning);
        engine.start_timer(10).unwrap();
        assert_eq!(
            engine.start_timer(10).unwrap_err(),
            GameError::TimerAlreadyRunning
        );

        engine.add_time(5).unwrap();
        assert_eq!(engine.remaining_secs(), 15);
        assert_eq!(engine.tick(), TickOutcome::Counting(14));
    }

    #[test]
    fn input_after_the_clock_ran_out_keeps_the_first_outcome() {
        let mut engine = RoundEngine::new(fixed_layout(&["ABCDEFGH"]));
        engine.start_timer(1).unwrap();
        assert_eq!(engine.tick(), TickOutcome::Expired);

        let ix = tile_named(&engine, "ABCD");
        assert_eq!(engine.select_tile(ix).unwrap_err(), GameError::AlreadyEnded);
        assert_eq!(engine.end().unwrap().reason, EndReason::Time);
    }

    #[test]
    fn abort_records_the_cause() {
        let mut engine = RoundEngine::new(fixed_layout(&["ABCDEFGH"]));
        engine.start_timer(30).unwrap();

        engine.abort_round("turn-time").unwrap();
        assert_eq!(engine.state(), RoundState::Aborted);
        let end = engine.end().unwrap();
        assert!(!end.won);
        assert_eq!(end.reason.label(), "turn-time");

        assert_eq!(
            engine.abort_round("again").unwrap_err(),
            GameError::AlreadyEnded
        );
    }

    #[test]
    fn invalid_tile_is_rejected_without_state_change() {
        let mut engine = RoundEngine::new(fixed_layout(&["ABCDEFGH"]));

        assert_eq!(engine.select_tile(99).unwrap_err(), GameError::InvalidTile);
        assert_eq!(engine.selected_tile(), None);
        assert_eq!(engine.state(), RoundState::Setup);
    }
}
