use alloc::boxed::Box;
use alloc::sync::Arc;
use rand::prelude::*;
use serde::{Deserialize, Serialize};

use crate::*;

/// Abort cause that marks a round as voluntarily skipped rather than lost
/// to play, so the session applies the skip rule to it.
pub const SKIP_CAUSE: &str = "skip";

/// Spawns the recurring one-second countdown task for a session.
///
/// The handle must cancel its task when dropped. The session drops the old
/// handle before scheduling again, so at most one task is ever live.
pub trait TickScheduler {
    type Handle;

    fn schedule(&mut self) -> Self::Handle;
}

/// How `start_round` treats the countdown.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum TimerStart {
    /// Full round countdown immediately.
    Now,
    /// Deal and show the tiles, count down only after the handoff.
    Deferred,
    /// Continue on whatever time the previous round banked.
    Carry,
}

/// Per-round request from the host.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RoundStart {
    pub pool_override: Option<usize>,
    pub timer: TimerStart,
}

impl Default for RoundStart {
    fn default() -> Self {
        Self {
            pool_override: None,
            timer: TimerStart::Now,
        }
    }
}

/// What a round end does to the difficulty and the clock.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EndRule {
    pub advance_difficulty: bool,
    pub grant_secs: Seconds,
    pub keep_timer: bool,
}

/// Per-variant policy table. Wins and skips differ between game variants;
/// losses always stop the clock and never move the difficulty.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoundPolicy {
    pub on_win: EndRule,
    pub on_skip: EndRule,
}

impl RoundPolicy {
    /// Every round gets a fresh timer, wins raise the difficulty.
    pub const fn classic() -> Self {
        Self {
            on_win: EndRule {
                advance_difficulty: true,
                grant_secs: 0,
                keep_timer: false,
            },
            on_skip: EndRule {
                advance_difficulty: false,
                grant_secs: 0,
                keep_timer: false,
            },
        }
    }

    /// One clock across rounds: wins buy `win_bonus_secs`, skips buy
    /// nothing but keep the clock alive.
    pub const fn continuous(win_bonus_secs: Seconds) -> Self {
        Self {
            on_win: EndRule {
                advance_difficulty: true,
                grant_secs: win_bonus_secs,
                keep_timer: true,
            },
            on_skip: EndRule {
                advance_difficulty: false,
                grant_secs: 0,
                keep_timer: true,
            },
        }
    }
}

impl Default for RoundPolicy {
    fn default() -> Self {
        Self::classic()
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionRules {
    pub words_per_round: u8,
    pub round_secs: Seconds,
    pub policy: RoundPolicy,
}

impl SessionRules {
    pub const DEFAULT_WORDS_PER_ROUND: u8 = 6;
    pub const DEFAULT_ROUND_SECS: Seconds = 30;
}

impl Default for SessionRules {
    fn default() -> Self {
        Self {
            words_per_round: Self::DEFAULT_WORDS_PER_ROUND,
            round_secs: Self::DEFAULT_ROUND_SECS,
            policy: RoundPolicy::classic(),
        }
    }
}

/// In-memory running totals. These live and die with the session.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionStats {
    pub pairs_matched: Score,
    pub rounds_won: u32,
    pub rounds_lost: u32,
}

type EndHandler = Box<dyn FnMut(&RoundEnd)>;

/// One player's game: the active round, the difficulty ramp, the countdown
/// task handle, and the terminal-event handoff to the host.
///
/// Rounds terminate the same way with or without a registered end handler;
/// the default is simply to notify nobody.
pub struct GameSession<S: TickScheduler> {
    pool: Arc<WordPool>,
    rules: SessionRules,
    difficulty: Difficulty,
    engine: Option<RoundEngine>,
    scheduler: S,
    ticker: Option<S::Handle>,
    end_handler: Option<EndHandler>,
    notified: bool,
    carry_secs: Option<Seconds>,
    stats: SessionStats,
    rng: SmallRng,
}

impl<S: TickScheduler> GameSession<S> {
    pub fn new(
        pool: Arc<WordPool>,
        rules: SessionRules,
        difficulty: Difficulty,
        scheduler: S,
        seed: u64,
    ) -> Self {
        Self {
            pool,
            rules,
            difficulty,
            engine: None,
            scheduler,
            ticker: None,
            end_handler: None,
            notified: false,
            carry_secs: None,
            stats: SessionStats::default(),
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn set_end_handler(&mut self, handler: EndHandler) {
        self.end_handler = Some(handler);
    }

    pub fn rules(&self) -> SessionRules {
        self.rules
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    pub fn round(&self) -> Option<&RoundEngine> {
        self.engine.as_ref()
    }

    /// Deals a fresh round, replacing whatever round came before it along
    /// with that round's countdown task.
    pub fn start_round(&mut self, start: RoundStart) -> Result<()> {
        if let Some(pool_size) = start.pool_override {
            self.difficulty.set_current(pool_size);
        }

        let config = RoundConfig::new(
            self.rules.words_per_round,
            self.rules.round_secs,
            self.difficulty.current(),
        );
        let layout = RandomRoundGenerator::new(self.rng.random()).generate(&self.pool, config)?;
        log::debug!(
            "round start: pool bound {}, {} words",
            config.pool_size,
            layout.word_count()
        );

        let mut engine = RoundEngine::new(layout);
        self.notified = false;
        match start.timer {
            TimerStart::Now => {
                engine.start_timer(self.rules.round_secs)?;
                self.engine = Some(engine);
                self.carry_secs = None;
                self.restart_ticker();
            }
            TimerStart::Deferred => {
                self.engine = Some(engine);
                self.carry_secs = None;
                self.ticker = None;
            }
            TimerStart::Carry => {
                let secs = self.carry_secs.take().unwrap_or(self.rules.round_secs);
                engine.start_timer(secs)?;
                self.engine = Some(engine);
                if self.ticker.is_none() {
                    self.ticker = Some(self.scheduler.schedule());
                }
            }
        }
        Ok(())
    }

    /// Arms the countdown of a deferred round once the host hands it over.
    pub fn start_timer(&mut self) -> Result<()> {
        let secs = self.rules.round_secs;
        self.round_mut()?.start_timer(secs)?;
        self.restart_ticker();
        Ok(())
    }

    pub fn add_time(&mut self, secs: Seconds) -> Result<()> {
        self.round_mut()?.add_time(secs)
    }

    pub fn select_tile(&mut self, ix: TileIx) -> Result<SelectOutcome> {
        let outcome = self.round_mut()?.select_tile(ix)?;
        if matches!(outcome, SelectOutcome::Paired | SelectOutcome::Won) {
            self.stats.pairs_matched += 1;
        }
        if outcome.is_terminal() {
            self.finish_round();
        }
        Ok(outcome)
    }

    pub fn tick(&mut self) -> TickOutcome {
        let Some(engine) = self.engine.as_mut() else {
            return TickOutcome::Stale;
        };

        let outcome = engine.tick();
        if matches!(outcome, TickOutcome::Expired) {
            self.finish_round();
        }
        outcome
    }

    pub fn abort_round(&mut self, cause: &str) -> Result<()> {
        self.round_mut()?.abort_round(cause)?;
        self.finish_round();
        Ok(())
    }

    /// Ends the round without scoring it and applies the skip rule instead
    /// of the plain abort behavior.
    pub fn skip_round(&mut self) -> Result<()> {
        self.abort_round(SKIP_CAUSE)
    }

    pub fn lock(&mut self) -> Result<()> {
        self.round_mut()?.lock();
        Ok(())
    }

    pub fn unlock(&mut self) -> Result<()> {
        self.round_mut()?.unlock();
        Ok(())
    }

    /// Explicit new-game reset: difficulty back to the baseline, totals
    /// cleared. Never called round-to-round.
    pub fn reset_progress(&mut self) {
        self.difficulty.reset();
        self.stats = SessionStats::default();
    }

    fn round_mut(&mut self) -> Result<&mut RoundEngine> {
        self.engine.as_mut().ok_or(GameError::NoActiveRound)
    }

    fn restart_ticker(&mut self) {
        // drop first, so the old task is gone before the new one exists
        self.ticker = None;
        self.ticker = Some(self.scheduler.schedule());
    }

    fn finish_round(&mut self) {
        let Some(end) = self
            .engine
            .as_ref()
            .and_then(|engine| engine.end().cloned())
        else {
            return;
        };
        if self.notified {
            return;
        }
        self.notified = true;

        if end.won {
            self.stats.rounds_won += 1;
        } else {
            self.stats.rounds_lost += 1;
        }

        let rule = match &end.reason {
            EndReason::Complete => Some(self.rules.policy.on_win),
            EndReason::Abort { cause } if &**cause == SKIP_CAUSE => {
                Some(self.rules.policy.on_skip)
            }
            _ => None,
        };
        match rule {
            Some(rule) => {
                if rule.advance_difficulty {
                    self.difficulty.advance();
                }
                if rule.keep_timer {
                    let remaining = self.engine.as_ref().map_or(0, RoundEngine::remaining_secs);
                    self.carry_secs = Some(remaining.saturating_add(rule.grant_secs));
                } else {
                    self.ticker = None;
                    self.carry_secs = None;
                }
            }
            None => {
                self.ticker = None;
                self.carry_secs = None;
            }
        }

        log::debug!("round over: {} (won: {})", end.reason.label(), end.won);
        if let Some(handler) = self.end_handler.as_mut() {
            handler(&end);
        }
    }
}
