use core::fmt;
use serde::{Deserialize, Serialize};

use crate::*;

/// Abort cause the versus layer uses when the turn clock runs out on the
/// player holding the grid.
pub const TURN_TIME_CAUSE: &str = "turn-time";

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Player {
    One,
    Two,
}

impl Player {
    pub const fn other(self) -> Self {
        match self {
            Self::One => Self::Two,
            Self::Two => Self::One,
        }
    }

    /// Seat position, also the score-array slot.
    pub const fn index(self) -> usize {
        match self {
            Self::One => 0,
            Self::Two => 1,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Player {}", self.index() + 1)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VersusRules {
    /// Points needed to take the match.
    pub target_score: Score,
    /// Seconds a player gets with the grid after accepting it.
    pub turn_secs: Seconds,
    /// Pool bound of the first grid.
    pub pool_baseline: usize,
    /// Pool growth per point on the trailing score.
    pub pool_step: usize,
}

impl VersusRules {
    pub const DEFAULT_TARGET_SCORE: Score = 3;
    pub const DEFAULT_TURN_SECS: Seconds = 15;
}

impl Default for VersusRules {
    fn default() -> Self {
        Self {
            target_score: Self::DEFAULT_TARGET_SCORE,
            turn_secs: Self::DEFAULT_TURN_SECS,
            pool_baseline: Difficulty::DEFAULT_BASELINE,
            pool_step: Difficulty::DEFAULT_STEP,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum VersusPhase {
    /// A grid is dealt and gated; nobody has claimed it yet.
    AwaitingAccept,
    /// One player claimed the grid and is solving against the turn clock.
    Solving(Player),
    /// Somebody reached the target score.
    Decided(Player),
}

impl VersusPhase {
    pub const fn is_decided(self) -> bool {
        matches!(self, Self::Decided(_))
    }

    pub const fn turn_holder(self) -> Option<Player> {
        match self {
            Self::Solving(player) => Some(player),
            _ => None,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum AcceptOutcome {
    /// This accept claimed the turn and started its clock.
    Claimed,
    /// Somebody already holds the turn.
    NoChange,
}

impl AcceptOutcome {
    pub const fn has_update(self) -> bool {
        matches!(self, Self::Claimed)
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum VersusOutcome {
    /// The point left the match open; deal the next grid.
    NextGrid { scorer: Player },
    /// The point decided the match.
    MatchWon { winner: Player },
}

/// Turn-taking meta-game over the round engine.
///
/// Two players trade accept-to-claim turns on shared grids. The host deals
/// each grid gated with no round countdown, relays the winning `accept` to
/// the gate, drives the turn clock through `tick_turn`, and feeds every
/// terminal round event into `score_round`. First to the target score takes
/// the match.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VersusMatch {
    rules: VersusRules,
    scores: [Score; 2],
    phase: VersusPhase,
    turn_secs_left: Option<Seconds>,
}

impl VersusMatch {
    pub fn new(rules: VersusRules) -> Self {
        Self {
            rules,
            scores: [0, 0],
            phase: VersusPhase::AwaitingAccept,
            turn_secs_left: None,
        }
    }

    pub fn rules(&self) -> VersusRules {
        self.rules
    }

    pub fn phase(&self) -> VersusPhase {
        self.phase
    }

    pub fn score_of(&self, player: Player) -> Score {
        self.scores[player.index()]
    }

    pub fn turn_secs_left(&self) -> Option<Seconds> {
        self.turn_secs_left
    }

    /// Pool bound for the next grid, scaled off the trailing score so the
    /// difficulty never outruns the player who is behind.
    pub fn next_pool_size(&self) -> usize {
        let trailing = self.scores[0].min(self.scores[1]) as usize;
        self.rules
            .pool_baseline
            .saturating_add(trailing.saturating_mul(self.rules.pool_step))
    }

    /// First accept wins the claim and starts the turn clock. Later accepts,
    /// from either seat, change nothing.
    pub fn accept(&mut self, player: Player) -> Result<AcceptOutcome> {
        self.check_open()?;
        if self.phase.turn_holder().is_some() {
            return Ok(AcceptOutcome::NoChange);
        }

        self.phase = VersusPhase::Solving(player);
        self.turn_secs_left = Some(self.rules.turn_secs.max(1));
        log::debug!("{} claimed the turn", player);
        Ok(AcceptOutcome::Claimed)
    }

    /// One whole-second step of the turn clock. Inert while nobody holds the
    /// turn, and expires at most once per turn.
    pub fn tick_turn(&mut self) -> TickOutcome {
        let Some(secs) = self.turn_secs_left else {
            return TickOutcome::Stale;
        };

        let secs = secs.saturating_sub(1);
        if secs == 0 {
            self.turn_secs_left = None;
            TickOutcome::Expired
        } else {
            self.turn_secs_left = Some(secs);
            TickOutcome::Counting(secs)
        }
    }

    /// Scores a finished round against the turn holder: the point goes to
    /// them if they solved the grid and to the opponent otherwise.
    pub fn score_round(&mut self, holder_solved: bool) -> Result<VersusOutcome> {
        self.check_open()?;
        let Some(holder) = self.phase.turn_holder() else {
            return Err(GameError::NoTurnHolder);
        };

        let scorer = if holder_solved { holder } else { holder.other() };
        self.scores[scorer.index()] += 1;
        self.turn_secs_left = None;
        log::debug!(
            "point to {}: {} / {}",
            scorer,
            self.scores[0],
            self.scores[1]
        );

        Ok(if self.score_of(scorer) >= self.rules.target_score {
            self.phase = VersusPhase::Decided(scorer);
            VersusOutcome::MatchWon { winner: scorer }
        } else {
            self.phase = VersusPhase::AwaitingAccept;
            VersusOutcome::NextGrid { scorer }
        })
    }

    /// Fresh series under the same rules.
    pub fn restart(&mut self) {
        self.scores = [0, 0];
        self.phase = VersusPhase::AwaitingAccept;
        self.turn_secs_left = None;
    }

    fn check_open(&self) -> Result<()> {
        if self.phase.is_decided() {
            Err(GameError::MatchDecided)
        } else {
            Ok(())
        }
    }
}

impl Default for VersusMatch {
    fn default() -> Self {
        Self::new(VersusRules::default())
    }
}
