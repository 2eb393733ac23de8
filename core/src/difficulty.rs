use serde::{Deserialize, Serialize};

/// Pool-size progression: one step toward the cap per advance, back to the
/// baseline only on an explicit reset.
///
/// The session advances it per its end-of-round policy, which is wins only
/// by default. Losses never move it.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Difficulty {
    current: usize,
    baseline: usize,
    step: usize,
    cap: usize,
}

impl Difficulty {
    pub const DEFAULT_BASELINE: usize = 500;
    pub const DEFAULT_STEP: usize = 500;
    pub const DEFAULT_CAP: usize = 10_000;

    pub fn new(baseline: usize, step: usize, cap: usize) -> Self {
        let cap = cap.max(1);
        let baseline = baseline.clamp(1, cap);
        Self {
            current: baseline,
            baseline,
            step,
            cap,
        }
    }

    pub const fn current(&self) -> usize {
        self.current
    }

    pub const fn cap(&self) -> usize {
        self.cap
    }

    pub fn advance(&mut self) {
        self.current = self.current.saturating_add(self.step).min(self.cap);
    }

    /// Host-requested pool size, still subject to the cap.
    pub fn set_current(&mut self, pool_size: usize) {
        self.current = pool_size.clamp(1, self.cap);
    }

    pub fn reset(&mut self) {
        self.current = self.baseline;
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Self::new(Self::DEFAULT_BASELINE, Self::DEFAULT_STEP, Self::DEFAULT_CAP)
    }
}
