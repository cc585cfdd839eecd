//! Pull-to-refresh gesture state machine.
//!
//! ```text
//! Idle ──start──▶ Pulling ──end (≥ threshold)──▶ Refreshing ──finish──▶ Idle
//!                    └──────end (< threshold)─────────────────────────▶ Idle
//! ```
//!
//! Coordinates are logical pixels. The handler knows nothing about
//! rendering or fetching: `touch_end` reports whether a refresh should run
//! and the caller reports back with `finish_refresh`.

/// Pull distance that triggers a refresh on release.
pub const PULL_THRESHOLD: f32 = 80.0;
/// Upper bound of the visual pull.
pub const MAX_PULL: f32 = 120.0;
/// Indicator height held while the refresh runs.
pub const REFRESH_INDICATOR_HEIGHT: f32 = 60.0;
/// Finger travel is halved to make the pull feel heavy.
pub const PULL_DAMPING: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PullPhase {
    Idle,
    Pulling,
    Refreshing,
}

/// What a release did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PullRelease {
    /// Threshold reached; the caller must run one reset fetch.
    Refresh,
    /// Released short of the threshold.
    Cancelled,
    /// No gesture was in progress.
    Ignored,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PullToRefresh {
    phase: PullPhase,
    pull_distance: f32,
    start_y: f32,
}

impl PullToRefresh {
    pub fn new() -> Self {
        Self {
            phase: PullPhase::Idle,
            pull_distance: 0.0,
            start_y: 0.0,
        }
    }

    pub fn phase(&self) -> PullPhase {
        self.phase
    }

    pub fn pull_distance(&self) -> f32 {
        self.pull_distance
    }

    pub fn is_pulling(&self) -> bool {
        self.phase == PullPhase::Pulling
    }

    pub fn is_refreshing(&self) -> bool {
        self.phase == PullPhase::Refreshing
    }

    /// Whether releasing now would trigger a refresh.
    pub fn is_armed(&self) -> bool {
        self.is_pulling() && self.pull_distance >= PULL_THRESHOLD
    }

    /// Begin a gesture. Only starts at the top of the feed and never while
    /// a refresh is running.
    pub fn touch_start(&mut self, y: f32, scroll_offset: f32) -> bool {
        if self.phase != PullPhase::Idle || scroll_offset != 0.0 {
            return false;
        }
        self.phase = PullPhase::Pulling;
        self.start_y = y;
        self.pull_distance = 0.0;
        true
    }

    pub fn touch_move(&mut self, y: f32, scroll_offset: f32) {
        if self.phase != PullPhase::Pulling {
            return;
        }
        let delta = y - self.start_y;
        self.pull_distance = if scroll_offset == 0.0 && delta > 0.0 {
            (delta * PULL_DAMPING).min(MAX_PULL)
        } else {
            0.0
        };
    }

    pub fn touch_end(&mut self) -> PullRelease {
        if self.phase != PullPhase::Pulling {
            return PullRelease::Ignored;
        }
        if self.pull_distance >= PULL_THRESHOLD {
            self.phase = PullPhase::Refreshing;
            self.pull_distance = REFRESH_INDICATOR_HEIGHT;
            PullRelease::Refresh
        } else {
            self.reset();
            PullRelease::Cancelled
        }
    }

    /// The refresh fetch settled; return to idle.
    pub fn finish_refresh(&mut self) {
        if self.phase == PullPhase::Refreshing {
            self.reset();
        }
    }

    fn reset(&mut self) {
        self.phase = PullPhase::Idle;
        self.pull_distance = 0.0;
        self.start_y = 0.0;
    }
}

impl Default for PullToRefresh {
    fn default() -> Self {
        Self::new()
    }
}
