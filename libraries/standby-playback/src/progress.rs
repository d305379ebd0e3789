//! Progress sampling for the seek bar

use standby_core::PlayerCapability;

/// Elapsed and total seconds of the current entry
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ProgressSnapshot {
    pub current: f64,
    /// 0 while the duration is unknown
    pub total: f64,
}

impl ProgressSnapshot {
    /// Completion in percent (0-100); 0 while the duration is unknown
    pub fn percent(&self) -> f64 {
        if self.total > 0.0 {
            (self.current / self.total * 100.0).clamp(0.0, 100.0)
        } else {
            0.0
        }
    }

    pub fn remaining(&self) -> f64 {
        (self.total - self.current).max(0.0)
    }

    pub fn elapsed_label(&self) -> String {
        format_clock(self.current)
    }

    pub fn total_label(&self) -> String {
        format_clock(self.total)
    }

    /// `-m:ss` countdown label
    pub fn remaining_label(&self) -> String {
        format!("-{}", format_clock(self.remaining()))
    }
}

/// Format seconds as `m:ss`
///
/// Fractions are truncated; negative and non-finite values render as `0:00`.
pub fn format_clock(seconds: f64) -> String {
    let whole = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };
    format!("{}:{:02}", whole / 60, whole % 60)
}

/// Samples the player, remembering the last known duration
///
/// The embedded player reports a duration of 0 while buffering and right
/// after a seek; the cache keeps the seek bar from jumping back to zero.
#[derive(Debug, Default)]
pub(crate) struct ProgressTracker {
    duration_cache: f64,
}

impl ProgressTracker {
    pub(crate) fn sample(&mut self, player: &dyn PlayerCapability) -> ProgressSnapshot {
        let reported = player.duration();
        if reported.is_finite() && reported > 0.0 {
            self.duration_cache = reported;
        }

        let current = player.current_time();
        ProgressSnapshot {
            current: if current.is_finite() { current.max(0.0) } else { 0.0 },
            total: self.duration_cache,
        }
    }

    /// Forget the cached duration when a different entry loads
    pub(crate) fn reset(&mut self) {
        self.duration_cache = 0.0;
    }
}
