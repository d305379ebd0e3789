//! Volume control
//!
//! The embedded player applies its own loudness curve, so levels are passed
//! through linearly as 0-100.

/// Volume level with a mute flag that preserves the level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Volume {
    level: u8,
    muted: bool,
}

impl Volume {
    /// Create a volume controller; levels above 100 are clamped
    pub fn new(level: u8) -> Self {
        Self {
            level: level.min(100),
            muted: false,
        }
    }

    /// Level from an untyped slider or script value, clamped to 0-100
    ///
    /// Returns `None` for NaN and infinities.
    pub fn level_from_f64(value: f64) -> Option<u8> {
        value
            .is_finite()
            .then(|| value.round().clamp(0.0, 100.0) as u8)
    }

    pub fn set_level(&mut self, level: u8) {
        self.level = level.min(100);
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    pub fn mute(&mut self) {
        self.muted = true;
    }

    pub fn unmute(&mut self) {
        self.muted = false;
    }

    pub fn toggle_mute(&mut self) {
        self.muted = !self.muted;
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Level to hand to the player: 0 while muted
    pub fn effective(&self) -> u8 {
        if self.muted {
            0
        } else {
            self.level
        }
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self::new(70)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_to_hundred() {
        let mut volume = Volume::new(150);
        assert_eq!(volume.level(), 100);
        volume.set_level(200);
        assert_eq!(volume.level(), 100);
    }

    #[test]
    fn untyped_levels_clamp_instead_of_wrapping() {
        assert_eq!(Volume::level_from_f64(300.0), Some(100));
        assert_eq!(Volume::level_from_f64(-5.0), Some(0));
        assert_eq!(Volume::level_from_f64(42.6), Some(43));
        assert_eq!(Volume::level_from_f64(f64::NAN), None);
        assert_eq!(Volume::level_from_f64(f64::INFINITY), None);
    }

    #[test]
    fn mute_preserves_level() {
        let mut volume = Volume::new(40);
        volume.mute();
        assert_eq!(volume.effective(), 0);
        assert_eq!(volume.level(), 40);

        volume.toggle_mute();
        assert!(!volume.is_muted());
        assert_eq!(volume.effective(), 40);
    }
}
