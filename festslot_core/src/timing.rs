//! Reel stop scheduling.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::rng::RandomSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TimingProfile {
    /// The widget's own pacing
    #[default]
    Normal,
    /// Shorter spins for repeated play
    Turbo,
    /// No waiting at all (simulation)
    Instant,
    /// Produced by `scaled`
    Custom,
}

impl TimingProfile {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "normal" => Some(Self::Normal),
            "turbo" => Some(Self::Turbo),
            "instant" => Some(Self::Instant),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimingConfig {
    pub profile: TimingProfile,

    /// Spin time before the first reel stops (ms)
    pub base_ms: u64,

    /// Added per reel index (ms)
    pub stagger_ms: u64,

    /// Exclusive upper bound of the random per-reel jitter (ms)
    pub jitter_ms: u64,

    /// Pause between the last stop and win evaluation (ms)
    pub settle_ms: u64,
}

impl TimingConfig {
    pub fn normal() -> Self {
        Self {
            profile: TimingProfile::Normal,
            base_ms: 1000,
            stagger_ms: 300,
            jitter_ms: 300,
            settle_ms: 300,
        }
    }

    pub fn turbo() -> Self {
        Self {
            profile: TimingProfile::Turbo,
            base_ms: 400,
            stagger_ms: 100,
            jitter_ms: 100,
            settle_ms: 100,
        }
    }

    pub fn instant() -> Self {
        Self {
            profile: TimingProfile::Instant,
            base_ms: 0,
            stagger_ms: 0,
            jitter_ms: 0,
            settle_ms: 0,
        }
    }

    pub fn from_profile(profile: TimingProfile) -> Self {
        match profile {
            TimingProfile::Normal | TimingProfile::Custom => Self::normal(),
            TimingProfile::Turbo => Self::turbo(),
            TimingProfile::Instant => Self::instant(),
        }
    }

    /// Scale every duration by `factor` (< 1.0 = faster).
    pub fn scaled(&self, factor: f64) -> Self {
        let scale = |ms: u64| (ms as f64 * factor.max(0.0)).round() as u64;
        Self {
            profile: TimingProfile::Custom,
            base_ms: scale(self.base_ms),
            stagger_ms: scale(self.stagger_ms),
            jitter_ms: scale(self.jitter_ms),
            settle_ms: scale(self.settle_ms),
        }
    }

    /// `base + reel * stagger + jitter`, jitter drawn uniformly from `[0, jitter_ms)`.
    pub fn stop_delay(&self, reel: usize, rng: &mut dyn RandomSource) -> Duration {
        let jitter = if self.jitter_ms == 0 {
            0
        } else {
            rng.below(self.jitter_ms.min(u32::MAX as u64) as u32) as u64
        };
        Duration::from_millis(self.base_ms + reel as u64 * self.stagger_ms + jitter)
    }

    pub fn settle(&self) -> Duration {
        Duration::from_millis(self.settle_ms)
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self::normal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::ScriptedRandom;

    #[test]
    fn delays_follow_base_stagger_jitter() {
        let t = TimingConfig::normal();
        let mut rng = ScriptedRandom::new(vec![0, 150, 299]);
        assert_eq!(t.stop_delay(0, &mut rng), Duration::from_millis(1000));
        assert_eq!(t.stop_delay(1, &mut rng), Duration::from_millis(1450));
        assert_eq!(t.stop_delay(2, &mut rng), Duration::from_millis(1899));
    }

    #[test]
    fn instant_draws_no_jitter() {
        let t = TimingConfig::instant();
        let mut rng = ScriptedRandom::new(vec![42]);
        assert_eq!(t.stop_delay(2, &mut rng), Duration::ZERO);
        // untouched: the next draw is still the first value
        assert_eq!(rng.below(100), 42);
    }

    #[test]
    fn profiles_and_scaling() {
        let normal = TimingConfig::normal();
        assert!(TimingConfig::turbo().base_ms < normal.base_ms);
        let half = normal.scaled(0.5);
        assert_eq!(half.profile, TimingProfile::Custom);
        assert_eq!(half.base_ms, 500);
        assert_eq!(half.stagger_ms, 150);
        assert_eq!(TimingProfile::from_name("Turbo"), Some(TimingProfile::Turbo));
    }
}
