//! Navigation tuning record.
//!
//! One parameterized set of thresholds drives the arbiter, the sequencer and
//! the camera driver. Defaults are the values the portfolio ships with:
//! 300 ms wheel guard, 2 s camera travel, wheel deltas above 20 px.
//!
//! ```
//! use portfolio_logic::config::NavigationConfig;
//!
//! let config = NavigationConfig::default();
//! assert!(config.validate().is_empty());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::nav;
use crate::easing::Easing;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NavigationConfig {
    /// Minimum time between accepted wheel-driven intents. 0 disables throttling.
    pub guard_interval_ms: u64,
    /// Camera travel time; completion is decided by this, not by frame count.
    pub transition_duration_ms: u64,
    /// Minimum |deltaY| (pixels) for a wheel event to count.
    pub scroll_threshold: f32,
    pub easing: Easing,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            guard_interval_ms: nav::GUARD_INTERVAL_MS,
            transition_duration_ms: nav::TRANSITION_DURATION_MS,
            scroll_threshold: nav::SCROLL_THRESHOLD,
            easing: Easing::EaseInOut,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("guard interval {0} ms exceeds {max} ms", max = nav::MAX_GUARD_INTERVAL_MS)]
    GuardIntervalTooLong(u64),
    #[error("transition duration must be greater than zero")]
    ZeroTransitionDuration,
    #[error("transition duration {0} ms exceeds {max} ms", max = nav::MAX_TRANSITION_DURATION_MS)]
    TransitionTooLong(u64),
    #[error("scroll threshold {0} must be finite and non-negative")]
    InvalidScrollThreshold(f32),
}

impl NavigationConfig {
    /// Returns every problem found; empty means the config is usable.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if self.guard_interval_ms > nav::MAX_GUARD_INTERVAL_MS {
            errors.push(ConfigError::GuardIntervalTooLong(self.guard_interval_ms));
        }
        if self.transition_duration_ms == 0 {
            errors.push(ConfigError::ZeroTransitionDuration);
        } else if self.transition_duration_ms > nav::MAX_TRANSITION_DURATION_MS {
            errors.push(ConfigError::TransitionTooLong(self.transition_duration_ms));
        }
        if !self.scroll_threshold.is_finite() || self.scroll_threshold < 0.0 {
            errors.push(ConfigError::InvalidScrollThreshold(self.scroll_threshold));
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        let config = NavigationConfig::default();
        assert!(config.validate().is_empty());
        assert_eq!(config.guard_interval_ms, 300);
        assert_eq!(config.transition_duration_ms, 2000);
        assert_eq!(config.scroll_threshold, 20.0);
    }

    #[test]
    fn zero_guard_is_allowed() {
        let config = NavigationConfig {
            guard_interval_ms: 0,
            ..NavigationConfig::default()
        };
        assert!(config.validate().is_empty());
    }

    #[test]
    fn collects_every_error() {
        let config = NavigationConfig {
            guard_interval_ms: 60_000,
            transition_duration_ms: 0,
            scroll_threshold: f32::NAN,
            easing: Easing::Linear,
        };
        let errors = config.validate();
        assert_eq!(errors.len(), 3, "{errors:?}");
        assert!(errors.contains(&ConfigError::GuardIntervalTooLong(60_000)));
        assert!(errors.contains(&ConfigError::ZeroTransitionDuration));
    }

    #[test]
    fn rejects_long_transition_and_negative_threshold() {
        let config = NavigationConfig {
            transition_duration_ms: 20_000,
            scroll_threshold: -1.0,
            ..NavigationConfig::default()
        };
        let errors = config.validate();
        assert!(errors.contains(&ConfigError::TransitionTooLong(20_000)));
        assert!(errors.contains(&ConfigError::InvalidScrollThreshold(-1.0)));
    }

    #[test]
    fn error_messages_name_the_limit() {
        let msg = ConfigError::GuardIntervalTooLong(9000).to_string();
        assert!(msg.contains("9000"));
        assert!(msg.contains("5000"));
    }
}
