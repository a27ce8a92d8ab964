//! Input arbitration: wheel, keyboard and click into one navigation intent.
//!
//! Wheel events are throttled by a guard interval so one flick of a trackpad
//! does not skip several floors. Key presses are not throttled themselves, but
//! they stamp the guard window, so whichever of wheel / key is accepted first
//! wins and the other is dropped. Clicks on a floor button are deliberate and
//! always pass.
//!
//! Wheel and key input stay locked until [`InputArbiter::unlock`] is called;
//! the lobby keeps the controls hidden until its intro has finished.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::config::NavigationConfig;

/// Direction along the room sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Toward room 0.
    Previous,
    /// Toward the last room.
    Next,
}

impl Direction {
    pub fn step(self) -> i64 {
        match self {
            Direction::Previous => -1,
            Direction::Next => 1,
        }
    }
}

/// A normalized request for the sequencer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NavIntent {
    Advance(Direction),
    JumpTo(i64),
}

/// Keys the arbiter understands. Anything else arrives as `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NavKey {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    W,
    A,
    S,
    D,
    Other,
}

impl NavKey {
    pub fn direction(self) -> Option<Direction> {
        match self {
            NavKey::ArrowUp | NavKey::W | NavKey::ArrowLeft | NavKey::A => {
                Some(Direction::Previous)
            }
            NavKey::ArrowDown | NavKey::S | NavKey::ArrowRight | NavKey::D => Some(Direction::Next),
            NavKey::Other => None,
        }
    }

    /// Letter keys collide with text entry; arrows never do.
    pub fn is_letter(self) -> bool {
        matches!(self, NavKey::W | NavKey::A | NavKey::S | NavKey::D)
    }
}

#[derive(Debug, Clone)]
pub struct InputArbiter {
    guard_interval_ms: u64,
    scroll_threshold: f32,
    last_accepted_ms: Option<u64>,
    unlocked: bool,
}

impl InputArbiter {
    pub fn new(config: &NavigationConfig) -> Self {
        Self {
            guard_interval_ms: config.guard_interval_ms,
            scroll_threshold: config.scroll_threshold,
            last_accepted_ms: None,
            unlocked: false,
        }
    }

    pub fn unlock(&mut self) {
        self.unlocked = true;
    }

    pub fn is_unlocked(&self) -> bool {
        self.unlocked
    }

    pub fn last_accepted_ms(&self) -> Option<u64> {
        self.last_accepted_ms
    }

    fn in_guard_window(&self, now_ms: u64) -> bool {
        match self.last_accepted_ms {
            Some(last) => now_ms.saturating_sub(last) < self.guard_interval_ms,
            None => false,
        }
    }

    /// `delta_y > 0` means "scroll down", i.e. toward the next room.
    pub fn on_wheel(&mut self, delta_y: f32, now_ms: u64) -> Option<NavIntent> {
        if !self.unlocked {
            return None;
        }
        if self.in_guard_window(now_ms) {
            debug!("wheel {delta_y} at {now_ms} ms dropped by guard window");
            return None;
        }
        if delta_y.abs() <= self.scroll_threshold {
            return None;
        }
        let direction = if delta_y > 0.0 {
            Direction::Next
        } else {
            Direction::Previous
        };
        self.last_accepted_ms = Some(now_ms);
        Some(NavIntent::Advance(direction))
    }

    pub fn on_key(&mut self, key: NavKey, now_ms: u64) -> Option<NavIntent> {
        if !self.unlocked {
            return None;
        }
        let direction = key.direction()?;
        self.last_accepted_ms = Some(now_ms);
        Some(NavIntent::Advance(direction))
    }

    pub fn on_select(&mut self, room_id: i64) -> NavIntent {
        NavIntent::JumpTo(room_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arbiter() -> InputArbiter {
        let mut a = InputArbiter::new(&NavigationConfig::default());
        a.unlock();
        a
    }

    #[test]
    fn locked_arbiter_drops_wheel_and_keys() {
        let mut a = InputArbiter::new(&NavigationConfig::default());
        assert_eq!(a.on_wheel(100.0, 0), None);
        assert_eq!(a.on_key(NavKey::S, 0), None);
        assert_eq!(a.on_select(2), NavIntent::JumpTo(2));
        assert_eq!(a.last_accepted_ms(), None);
    }

    #[test]
    fn wheel_direction_follows_sign() {
        let mut a = arbiter();
        assert_eq!(a.on_wheel(25.0, 0), Some(NavIntent::Advance(Direction::Next)));
        assert_eq!(
            a.on_wheel(-25.0, 1000),
            Some(NavIntent::Advance(Direction::Previous))
        );
    }

    #[test]
    fn small_wheel_deltas_are_ignored() {
        let mut a = arbiter();
        assert_eq!(a.on_wheel(20.0, 0), None);
        assert_eq!(a.on_wheel(-5.0, 10), None);
        // Ignored events do not open a guard window.
        assert!(a.on_wheel(21.0, 20).is_some());
    }

    #[test]
    fn wheel_within_guard_is_dropped() {
        let mut a = arbiter();
        assert!(a.on_wheel(25.0, 0).is_some());
        assert_eq!(a.on_wheel(25.0, 100), None);
        assert_eq!(a.on_wheel(25.0, 299), None);
        assert!(a.on_wheel(25.0, 300).is_some());
    }

    #[test]
    fn key_mapping() {
        let mut a = arbiter();
        for key in [NavKey::ArrowDown, NavKey::S, NavKey::ArrowRight, NavKey::D] {
            assert_eq!(a.on_key(key, 0), Some(NavIntent::Advance(Direction::Next)));
        }
        for key in [NavKey::ArrowUp, NavKey::W, NavKey::ArrowLeft, NavKey::A] {
            assert_eq!(
                a.on_key(key, 0),
                Some(NavIntent::Advance(Direction::Previous))
            );
        }
        assert_eq!(a.on_key(NavKey::Other, 0), None);
    }

    #[test]
    fn keys_are_not_throttled() {
        let mut a = arbiter();
        assert!(a.on_key(NavKey::S, 0).is_some());
        assert!(a.on_key(NavKey::S, 10).is_some());
    }

    #[test]
    fn key_stamps_the_wheel_guard() {
        let mut a = arbiter();
        assert!(a.on_key(NavKey::ArrowDown, 1000).is_some());
        assert_eq!(a.on_wheel(80.0, 1100), None);
        assert!(a.on_wheel(80.0, 1300).is_some());
    }

    #[test]
    fn select_bypasses_guard() {
        let mut a = arbiter();
        assert!(a.on_wheel(25.0, 0).is_some());
        assert_eq!(a.on_select(4), NavIntent::JumpTo(4));
        assert_eq!(a.on_select(-1), NavIntent::JumpTo(-1));
    }

    #[test]
    fn zero_guard_disables_throttling() {
        let mut a = InputArbiter::new(&NavigationConfig {
            guard_interval_ms: 0,
            ..NavigationConfig::default()
        });
        a.unlock();
        assert!(a.on_wheel(25.0, 0).is_some());
        assert!(a.on_wheel(25.0, 0).is_some());
    }
}
