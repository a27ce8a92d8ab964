//! Caller-owned navigation context for one mounted 3D view.
//!
//! Bundles the arbiter, the sequencer and the camera driver. Created when the
//! view mounts, fed raw input and frame ticks, and torn down explicitly when
//! the view goes away. After `teardown` every entry point is a no-op.

use log::debug;

use crate::camera::{CameraPose, CameraTransitionDriver};
use crate::config::NavigationConfig;
use crate::input::{InputArbiter, NavIntent, NavKey};
use crate::rooms::{Room, RoomTable};
use crate::sequencer::{NavOutcome, NavigationState, RoomSequencer};

pub struct NavigationSession {
    config: NavigationConfig,
    arbiter: InputArbiter,
    sequencer: RoomSequencer<CameraTransitionDriver>,
}

impl NavigationSession {
    pub fn new(config: NavigationConfig, rooms: RoomTable) -> Self {
        let driver = CameraTransitionDriver::new(config.transition_duration_ms, config.easing);
        Self {
            arbiter: InputArbiter::new(&config),
            sequencer: RoomSequencer::new(rooms, driver),
            config,
        }
    }

    pub fn config(&self) -> &NavigationConfig {
        &self.config
    }

    pub fn rooms(&self) -> &RoomTable {
        self.sequencer.rooms()
    }

    pub fn state(&self) -> NavigationState {
        self.sequencer.state()
    }

    pub fn current_room(&self) -> Option<&Room> {
        self.sequencer.rooms().get(self.sequencer.current_room())
    }

    pub fn target_room(&self) -> Option<&Room> {
        self.sequencer
            .target_room()
            .and_then(|id| self.sequencer.rooms().get(id))
    }

    pub fn camera_pose(&self) -> CameraPose {
        self.sequencer.driver().pose()
    }

    pub fn scene_offset_z(&self) -> f32 {
        self.sequencer.driver().scene_offset_z()
    }

    pub fn controls_unlocked(&self) -> bool {
        self.arbiter.is_unlocked()
    }

    pub fn is_closed(&self) -> bool {
        self.sequencer.is_closed()
    }

    fn forward(&mut self, intent: Option<NavIntent>, now_ms: u64) -> Option<NavOutcome> {
        let intent = intent?;
        let outcome = self.sequencer.apply(intent, now_ms);
        if outcome != NavOutcome::Accepted {
            debug!("{intent:?} not applied: {outcome:?}");
        }
        Some(outcome)
    }

    pub fn wheel(&mut self, delta_y: f32, now_ms: u64) -> Option<NavOutcome> {
        if self.is_closed() {
            return None;
        }
        let intent = self.arbiter.on_wheel(delta_y, now_ms);
        self.forward(intent, now_ms)
    }

    pub fn key(&mut self, key: NavKey, now_ms: u64) -> Option<NavOutcome> {
        if self.is_closed() {
            return None;
        }
        let intent = self.arbiter.on_key(key, now_ms);
        self.forward(intent, now_ms)
    }

    pub fn select(&mut self, room_id: i64, now_ms: u64) -> NavOutcome {
        let intent = self.arbiter.on_select(room_id);
        self.sequencer.apply(intent, now_ms)
    }

    /// Per-frame tick. Returns the room reached if a transition completed.
    pub fn tick(&mut self, now_ms: u64) -> Option<usize> {
        self.sequencer.poll(now_ms)
    }

    /// The lobby finished its intro: unlock wheel and keys, once.
    pub fn lobby_ready(&mut self) -> bool {
        let fired = self.sequencer.room_ready(0);
        if fired {
            self.arbiter.unlock();
        }
        fired
    }

    pub fn teardown(&mut self) {
        self.sequencer.teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> NavigationSession {
        let mut s = NavigationSession::new(NavigationConfig::default(), RoomTable::portfolio());
        assert!(s.lobby_ready());
        s
    }

    #[test]
    fn input_is_locked_until_lobby_ready() {
        let mut s = NavigationSession::new(NavigationConfig::default(), RoomTable::portfolio());
        assert_eq!(s.wheel(100.0, 0), None);
        assert_eq!(s.key(NavKey::S, 0), None);
        assert!(s.lobby_ready());
        assert!(!s.lobby_ready());
        assert_eq!(s.key(NavKey::S, 10), Some(NavOutcome::Accepted));
    }

    #[test]
    fn click_works_before_unlock() {
        let mut s = NavigationSession::new(NavigationConfig::default(), RoomTable::portfolio());
        assert_eq!(s.select(1, 0), NavOutcome::Accepted);
    }

    #[test]
    fn wheel_then_key_in_same_window() {
        let mut s = session();
        assert_eq!(s.wheel(40.0, 0), Some(NavOutcome::Accepted));
        // Key reaches the sequencer but the transition is in flight.
        assert_eq!(s.key(NavKey::S, 50), Some(NavOutcome::Busy));
        s.tick(2000);
        assert_eq!(s.state().current_room, 1);
    }

    #[test]
    fn key_then_wheel_in_same_window() {
        let mut s = session();
        assert_eq!(s.key(NavKey::ArrowDown, 0), Some(NavOutcome::Accepted));
        assert_eq!(s.wheel(40.0, 100), None);
        s.tick(2000);
        assert_eq!(s.state().current_room, 1);
    }

    #[test]
    fn camera_arrives_at_resting_pose() {
        let mut s = session();
        s.select(3, 0);
        assert_eq!(s.target_room().map(|r| r.name), Some("CONTACT"));
        assert_eq!(s.tick(2000), Some(3));
        let pose = s.camera_pose();
        assert_eq!(pose.position.y, 75.0);
        assert_eq!(pose.look_at, s.current_room().map(|r| r.anchor).unwrap());
        assert!(s.target_room().is_none());
    }

    #[test]
    fn teardown_freezes_the_session() {
        let mut s = session();
        s.select(2, 0);
        s.teardown();
        assert!(s.is_closed());
        assert_eq!(s.tick(5000), None);
        assert_eq!(s.wheel(100.0, 6000), None);
        assert_eq!(s.select(1, 6000), NavOutcome::Closed);
        assert_eq!(s.state().current_room, 0);
    }
}
