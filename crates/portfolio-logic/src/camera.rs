//! Virtual camera and the timed room-to-room transition.
//!
//! The driver owns the camera pose. Each transition interpolates the position
//! (and the building group's z offset) from wherever the camera is toward the
//! target room's viewing spot, while the look-at point stays on the target
//! room's anchor for the whole flight.
//!
//! Completion is decided by elapsed time against the configured duration, not
//! by how many frames were rendered: a poll that arrives late (stalled frame
//! loop, unfocused window) jumps straight to the final pose and completes.
//! `TransitionStatus::Completed` is reported exactly once per `begin`.

use serde::Serialize;

use crate::constants::camera as cam;
use crate::easing::Easing;
use crate::math::Vec3;
use crate::rooms::Room;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CameraPose {
    pub position: Vec3,
    pub look_at: Vec3,
}

impl Default for CameraPose {
    fn default() -> Self {
        Self {
            position: Vec3::from_array(cam::INITIAL_POSITION),
            look_at: Vec3::from_array(cam::INITIAL_LOOK_AT),
        }
    }
}

/// Where the camera comes to rest for `room`. X is kept from the current pose.
pub fn resting_position(room: &Room, current_x: f32) -> Vec3 {
    Vec3::new(
        current_x,
        room.anchor.y + cam::HEIGHT_ABOVE_ANCHOR,
        cam::BASE_DISTANCE + room.depth_hint() * cam::DEPTH_DISTANCE_FACTOR,
    )
}

/// Building group z offset while `room` is current.
pub fn scene_offset_for(room: &Room) -> f32 {
    -room.depth_hint() * cam::DEPTH_OFFSET_FACTOR
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TransitionStatus {
    /// No transition in flight.
    Idle,
    /// Eased progress in `0.0..1.0`.
    InFlight { progress: f32 },
    /// The transition to `room` finished on this poll.
    Completed { room: usize },
}

/// Something that can carry the view from one room to another over time.
///
/// `RoomSequencer` is generic over this so it can be exercised with a fake
/// driver. Implementations must return `Completed` exactly once per `begin`
/// and must never hang: some poll at or after the nominal duration completes.
pub trait TransitionDriver {
    fn begin(&mut self, target: &Room, now_ms: u64);
    fn poll(&mut self, now_ms: u64) -> TransitionStatus;
    /// Drop the in-flight transition without completing it.
    fn cancel(&mut self);
    fn is_active(&self) -> bool;
}

#[derive(Debug, Clone, Copy)]
struct ActiveTransition {
    room: usize,
    started_ms: u64,
    from: Vec3,
    to: Vec3,
    anchor: Vec3,
    from_offset: f32,
    to_offset: f32,
}

/// Drives the virtual camera between rooms.
#[derive(Debug, Clone)]
pub struct CameraTransitionDriver {
    pose: CameraPose,
    scene_offset_z: f32,
    duration_ms: u64,
    easing: Easing,
    active: Option<ActiveTransition>,
}

impl CameraTransitionDriver {
    pub fn new(duration_ms: u64, easing: Easing) -> Self {
        Self {
            pose: CameraPose::default(),
            scene_offset_z: 0.0,
            duration_ms,
            easing,
            active: None,
        }
    }

    pub fn pose(&self) -> CameraPose {
        self.pose
    }

    pub fn scene_offset_z(&self) -> f32 {
        self.scene_offset_z
    }

    pub fn duration_ms(&self) -> u64 {
        self.duration_ms
    }

    /// Room currently being flown to, if any.
    pub fn target(&self) -> Option<usize> {
        self.active.map(|a| a.room)
    }

    /// Linear (un-eased) progress of the active transition.
    fn raw_progress(&self, active: &ActiveTransition, now_ms: u64) -> f32 {
        if self.duration_ms == 0 {
            return 1.0;
        }
        let elapsed = now_ms.saturating_sub(active.started_ms);
        (elapsed as f64 / self.duration_ms as f64).min(1.0) as f32
    }
}

impl Default for CameraTransitionDriver {
    fn default() -> Self {
        Self::new(crate::constants::nav::TRANSITION_DURATION_MS, Easing::EaseInOut)
    }
}

impl TransitionDriver for CameraTransitionDriver {
    fn begin(&mut self, target: &Room, now_ms: u64) {
        self.active = Some(ActiveTransition {
            room: target.id,
            started_ms: now_ms,
            from: self.pose.position,
            to: resting_position(target, self.pose.position.x),
            anchor: target.anchor,
            from_offset: self.scene_offset_z,
            to_offset: scene_offset_for(target),
        });
        self.pose.look_at = target.anchor;
    }

    fn poll(&mut self, now_ms: u64) -> TransitionStatus {
        let Some(active) = self.active else {
            return TransitionStatus::Idle;
        };

        let raw = self.raw_progress(&active, now_ms);
        let eased = self.easing.apply(raw);
        self.pose.position = active.from.lerp(active.to, eased);
        self.pose.look_at = active.anchor;
        self.scene_offset_z = active.from_offset + (active.to_offset - active.from_offset) * eased;

        if raw >= 1.0 {
            // Land exactly on the target regardless of float drift.
            self.pose.position = active.to;
            self.scene_offset_z = active.to_offset;
            self.active = None;
            TransitionStatus::Completed { room: active.room }
        } else {
            TransitionStatus::InFlight { progress: eased }
        }
    }

    fn cancel(&mut self) {
        self.active = None;
    }

    fn is_active(&self) -> bool {
        self.active.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rooms::RoomTable;

    fn driver() -> CameraTransitionDriver {
        CameraTransitionDriver::new(2000, Easing::EaseInOut)
    }

    #[test]
    fn idle_until_begin() {
        let mut d = driver();
        assert_eq!(d.poll(0), TransitionStatus::Idle);
        assert_eq!(d.pose(), CameraPose::default());
    }

    #[test]
    fn resting_position_matches_layout() {
        let rooms = RoomTable::portfolio();
        let skills = rooms.get(1).unwrap();
        let p = resting_position(skills, 0.0);
        assert_eq!(p, Vec3::new(0.0, 35.0, 37.0));
        let lab = rooms.get(4).unwrap();
        let p = resting_position(lab, 2.5);
        assert_eq!(p, Vec3::new(2.5, -5.0, 28.0));
        assert!((scene_offset_for(lab) - 4.0).abs() < 1e-6);
    }

    #[test]
    fn completes_exactly_once() {
        let rooms = RoomTable::portfolio();
        let mut d = driver();
        d.begin(rooms.get(2).unwrap(), 1000);
        assert!(matches!(d.poll(1500), TransitionStatus::InFlight { .. }));
        assert_eq!(d.poll(3000), TransitionStatus::Completed { room: 2 });
        assert_eq!(d.poll(3016), TransitionStatus::Idle);
        assert_eq!(d.poll(9000), TransitionStatus::Idle);
    }

    #[test]
    fn stalled_frames_still_complete() {
        let rooms = RoomTable::portfolio();
        let mut d = driver();
        d.begin(rooms.get(3).unwrap(), 0);
        // No polls for a long time, then a single late one.
        assert_eq!(d.poll(60_000), TransitionStatus::Completed { room: 3 });
        assert_eq!(d.pose().position, resting_position(rooms.get(3).unwrap(), 0.0));
    }

    #[test]
    fn look_at_tracks_target_anchor_throughout() {
        let rooms = RoomTable::portfolio();
        let target = rooms.get(1).unwrap();
        let mut d = driver();
        d.begin(target, 0);
        for t in (0..=2000).step_by(250) {
            d.poll(t);
            assert_eq!(d.pose().look_at, target.anchor, "t={t}");
        }
    }

    #[test]
    fn position_moves_monotonically_toward_target() {
        let rooms = RoomTable::portfolio();
        let target = rooms.get(2).unwrap();
        let mut d = driver();
        d.begin(target, 0);
        let goal = resting_position(target, 0.0);
        let mut prev = d.pose().position.distance(goal);
        for t in (100..=2000).step_by(100) {
            d.poll(t);
            let dist = d.pose().position.distance(goal);
            assert!(dist <= prev + 1e-4, "moved away at t={t}");
            prev = dist;
        }
        assert!(prev < 1e-4);
    }

    #[test]
    fn midpoint_is_halfway_with_ease_in_out() {
        let rooms = RoomTable::portfolio();
        let target = rooms.get(1).unwrap();
        let mut d = driver();
        let start = d.pose().position;
        d.begin(target, 0);
        d.poll(1000);
        let goal = resting_position(target, start.x);
        let expected = start.lerp(goal, 0.5);
        assert!(d.pose().position.distance(expected) < 1e-4);
    }

    #[test]
    fn scene_offset_follows_depth() {
        let rooms = RoomTable::portfolio();
        let mut d = driver();
        d.begin(rooms.get(2).unwrap(), 0);
        d.poll(2000);
        assert!((d.scene_offset_z() - 2.0).abs() < 1e-6);
    }

    #[test]
    fn cancel_drops_without_completion() {
        let rooms = RoomTable::portfolio();
        let mut d = driver();
        d.begin(rooms.get(1).unwrap(), 0);
        d.poll(500);
        d.cancel();
        assert!(!d.is_active());
        assert_eq!(d.poll(5000), TransitionStatus::Idle);
    }

    #[test]
    fn clock_going_backwards_does_not_underflow() {
        let rooms = RoomTable::portfolio();
        let mut d = driver();
        d.begin(rooms.get(1).unwrap(), 5000);
        assert_eq!(
            d.poll(4000),
            TransitionStatus::InFlight { progress: 0.0 }
        );
    }
}
