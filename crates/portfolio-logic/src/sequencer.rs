//! Room sequencer: the single writer of the current room and transition flag.
//!
//! State machine:
//!
//! ```text
//! Idle(room) --navigate_to(valid target)--> Transitioning(target)
//! Transitioning(target) --driver Completed--> Idle(target)
//! Idle --navigate_to(invalid | same room)--> Idle            (no-op)
//! Transitioning --any navigate_to--> Transitioning           (dropped)
//! ```
//!
//! Requests made while a transition is in flight are dropped, never queued, so
//! camera tweens cannot stack up or go stale.

use log::{debug, info};
use serde::Serialize;

use crate::camera::{CameraTransitionDriver, TransitionDriver, TransitionStatus};
use crate::input::{Direction, NavIntent};
use crate::rooms::RoomTable;

/// Snapshot for views: which room, and whether controls should be disabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavigationState {
    pub current_room: usize,
    pub transitioning: bool,
}

/// What happened to a navigation request. Everything except `Accepted` is a
/// silent no-op; callers may log it but nothing is surfaced to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavOutcome {
    Accepted,
    Busy,
    SameRoom,
    OutOfRange,
    Closed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    Transitioning { target: usize },
}

type ReadyCallback = Box<dyn FnOnce() + Send + Sync>;

pub struct RoomSequencer<D: TransitionDriver = CameraTransitionDriver> {
    rooms: RoomTable,
    current: usize,
    phase: Phase,
    driver: D,
    on_first_room_ready: Option<ReadyCallback>,
    first_room_ready_fired: bool,
    closed: bool,
}

impl<D: TransitionDriver> RoomSequencer<D> {
    /// Starts idle at room 0.
    pub fn new(rooms: RoomTable, driver: D) -> Self {
        Self {
            rooms,
            current: 0,
            phase: Phase::Idle,
            driver,
            on_first_room_ready: None,
            first_room_ready_fired: false,
            closed: false,
        }
    }

    /// Invoked once, the first time the lobby reports its intro is done.
    pub fn on_first_room_ready(mut self, callback: impl FnOnce() + Send + Sync + 'static) -> Self {
        self.on_first_room_ready = Some(Box::new(callback));
        self
    }

    pub fn rooms(&self) -> &RoomTable {
        &self.rooms
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    pub fn current_room(&self) -> usize {
        self.current
    }

    pub fn is_transitioning(&self) -> bool {
        matches!(self.phase, Phase::Transitioning { .. })
    }

    /// Room being flown to, if a transition is in flight.
    pub fn target_room(&self) -> Option<usize> {
        match self.phase {
            Phase::Transitioning { target } => Some(target),
            Phase::Idle => None,
        }
    }

    pub fn state(&self) -> NavigationState {
        NavigationState {
            current_room: self.current,
            transitioning: self.is_transitioning(),
        }
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn navigate_to(&mut self, target: i64, now_ms: u64) -> NavOutcome {
        let outcome = self.check(target);
        if outcome != NavOutcome::Accepted {
            debug!("navigate_to({target}) ignored: {outcome:?}");
            return outcome;
        }

        // `check` guarantees the target resolves.
        let Some(room) = self.rooms.resolve(target) else {
            return NavOutcome::OutOfRange;
        };
        let target = room.id;
        info!("navigating {} -> {} ({})", self.current, target, room.name);
        self.phase = Phase::Transitioning { target };
        self.driver.begin(room, now_ms);
        NavOutcome::Accepted
    }

    fn check(&self, target: i64) -> NavOutcome {
        if self.closed {
            return NavOutcome::Closed;
        }
        if self.is_transitioning() {
            return NavOutcome::Busy;
        }
        match self.rooms.resolve(target) {
            None => NavOutcome::OutOfRange,
            Some(room) if room.id == self.current => NavOutcome::SameRoom,
            Some(_) => NavOutcome::Accepted,
        }
    }

    /// Step one room in `direction`, clamped to the ends of the table.
    pub fn advance(&mut self, direction: Direction, now_ms: u64) -> NavOutcome {
        let last = self.rooms.last_index() as i64;
        let target = (self.current as i64 + direction.step()).clamp(0, last);
        self.navigate_to(target, now_ms)
    }

    pub fn apply(&mut self, intent: NavIntent, now_ms: u64) -> NavOutcome {
        match intent {
            NavIntent::Advance(direction) => self.advance(direction, now_ms),
            NavIntent::JumpTo(room) => self.navigate_to(room, now_ms),
        }
    }

    /// Advance the driver. Returns the room reached when a transition
    /// completes on this poll.
    pub fn poll(&mut self, now_ms: u64) -> Option<usize> {
        if self.closed {
            return None;
        }
        let Phase::Transitioning { target } = self.phase else {
            return None;
        };
        match self.driver.poll(now_ms) {
            TransitionStatus::Completed { room } => {
                debug_assert_eq!(room, target);
                self.current = target;
                self.phase = Phase::Idle;
                info!("arrived at room {target}");
                Some(target)
            }
            TransitionStatus::InFlight { .. } => None,
            TransitionStatus::Idle => {
                // Driver lost the transition (cancelled elsewhere); unlock in place.
                self.phase = Phase::Idle;
                None
            }
        }
    }

    /// A room's view reports its intro has finished. Fires the first-ready
    /// callback once, when that room is the lobby and it is current.
    pub fn room_ready(&mut self, room_id: usize) -> bool {
        if self.closed || self.first_room_ready_fired || room_id != 0 || self.current != 0 {
            return false;
        }
        self.first_room_ready_fired = true;
        if let Some(callback) = self.on_first_room_ready.take() {
            callback();
        }
        true
    }

    /// Scoped teardown on unmount: cancel the pending transition and refuse
    /// all further work.
    pub fn teardown(&mut self) {
        self.driver.cancel();
        self.phase = Phase::Idle;
        self.on_first_room_ready = None;
        self.closed = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rooms::Room;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Completes on the first poll at or after `begin + duration`.
    #[derive(Default)]
    struct FakeDriver {
        active: Option<(usize, u64)>,
        begins: usize,
        cancels: usize,
    }

    const FAKE_MS: u64 = 2000;

    impl TransitionDriver for FakeDriver {
        fn begin(&mut self, target: &Room, now_ms: u64) {
            self.begins += 1;
            self.active = Some((target.id, now_ms));
        }
        fn poll(&mut self, now_ms: u64) -> TransitionStatus {
            match self.active {
                Some((room, start)) if now_ms >= start + FAKE_MS => {
                    self.active = None;
                    TransitionStatus::Completed { room }
                }
                Some(_) => TransitionStatus::InFlight { progress: 0.5 },
                None => TransitionStatus::Idle,
            }
        }
        fn cancel(&mut self) {
            self.cancels += 1;
            self.active = None;
        }
        fn is_active(&self) -> bool {
            self.active.is_some()
        }
    }

    fn seq() -> RoomSequencer<FakeDriver> {
        RoomSequencer::new(RoomTable::portfolio(), FakeDriver::default())
    }

    // --- navigate_to preconditions ---

    #[test]
    fn starts_idle_at_lobby() {
        let s = seq();
        assert_eq!(
            s.state(),
            NavigationState {
                current_room: 0,
                transitioning: false
            }
        );
    }

    #[test]
    fn accepted_navigation_completes_on_driver_signal() {
        let mut s = seq();
        assert_eq!(s.navigate_to(2, 0), NavOutcome::Accepted);
        assert!(s.is_transitioning());
        assert_eq!(s.current_room(), 0, "room only changes on completion");
        assert_eq!(s.poll(1000), None);
        assert_eq!(s.poll(2000), Some(2));
        assert_eq!(s.state().current_room, 2);
        assert!(!s.is_transitioning());
    }

    #[test]
    fn busy_requests_are_dropped_not_queued() {
        let mut s = seq();
        assert_eq!(s.navigate_to(1, 0), NavOutcome::Accepted);
        assert_eq!(s.navigate_to(3, 10), NavOutcome::Busy);
        assert_eq!(s.advance(Direction::Next, 20), NavOutcome::Busy);
        assert_eq!(s.poll(2000), Some(1));
        assert_eq!(s.poll(5000), None, "nothing was queued");
        assert_eq!(s.current_room(), 1);
        assert_eq!(s.driver().begins, 1);
    }

    #[test]
    fn out_of_range_is_a_no_op() {
        let mut s = seq();
        for target in [-1, 5, 99, i64::MIN, i64::MAX] {
            assert_eq!(s.navigate_to(target, 0), NavOutcome::OutOfRange);
            assert_eq!(s.state().current_room, 0);
            assert!(!s.is_transitioning());
        }
    }

    #[test]
    fn same_room_is_a_no_op() {
        let mut s = seq();
        assert_eq!(s.navigate_to(0, 0), NavOutcome::SameRoom);
        assert_eq!(s.driver().begins, 0);
    }

    #[test]
    fn same_room_while_busy_is_still_a_no_op() {
        let mut s = seq();
        s.navigate_to(2, 0);
        assert_eq!(s.navigate_to(0, 10), NavOutcome::Busy);
        s.poll(2000);
        assert_eq!(s.current_room(), 2);
    }

    // --- advance ---

    #[test]
    fn advance_clamps_at_both_ends() {
        let mut s = seq();
        assert_eq!(s.advance(Direction::Previous, 0), NavOutcome::SameRoom);
        for (i, t) in (1..=4).zip((0..).step_by(3000)) {
            assert_eq!(s.advance(Direction::Next, t), NavOutcome::Accepted);
            s.poll(t + 2000);
            assert_eq!(s.current_room(), i);
        }
        assert_eq!(s.advance(Direction::Next, 50_000), NavOutcome::SameRoom);
    }

    #[test]
    fn apply_routes_intents() {
        let mut s = seq();
        assert_eq!(
            s.apply(NavIntent::Advance(Direction::Next), 0),
            NavOutcome::Accepted
        );
        s.poll(2000);
        assert_eq!(s.apply(NavIntent::JumpTo(4), 3000), NavOutcome::Accepted);
        s.poll(5000);
        assert_eq!(s.current_room(), 4);
    }

    // --- first room ready ---

    #[test]
    fn first_room_ready_fires_once() {
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);
        let mut s = seq().on_first_room_ready(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        assert!(!s.room_ready(2), "only the lobby counts");
        assert!(s.room_ready(0));
        assert!(!s.room_ready(0));
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn first_room_ready_without_callback_still_latches() {
        let mut s = seq();
        assert!(s.room_ready(0));
        assert!(!s.room_ready(0));
    }

    #[test]
    fn lobby_ready_ignored_when_elsewhere() {
        let mut s = seq();
        s.navigate_to(1, 0);
        s.poll(2000);
        assert!(!s.room_ready(0));
    }

    // --- teardown ---

    #[test]
    fn teardown_cancels_and_closes() {
        let mut s = seq();
        s.navigate_to(3, 0);
        s.teardown();
        assert_eq!(s.driver().cancels, 1);
        assert!(!s.is_transitioning());
        assert_eq!(s.poll(10_000), None);
        assert_eq!(s.current_room(), 0);
        assert_eq!(s.navigate_to(1, 10_000), NavOutcome::Closed);
        assert!(!s.room_ready(0));
    }

    #[test]
    fn teardown_drops_pending_callback() {
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);
        let mut s = seq().on_first_room_ready(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        s.teardown();
        s.room_ready(0);
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }
}
