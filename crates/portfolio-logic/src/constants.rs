//! Timing and layout constants.
//!
//! All values are milliseconds unless the name says otherwise. Both the Bevy
//! client and the headless harness read these.

pub mod nav {
    /// Minimum gap between two accepted wheel-driven navigations.
    pub const GUARD_INTERVAL_MS: u64 = 300;
    /// Camera travel time between two rooms.
    pub const TRANSITION_DURATION_MS: u64 = 2000;
    /// Wheel deltas at or below this magnitude are ignored (pixels).
    pub const SCROLL_THRESHOLD: f32 = 20.0;

    /// Upper bounds accepted by `NavigationConfig::validate`.
    pub const MAX_GUARD_INTERVAL_MS: u64 = 5_000;
    pub const MAX_TRANSITION_DURATION_MS: u64 = 10_000;
}

pub mod camera {
    /// Height of the camera above the target room's anchor.
    pub const HEIGHT_ABOVE_ANCHOR: f32 = 15.0;
    /// Base camera distance along +Z.
    pub const BASE_DISTANCE: f32 = 40.0;
    /// How much a room's depth pulls the camera in.
    pub const DEPTH_DISTANCE_FACTOR: f32 = 0.3;
    /// How much a room's depth shifts the building group.
    pub const DEPTH_OFFSET_FACTOR: f32 = 0.1;

    pub const INITIAL_POSITION: [f32; 3] = [0.0, 10.0, 40.0];
    pub const INITIAL_LOOK_AT: [f32; 3] = [0.0, 20.0, 0.0];
}

pub mod intro {
    pub const FIRST_LINE_CHAR_MS: u64 = 60;
    pub const CHAR_MS: u64 = 15;
    pub const FIRST_LINE_PAUSE_MS: u64 = 500;
    pub const LINE_PAUSE_MS: u64 = 50;
    pub const CURSOR_BLINK_MS: u64 = 500;
    /// Delay from "typing finished" to the navigation controls appearing
    /// (300 ms notify + 200 ms reveal).
    pub const NAV_REVEAL_DELAY_MS: u64 = 500;
}

pub mod loader {
    pub const DURATION_MS: u64 = 4000;
    /// Time the loader stays at 100% before handing over.
    pub const HOLD_MS: u64 = 800;
}

pub mod contact {
    /// Delay before the boot script starts.
    pub const BOOT_DELAY_MS: u64 = 500;
    /// Form appears this long after the boot script starts.
    pub const FORM_REVEAL_MS: u64 = 9000;
    /// Submission reports success after this long.
    pub const SEND_DURATION_MS: u64 = 4500;
    /// Terminal keeps at most this many lines.
    pub const TERMINAL_WINDOW: usize = 9;
    /// Field echo truncation.
    pub const ECHO_MAX_CHARS: usize = 30;
    /// Messages shorter than this get a "more detail" tip.
    pub const SHORT_MESSAGE_CHARS: usize = 10;
}

pub mod lab {
    pub const PASSPHRASE: &str = "clover123";
    pub const STARTUP_LINE_MS: u64 = 800;
    /// Attempts shown in the denial line ("ATTEMPT n/3").
    pub const NOMINAL_ATTEMPTS: u32 = 3;
    /// Failures before hints start appearing.
    pub const HINT_AFTER_FAILURES: u32 = 2;
    pub const TERMINAL_WINDOW: usize = 12;
}
