//! Pure navigation and presentation logic for the immersive portfolio.
//!
//! This crate contains everything about the portfolio that is independent of
//! the renderer. Functions and state machines take plain data and explicit
//! millisecond timestamps, making them unit-testable without a frame loop and
//! usable from both the Bevy client and the headless harness.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`camera`] | Virtual camera pose and the timed room-to-room transition driver |
//! | [`config`] | Navigation tuning record (guard interval, duration, wheel threshold) |
//! | [`constants`] | Timing constants for navigation, intro, loader, contact, lab |
//! | [`contact`] | Contact form required-field checks and simulated submission |
//! | [`easing`] | Easing curves used by camera transitions |
//! | [`gate`] | Cosmetic AI-lab passphrase gate |
//! | [`input`] | Wheel / keyboard / click normalization with wheel throttling |
//! | [`lab`] | AI-lab console: module table, secret projects, command line |
//! | [`loader`] | Loading-screen progress and phase labels |
//! | [`math`] | Minimal 3D vector type |
//! | [`rooms`] | Room table: ids, anchors, colours, panel kinds |
//! | [`sequencer`] | Room sequencer state machine (`Idle` / `Transitioning`) |
//! | [`session`] | Caller-owned bundle of arbiter + sequencer + driver |
//! | [`showcase`] | Skills and projects catalogue with category filters |
//! | [`terminal`] | Typewriter text and timed terminal scripts |

pub mod camera;
pub mod config;
pub mod constants;
pub mod contact;
pub mod easing;
pub mod gate;
pub mod input;
pub mod lab;
pub mod loader;
pub mod math;
pub mod rooms;
pub mod sequencer;
pub mod session;
pub mod showcase;
pub mod terminal;
