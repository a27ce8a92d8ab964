//! Loading-screen progress between the landing page and the 3D scene.
//!
//! Progress is linear in elapsed time; the phase label is picked from the
//! progress fraction. After reaching 100% the loader holds briefly before
//! reporting `done`, so the last phase is readable.

use serde::Serialize;

use crate::constants::loader;

pub const PHASES: [&str; 6] = [
    "Connecting to the Matrix...",
    "Loading Cyberpunk Protocols...",
    "Synchronizing Neon Elements...",
    "Establishing 3D Environment...",
    "Calibrating Luck Algorithms...",
    "Ready for Immersion...",
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoaderFrame {
    /// 0.0 ..= 100.0
    pub percent: f32,
    pub phase: usize,
    pub label: &'static str,
    /// Progress is full and the hold has elapsed.
    pub done: bool,
}

#[derive(Debug, Clone)]
pub struct LoadingSequence {
    started_ms: u64,
    duration_ms: u64,
    hold_ms: u64,
}

impl LoadingSequence {
    pub fn new(started_ms: u64) -> Self {
        Self::with_duration(started_ms, loader::DURATION_MS, loader::HOLD_MS)
    }

    pub fn with_duration(started_ms: u64, duration_ms: u64, hold_ms: u64) -> Self {
        Self {
            started_ms,
            duration_ms,
            hold_ms,
        }
    }

    pub fn frame(&self, now_ms: u64) -> LoaderFrame {
        let elapsed = now_ms.saturating_sub(self.started_ms);
        let phases = PHASES.len() as u64;
        let (percent, phase) = if self.duration_ms == 0 {
            (100.0, phases - 1)
        } else {
            let clamped = elapsed.min(self.duration_ms);
            let percent = (clamped as f64 / self.duration_ms as f64 * 100.0) as f32;
            // Integer floor avoids float jitter at phase boundaries.
            (percent, (clamped * phases / self.duration_ms).min(phases - 1))
        };
        let phase = phase as usize;
        LoaderFrame {
            percent,
            phase,
            label: PHASES[phase],
            done: elapsed >= self.duration_ms + self.hold_ms,
        }
    }
}
