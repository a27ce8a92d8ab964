//! Passphrase gate for the AI lab terminal.
//!
//! Comparison is case-insensitive and ignores surrounding whitespace. The
//! attempt counter only feeds the denial line and hints; there is no lockout,
//! only the warning.

use log::info;
use serde::Serialize;

use crate::constants::lab;
use crate::terminal::{LineKind, ScriptLine};

pub const HINTS: [&str; 3] = [
    "What brings good luck? (a lucky plant + numbers)",
    "Four-leaf fortune + simple digits",
    "The mascot's name + lucky numbers",
];

/// Played once the gate opens.
pub const STARTUP_LINES: [&str; 5] = [
    "AI LAB SYSTEMS ONLINE",
    "LOADING CLASSIFIED MODULES...",
    "SECURITY CLEARANCE: GRANTED",
    "WELCOME TO PROJECT CLOVER",
    "TYPE \"help\" FOR COMMANDS",
];

pub const PROMPT: &str = "guest@ai-lab:~$ ";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum GateResponse {
    Granted,
    Denied {
        attempt: u32,
        line: String,
        hint: Option<&'static str>,
        lockdown_warning: bool,
    },
    /// Already open; input is ignored.
    AlreadyOpen,
}

#[derive(Debug, Clone)]
pub struct AccessGate {
    passphrase: String,
    failures: u32,
    unlocked: bool,
}

impl Default for AccessGate {
    fn default() -> Self {
        Self::new(lab::PASSPHRASE)
    }
}

impl AccessGate {
    pub fn new(passphrase: impl Into<String>) -> Self {
        Self {
            passphrase: passphrase.into().to_lowercase(),
            failures: 0,
            unlocked: false,
        }
    }

    pub fn is_unlocked(&self) -> bool {
        self.unlocked
    }

    pub fn failures(&self) -> u32 {
        self.failures
    }

    pub fn try_unlock(&mut self, input: &str) -> GateResponse {
        if self.unlocked {
            return GateResponse::AlreadyOpen;
        }
        if input.trim().to_lowercase() == self.passphrase {
            self.unlocked = true;
            info!("AI lab unlocked after {} failed attempt(s)", self.failures);
            return GateResponse::Granted;
        }
        self.failures += 1;
        let attempt = self.failures;
        let hint = (attempt >= lab::HINT_AFTER_FAILURES)
            .then(|| HINTS[(attempt as usize - 1).min(HINTS.len() - 1)]);
        GateResponse::Denied {
            attempt,
            line: format!("ACCESS DENIED - ATTEMPT {attempt}/{}", lab::NOMINAL_ATTEMPTS),
            hint,
            lockdown_warning: attempt >= lab::HINT_AFTER_FAILURES,
        }
    }
}

/// Lab terminal boot lines, one every `STARTUP_LINE_MS`, then the prompt.
/// Delays are relative to the moment the gate opened.
pub fn startup_script() -> Vec<ScriptLine> {
    let mut lines: Vec<ScriptLine> = STARTUP_LINES
        .iter()
        .enumerate()
        .map(|(i, text)| ScriptLine::new(i as u64 * lab::STARTUP_LINE_MS, *text, LineKind::Success))
        .collect();
    let prompt_at = STARTUP_LINES.len() as u64 * lab::STARTUP_LINE_MS;
    lines.push(ScriptLine::new(prompt_at, PROMPT, LineKind::Command));
    lines
}
