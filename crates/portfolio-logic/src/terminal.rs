//! Terminal-style text effects as pure functions of elapsed time.
//!
//! - [`Typewriter`]: types a list of lines character by character (lobby intro).
//! - [`TimedScript`]: reveals whole lines at fixed delays and accepts lines
//!   appended on the fly (contact room, AI lab).
//!
//! Nothing here owns a timer; callers pass `now_ms` each frame, so dropping
//! the value is the whole teardown.

use serde::Serialize;

use crate::constants::intro;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypingTiming {
    pub first_line_char_ms: u64,
    pub char_ms: u64,
    pub first_line_pause_ms: u64,
    pub line_pause_ms: u64,
}

impl Default for TypingTiming {
    fn default() -> Self {
        Self {
            first_line_char_ms: intro::FIRST_LINE_CHAR_MS,
            char_ms: intro::CHAR_MS,
            first_line_pause_ms: intro::FIRST_LINE_PAUSE_MS,
            line_pause_ms: intro::LINE_PAUSE_MS,
        }
    }
}

impl TypingTiming {
    fn char_ms_for(&self, line: usize) -> u64 {
        if line == 0 {
            self.first_line_char_ms
        } else {
            self.char_ms
        }
    }

    fn pause_for(&self, line: usize) -> u64 {
        if line == 0 {
            self.first_line_pause_ms
        } else {
            self.line_pause_ms
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypewriterFrame {
    pub text: String,
    pub complete: bool,
}

#[derive(Debug, Clone)]
pub struct Typewriter {
    lines: Vec<String>,
    timing: TypingTiming,
    started_ms: u64,
}

impl Typewriter {
    pub fn new<S: Into<String>>(lines: impl IntoIterator<Item = S>, started_ms: u64) -> Self {
        Self::with_timing(lines, TypingTiming::default(), started_ms)
    }

    pub fn with_timing<S: Into<String>>(
        lines: impl IntoIterator<Item = S>,
        timing: TypingTiming,
        started_ms: u64,
    ) -> Self {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
            timing,
            started_ms,
        }
    }

    fn line_duration(&self, i: usize) -> u64 {
        let chars = self.lines[i].chars().count() as u64;
        chars * self.timing.char_ms_for(i) + self.timing.pause_for(i)
    }

    pub fn total_duration_ms(&self) -> u64 {
        (0..self.lines.len()).map(|i| self.line_duration(i)).sum()
    }

    /// Timestamp at which the last line (and its pause) is done.
    pub fn completes_at_ms(&self) -> u64 {
        self.started_ms + self.total_duration_ms()
    }

    pub fn frame(&self, now_ms: u64) -> TypewriterFrame {
        let mut remaining = now_ms.saturating_sub(self.started_ms);
        let mut shown: Vec<String> = Vec::with_capacity(self.lines.len());

        for (i, line) in self.lines.iter().enumerate() {
            let duration = self.line_duration(i);
            if remaining >= duration {
                shown.push(line.clone());
                remaining -= duration;
                continue;
            }
            let per_char = self.timing.char_ms_for(i).max(1);
            let typed = (remaining / per_char) as usize;
            shown.push(line.chars().take(typed).collect());
            return TypewriterFrame {
                text: shown.join("\n"),
                complete: false,
            };
        }

        TypewriterFrame {
            text: shown.join("\n"),
            complete: true,
        }
    }

    pub fn cursor_visible(&self, now_ms: u64) -> bool {
        (now_ms.saturating_sub(self.started_ms) / intro::CURSOR_BLINK_MS) % 2 == 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LineKind {
    Command,
    Output,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScriptLine {
    /// Reveal time relative to the script start.
    pub delay_ms: u64,
    pub text: String,
    pub kind: LineKind,
}

impl ScriptLine {
    pub fn new(delay_ms: u64, text: impl Into<String>, kind: LineKind) -> Self {
        Self {
            delay_ms,
            text: text.into(),
            kind,
        }
    }
}

/// Lines revealed at fixed offsets from a start time, shown through a rolling
/// window of the most recent `window` lines.
#[derive(Debug, Clone)]
pub struct TimedScript {
    lines: Vec<ScriptLine>,
    started_ms: u64,
    window: usize,
}

impl TimedScript {
    pub fn new(lines: Vec<ScriptLine>, started_ms: u64, window: usize) -> Self {
        Self {
            lines,
            started_ms,
            window: window.max(1),
        }
    }

    /// One line every `interval_ms`, first line at 0.
    pub fn evenly_spaced<S: Into<String>>(
        texts: impl IntoIterator<Item = S>,
        interval_ms: u64,
        kind: LineKind,
        started_ms: u64,
        window: usize,
    ) -> Self {
        let lines = texts
            .into_iter()
            .enumerate()
            .map(|(i, t)| ScriptLine::new(i as u64 * interval_ms, t, kind))
            .collect();
        Self::new(lines, started_ms, window)
    }

    pub fn started_ms(&self) -> u64 {
        self.started_ms
    }

    /// Append a line that is visible from `now_ms` on.
    pub fn push_at(&mut self, now_ms: u64, text: impl Into<String>, kind: LineKind) {
        let delay_ms = now_ms.saturating_sub(self.started_ms);
        self.lines.push(ScriptLine::new(delay_ms, text, kind));
    }

    /// Append a whole script whose delays are relative to `now_ms`.
    pub fn schedule_from(&mut self, now_ms: u64, lines: Vec<ScriptLine>) {
        let base = now_ms.saturating_sub(self.started_ms);
        self.lines.extend(lines.into_iter().map(|mut l| {
            l.delay_ms += base;
            l
        }));
    }

    pub fn visible(&self, now_ms: u64) -> Vec<&ScriptLine> {
        let elapsed = now_ms.saturating_sub(self.started_ms);
        let mut shown: Vec<&ScriptLine> =
            self.lines.iter().filter(|l| l.delay_ms <= elapsed).collect();
        shown.sort_by_key(|l| l.delay_ms);
        let skip = shown.len().saturating_sub(self.window);
        shown.split_off(skip)
    }

    /// Drop every line already revealed at `now_ms`; pending lines stay.
    pub fn clear(&mut self, now_ms: u64) {
        let elapsed = now_ms.saturating_sub(self.started_ms);
        self.lines.retain(|l| l.delay_ms > elapsed);
    }

    /// True once every line has been revealed.
    pub fn is_finished(&self, now_ms: u64) -> bool {
        let elapsed = now_ms.saturating_sub(self.started_ms);
        self.lines.iter().all(|l| l.delay_ms <= elapsed)
    }
}
