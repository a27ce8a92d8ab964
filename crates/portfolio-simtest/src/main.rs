//! Immersive Portfolio Headless Navigation Harness
//!
//! Validates the navigation rules and room presentation logic without a
//! window or renderer. Replays scripted input against a simulated clock.
//!
//! Usage:
//!   cargo run -p portfolio-simtest
//!   cargo run -p portfolio-simtest -- --verbose
//!   cargo run -p portfolio-simtest -- --json

use portfolio_logic::camera::{resting_position, CameraTransitionDriver};
use portfolio_logic::config::{ConfigError, NavigationConfig};
use portfolio_logic::constants::nav;
use portfolio_logic::contact::{self, ContactForm};
use portfolio_logic::easing::Easing;
use portfolio_logic::gate::{AccessGate, GateResponse};
use portfolio_logic::input::{InputArbiter, NavKey};
use portfolio_logic::lab::{CommandError, LabConsole, MODULES};
use portfolio_logic::loader::{LoadingSequence, PHASES};
use portfolio_logic::rooms::{RoomTable, RoomView};
use portfolio_logic::sequencer::{NavOutcome, RoomSequencer};
use portfolio_logic::session::NavigationSession;
use portfolio_logic::showcase::{self, ProjectsView, SkillsView, PROJECTS, SKILLS};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

// ── Shipped data (same JSON the client defaults mirror) ─────────────────
const NAVIGATION_JSON: &str = include_str!("../../../data/navigation.json");
const SCENARIOS_JSON: &str = include_str!("../../../data/scenarios.json");

const SWEEP_SEED: u64 = 0x5EED;
const SWEEP_RUNS: usize = 500;
const FRAME_MS: u64 = 16;

#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum ScriptEvent {
    Wheel { at: u64, delta_y: f32 },
    Key { at: u64, key: NavKey },
    Select { at: u64, room: i64 },
}

impl ScriptEvent {
    fn at(&self) -> u64 {
        match self {
            ScriptEvent::Wheel { at, .. }
            | ScriptEvent::Key { at, .. }
            | ScriptEvent::Select { at, .. } => *at,
        }
    }
}

#[derive(Debug, Deserialize)]
struct Scenario {
    name: String,
    events: Vec<ScriptEvent>,
    run_until: u64,
    expect_room: usize,
}

// ── Test harness ────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

fn check(name: &str, passed: bool, detail: impl Into<String>) -> TestResult {
    TestResult {
        name: name.into(),
        passed,
        detail: detail.into(),
    }
}

fn main() {
    let verbose = std::env::args().any(|a| a == "--verbose");
    let json = std::env::args().any(|a| a == "--json");
    if !json {
        println!("=== Immersive Portfolio Navigation Harness ===\n");
    }

    let mut results = Vec::new();

    // 1. Shipped navigation config
    results.extend(validate_config(json));

    // 2. Room table layout
    results.extend(validate_rooms(json));

    // 3. Reference scenarios
    results.extend(validate_reference_scenarios(json));

    // 4. Randomised property sweeps
    results.extend(validate_properties(json, verbose));

    // 5. Scripted input replays
    results.extend(validate_scripted_input(json, verbose));

    // 6. Room presentation logic
    results.extend(validate_presentation(json));

    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.len() - passed;

    if json {
        match serde_json::to_string_pretty(&results) {
            Ok(out) => println!("{out}"),
            Err(e) => eprintln!("failed to serialize results: {e}"),
        }
    } else {
        println!();
        for r in &results {
            let icon = if r.passed { "✓" } else { "✗" };
            if !r.passed || verbose {
                println!("  {} {}: {}", icon, r.name, r.detail);
            }
        }
        println!(
            "\n=== RESULT: {}/{} passed, {} failed ===",
            passed,
            results.len(),
            failed
        );
    }

    if failed > 0 {
        std::process::exit(1);
    }
}

fn section(json: bool, title: &str) {
    if !json {
        println!("--- {title} ---");
    }
}

fn sequencer(config: &NavigationConfig) -> RoomSequencer {
    let driver = CameraTransitionDriver::new(config.transition_duration_ms, config.easing);
    RoomSequencer::new(RoomTable::portfolio(), driver)
}

/// Poll once per frame until the sequencer settles. Returns the settle time.
fn settle(seq: &mut RoomSequencer, from: u64, limit: u64) -> Option<u64> {
    let mut t = from;
    while t <= from + limit {
        if seq.poll(t).is_some() {
            return Some(t);
        }
        t += FRAME_MS;
    }
    None
}

// ── 1. Config ───────────────────────────────────────────────────────────

fn validate_config(json: bool) -> Vec<TestResult> {
    section(json, "Navigation Config");
    let mut results = Vec::new();

    let shipped: NavigationConfig = match serde_json::from_str(NAVIGATION_JSON) {
        Ok(c) => c,
        Err(e) => {
            results.push(check("config_parse", false, format!("JSON parse error: {e}")));
            return results;
        }
    };

    let problems = shipped.validate();
    results.push(check(
        "config_valid",
        problems.is_empty(),
        if problems.is_empty() {
            "shipped config passes validation".to_string()
        } else {
            format!("{problems:?}")
        },
    ));

    results.push(check(
        "config_matches_defaults",
        shipped == NavigationConfig::default(),
        format!(
            "guard {} ms, transition {} ms, threshold {}",
            shipped.guard_interval_ms, shipped.transition_duration_ms, shipped.scroll_threshold
        ),
    ));

    let broken = NavigationConfig {
        guard_interval_ms: nav::MAX_GUARD_INTERVAL_MS + 1,
        transition_duration_ms: 0,
        scroll_threshold: f32::NAN,
        easing: Easing::Linear,
    };
    let errors = broken.validate();
    let expected = [
        ConfigError::GuardIntervalTooLong(nav::MAX_GUARD_INTERVAL_MS + 1),
        ConfigError::ZeroTransitionDuration,
    ];
    let all_found = expected.iter().all(|e| errors.contains(e)) && errors.len() == 3;
    results.push(check(
        "config_rejects_broken",
        all_found,
        format!("{} errors reported", errors.len()),
    ));

    results
}

// ── 2. Rooms ────────────────────────────────────────────────────────────

fn validate_rooms(json: bool) -> Vec<TestResult> {
    section(json, "Room Table");
    let mut results = Vec::new();
    let rooms = RoomTable::portfolio();

    results.push(check(
        "rooms_count",
        rooms.len() == 5,
        format!("{} rooms", rooms.len()),
    ));

    let ids_ok = rooms.iter().enumerate().all(|(i, r)| r.id == i);
    results.push(check("rooms_positional_ids", ids_ok, "id == index"));

    let stairs: Vec<usize> = (0..rooms.len())
        .filter(|&i| rooms.has_stairs_after(i))
        .collect();
    results.push(check(
        "rooms_stair_layout",
        stairs == vec![0, 1, 2],
        format!("stairs after rooms {stairs:?}"),
    ));

    let lab_below = match (rooms.get(0), rooms.iter().find(|r| r.view == RoomView::AiLab)) {
        (Some(lobby), Some(lab)) => lab.anchor.y < lobby.anchor.y,
        _ => false,
    };
    results.push(check("rooms_lab_in_basement", lab_below, "AI LAB below lobby"));

    let names: Vec<&str> = rooms.iter().map(|r| r.name).collect();
    results.push(check(
        "rooms_order",
        names == ["LOBBY", "SKILLS", "PROJECTS", "CONTACT", "AI LAB"],
        names.join(" → "),
    ));

    results
}

// ── 3. Reference scenarios ──────────────────────────────────────────────

fn validate_reference_scenarios(json: bool) -> Vec<TestResult> {
    section(json, "Reference Scenarios");
    let mut results = Vec::new();
    let config = NavigationConfig::default();

    // A: direct jump
    let mut seq = sequencer(&config);
    let accepted = seq.navigate_to(2, 0) == NavOutcome::Accepted;
    let flagged = seq.state().transitioning;
    let done = settle(&mut seq, 0, 3000);
    results.push(check(
        "scenario_a_direct_jump",
        accepted && flagged && done == Some(2000) && seq.state().current_room == 2,
        format!("settled at {done:?} ms in room {}", seq.state().current_room),
    ));

    // B: second request dropped
    let mut seq = sequencer(&config);
    seq.navigate_to(1, 0);
    let second = seq.navigate_to(3, 1);
    settle(&mut seq, 0, 3000);
    results.push(check(
        "scenario_b_busy_drop",
        second == NavOutcome::Busy && seq.current_room() == 1,
        format!("second request {second:?}, final room {}", seq.current_room()),
    ));

    // C: wheel burst
    let mut arbiter = InputArbiter::new(&config);
    arbiter.unlock();
    let first = arbiter.on_wheel(25.0, 0);
    let second = arbiter.on_wheel(25.0, 100);
    results.push(check(
        "scenario_c_wheel_throttle",
        first.is_some() && second.is_none(),
        format!("{first:?} then {second:?}"),
    ));

    // D: out of range
    let mut seq = sequencer(&config);
    let before = seq.state();
    let low = seq.navigate_to(-1, 0);
    let high = seq.navigate_to(99, 0);
    results.push(check(
        "scenario_d_out_of_range",
        low == NavOutcome::OutOfRange && high == NavOutcome::OutOfRange && seq.state() == before,
        format!("{low:?}, {high:?}"),
    ));

    results
}

// ── 4. Property sweeps ──────────────────────────────────────────────────

fn validate_properties(json: bool, verbose: bool) -> Vec<TestResult> {
    section(json, "Property Sweeps");
    let mut results = Vec::new();
    let config = NavigationConfig::default();
    let mut rng = StdRng::seed_from_u64(SWEEP_SEED);

    // Mutual exclusion: only the first request of a busy window counts
    let mut violations = 0;
    for _ in 0..SWEEP_RUNS {
        let mut seq = sequencer(&config);
        let first: i64 = rng.gen_range(1..5);
        seq.navigate_to(first, 0);
        for _ in 0..rng.gen_range(1..10) {
            let at = rng.gen_range(0..config.transition_duration_ms);
            if seq.navigate_to(rng.gen_range(-5..10), at) != NavOutcome::Busy {
                violations += 1;
            }
        }
        settle(&mut seq, 0, 3000);
        if seq.current_room() != first as usize {
            violations += 1;
        }
    }
    results.push(check(
        "prop_mutual_exclusion",
        violations == 0,
        format!("{SWEEP_RUNS} runs, {violations} violations"),
    ));

    // Range safety
    let mut seq = sequencer(&config);
    let count = seq.rooms().len() as i64;
    let mut changed = 0;
    for _ in 0..SWEEP_RUNS {
        let target = if rng.gen_bool(0.5) {
            rng.gen_range(i64::MIN..0)
        } else {
            rng.gen_range(count..i64::MAX)
        };
        let before = seq.state();
        seq.navigate_to(target, 0);
        if seq.state() != before {
            changed += 1;
        }
    }
    results.push(check(
        "prop_range_safety",
        changed == 0,
        format!("{SWEEP_RUNS} out-of-range targets, {changed} changed state"),
    ));

    // Idempotence on self, idle and busy
    let mut seq = sequencer(&config);
    let idle_self = seq.navigate_to(0, 0);
    seq.navigate_to(2, 0);
    let busy_self = seq.navigate_to(0, 10);
    settle(&mut seq, 0, 3000);
    let after_self = seq.navigate_to(2, 5000);
    results.push(check(
        "prop_self_noop",
        idle_self == NavOutcome::SameRoom
            && busy_self == NavOutcome::Busy
            && after_self == NavOutcome::SameRoom
            && seq.current_room() == 2,
        format!("{idle_self:?} / {busy_self:?} / {after_self:?}"),
    ));

    // Throttle correctness
    let mut leaks = 0;
    for _ in 0..SWEEP_RUNS {
        let mut arbiter = InputArbiter::new(&config);
        arbiter.unlock();
        let t: u64 = rng.gen_range(0..1_000_000);
        let gap: u64 = rng.gen_range(0..config.guard_interval_ms);
        arbiter.on_wheel(50.0, t);
        if arbiter.on_wheel(50.0, t + gap).is_some() {
            leaks += 1;
        }
    }
    results.push(check(
        "prop_throttle",
        leaks == 0,
        format!("{SWEEP_RUNS} bursts, {leaks} leaked"),
    ));

    // Eventual unlock under frame stalls
    let mut worst_late = 0;
    let mut stuck = 0;
    for _ in 0..SWEEP_RUNS {
        let mut seq = sequencer(&config);
        let start: u64 = rng.gen_range(0..10_000);
        seq.navigate_to(rng.gen_range(1..5), start);
        let deadline = start + config.transition_duration_ms;
        let mut t = start;
        let mut last_frame = start;
        let done = loop {
            let gap = if rng.gen_bool(0.1) {
                rng.gen_range(200..1500)
            } else {
                rng.gen_range(1..40)
            };
            t += gap;
            if seq.poll(t).is_some() {
                break Some(t);
            }
            last_frame = t;
            if t > deadline + 5_000 {
                break None;
            }
        };
        match done {
            Some(at) => {
                // The completing poll must be the first one past the deadline.
                if last_frame >= deadline {
                    stuck += 1;
                }
                worst_late = worst_late.max(at.saturating_sub(deadline));
            }
            None => stuck += 1,
        }
    }
    if verbose && !json {
        println!("  worst completion lag behind deadline: {worst_late} ms (one frame gap)");
    }
    results.push(check(
        "prop_eventual_unlock",
        stuck == 0,
        format!("{SWEEP_RUNS} stalled runs, {stuck} stuck"),
    ));

    results
}

// ── 5. Scripted input ───────────────────────────────────────────────────

fn replay(scenario: &Scenario, config: NavigationConfig) -> usize {
    let mut session = NavigationSession::new(config, RoomTable::portfolio());
    session.lobby_ready();

    let mut events: Vec<&ScriptEvent> = scenario.events.iter().collect();
    events.sort_by_key(|e| e.at());
    let mut pending = events.into_iter().peekable();

    let mut t = 0;
    while t <= scenario.run_until {
        while let Some(event) = pending.next_if(|e| e.at() <= t) {
            match event {
                ScriptEvent::Wheel { at, delta_y } => {
                    session.wheel(*delta_y, *at);
                }
                ScriptEvent::Key { at, key } => {
                    session.key(*key, *at);
                }
                ScriptEvent::Select { at, room } => {
                    session.select(*room, *at);
                }
            }
        }
        session.tick(t);
        t += FRAME_MS;
    }
    session.state().current_room
}

fn validate_scripted_input(json: bool, verbose: bool) -> Vec<TestResult> {
    section(json, "Scripted Input");
    let mut results = Vec::new();

    let scenarios: Vec<Scenario> = match serde_json::from_str(SCENARIOS_JSON) {
        Ok(s) => s,
        Err(e) => {
            results.push(check("scenarios_parse", false, format!("JSON parse error: {e}")));
            return results;
        }
    };
    if verbose && !json {
        println!("  {} scripted scenarios", scenarios.len());
    }

    for scenario in &scenarios {
        let room = replay(scenario, NavigationConfig::default());
        results.push(check(
            &format!("script_{}", scenario.name),
            room == scenario.expect_room,
            format!("ended in room {room}, expected {}", scenario.expect_room),
        ));
    }

    results
}

// ── 6. Presentation ─────────────────────────────────────────────────────

fn validate_presentation(json: bool) -> Vec<TestResult> {
    section(json, "Presentation");
    let mut results = Vec::new();
    let rooms = RoomTable::portfolio();

    let heights_ok = rooms
        .iter()
        .all(|r| resting_position(r, 0.0).y == r.anchor.y + 15.0);
    results.push(check(
        "camera_resting_height",
        heights_ok,
        "camera rests 15 units above every anchor",
    ));

    let loader = LoadingSequence::new(0);
    let phases: Vec<usize> = (0..=4000).step_by(250).map(|t| loader.frame(t).phase).collect();
    let monotonic = phases.windows(2).all(|w| w[0] <= w[1]);
    results.push(check(
        "loader_phases",
        monotonic && phases.last() == Some(&(PHASES.len() - 1)) && loader.frame(4800).done,
        format!("phases {phases:?}"),
    ));

    let empty = contact::validate_form(&ContactForm::default());
    let submitted = contact::submit(
        &ContactForm {
            name: "Visitor".into(),
            email: "visitor@example.com".into(),
            subject: "Hello".into(),
            message: "Enjoyed the elevator ride.".into(),
        },
        0,
    );
    results.push(check(
        "contact_form",
        empty.len() == 4 && submitted.as_ref().is_ok_and(|s| s.is_sent(4500)),
        format!("{} missing fields on empty form", empty.len()),
    ));

    let mut gate = AccessGate::default();
    let first = gate.try_unlock("guess");
    let second = gate.try_unlock("guess again");
    let granted = gate.try_unlock("CLOVER123");
    let hint_on_second = matches!(second, GateResponse::Denied { hint: Some(_), .. });
    let no_hint_first = matches!(first, GateResponse::Denied { hint: None, .. });
    results.push(check(
        "lab_gate",
        no_hint_first && hint_on_second && granted == GateResponse::Granted,
        format!("{} failures before access", gate.failures()),
    ));

    let mut console = LabConsole::new();
    let help_ok = console.execute("help").is_ok();
    let opened = console.execute("open 4").is_ok()
        && console.selected_module().map(|m| m.id) == Some(MODULES.len());
    let bad = console.execute("open 9");
    results.push(check(
        "lab_console",
        help_ok && opened && matches!(bad, Err(CommandError::NoSuchModule(_))),
        format!("open 9 -> {bad:?}"),
    ));

    let mut skills = SkillsView::default();
    let mut skill_total = 0;
    for _ in 0..showcase::SkillCategory::ALL.len() {
        skills.next_filter();
        skill_total += skills.visible().len();
    }
    skills.next_filter();
    let mut projects = ProjectsView::default();
    let mut project_total = 0;
    for _ in 0..showcase::project_categories().len() {
        projects.next_filter();
        project_total += projects.visible().len();
    }
    projects.next_filter();
    results.push(check(
        "showcase_filters",
        skill_total == SKILLS.len()
            && skills.filter.is_none()
            && project_total == PROJECTS.len()
            && projects.filter.is_none(),
        format!("{skill_total} skills, {project_total} projects across categories"),
    ));

    results
}
