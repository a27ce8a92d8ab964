//! State management for the portfolio client.
//!
//! Contains resource types and Bevy components used throughout the client.

use bevy::prelude::*;
use portfolio_logic::config::NavigationConfig;
use portfolio_logic::constants::{contact, lab};
use portfolio_logic::contact::{boot_script, ContactForm, Field, FormError, Submission};
use portfolio_logic::gate::{startup_script, AccessGate};
use portfolio_logic::lab::LabConsole;
use portfolio_logic::loader::LoadingSequence;
use portfolio_logic::rooms::RoomTable;
use portfolio_logic::session::NavigationSession;
use portfolio_logic::showcase::{ProjectsView, SkillsView};
use portfolio_logic::terminal::{LineKind, ScriptLine, TimedScript, Typewriter};

use crate::content;

/// Wall-clock milliseconds. Navigation timing must not follow virtual time,
/// which pauses and clamps large frame deltas.
pub fn now_ms(time: &Time<Real>) -> u64 {
    time.elapsed().as_millis() as u64
}

// ============================================================================
// STAGES
// ============================================================================

#[derive(States, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Stage {
    #[default]
    Landing,
    Loading,
    Immersive,
    Overview,
}

// ============================================================================
// RESOURCES
// ============================================================================

/// Navigation tuning shipped with the client.
const NAVIGATION_JSON: &str = include_str!("../../../data/navigation.json");

pub fn parse_navigation(json: &str) -> Result<NavigationConfig, serde_json::Error> {
    serde_json::from_str(json)
}

#[derive(Resource, Debug, Clone)]
pub struct ClientConfig {
    pub skip_intro: bool,
    pub start_in_overview: bool,
    pub width: f32,
    pub height: f32,
    pub navigation: NavigationConfig,
    /// Problems met while loading `navigation`; logged once the app is up.
    pub load_errors: Vec<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        let (navigation, load_errors) = match parse_navigation(NAVIGATION_JSON) {
            Ok(nav) => (nav, Vec::new()),
            Err(e) => (
                NavigationConfig::default(),
                vec![format!("bundled navigation.json: {e}")],
            ),
        };
        Self {
            skip_intro: false,
            start_in_overview: false,
            width: 1280.0,
            height: 720.0,
            navigation,
            load_errors,
        }
    }
}

impl ClientConfig {
    pub fn from_args() -> Self {
        Self::from_arg_list(std::env::args().skip(1))
    }

    pub fn from_arg_list(args: impl IntoIterator<Item = String>) -> Self {
        let args: Vec<String> = args.into_iter().collect();
        let mut config = Self::default();
        let mut i = 0;
        while i < args.len() {
            match args[i].as_str() {
                "--skip-intro" => {
                    config.skip_intro = true;
                    i += 1;
                }
                "--overview" => {
                    config.start_in_overview = true;
                    i += 1;
                }
                "--width" if i + 1 < args.len() => {
                    if let Ok(w) = args[i + 1].parse::<f32>() {
                        config.width = w.max(320.0);
                    }
                    i += 2;
                }
                "--height" if i + 1 < args.len() => {
                    if let Ok(h) = args[i + 1].parse::<f32>() {
                        config.height = h.max(240.0);
                    }
                    i += 2;
                }
                "--nav-config" if i + 1 < args.len() => {
                    config.load_navigation_file(&args[i + 1]);
                    i += 2;
                }
                _ => i += 1,
            }
        }
        config
    }

    /// Replace the navigation tuning with the JSON file at `path`. On failure
    /// the current values stay and the error is kept for logging.
    pub fn load_navigation_file(&mut self, path: &str) {
        let loaded = std::fs::read_to_string(path)
            .map_err(|e| e.to_string())
            .and_then(|json| parse_navigation(&json).map_err(|e| e.to_string()));
        match loaded {
            Ok(nav) => self.navigation = nav,
            Err(e) => self.load_errors.push(format!("{path}: {e}")),
        }
    }

    pub fn initial_stage(&self) -> Stage {
        if self.start_in_overview {
            Stage::Overview
        } else if self.skip_intro {
            Stage::Immersive
        } else {
            Stage::Landing
        }
    }
}

/// Navigation context of the mounted 3D view. Inserted on entering
/// `Stage::Immersive`, torn down and removed on leaving it.
#[derive(Resource)]
pub struct Navigation {
    pub session: NavigationSession,
}

impl Navigation {
    pub fn new(config: NavigationConfig) -> Self {
        Self {
            session: NavigationSession::new(config, RoomTable::portfolio()),
        }
    }
}

#[derive(Resource)]
pub struct LoaderState {
    pub sequence: LoadingSequence,
}

/// Lobby typewriter. `ready_reported` latches once the controls are unlocked.
#[derive(Resource)]
pub struct IntroState {
    pub typewriter: Typewriter,
    pub ready_reported: bool,
}

impl IntroState {
    pub fn new(now_ms: u64) -> Self {
        Self {
            typewriter: Typewriter::new(content::INTRO_LINES, now_ms),
            ready_reported: false,
        }
    }
}

/// Contact room terminal and form. Lives while CONTACT is the current room.
#[derive(Resource)]
pub struct ContactState {
    pub opened_ms: u64,
    pub form: ContactForm,
    pub focus: Field,
    pub terminal: TimedScript,
    pub submission: Option<Submission>,
    pub errors: Vec<FormError>,
    pub sent: bool,
}

impl ContactState {
    pub fn new(now_ms: u64) -> Self {
        let mut terminal = TimedScript::new(Vec::new(), now_ms, contact::TERMINAL_WINDOW);
        terminal.schedule_from(now_ms + contact::BOOT_DELAY_MS, boot_script());
        Self {
            opened_ms: now_ms,
            form: ContactForm::default(),
            focus: Field::Name,
            terminal,
            submission: None,
            errors: Vec::new(),
            sent: false,
        }
    }

    pub fn form_visible(&self, now_ms: u64) -> bool {
        now_ms >= self.opened_ms + contact::BOOT_DELAY_MS + contact::FORM_REVEAL_MS
    }

    pub fn accepts_text(&self, now_ms: u64) -> bool {
        self.form_visible(now_ms) && self.submission.is_none()
    }
}

/// AI lab gate, terminal, console, and the line being typed (passphrase
/// while locked, a command once open).
#[derive(Resource)]
pub struct LabState {
    pub gate: AccessGate,
    pub input: String,
    pub terminal: TimedScript,
    pub hint: Option<&'static str>,
    pub lockdown_warning: bool,
    pub console: LabConsole,
    pub unlocked_ms: Option<u64>,
}

impl LabState {
    pub fn new(now_ms: u64) -> Self {
        Self {
            gate: AccessGate::default(),
            input: String::new(),
            terminal: TimedScript::new(
                vec![
                    ScriptLine::new(0, "RESTRICTED ACCESS", LineKind::Error),
                    ScriptLine::new(0, "ENTER ACCESS CODE:", LineKind::Command),
                ],
                now_ms,
                lab::TERMINAL_WINDOW,
            ),
            hint: None,
            lockdown_warning: false,
            console: LabConsole::new(),
            unlocked_ms: None,
        }
    }

    /// The command prompt appears once the startup script has played.
    pub fn console_ready(&self, now_ms: u64) -> bool {
        let startup = startup_script();
        let prompt_at = startup.last().map_or(0, |l| l.delay_ms);
        self.unlocked_ms
            .is_some_and(|at| now_ms >= at + prompt_at)
    }

    pub fn accepts_text(&self, now_ms: u64) -> bool {
        !self.gate.is_unlocked() || self.console_ready(now_ms)
    }
}

/// Filter and selection state of the SKILLS and PROJECTS rooms. Lives with
/// the navigation session so a filter survives leaving and re-entering a room.
#[derive(Resource, Default)]
pub struct Showcase {
    pub skills: SkillsView,
    pub projects: ProjectsView,
}

/// Whether typed letters belong to a text field this frame. While true, only
/// arrow keys navigate.
#[derive(Resource, Default)]
pub struct TextFocus(pub bool);

/// Smoothed cursor position in `-1.0..=1.0` for the building parallax.
#[derive(Resource, Default)]
pub struct Parallax {
    pub current: Vec2,
}

// ============================================================================
// BEVY COMPONENTS
// ============================================================================

#[derive(Component)]
pub struct PortfolioCamera;

/// Root of everything built for the 3D view; moved by the depth offset and
/// the parallax.
#[derive(Component)]
pub struct BuildingGroup;

/// Anything despawned when the 3D view unmounts.
#[derive(Component)]
pub struct SceneEntity;

#[derive(Component)]
pub struct NeonRing {
    pub speed: f32,
}

#[derive(Component)]
pub struct StairGlow {
    pub phase: f32,
}

#[derive(Component)]
pub struct Particle {
    pub rise_speed: f32,
    pub sway: f32,
    pub origin: Vec3,
}

// --- UI markers ---

#[derive(Component)]
pub struct LandingUi;

#[derive(Component)]
pub struct ExploreButton;

#[derive(Component)]
pub struct ClassicViewButton;

#[derive(Component)]
pub struct LoaderUi;

#[derive(Component)]
pub struct LoaderText;

#[derive(Component)]
pub struct ImmersiveUi;

#[derive(Component)]
pub struct StatusText;

#[derive(Component)]
pub struct RoomPanelText;

#[derive(Component)]
pub struct TransitionOverlay;

#[derive(Component)]
pub struct TransitionOverlayText;

#[derive(Component)]
pub struct ElevatorPanel;

#[derive(Component)]
pub struct ElevatorButton {
    pub room: usize,
}

#[derive(Component)]
pub struct HelpText;

#[derive(Component)]
pub struct OverviewUi;

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> ClientConfig {
        ClientConfig::from_arg_list(list.iter().map(|s| s.to_string()))
    }

    #[test]
    fn defaults_start_on_landing() {
        let config = args(&[]);
        assert_eq!(config.initial_stage(), Stage::Landing);
        assert_eq!(config.width, 1280.0);
    }

    #[test]
    fn parses_flags_and_sizes() {
        let config = args(&["--skip-intro", "--width", "1920", "--height", "1080"]);
        assert!(config.skip_intro);
        assert_eq!(config.initial_stage(), Stage::Immersive);
        assert_eq!((config.width, config.height), (1920.0, 1080.0));
    }

    #[test]
    fn overview_wins_over_skip_intro() {
        let config = args(&["--skip-intro", "--overview"]);
        assert_eq!(config.initial_stage(), Stage::Overview);
    }

    #[test]
    fn ignores_bad_values() {
        let config = args(&["--width", "wide", "--height"]);
        assert_eq!(config.width, 1280.0);
        assert_eq!(config.height, 720.0);
    }

    #[test]
    fn bundled_navigation_matches_defaults() {
        let config = ClientConfig::default();
        assert!(config.load_errors.is_empty(), "{:?}", config.load_errors);
        assert_eq!(config.navigation, NavigationConfig::default());
    }

    #[test]
    fn nav_config_flag_loads_file() {
        let path = std::env::temp_dir().join("portfolio-client-nav-test.json");
        std::fs::write(
            &path,
            r#"{"guard_interval_ms":150,"transition_duration_ms":0,"scroll_threshold":5.0,"easing":"Linear"}"#,
        )
        .unwrap();
        let config = args(&["--nav-config", path.to_str().unwrap()]);
        std::fs::remove_file(&path).ok();

        assert!(config.load_errors.is_empty(), "{:?}", config.load_errors);
        assert_eq!(config.navigation.guard_interval_ms, 150);
        // Loaded values still go through validation at mount.
        assert!(!config.navigation.validate().is_empty());
    }

    #[test]
    fn unreadable_nav_config_keeps_defaults() {
        let config = args(&["--nav-config", "/nonexistent/navigation.json"]);
        assert_eq!(config.navigation, NavigationConfig::default());
        assert_eq!(config.load_errors.len(), 1);
        assert!(parse_navigation("{\"guard_interval_ms\": \"soon\"}").is_err());
    }

    #[test]
    fn lab_console_opens_after_startup_script() {
        let mut lab = LabState::new(0);
        assert!(lab.accepts_text(0));
        lab.gate.try_unlock("clover123");
        lab.unlocked_ms = Some(1000);
        assert!(!lab.accepts_text(1000));
        assert!(!lab.accepts_text(4999));
        assert!(lab.accepts_text(5000));
    }

    #[test]
    fn contact_form_waits_for_boot_script() {
        let state = ContactState::new(1000);
        assert!(!state.form_visible(1000));
        assert!(state.terminal.visible(1499).is_empty());
        assert_eq!(state.terminal.visible(1500).len(), 1);
        assert!(state.form_visible(1000 + 500 + 9000));
    }
}
