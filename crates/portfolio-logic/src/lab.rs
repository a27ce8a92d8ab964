//! AI lab console: the module table, secret projects, data streams, and the
//! command line that browses them once the gate is open.
//!
//! Commands are parsed with `FromStr` and executed against a [`LabConsole`],
//! which owns the only mutable state (selected module, secrets shown).

use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ModuleStatus {
    Online,
    Processing,
    Offline,
    Classified,
}

impl ModuleStatus {
    pub fn label(self) -> &'static str {
        match self {
            ModuleStatus::Online => "ONLINE",
            ModuleStatus::Processing => "PROCESSING",
            ModuleStatus::Offline => "OFFLINE",
            ModuleStatus::Classified => "CLASSIFIED",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum Clearance {
    Public,
    Restricted,
    Classified,
    TopSecret,
}

impl Clearance {
    pub fn label(self) -> &'static str {
        match self {
            Clearance::Public => "PUBLIC",
            Clearance::Restricted => "RESTRICTED",
            Clearance::Classified => "CLASSIFIED",
            Clearance::TopSecret => "TOP_SECRET",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ModuleMetrics {
    pub accuracy: f32,
    pub speed: f32,
    pub efficiency: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AiModule {
    /// 1-based, as typed at the prompt.
    pub id: usize,
    pub name: &'static str,
    pub status: ModuleStatus,
    pub progress: u8,
    pub description: &'static str,
    pub clearance: Clearance,
    pub metrics: ModuleMetrics,
}

pub const MODULES: [AiModule; 4] = [
    AiModule {
        id: 1,
        name: "Neural Processing Core",
        status: ModuleStatus::Online,
        progress: 94,
        description: "Advanced deep learning algorithms for pattern recognition and data analysis",
        clearance: Clearance::Public,
        metrics: ModuleMetrics { accuracy: 97.8, speed: 89.2, efficiency: 94.5 },
    },
    AiModule {
        id: 2,
        name: "Computer Vision Module",
        status: ModuleStatus::Processing,
        progress: 76,
        description: "Real-time image processing and object detection systems",
        clearance: Clearance::Restricted,
        metrics: ModuleMetrics { accuracy: 95.3, speed: 92.1, efficiency: 88.7 },
    },
    AiModule {
        id: 3,
        name: "Predictive Analytics Engine",
        status: ModuleStatus::Online,
        progress: 88,
        description: "Machine learning models for forecasting and trend analysis",
        clearance: Clearance::Classified,
        metrics: ModuleMetrics { accuracy: 91.6, speed: 85.4, efficiency: 96.2 },
    },
    AiModule {
        id: 4,
        name: "Clover Intelligence System",
        status: ModuleStatus::Classified,
        progress: 99,
        description: "AI-powered luck generation and probability manipulation",
        clearance: Clearance::TopSecret,
        metrics: ModuleMetrics { accuracy: 99.9, speed: 100.0, efficiency: 99.7 },
    },
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SecretProject {
    pub codename: &'static str,
    pub description: &'static str,
    pub status: &'static str,
    pub classification: &'static str,
    /// 1..=5 clovers.
    pub clover_level: u8,
}

pub const SECRET_PROJECTS: [SecretProject; 4] = [
    SecretProject {
        codename: "PROJECT_CLOVER",
        description: "AI system that generates optimal luck patterns based on quantum probability calculations",
        status: "ACTIVE",
        classification: "TOP_SECRET",
        clover_level: 5,
    },
    SecretProject {
        codename: "LUCKY_ALGORITHM_V3",
        description: "Machine learning model trained on 10,000+ successful outcomes to predict fortune",
        status: "TESTING",
        classification: "CLASSIFIED",
        clover_level: 4,
    },
    SecretProject {
        codename: "PROBABILITY_ENHANCER",
        description: "Quantum-based system that subtly influences random events in user's favor",
        status: "DEPLOYED",
        classification: "RESTRICTED",
        clover_level: 3,
    },
    SecretProject {
        codename: "FORTUNE_PREDICTOR",
        description: "Neural network that analyzes cosmic patterns to forecast lucky moments",
        status: "RESEARCH",
        classification: "CONFIDENTIAL",
        clover_level: 2,
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Trend {
    Up,
    Down,
    Stable,
}

impl Trend {
    pub fn arrow(self) -> &'static str {
        match self {
            Trend::Up => "↗",
            Trend::Down => "↘",
            Trend::Stable => "→",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DataStream {
    pub name: &'static str,
    pub value: &'static str,
    pub trend: Trend,
}

pub const DATA_STREAMS: [DataStream; 6] = [
    DataStream { name: "Luck Probability", value: "97.3%", trend: Trend::Up },
    DataStream { name: "Clover Network", value: "ONLINE", trend: Trend::Stable },
    DataStream { name: "Fortune Buffer", value: "2.1K", trend: Trend::Up },
    DataStream { name: "Quantum State", value: "STABLE", trend: Trend::Stable },
    DataStream { name: "Lucky Events", value: "847", trend: Trend::Up },
    DataStream { name: "Probability Flux", value: "0.003ms", trend: Trend::Down },
];

pub fn module(id: usize) -> Option<&'static AiModule> {
    MODULES.iter().find(|m| m.id == id)
}

pub fn stream_line(stream: &DataStream) -> String {
    format!("{:<18} {:>8} {}", stream.name, stream.value, stream.trend.arrow())
}

/// Five-cell clover meter, `**---` style.
pub fn clover_meter(level: u8) -> String {
    let filled = usize::from(level.min(5));
    format!("{}{}", "*".repeat(filled), "-".repeat(5 - filled))
}

pub const HELP_LINES: [&str; 7] = [
    "help          list commands",
    "modules       list AI modules",
    "open <n>      inspect module n",
    "close         close the module view",
    "secrets       reveal / hide secret projects (or Tab)",
    "streams       show live data streams",
    "clear         clear the terminal",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabCommand {
    Help,
    Modules,
    Open(usize),
    Close,
    Secrets,
    Streams,
    Clear,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("command not found: {0}")]
    Unknown(String),
    #[error("usage: open <1-{}>", MODULES.len())]
    MissingModule,
    #[error("no such module: {0}")]
    NoSuchModule(String),
}

impl FromStr for LabCommand {
    type Err = CommandError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let mut words = input.split_whitespace();
        let name = words.next().unwrap_or_default().to_lowercase();
        let command = match name.as_str() {
            "help" | "?" => LabCommand::Help,
            "modules" | "ls" => LabCommand::Modules,
            "open" => {
                let arg = words.next().ok_or(CommandError::MissingModule)?;
                let id = arg
                    .parse::<usize>()
                    .ok()
                    .filter(|id| module(*id).is_some())
                    .ok_or_else(|| CommandError::NoSuchModule(arg.to_string()))?;
                LabCommand::Open(id)
            }
            "close" => LabCommand::Close,
            "secrets" => LabCommand::Secrets,
            "streams" => LabCommand::Streams,
            "clear" => LabCommand::Clear,
            _ => return Err(CommandError::Unknown(name)),
        };
        Ok(command)
    }
}

/// What the terminal should do with a command's result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleReply {
    Lines(Vec<String>),
    Clear,
}

#[derive(Debug, Clone, Default)]
pub struct LabConsole {
    selected: Option<usize>,
    show_secrets: bool,
}

impl LabConsole {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected_module(&self) -> Option<&'static AiModule> {
        self.selected.and_then(module)
    }

    pub fn secrets_shown(&self) -> bool {
        self.show_secrets
    }

    /// Flip the secret-project listing; returns the new state.
    pub fn toggle_secrets(&mut self) -> bool {
        self.show_secrets = !self.show_secrets;
        self.show_secrets
    }

    /// Parse and run one line typed at the prompt. Blank input is a no-op.
    pub fn execute(&mut self, input: &str) -> Result<ConsoleReply, CommandError> {
        if input.trim().is_empty() {
            return Ok(ConsoleReply::Lines(Vec::new()));
        }
        let lines = match input.parse::<LabCommand>()? {
            LabCommand::Help => HELP_LINES.iter().map(|l| l.to_string()).collect(),
            LabCommand::Modules => MODULES
                .iter()
                .map(|m| format!("[{}] {} - {}", m.id, m.name, m.status.label()))
                .collect(),
            LabCommand::Open(id) => {
                self.selected = Some(id);
                match module(id) {
                    Some(m) => vec![format!("OPENING {}...", m.name.to_uppercase())],
                    None => Vec::new(),
                }
            }
            LabCommand::Close => {
                self.selected = None;
                vec!["MODULE VIEW CLOSED".to_string()]
            }
            LabCommand::Secrets => vec![self.secrets_line()],
            LabCommand::Streams => DATA_STREAMS.iter().map(stream_line).collect(),
            LabCommand::Clear => return Ok(ConsoleReply::Clear),
        };
        Ok(ConsoleReply::Lines(lines))
    }

    /// Toggle secrets and report the new state as a terminal line.
    pub fn secrets_line(&mut self) -> String {
        if self.toggle_secrets() {
            "SECRET PROJECTS REVEALED".to_string()
        } else {
            "SECRET PROJECTS HIDDEN".to_string()
        }
    }
}
