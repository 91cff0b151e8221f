use serde::{Deserialize, Serialize};

/// UI (TUI) specific sub-commands executed by the host/runtime
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TuiCommand {
    Resize { width: u16, height: u16 },
}

/// Elm-like command definitions
/// Represents side effects (network communication, terminal control, logging)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cmd {
    /// POST the (already trimmed) query; the outcome comes back tagged with `seq`
    Search { seq: u64, query: String },
    /// Abort every request still in flight
    CancelSearches,

    // UI-related commands
    Tui(TuiCommand),
    RequestRender,

    // Logging related
    LogError { message: String },
    LogInfo { message: String },

    // Batch command (execute multiple commands together)
    Batch(Vec<Cmd>),

    // Do nothing (for testing)
    None,
}

impl Cmd {
    /// Combine multiple commands into one
    pub fn batch(commands: Vec<Cmd>) -> Cmd {
        let mut commands = commands;
        match commands.len() {
            0 => Cmd::None,
            1 => commands.remove(0),
            _ => Cmd::Batch(commands),
        }
    }

    /// Whether the command requires asynchronous processing
    pub fn is_async(&self) -> bool {
        match self {
            Cmd::Search { .. } => true,
            Cmd::CancelSearches
            | Cmd::Tui(..)
            | Cmd::RequestRender
            | Cmd::LogError { .. }
            | Cmd::LogInfo { .. }
            | Cmd::None => false,
            Cmd::Batch(cmds) => cmds.iter().any(Cmd::is_async),
        }
    }

    /// Short name used in execution logs
    pub fn name(&self) -> &'static str {
        match self {
            Cmd::Search { .. } => "Search",
            Cmd::CancelSearches => "CancelSearches",
            Cmd::Tui(TuiCommand::Resize { .. }) => "Tui::Resize",
            Cmd::RequestRender => "RequestRender",
            Cmd::LogError { .. } => "LogError",
            Cmd::LogInfo { .. } => "LogInfo",
            Cmd::Batch(_) => "Batch",
            Cmd::None => "None",
        }
    }
}
