use crossterm::event::KeyEvent;
use serde::{Deserialize, Serialize};

/// Messages specific to UiState
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum UiMsg {
    // Query input
    ProcessInputKey(KeyEvent),
    SetQuery(String),
    SubmitQuery,

    // Blocking alert
    ShowAlert(String),
    DismissAlert,

    // Results navigation
    ScrollUp,
    ScrollDown,
    PageUp,
    PageDown,
    /// Reported by the renderer after laying out the results region
    ResultsLayout { lines: u16, viewport: u16 },
}
