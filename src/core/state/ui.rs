use crate::core::{cmd::Cmd, msg::ui::UiMsg};

/// Snapshot of the single-line query input
///
/// The editing itself is performed by an [`InputEngine`](crate::core::input_engine::InputEngine);
/// only content and cursor survive between key presses.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InputState {
    /// The complete text content
    pub content: String,
    /// Cursor column in characters
    pub cursor: usize,
}

impl InputState {
    pub fn new(content: impl Into<String>, cursor: usize) -> Self {
        Self {
            content: content.into(),
            cursor,
        }
    }

    /// Input with the cursor placed after the last character
    pub fn with_content(content: impl Into<String>) -> Self {
        let content = content.into();
        let cursor = content.chars().count();
        Self { content, cursor }
    }

    pub fn is_blank(&self) -> bool {
        self.content.trim().is_empty()
    }
}

/// UI-related state
#[derive(Debug, Clone, Default)]
pub struct UiState {
    pub input: InputState,
    /// Blocking alert; while present every key except dismissal is swallowed
    pub alert: Option<String>,
    /// First visible line of the results region
    pub results_scroll: u16,
    /// Height of the results viewport, used for page-wise scrolling
    pub results_viewport: u16,
    /// Total number of lines the results region currently renders
    pub results_lines: u16,
}

const DEFAULT_PAGE: u16 = 10;

impl UiState {
    pub fn has_alert(&self) -> bool {
        self.alert.is_some()
    }

    fn max_scroll(&self) -> u16 {
        self.results_lines.saturating_sub(self.results_viewport.max(1))
    }

    fn page(&self) -> u16 {
        if self.results_viewport > 1 {
            self.results_viewport - 1
        } else {
            DEFAULT_PAGE
        }
    }

    /// UI-specific update function
    /// Returns: Generated commands
    pub fn update(&mut self, msg: UiMsg) -> Vec<Cmd> {
        match msg {
            UiMsg::SetQuery(query) => {
                self.input = InputState::with_content(query);
            }
            UiMsg::ShowAlert(message) => {
                self.alert = Some(message);
            }
            UiMsg::DismissAlert => {
                self.alert = None;
            }
            UiMsg::ScrollUp => {
                self.results_scroll = self.results_scroll.saturating_sub(1);
            }
            UiMsg::ScrollDown => {
                self.results_scroll = self.results_scroll.saturating_add(1).min(self.max_scroll());
            }
            UiMsg::PageUp => {
                self.results_scroll = self.results_scroll.saturating_sub(self.page());
            }
            UiMsg::PageDown => {
                self.results_scroll = self
                    .results_scroll
                    .saturating_add(self.page())
                    .min(self.max_scroll());
            }
            UiMsg::ResultsLayout { lines, viewport } => {
                self.results_lines = lines;
                self.results_viewport = viewport;
                self.results_scroll = self.results_scroll.min(self.max_scroll());
            }
            // Input editing and submission need the engine or search state; handled in update()
            UiMsg::ProcessInputKey(_) | UiMsg::SubmitQuery => {}
        }
        vec![]
    }
}
