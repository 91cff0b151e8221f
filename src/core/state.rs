use crate::infrastructure::config::Config;

pub mod search;
pub mod system;
pub mod ui;

pub use search::{Freshness, Phase, ResultsView, SearchState};
pub use system::SystemState;
pub use ui::{InputState, UiState};

/// Unified application state
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub search: SearchState,
    pub ui: UiState,
    pub system: SystemState,
}

impl AppState {
    /// Initialize AppState from the loaded configuration
    pub fn new_with_config(config: &Config) -> Self {
        Self {
            search: SearchState {
                endpoint: config.endpoint.clone(),
                discard_stale: config.discard_stale_responses,
                chart_style: config.styles.bar_style(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    pub fn is_loading(&self) -> bool {
        self.search.phase() == Phase::Loading
    }
}
