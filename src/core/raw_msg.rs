use crossterm::event::KeyEvent;
use serde::{Deserialize, Serialize};

use crate::domain::search::{SearchError, SearchResponse};

/// Raw messages from external sources (input, network, system)
/// These represent unprocessed external events that need to be translated to domain events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RawMsg {
    // System events
    Tick,
    Render,
    Resize(u16, u16),
    Quit,

    // User input (raw keyboard events)
    Key(KeyEvent),

    // Network events
    SearchFinished {
        seq: u64,
        outcome: Result<SearchResponse, SearchError>,
    },

    // System status
    Error(String),
}

impl RawMsg {
    /// Helper to exclude frequent messages during debugging
    pub fn is_frequent(&self) -> bool {
        matches!(self, RawMsg::Tick | RawMsg::Render)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};

    #[test]
    fn test_raw_msg_frequent_detection() {
        assert!(RawMsg::Tick.is_frequent());
        assert!(RawMsg::Render.is_frequent());
        assert!(!RawMsg::Quit.is_frequent());
        assert!(!RawMsg::Key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE)).is_frequent());
        assert!(!RawMsg::SearchFinished {
            seq: 1,
            outcome: Err(SearchError::Status(500)),
        }
        .is_frequent());
    }

    #[test]
    fn test_raw_msg_serialization() {
        let raw = RawMsg::SearchFinished {
            seq: 7,
            outcome: Err(SearchError::Transport("connection refused".to_string())),
        };
        let serialized = serde_json::to_string(&raw).expect("serialize");
        let deserialized: RawMsg = serde_json::from_str(&serialized).expect("deserialize");
        assert_eq!(raw, deserialized);
    }
}
