use serde::{Deserialize, Serialize};

pub mod search;
pub mod system;
pub mod ui;

use search::SearchMsg;
use system::SystemMsg;
use ui::UiMsg;

/// Domain messages representing application intent
/// These are processed by the update function and represent pure domain events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Msg {
    System(SystemMsg),
    Ui(UiMsg),
    Search(SearchMsg),
}

impl Msg {
    /// Helper to exclude frequent messages during debugging
    pub fn is_frequent(&self) -> bool {
        matches!(
            self,
            Msg::Ui(UiMsg::ProcessInputKey(_)) | Msg::Ui(UiMsg::ResultsLayout { .. })
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    #[test]
    fn test_msg_frequent_detection() {
        let key = KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE);
        assert!(Msg::Ui(UiMsg::ProcessInputKey(key)).is_frequent());
        assert!(!Msg::System(SystemMsg::Quit).is_frequent());
        assert!(!Msg::Ui(UiMsg::SubmitQuery).is_frequent());
    }

    #[test]
    fn test_msg_serialization() {
        let msg = Msg::Search(SearchMsg::Submit("rust".to_string()));
        let serialized = serde_json::to_string(&msg).expect("serialize");
        let deserialized: Msg = serde_json::from_str(&serialized).expect("deserialize");
        assert_eq!(msg, deserialized);
    }
}
