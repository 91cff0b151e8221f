use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use tui_textarea::{CursorMove, TextArea};

use crate::core::input_engine::InputEngine;
use crate::core::state::ui::InputState;

/// Production engine based on tui-textarea. It constructs a temporary TextArea,
/// hydrates it from the given snapshot, applies keys, then extracts the new snapshot.
///
/// The query is a single line, so keys that would break the line are dropped
/// and pasted newlines are folded into spaces.
pub struct TuiTextAreaEngine;

impl TuiTextAreaEngine {
    fn restore_textarea_from_snapshot(textarea: &mut TextArea<'_>, snapshot: &InputState) {
        if !snapshot.content.is_empty() {
            textarea.insert_str(single_line(&snapshot.content));
        }
        let column = u16::try_from(snapshot.cursor).unwrap_or(u16::MAX);
        textarea.move_cursor(CursorMove::Jump(0, column));
    }

    fn inserts_line_break(key: &KeyEvent) -> bool {
        match key.code {
            KeyCode::Enter => true,
            KeyCode::Char('m') | KeyCode::Char('j') => key.modifiers.contains(KeyModifiers::CONTROL),
            _ => false,
        }
    }
}

fn single_line(text: &str) -> String {
    text.replace(['\r', '\n'], " ")
}

impl InputEngine for TuiTextAreaEngine {
    fn apply_keys(&self, snapshot: &InputState, keys: &[KeyEvent]) -> InputState {
        let mut textarea = TextArea::default();
        Self::restore_textarea_from_snapshot(&mut textarea, snapshot);
        for key in keys.iter().filter(|k| !Self::inserts_line_break(k)) {
            textarea.input(Event::Key(*key));
        }
        let content = textarea.lines().join(" ");
        let (_, column) = textarea.cursor();
        InputState::new(content, column)
    }
}
