//! Search form component
//!
//! Bordered single-line query input with the validation message underneath.

use ratatui::{prelude::*, widgets::*};
use unicode_width::UnicodeWidthChar;

use crate::core::state::{ui::InputState, AppState};

#[derive(Debug, Clone, Default)]
pub struct SearchFormComponent;

impl SearchFormComponent {
    /// Bordered input (3 rows) plus the validation line
    pub const HEIGHT: u16 = 4;

    pub fn new() -> Self {
        Self
    }

    pub fn view(&self, state: &AppState, frame: &mut Frame, area: Rect) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Length(1)])
            .split(area);

        let title = if state.search.enabled {
            " Search "
        } else {
            " Search (disabled) "
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .title(title);
        let inner = block.inner(rows[0]);

        let offset = Self::horizontal_offset(&state.ui.input, inner.width);
        let input = Paragraph::new(state.ui.input.content.as_str())
            .scroll((0, offset))
            .block(block);
        frame.render_widget(input, rows[0]);

        // The alert owns the cursor while it is shown
        if !state.ui.has_alert() && inner.width > 0 {
            let column = Self::cursor_column(&state.ui.input).saturating_sub(offset);
            frame.set_cursor_position(Position::new(inner.x + column, inner.y));
        }

        if let Some(message) = &state.search.validation_message {
            let validation = Paragraph::new(Span::styled(
                message.as_str(),
                Style::default().fg(Color::Red),
            ));
            frame.render_widget(validation, rows[1]);
        }
    }

    /// First visible column so that the cursor stays inside an input of `width` columns
    pub fn horizontal_offset(input: &InputState, width: u16) -> u16 {
        Self::cursor_column(input).saturating_sub(width.saturating_sub(1))
    }

    /// Display column of the cursor; wide characters take two cells
    pub fn cursor_column(input: &InputState) -> u16 {
        let column: usize = input
            .content
            .chars()
            .take(input.cursor)
            .map(|c| c.width().unwrap_or(0))
            .sum();
        u16::try_from(column).unwrap_or(u16::MAX)
    }
}
