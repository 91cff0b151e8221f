//! Alert overlay
//!
//! Blocking message box centred over the whole screen.

use ratatui::{layout::Flex, prelude::*, widgets::*};

use crate::core::state::AppState;

#[derive(Debug, Clone, Default)]
pub struct AlertComponent;

impl AlertComponent {
    pub fn new() -> Self {
        Self
    }

    pub fn view(&self, state: &AppState, frame: &mut Frame, area: Rect) {
        let Some(message) = &state.ui.alert else {
            return;
        };

        let popup = Self::popup_area(area);
        frame.render_widget(Clear, popup);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Double)
            .border_style(Style::default().fg(Color::Yellow))
            .title(" Alert ")
            .title_bottom(Line::from(" Enter / Esc to dismiss ").right_aligned());
        let paragraph = Paragraph::new(message.as_str())
            .wrap(Wrap { trim: true })
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(paragraph, popup);
    }

    /// Centred box, 60% of the width and five rows high
    pub fn popup_area(area: Rect) -> Rect {
        let [row] = Layout::vertical([Constraint::Length(5)])
            .flex(Flex::Center)
            .areas(area);
        let [popup] = Layout::horizontal([Constraint::Percentage(60)])
            .flex(Flex::Center)
            .areas(row);
        popup
    }
}
