//! Status bar component
//!
//! One line at the bottom: search phase, endpoint, result count and the latest
//! status message.

use ratatui::{prelude::*, widgets::*};

use crate::core::state::{AppState, Phase};

#[derive(Debug, Clone, Default)]
pub struct StatusBarComponent;

impl StatusBarComponent {
    pub fn new() -> Self {
        Self
    }

    pub fn phase_label(state: &AppState) -> String {
        if state.search.enabled {
            state.search.phase().to_string()
        } else {
            "Disabled".to_string()
        }
    }

    pub fn line(state: &AppState) -> Line<'static> {
        let phase_style = match (state.search.enabled, state.search.phase()) {
            (false, _) => Style::default().fg(Color::Red),
            (true, Phase::Loading) => Style::default().fg(Color::Yellow),
            (true, Phase::Idle) => Style::default().fg(Color::Green),
        };
        let count = state.search.results.result_count();
        let noun = if count == 1 { "result" } else { "results" };

        let mut spans = vec![
            Span::styled(Self::phase_label(state), phase_style.bold()),
            Span::raw(" | "),
            Span::styled(state.search.endpoint.clone(), Style::default().fg(Color::Gray)),
            Span::raw(format!(" | {count} {noun}")),
        ];
        if let Some(message) = &state.system.status_message {
            spans.push(Span::raw(" | "));
            spans.push(Span::styled(message.clone(), Style::default().italic()));
        }
        Line::from(spans)
    }

    pub fn view(&self, state: &AppState, frame: &mut Frame, area: Rect) {
        frame.render_widget(Clear, area);
        let paragraph = Paragraph::new(Self::line(state)).style(Style::default().bg(Color::Black));
        frame.render_widget(paragraph, area);
    }
}
