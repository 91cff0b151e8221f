//! Similarity chart component
//!
//! Draws the live [`ChartInstance`](crate::domain::chart::ChartInstance) as a
//! ratatui bar chart, one horizontal bar per document.

use ratatui::{prelude::*, widgets::*};

use crate::{
    core::state::AppState,
    domain::chart::{BarChartSpec, Rgba, DATASET_LABEL},
};

/// Bar values are integers; similarities are scaled by this factor
const SCALE: f64 = 10_000.0;

#[derive(Debug, Clone, Default)]
pub struct SimilarityChartComponent;

impl SimilarityChartComponent {
    pub fn new() -> Self {
        Self
    }

    pub fn view(&self, state: &AppState, frame: &mut Frame, area: Rect) {
        match state.search.chart.current() {
            Some(instance) => {
                frame.render_widget(Self::chart(&instance.spec), area);
            }
            None => {
                let placeholder = Paragraph::new(Span::styled(
                    "No chart yet",
                    Style::default().fg(Color::DarkGray),
                ))
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_type(BorderType::Rounded)
                        .title(format!(" {DATASET_LABEL} ")),
                );
                frame.render_widget(placeholder, area);
            }
        }
    }

    pub fn chart(spec: &BarChartSpec) -> BarChart<'static> {
        let bars = Self::bars(spec);
        let max = bars
            .iter()
            .map(|(_, value, _)| *value)
            .max()
            .unwrap_or(0)
            .max(Self::scaled(1.0));

        let fill = color(spec.style.fill);
        let border = color(spec.style.border);
        let bars: Vec<Bar<'static>> = bars
            .into_iter()
            .map(|(label, value, text)| {
                Bar::default()
                    .label(Line::from(label))
                    .value(value)
                    .text_value(text)
                    .style(Style::default().fg(fill))
                    .value_style(Style::default().fg(Color::White).bg(fill))
            })
            .collect();

        BarChart::default()
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Plain)
                    .border_style(Style::default().fg(border))
                    .title(format!(" {} ", spec.dataset_label)),
            )
            .direction(Direction::Horizontal)
            .bar_width(1)
            .bar_gap(0)
            .max(max)
            .data(BarGroup::default().bars(&bars))
    }

    /// `(label, scaled value, value text)` per bar, in document order
    pub fn bars(spec: &BarChartSpec) -> Vec<(String, u64, String)> {
        spec.labels
            .iter()
            .zip(&spec.values)
            .map(|(label, value)| (label.clone(), Self::scaled(*value), format!("{value:.2}")))
            .collect()
    }

    /// Bars grow from zero, so negative scores are drawn empty
    fn scaled(value: f64) -> u64 {
        if value.is_finite() && value > 0.0 {
            (value * SCALE).round() as u64
        } else {
            0
        }
    }
}

/// Flatten a translucent colour onto the terminal's black background
pub fn color(rgba: Rgba) -> Color {
    let (r, g, b) = rgba.over((0, 0, 0));
    Color::Rgb(r, g, b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{chart::BarStyle, search::SearchResult},
        infrastructure::tui::test::buffer_text,
    };
    use pretty_assertions::assert_eq;
    use ratatui::backend::TestBackend;

    fn spec(values: &[f64]) -> BarChartSpec {
        let results: Vec<_> = values
            .iter()
            .map(|v| SearchResult::new("s", *v))
            .collect();
        BarChartSpec::from_results(&results, BarStyle::default()).expect("non-empty")
    }

    fn draw(state: &AppState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(40, 8)).expect("terminal");
        terminal
            .draw(|f| SimilarityChartComponent::new().view(state, f, f.area()))
            .expect("draw");
        buffer_text(terminal.backend().buffer())
    }

    #[test]
    fn test_one_bar_per_document() {
        let bars = SimilarityChartComponent::bars(&spec(&[0.8231, 0.5, -0.2]));

        assert_eq!(
            bars,
            vec![
                ("Document 1".to_string(), 8231, "0.82".to_string()),
                ("Document 2".to_string(), 5000, "0.50".to_string()),
                ("Document 3".to_string(), 0, "-0.20".to_string()),
            ]
        );
    }

    #[test]
    fn test_default_colours_are_flattened() {
        let style = BarStyle::default();
        assert_eq!(color(style.border), Color::Rgb(0, 123, 255));
        assert_eq!(color(style.fill), Color::Rgb(0, 62, 128));
    }

    #[test]
    fn test_renders_labels_and_dataset() {
        let mut state = AppState::default();
        state.search.chart.replace(spec(&[0.8231]));

        let screen = draw(&state);

        assert!(screen.contains("Cosine Similarity"));
        assert!(screen.contains("Document 1"));
        assert!(screen.contains("0.82"));
    }

    #[test]
    fn test_placeholder_without_chart() {
        let screen = draw(&AppState::default());
        assert!(screen.contains("No chart yet"));
    }
}
