//! Component collection and screen layout
//!
//! Components are stateless renderers that receive state as parameters.

use ratatui::prelude::*;

use crate::core::state::AppState;

pub mod alert;
pub mod results_list;
pub mod search_form;
pub mod similarity_chart;
pub mod status_bar;

pub use alert::AlertComponent;
pub use results_list::ResultsListComponent;
pub use search_form::SearchFormComponent;
pub use similarity_chart::SimilarityChartComponent;
pub use status_bar::StatusBarComponent;

/// Smallest chart region a bar chart can be drawn into
pub const MIN_CHART_WIDTH: u16 = 16;
pub const MIN_CHART_HEIGHT: u16 = 5;

/// Regions of the screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppLayout {
    pub form: Rect,
    pub results: Rect,
    pub chart: Rect,
    pub status: Rect,
}

impl AppLayout {
    pub fn new(area: Rect) -> Self {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(SearchFormComponent::HEIGHT), // Query input + validation line
                Constraint::Min(0),                              // Results and chart
                Constraint::Length(1),                           // Status line
            ])
            .split(area);

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(rows[1]);

        Self {
            form: rows[0],
            results: body[0],
            chart: body[1],
            status: rows[2],
        }
    }
}

/// Chart region for a terminal of the given size, if one can be drawn at all
pub fn chart_surface(area: Rect) -> Option<Rect> {
    let chart = AppLayout::new(area).chart;
    (chart.width >= MIN_CHART_WIDTH && chart.height >= MIN_CHART_HEIGHT).then_some(chart)
}

/// Collection of all components
#[derive(Debug, Default)]
pub struct Components {
    pub search_form: SearchFormComponent,
    pub results_list: ResultsListComponent,
    pub similarity_chart: SimilarityChartComponent,
    pub alert: AlertComponent,
    pub status_bar: StatusBarComponent,
}

impl Components {
    pub fn new() -> Self {
        Self::default()
    }

    /// Render every component; the alert is drawn last so it covers the rest
    pub fn render(&self, frame: &mut Frame, state: &AppState) {
        let layout = AppLayout::new(frame.area());

        self.search_form.view(state, frame, layout.form);
        self.results_list.view(state, frame, layout.results);
        self.similarity_chart.view(state, frame, layout.chart);
        self.status_bar.view(state, frame, layout.status);

        if state.ui.has_alert() {
            self.alert.view(state, frame, frame.area());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::search::{SearchResponse, SearchResult, FETCH_FAILURE_MESSAGE},
        infrastructure::tui::test::buffer_text,
    };
    use pretty_assertions::assert_eq;
    use ratatui::backend::TestBackend;

    fn draw(state: &AppState, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).expect("terminal");
        let components = Components::new();
        terminal
            .draw(|f| components.render(f, state))
            .expect("draw");
        buffer_text(terminal.backend().buffer())
    }

    #[test]
    fn test_layout_regions_do_not_overlap() {
        let layout = AppLayout::new(Rect::new(0, 0, 100, 30));

        assert_eq!(layout.form, Rect::new(0, 0, 100, SearchFormComponent::HEIGHT));
        assert_eq!(layout.status, Rect::new(0, 29, 100, 1));
        assert_eq!(layout.results.y, SearchFormComponent::HEIGHT);
        assert_eq!(layout.results.right(), layout.chart.x);
        assert_eq!(layout.chart.right(), 100);
    }

    #[test]
    fn test_chart_surface_requires_minimum_size() {
        assert!(chart_surface(Rect::new(0, 0, 100, 30)).is_some());
        assert_eq!(chart_surface(Rect::new(0, 0, 20, 30)), None);
        assert_eq!(chart_surface(Rect::new(0, 0, 100, 8)), None);
    }

    #[test]
    fn test_full_screen_render() {
        let mut state = AppState::default();
        state.search.render(SearchResponse::Results(vec![SearchResult::new(
            "Rust is fast",
            0.8231,
        )]));

        let screen = draw(&state, 100, 20);

        assert!(screen.contains("Document 1"));
        assert!(screen.contains("Similarity: 0.82"));
        assert!(screen.contains("Cosine Similarity"));
        assert!(screen.contains("Ready"));
    }

    #[test]
    fn test_alert_is_drawn_on_top() {
        let mut state = AppState::default();
        state.ui.alert = Some(FETCH_FAILURE_MESSAGE.to_string());

        let screen = draw(&state, 100, 20);

        assert!(screen.contains("An error occurred"));
    }
}
