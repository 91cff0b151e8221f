//! Results list component
//!
//! One block per result: a `Document N` heading, the snippet and the formatted
//! similarity. An error response is shown as a single paragraph instead.

use ratatui::{prelude::*, widgets::*};

use crate::{
    core::state::{AppState, ResultsView},
    domain::search::document_label,
};

#[derive(Debug, Clone, Default)]
pub struct ResultsListComponent;

impl ResultsListComponent {
    pub fn new() -> Self {
        Self
    }

    /// Rendered blocks, in display order
    pub fn blocks(view: &ResultsView) -> Vec<Vec<Line<'static>>> {
        match view {
            ResultsView::Empty => vec![],
            ResultsView::Error(error) => vec![vec![Line::from(error.clone())]],
            ResultsView::Results(results) => results
                .iter()
                .enumerate()
                .map(|(i, result)| {
                    let mut block = vec![Line::from(Span::styled(
                        document_label(i),
                        Style::default().add_modifier(Modifier::BOLD),
                    ))];
                    // Snippets are raw document text and usually span several lines
                    block.extend(Text::from(result.snippet.clone()).lines);
                    block.push(Line::from(Span::styled(
                        result.similarity_text(),
                        Style::default().fg(Color::Cyan),
                    )));
                    block
                })
                .collect(),
        }
    }

    /// Blocks flattened into lines with an empty line between blocks
    pub fn lines(view: &ResultsView) -> Vec<Line<'static>> {
        let mut lines = Vec::new();
        for (i, block) in Self::blocks(view).into_iter().enumerate() {
            if i > 0 {
                lines.push(Line::default());
            }
            lines.extend(block);
        }
        lines
    }

    /// Number of terminal rows the lines take once word-wrapped to `width` columns,
    /// using the same wrapping as [`Self::view`]
    pub fn wrapped_height(lines: &[Line<'static>], width: u16) -> u16 {
        let rows = Self::paragraph(lines.to_vec()).line_count(width);
        u16::try_from(rows).unwrap_or(u16::MAX)
    }

    /// `(total rows, viewport rows)` of the results region drawn into `area`
    pub fn measure(state: &AppState, area: Rect) -> (u16, u16) {
        let inner = Self::block().inner(area);
        let lines = Self::lines(&state.search.results);
        (Self::wrapped_height(&lines, inner.width), inner.height)
    }

    fn block() -> Block<'static> {
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .title(" Results ")
    }

    fn paragraph(lines: Vec<Line<'static>>) -> Paragraph<'static> {
        Paragraph::new(lines).wrap(Wrap { trim: false })
    }

    pub fn view(&self, state: &AppState, frame: &mut Frame, area: Rect) {
        let paragraph = Self::paragraph(Self::lines(&state.search.results))
            .scroll((state.ui.results_scroll, 0))
            .block(Self::block());
        frame.render_widget(paragraph, area);
    }
}
