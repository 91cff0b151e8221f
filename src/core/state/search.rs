use strum::Display;

use crate::{
    core::{cmd::Cmd, msg::search::SearchMsg},
    domain::{
        chart::{BarChartSpec, BarStyle, ChartState},
        search::{SearchResponse, SearchResult, VALIDATION_MESSAGE},
    },
};

/// Whether a search is awaiting its response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display)]
pub enum Phase {
    #[default]
    #[strum(serialize = "Ready")]
    Idle,
    #[strum(serialize = "Searching...")]
    Loading,
}

/// What the results region currently shows
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ResultsView {
    #[default]
    Empty,
    Results(Vec<SearchResult>),
    Error(String),
}

impl ResultsView {
    pub fn result_count(&self) -> usize {
        match self {
            ResultsView::Results(results) => results.len(),
            ResultsView::Empty | ResultsView::Error(_) => 0,
        }
    }
}

/// How a finished search relates to the requests issued so far
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Freshness {
    Current,
    Stale,
}

/// Search controller state: request bookkeeping, rendered results and the chart
#[derive(Debug, Clone)]
pub struct SearchState {
    /// Cleared when the host surface could not be resolved at startup
    pub enabled: bool,
    pub disabled_reason: Option<String>,
    pub endpoint: String,
    /// Drop outcomes of superseded requests instead of letting the last one to finish win
    pub discard_stale: bool,
    pub validation_message: Option<String>,
    /// Sequence number of the most recently issued request (0 = none yet)
    pub latest_seq: u64,
    pub in_flight: usize,
    pub results: ResultsView,
    pub chart: ChartState,
    pub chart_style: BarStyle,
}

impl Default for SearchState {
    fn default() -> Self {
        Self {
            enabled: true,
            disabled_reason: None,
            endpoint: String::new(),
            discard_stale: true,
            validation_message: None,
            latest_seq: 0,
            in_flight: 0,
            results: ResultsView::Empty,
            chart: ChartState::default(),
            chart_style: BarStyle::default(),
        }
    }
}

impl SearchState {
    pub fn phase(&self) -> Phase {
        if self.in_flight > 0 {
            Phase::Loading
        } else {
            Phase::Idle
        }
    }

    /// Validate and issue a search for the raw input text
    fn submit(&mut self, raw_query: &str) -> Vec<Cmd> {
        if !self.enabled {
            log::debug!("Search submission ignored: controller disabled");
            return vec![];
        }

        let query = raw_query.trim();
        if query.is_empty() {
            self.validation_message = Some(VALIDATION_MESSAGE.to_string());
            return vec![];
        }

        self.validation_message = None;
        self.latest_seq += 1;
        self.in_flight += 1;
        log::info!("Submitting search #{}: {query:?}", self.latest_seq);

        vec![Cmd::Search {
            seq: self.latest_seq,
            query: query.to_string(),
        }]
    }

    /// Account for a finished request and decide whether its outcome may be rendered
    pub fn settle(&mut self, seq: u64) -> Freshness {
        self.in_flight = self.in_flight.saturating_sub(1);
        if self.discard_stale && seq != self.latest_seq {
            Freshness::Stale
        } else {
            Freshness::Current
        }
    }

    /// Render a decoded response into the results view and the chart
    pub fn render(&mut self, response: SearchResponse) {
        match response {
            SearchResponse::Error { error } => {
                // The chart only ever reflects result lists
                self.results = ResultsView::Error(error);
            }
            SearchResponse::Results(results) => {
                self.render_chart(&results);
                self.results = ResultsView::Results(results);
            }
        }
    }

    fn render_chart(&mut self, results: &[SearchResult]) {
        match BarChartSpec::from_results(results, self.chart_style) {
            Some(spec) => {
                self.chart.replace(spec);
            }
            None => {
                log::warn!("No data available for chart rendering.");
            }
        }
    }

    /// Search-specific update function
    /// Returns: Generated commands
    pub fn update(&mut self, msg: SearchMsg) -> Vec<Cmd> {
        match msg {
            SearchMsg::Submit(raw_query) => self.submit(&raw_query),
            SearchMsg::Disable(reason) => {
                log::error!("Search disabled: {reason}");
                self.enabled = false;
                self.disabled_reason = Some(reason);
                vec![]
            }
            // Outcomes may raise an alert, which lives in UiState; handled in update()
            SearchMsg::Finished { .. } => vec![],
        }
    }
}
