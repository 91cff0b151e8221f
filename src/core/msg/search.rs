use serde::{Deserialize, Serialize};

use crate::domain::search::{SearchError, SearchResponse};

/// Messages specific to SearchState
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SearchMsg {
    /// Raw (untrimmed) query text from the input
    Submit(String),
    /// A request issued with `seq` settled
    Finished {
        seq: u64,
        outcome: Result<SearchResponse, SearchError>,
    },
    /// The host surface could not be resolved; stop wiring submissions
    Disable(String),
}
