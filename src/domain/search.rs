use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Message shown inline when a search is submitted without any text.
pub const VALIDATION_MESSAGE: &str = "Please enter a search query.";

/// Message shown in the blocking alert when a search could not be completed.
pub const FETCH_FAILURE_MESSAGE: &str =
    "An error occurred while fetching search results. Please try again later.";

/// One document match returned by the search server.
///
/// Extra fields sent by the server (such as `title`) are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub snippet: String,
    pub similarity: f64,
}

impl SearchResult {
    pub fn new(snippet: impl Into<String>, similarity: f64) -> Self {
        Self {
            snippet: snippet.into(),
            similarity,
        }
    }

    /// `Similarity: 0.82`
    pub fn similarity_text(&self) -> String {
        format_similarity(self.similarity)
    }
}

/// Body of a successful (2xx) search response.
///
/// On the wire this is either a JSON array of results or an object carrying an
/// `error` string. Anything else fails to decode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SearchResponse {
    Results(Vec<SearchResult>),
    Error { error: String },
}

impl SearchResponse {
    pub fn from_slice(body: &[u8]) -> Result<Self, SearchError> {
        serde_json::from_slice(body).map_err(|e| SearchError::Parse(e.to_string()))
    }

    pub fn results(&self) -> Option<&[SearchResult]> {
        match self {
            SearchResponse::Results(results) => Some(results),
            SearchResponse::Error { .. } => None,
        }
    }
}

/// Failures while fetching or decoding a search response.
///
/// The user sees the same alert for all of them; the variants only matter for logs.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum SearchError {
    #[error("request failed: {0}")]
    Transport(String),
    #[error("server responded with status {0}")]
    Status(u16),
    #[error("malformed response body: {0}")]
    Parse(String),
}

/// Heading of the result block (and chart label) at a 0-based position.
pub fn document_label(index: usize) -> String {
    format!("Document {}", index + 1)
}

pub fn format_similarity(similarity: f64) -> String {
    format!("Similarity: {similarity:.2}")
}
