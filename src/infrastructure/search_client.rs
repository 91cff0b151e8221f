//! HTTP search client
//!
//! Submits `query=<text>` as form data to the configured endpoint and decodes
//! the JSON body into a [`SearchResponse`].

use std::{future::Future, pin::Pin, time::Duration};

use reqwest::{Client, Request, Url};
use thiserror::Error;

use crate::domain::search::{SearchError, SearchResponse};

pub type SearchFuture<'a> =
    Pin<Box<dyn Future<Output = Result<SearchResponse, SearchError>> + Send + 'a>>;

/// Anything that can answer a search query
pub trait SearchBackend: Send + Sync {
    fn search<'a>(&'a self, query: &'a str) -> SearchFuture<'a>;
}

/// Problems resolving the host surface at startup. Fatal for searching, not for the UI.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("invalid search endpoint `{endpoint}`: {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },
    #[error("cannot build HTTP client: {0}")]
    HttpClient(String),
    #[error("chart surface unavailable: terminal is {width}x{height}, need at least {min_width}x{min_height}")]
    ChartSurfaceUnavailable {
        width: u16,
        height: u16,
        min_width: u16,
        min_height: u16,
    },
}

/// reqwest-backed [`SearchBackend`]
#[derive(Debug, Clone)]
pub struct HttpSearchClient {
    client: Client,
    endpoint: Url,
}

impl HttpSearchClient {
    pub fn new(endpoint: &str, timeout: Option<Duration>) -> Result<Self, ConfigurationError> {
        let endpoint = parse_endpoint(endpoint)?;

        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ConfigurationError::HttpClient(e.to_string()))?;

        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// `POST {endpoint}` with `Content-Type: application/x-www-form-urlencoded`
    pub fn build_request(&self, query: &str) -> Result<Request, SearchError> {
        self.client
            .post(self.endpoint.clone())
            .form(&[("query", query)])
            .build()
            .map_err(|e| SearchError::Transport(e.to_string()))
    }

    pub async fn fetch(&self, query: &str) -> Result<SearchResponse, SearchError> {
        let request = self.build_request(query)?;
        log::debug!("POST {} ({} bytes query)", request.url(), query.len());

        let response = self
            .client
            .execute(request)
            .await
            .map_err(|e| SearchError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::Status(status.as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| SearchError::Transport(e.to_string()))?;
        SearchResponse::from_slice(&body)
    }
}

impl SearchBackend for HttpSearchClient {
    fn search<'a>(&'a self, query: &'a str) -> SearchFuture<'a> {
        Box::pin(self.fetch(query))
    }
}

fn parse_endpoint(endpoint: &str) -> Result<Url, ConfigurationError> {
    let invalid = |reason: String| ConfigurationError::InvalidEndpoint {
        endpoint: endpoint.to_string(),
        reason,
    };

    let url = Url::parse(endpoint.trim()).map_err(|e| invalid(e.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(invalid(format!("unsupported scheme `{other}`"))),
    }
}
