//! # simsearch - similarity search in the terminal
//!
//! Sends a query to a semantic search endpoint, lists the matching snippets
//! with their cosine similarity and draws the scores as a bar chart.
//! The crate implements an Elm-like architecture for predictable state management.
//!
//! ## Architecture Overview
//!
//! - **Model** (`core::state`): application state
//! - **Message** (`core::msg`, `core::raw_msg`): events that can change the state
//! - **Update** (`core::update`): pure functions that transform state
//! - **Command** (`core::cmd`): side effects (HTTP searches, terminal control)
//! - **View** (`presentation::components`): rendering based on current state
//!
//! ## Example Usage
//!
//! ```rust
//! use simsearch::core::{msg::{search::SearchMsg, Msg}, state::AppState, update::update};
//!
//! let (state, commands) = update(
//!     Msg::Search(SearchMsg::Submit("  machine learning ".to_string())),
//!     AppState::default(),
//! );
//!
//! assert_eq!(commands.len(), 1);
//! assert!(state.search.validation_message.is_none());
//! assert!(state.is_loading());
//! ```
//!
//! ## Modules
//!
//! - [`core`] - Elm architecture: state, messages, update, commands
//! - [`domain`] - Search results and the chart model
//! - [`infrastructure`] - HTTP client, search service, terminal, configuration
//! - [`integration`] - Runtime and main loop
//! - [`presentation`] - UI components
//! - [`utils`] - Logging, panic handling and paths

pub mod core;
pub mod domain;
pub mod infrastructure;
pub mod integration;
pub mod presentation;
pub mod utils;

// Re-exports for convenience
pub use crate::core::{cmd::Cmd, msg::Msg, raw_msg::RawMsg, state::AppState};
pub use crate::core::{translator::translate_raw_to_domain, update::update};
pub use integration::runtime::{Runtime, RuntimeStats};

/// Result type used throughout the library
pub type Result<T> = color_eyre::eyre::Result<T>;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
