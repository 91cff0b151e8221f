//! Presentation layer
//!
//! Stateless components that draw [`AppState`](crate::core::state::AppState):
//! the search form, the results list, the similarity chart, the alert overlay
//! and the status line.

pub mod components;
