//! Integration layer
//!
//! Wires the Elm core to the terminal and the search service:
//! - [`runtime::Runtime`]: message queues and the update cycle
//! - [`app_runner::AppRunner`]: the main loop

pub mod app_runner;
pub mod runtime;
