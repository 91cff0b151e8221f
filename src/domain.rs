//! Domain logic
//!
//! This module contains the search domain:
//! - Search results and the response union returned by the server
//! - The similarity bar chart and its single-instance ownership

pub mod chart;
pub mod search;
