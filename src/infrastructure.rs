//! Infrastructure layer
//!
//! This module handles external integrations and services:
//! - Terminal foundation and input editing
//! - CLI argument processing
//! - Configuration loading
//! - The HTTP search client and the background search service

pub mod cli;
pub mod config;
pub mod search_client;
pub mod search_service;
pub mod tui;
