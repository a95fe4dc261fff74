//! Internal modules for the tournament lobby client.
//!
//! This library provides the HTTP API client, command parsing, and the TUI
//! application used by the tg_client binary.

pub mod api_client;
pub mod commands;
pub mod tui_app;
