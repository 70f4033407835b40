//! Komp CLI Library
//!
//! Terminal client for the competitions backend. Provides scriptable
//! subcommands (headless mode) and an interactive ratatui TUI.

pub mod app;
pub mod commands;
pub mod tasks;
pub mod ui;
