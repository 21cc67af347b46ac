//! # Context Statusline
//!
//! A statusline command for Claude Code that shows how much of the model's
//! context window the current session occupies.
//!
//! ## Overview
//!
//! Claude Code pipes a JSON descriptor (model id, transcript path) to stdin.
//! The transcript is scanned for the most recent token usage, the usage is
//! compared against the model's context window, and one line is printed:
//!
//! ```text
//! [ctx: 58173/200000 29.1%] claude-sonnet-4-5-20250929
//! ```
//!
//! ## Features
//!
//! - `colors` (default): Enables terminal color output via owo-colors

/// Single invocation: hook in, status line out
pub mod app;

/// Usage-to-percentage calculation and severity levels
pub mod calculator;

/// Command-line argument parsing and configuration
pub mod cli;

/// Display formatting for text and JSON output
pub mod display;

/// Transcript error type
pub mod error;

/// Per-model context window limits
pub mod limits;

/// Data models for the hook input and transcript lines
pub mod models;

/// JSONL transcript parsing
pub mod transcript;

/// Stdin and logging helpers
pub mod utils;
