//! CLI integration tests for gavel.
//!
//! These tests execute the compiled binary and verify CLI behavior including:
//! - Subcommand behavior (lint, rules, parse)
//! - Stdin/stdout handling
//! - Exit codes
//! - File I/O operations
//! - Error handling

mod common;
mod lint;
mod parse;
mod rules;
