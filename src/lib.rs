//! pkgship library.
//!
//! This crate provides the core functionality for packaging a git working
//! copy into a release zip archive. It is used by the `pkgship` CLI binary
//! and can be consumed programmatically, chiefly so tests can drive the
//! pipeline with stubbed external commands.
//!
//! # Modules
//!
//! - [`archive`] - Archive export via `git archive` and cleanup via `zip -d`
//! - [`cli`] - Command-line argument definitions
//! - [`error`] - Semantic error types for every failure mode
//! - [`exec`] - External command execution abstraction
//! - [`lexer`] - Tokenizer for the PHP subset the manifest is written in
//! - [`manifest`] - Package handle and version extraction
//! - [`output`] - Progress and result formatting
//! - [`pipeline`] - End-to-end packaging orchestration
//! - [`preflight`] - Tool availability and clean-working-tree checks
//! - [`root`] - Package-root discovery

pub mod archive;
pub mod cli;
pub mod error;
pub mod exec;
pub mod lexer;
pub mod manifest;
pub mod output;
pub mod pipeline;
pub mod preflight;
pub mod root;

#[cfg(any(test, feature = "test-support"))]
pub mod test_utils;
