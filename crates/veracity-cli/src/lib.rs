//! Veracity CLI library.
//!
//! This library provides the core functionality for the Veracity command-line interface,
//! including configuration management, command execution, and output formatting.

pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod output;
pub mod repl;

pub use cli::{Cli, Command};
pub use config::Config;
pub use context::AppContext;
pub use error::{CliError, Result};
pub use output::Formatter;
