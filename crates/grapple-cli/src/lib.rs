//! GrappleGraph CLI library.
//!
//! Argument parsing, configuration, knowledge base selection, command
//! execution and output formatting for the `grapple` binary.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod knowledge;
pub mod output;

pub use cli::{Cli, Command};
pub use config::Config;
pub use error::{CliError, Result};
pub use output::Formatter;
