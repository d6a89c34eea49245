//! OpenMemory command line: argument parsing and command execution.

pub mod cli;
pub mod commands;

pub use cli::{Cli, Command};
pub use commands::{failure_message, run, CliError};
