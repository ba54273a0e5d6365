// CLI module for wemkit
//
// Command-line front end over the wemkit library. Only compiled into the
// binary, not into the Python extension.

pub mod commands;
pub mod config;
pub mod output;

pub use config::{BatchOperation, Commands, Config, OutputFormat};
pub use output::OutputFormatter;
