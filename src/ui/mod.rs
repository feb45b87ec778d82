//! User interface and interaction
//!
//! This module contains CLI parsing and the status lines printed
//! while a report is analyzed and mailed.

pub mod cli;
pub mod output;

// Re-export commonly used items
pub use cli::{Cli, cli_to_config};
