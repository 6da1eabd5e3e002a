//! CLI library for testing purposes

pub mod commands;
pub mod config;
pub mod logging;
pub mod mode;

pub use commands::{Overrides, RunSettings, parse_language, run_extract_command, run_split_command};
pub use config::{ConfigError, ResbundleConfig, load_config};
pub use mode::Mode;
