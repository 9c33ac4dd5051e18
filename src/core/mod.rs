//! Core application functionality
//!
//! This module contains the core application logic, including:
//! - Error types shared by the layout code
//! - CLI handling and validation
//! - Settings resolution from CLI, settings file and defaults
//! - The runner that ties font, layout and sinks together

pub mod cli;
pub mod config_file;
pub mod errors;
pub mod platform;
pub mod runner;
pub mod settings;

// Re-export commonly used items
pub use cli::CliArgs;
pub use config_file::ConfigFile;
pub use errors::{CapacityExceeded, LayoutError, LayoutResult};
pub use runner::run_app;
pub use settings::GhhtSettings;
