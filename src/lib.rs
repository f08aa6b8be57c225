// Public modules
pub mod archive;
pub mod cli;
pub mod config;
pub mod download;
pub mod installer;
pub mod pathenv;
pub mod verify;

// Re-export commonly used types
pub use anyhow::{Context, Result as AnyhowResult};
pub use config::InstallConfig;
