//! Configuration and file paths for action-select
//!
//! This crate provides:
//! - Directory paths for config and cache files
//! - Configuration file lookup (TOML)
//! - Application configuration (AppConfig)

pub mod app_config;
pub mod config_file;
pub mod paths;

pub use app_config::{AppConfig, SERVICE_ENV};
pub use config_file::load_config_file;
