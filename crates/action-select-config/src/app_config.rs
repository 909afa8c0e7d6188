//! Application configuration
//!
//! Configuration loaded from `.action-select.toml`, with the service command
//! overridable from the environment and the command line.

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

/// Environment variable overriding `service_command` (whitespace separated)
pub const SERVICE_ENV: &str = "ACTION_SELECT_SERVICE";

const MIN_PERCENT: u16 = 10;
const MAX_PERCENT: u16 = 100;

/// Application configuration loaded from `.action-select.toml`
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Program and arguments of the action service, e.g. `["node", "service.js"]`
    #[serde(default)]
    pub service_command: Vec<String>,

    /// Text shown until the catalog arrives
    #[serde(default = "default_placeholder")]
    pub placeholder: String,

    /// Text shown in the empty input line
    #[serde(default = "default_input_placeholder")]
    pub input_placeholder: String,

    /// Palette width as a percentage of the terminal
    #[serde(default = "default_panel_percent")]
    pub panel_width_percent: u16,

    /// Palette height as a percentage of the terminal
    #[serde(default = "default_panel_percent")]
    pub panel_height_percent: u16,
}

fn default_placeholder() -> String {
    "Awaiting API…".to_string()
}

fn default_input_placeholder() -> String {
    "Type to filter…".to_string()
}

fn default_panel_percent() -> u16 {
    60
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            service_command: Vec::new(),
            placeholder: default_placeholder(),
            input_placeholder: default_input_placeholder(),
            panel_width_percent: default_panel_percent(),
            panel_height_percent: default_panel_percent(),
        }
    }
}

impl AppConfig {
    /// Load config from the first config file found, or use defaults,
    /// then apply the environment override
    pub fn load() -> Self {
        let mut config = Self::load_file();
        config.apply_env();
        config
    }

    fn load_file() -> Self {
        if let Some(content) = crate::load_config_file() {
            match Self::parse(&content) {
                Ok(config) => {
                    log::info!("Loaded app config from file");
                    return config;
                }
                Err(e) => {
                    log::warn!("Failed to parse config file: {}", e);
                }
            }
        }

        log::debug!("Using default app config");
        Self::default()
    }

    /// Parse TOML content, clamping out-of-range values
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        let config: Self = toml::from_str(content)?;
        Ok(config.clamped())
    }

    fn clamped(mut self) -> Self {
        self.panel_width_percent = self.panel_width_percent.clamp(MIN_PERCENT, MAX_PERCENT);
        self.panel_height_percent = self.panel_height_percent.clamp(MIN_PERCENT, MAX_PERCENT);
        self
    }

    /// Apply `ACTION_SELECT_SERVICE`, loading `.env` first if it is not set
    fn apply_env(&mut self) {
        if std::env::var(SERVICE_ENV).is_err() {
            match dotenvy::dotenv() {
                Ok(path) => log::debug!("Loaded .env file from: {:?}", path),
                Err(_) => log::debug!(".env file not found, will rely on environment variables"),
            }
        }

        if let Ok(value) = std::env::var(SERVICE_ENV) {
            if self.override_service(value.split_whitespace().map(str::to_string)) {
                log::info!("Service command taken from {}", SERVICE_ENV);
            }
        }
    }

    /// Replace the service command unless `command` is empty.
    ///
    /// Returns whether the command was replaced.
    pub fn override_service(&mut self, command: impl IntoIterator<Item = String>) -> bool {
        let command: Vec<String> = command.into_iter().collect();
        if command.is_empty() {
            return false;
        }
        self.service_command = command;
        true
    }

    /// Program and arguments of the service, or an error when none is configured
    pub fn service(&self) -> Result<(&str, &[String])> {
        match self.service_command.split_first() {
            Some((program, args)) => Ok((program.as_str(), args)),
            None => bail!(
                "No action service configured: set service_command in .action-select.toml, \
                 set {}, or pass the command after --",
                SERVICE_ENV
            ),
        }
    }
}
