//! Application configuration.
//!
//! Layered lowest to highest: serde defaults, optional TOML file,
//! `NOUGHTS_*` environment variables, command-line flags (applied by `main`).

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};

/// Environment variable overriding the leaderboard path.
pub const LEADERBOARD_ENV: &str = "NOUGHTS_LEADERBOARD";

/// Environment variable overriding the server port.
pub const PORT_ENV: &str = "NOUGHTS_PORT";

/// Settings shared by the game and the server.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct AppConfig {
    /// Leaderboard document.
    #[serde(default = "default_leaderboard_path")]
    leaderboard_path: PathBuf,

    /// Address the server binds to.
    #[serde(default = "default_host")]
    host: String,

    /// Preferred server port.
    #[serde(default = "default_port")]
    port: u16,

    /// Port tried when `port` cannot be bound.
    #[serde(default = "default_fallback_port")]
    fallback_port: u16,

    /// Directory of static files served next to the API.
    #[serde(default = "default_web_dir")]
    web_dir: PathBuf,
}

fn default_leaderboard_path() -> PathBuf {
    PathBuf::from("leaderboard.txt")
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_fallback_port() -> u16 {
    8765
}

fn default_web_dir() -> PathBuf {
    PathBuf::from("web")
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            leaderboard_path: default_leaderboard_path(),
            host: default_host(),
            port: default_port(),
            fallback_port: default_fallback_port(),
            web_dir: default_web_dir(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;
        Self::from_toml(&content)
    }

    /// Parses configuration from TOML text. Missing keys take their defaults.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        info!(leaderboard = %config.leaderboard_path.display(), port = config.port, "Config loaded");
        Ok(config)
    }

    /// Loads `path` if it exists, otherwise the defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            debug!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Applies `NOUGHTS_LEADERBOARD` and `NOUGHTS_PORT` from the environment.
    #[instrument(skip(self))]
    pub fn apply_env(self) -> Result<Self, ConfigError> {
        self.apply_overrides(
            std::env::var(LEADERBOARD_ENV).ok(),
            std::env::var(PORT_ENV).ok(),
        )
    }

    fn apply_overrides(
        mut self,
        leaderboard: Option<String>,
        port: Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(path) = leaderboard {
            debug!(%path, "Leaderboard path from environment");
            self.leaderboard_path = PathBuf::from(path);
        }
        if let Some(port) = port {
            self.port = port.trim().parse().map_err(|_| {
                warn!(%port, "Invalid port in environment");
                ConfigError::new(format!("{} is not a valid port: '{}'", PORT_ENV, port))
            })?;
        }
        Ok(self)
    }

    /// Replaces the leaderboard path.
    pub fn with_leaderboard_path(mut self, path: PathBuf) -> Self {
        self.leaderboard_path = path;
        self
    }

    /// Replaces the bind host.
    pub fn with_host(mut self, host: String) -> Self {
        self.host = host;
        self
    }

    /// Replaces the preferred port.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Replaces the static file directory.
    pub fn with_web_dir(mut self, dir: PathBuf) -> Self {
        self.web_dir = dir;
        self
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
