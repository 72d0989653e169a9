//! Application settings and paths.

use crate::cli::OutputFormat;
use crate::error::{ConfigError, ConfigResult};
use crate::scanner::{DEFAULT_TIMEOUT, DEFAULT_WORKERS};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Application directory paths following the XDG Base Directory Specification.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Configuration directory (~/.config/portsweep)
    pub config_dir: PathBuf,
}

impl Paths {
    /// Locate the platform config directory. Nothing is created on disk.
    pub fn discover() -> ConfigResult<Self> {
        let project = ProjectDirs::from("com", "portsweep", "portsweep")
            .ok_or(ConfigError::DirectoryNotFound)?;

        Ok(Self {
            config_dir: project.config_dir().to_path_buf(),
        })
    }

    /// Get the path to the settings file.
    pub fn settings_file(&self) -> PathBuf {
        self.config_dir.join("settings.json")
    }
}

/// Application-wide settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// Default maximum number of workers.
    pub default_workers: usize,
    /// Default per-probe timeout in milliseconds.
    pub default_timeout_ms: u64,
    /// Default output format (plain, json or csv).
    pub default_output_format: String,
    /// Enable verbose output by default.
    pub verbose: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            default_workers: DEFAULT_WORKERS,
            default_timeout_ms: DEFAULT_TIMEOUT.as_millis() as u64,
            default_output_format: OutputFormat::Plain.to_string(),
            verbose: false,
        }
    }
}

impl AppSettings {
    /// Load settings from the default location, or defaults if there is no file.
    pub fn load() -> ConfigResult<Self> {
        let file = Paths::discover()?.settings_file();

        if !file.exists() {
            return Ok(Self::default());
        }

        Self::load_from(&file)
    }

    /// Load settings from a specific file.
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        Ok(serde_json::from_str(&content)?)
    }

    /// Save settings to a specific file, creating parent directories.
    pub fn save_to(&self, path: &Path) -> ConfigResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content).map_err(|e| ConfigError::WriteFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// The default timeout as a `Duration`.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.default_timeout_ms)
    }

    /// The default output format, parsed.
    pub fn output_format(&self) -> ConfigResult<OutputFormat> {
        self.default_output_format
            .parse::<OutputFormat>()
            .map_err(|_| ConfigError::UnknownOutputFormat(self.default_output_format.clone()))
    }
}
