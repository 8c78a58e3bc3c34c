// src/config.rs
//! Tracker configuration stored as JSON

use crate::error::{GpsError, Result};
use crate::gps::framer::DEFAULT_MAX_LINE_LEN;
use crate::gps::nmea::SentenceKind;
use crate::listener::ListenerMode;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    pub serial_port: Option<String>,
    pub serial_baudrate: u32,
    /// Multiple listeners per kind, or a single replaceable handler
    pub listener_mode: ListenerMode,
    /// Sentence kinds that increment the valid-message counter
    pub counted_sentences: Vec<SentenceKind>,
    /// Sentence kinds that fire update listeners
    pub notify_sentences: Vec<SentenceKind>,
    /// Longest unterminated `$` fragment the framer will hold
    pub max_line_len: usize,
    /// Digits after the decimal point when logging coordinates
    pub coordinate_precision: usize,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            serial_port: None,
            serial_baudrate: 9600,
            listener_mode: ListenerMode::Multi,
            counted_sentences: vec![SentenceKind::Gga, SentenceKind::Rmc],
            notify_sentences: vec![SentenceKind::Gga, SentenceKind::Rmc],
            max_line_len: DEFAULT_MAX_LINE_LEN,
            coordinate_precision: 6,
        }
    }
}

impl TrackerConfig {
    /// Load configuration from the default location, falling back to defaults
    pub fn load() -> Result<Self> {
        Self::load_from_file(&Self::get_config_path()?)
    }

    /// Load configuration from `path`; a missing file yields defaults
    pub fn load_from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)
            .map_err(|e| GpsError::Config(format!("Failed to read config file {}: {}", path.display(), e)))?;

        let config: Self = serde_json::from_str(&contents)
            .map_err(|e| GpsError::Config(format!("Failed to parse config file {}: {}", path.display(), e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to the default location
    pub fn save(&self) -> Result<()> {
        self.save_to_file(&Self::get_config_path()?)
    }

    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        // Create config directory if it doesn't exist
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| GpsError::Config(format!("Failed to create config directory: {}", e)))?;
        }

        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)
            .map_err(|e| GpsError::Config(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    /// Get config file path
    pub fn get_config_path() -> Result<PathBuf> {
        let home = std::env::var("HOME")
            .map_err(|_| GpsError::Config("HOME environment variable not set".to_string()))?;

        Ok(PathBuf::from(home).join(".config").join("gps-tracker").join("config.json"))
    }

    pub fn validate(&self) -> Result<()> {
        if self.serial_baudrate == 0 {
            return Err(GpsError::Config("serial_baudrate must be non-zero".to_string()));
        }
        if self.max_line_len == 0 {
            return Err(GpsError::Config("max_line_len must be non-zero".to_string()));
        }
        Ok(())
    }

    /// Update serial port settings
    pub fn update_serial(&mut self, port: String, baudrate: u32) {
        self.serial_port = Some(port);
        self.serial_baudrate = baudrate;
    }
}
