// src/error.rs
//! Error types for the GPS tracker
//!
//! Sentence parsing never produces an error: malformed input is dropped or
//! clamped on the ingestion path. These variants cover the outer surfaces
//! (byte sources, serial ports, configuration).

use thiserror::Error;

pub type Result<T> = std::result::Result<T, GpsError>;

#[derive(Debug, Error)]
pub enum GpsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serial error: {0}")]
    Serial(#[from] tokio_serial::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Error: {0}")]
    Other(String),
}

impl From<anyhow::Error> for GpsError {
    fn from(error: anyhow::Error) -> Self {
        GpsError::Other(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = GpsError::Connection("port busy".to_string());
        assert_eq!(err.to_string(), "Connection error: port busy");

        let err = GpsError::Config("bad baud".to_string());
        assert_eq!(err.to_string(), "Config error: bad baud");
    }

    #[test]
    fn test_from_io_error() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: GpsError = io.into();
        assert!(matches!(err, GpsError::Io(_)));
    }
}
