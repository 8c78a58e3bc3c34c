// src/lib.rs
//! GPS Tracker Library
//!
//! Turns a raw NMEA-0183 byte stream (GGA, RMC and GSA sentences) into a live
//! location, time and fix record, and notifies listeners as fixes arrive.

pub mod config;
pub mod error;
pub mod gps;
pub mod ingest;
pub mod listener;
pub mod tracker;

// Re-export main types for convenience
pub use config::TrackerConfig;
pub use error::{GpsError, Result};
pub use gps::{format_fixed, FixType, GpsDateTime, LocationFix, SentenceKind};
pub use listener::{ListenerMode, ListenerRegistry};
pub use tracker::{FixReader, GpsTracker};
