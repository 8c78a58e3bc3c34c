// src/gps/mod.rs
//! NMEA framing, decoding and location state

pub mod coord;
pub mod data;
pub mod format;
pub mod framer;
pub mod nmea;
pub mod router;

pub use data::{FixType, GpsDateTime, LocationFix};
pub use format::format_fixed;
pub use nmea::SentenceKind;
