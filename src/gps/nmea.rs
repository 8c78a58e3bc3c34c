// src/gps/nmea.rs
//! NMEA sentence decoders
//!
//! Each decoder is a pure function from the comma-split fields of one sentence
//! to a partial update of [`LocationFix`]. Applying the update is a separate
//! step so the router can decide when to publish and notify.

use serde::{Deserialize, Serialize};

use super::coord::{self, parse_f64_or_zero};
use super::data::{FixType, GpsDateTime, LocationFix};

/// Knots to meters per second
pub const KNOTS_TO_MPS: f64 = 0.514444;

/// A GGA sentence has exactly this many comma-delimited fields
pub const GGA_FIELD_COUNT: usize = 15;

/// Sentence types understood by the decoders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SentenceKind {
    Gga,
    Rmc,
    Gsa,
}

impl SentenceKind {
    /// Identify a sentence from its first field (`$GPGGA`, `$GNRMC`, ...).
    ///
    /// GP and GN talker IDs are interchangeable; anything else is unknown.
    pub fn identify(identifier: &str) -> Option<Self> {
        let body = identifier.strip_prefix('$')?;
        let kind = body
            .strip_prefix("GP")
            .or_else(|| body.strip_prefix("GN"))?;

        match kind {
            "GGA" => Some(SentenceKind::Gga),
            "RMC" => Some(SentenceKind::Rmc),
            "GSA" => Some(SentenceKind::Gsa),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            SentenceKind::Gga => "GGA",
            SentenceKind::Rmc => "RMC",
            SentenceKind::Gsa => "GSA",
        }
    }
}

/// Position fields carried by GGA
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GgaUpdate {
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: f64,
    pub satellites: u32,
}

/// RMC either carries a fresh time/motion fix or marks the old one stale
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RmcUpdate {
    Active {
        datetime: GpsDateTime,
        speed_over_ground: f64,
        course_over_ground: f64,
    },
    Void,
}

/// A decoded sentence, ready to apply
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SentenceUpdate {
    Gga(GgaUpdate),
    Rmc(RmcUpdate),
    Gsa(FixType),
}

impl SentenceUpdate {
    pub fn kind(&self) -> SentenceKind {
        match self {
            SentenceUpdate::Gga(_) => SentenceKind::Gga,
            SentenceUpdate::Rmc(_) => SentenceKind::Rmc,
            SentenceUpdate::Gsa(_) => SentenceKind::Gsa,
        }
    }

    /// Whether this update may bump the valid-message counter.
    /// A void RMC never counts.
    pub fn counts_as_valid(&self) -> bool {
        !matches!(self, SentenceUpdate::Rmc(RmcUpdate::Void))
    }

    /// Write the fields this sentence owns into `fix`, leaving the rest alone
    pub fn apply(&self, fix: &mut LocationFix) {
        match *self {
            SentenceUpdate::Gga(gga) => {
                fix.latitude = gga.latitude;
                fix.longitude = gga.longitude;
                fix.altitude = gga.altitude;
                fix.satellites = gga.satellites;
            }
            SentenceUpdate::Rmc(RmcUpdate::Active {
                datetime,
                speed_over_ground,
                course_over_ground,
            }) => {
                fix.datetime = datetime;
                fix.speed_over_ground = speed_over_ground;
                fix.course_over_ground = course_over_ground;
            }
            SentenceUpdate::Rmc(RmcUpdate::Void) => {
                fix.datetime = GpsDateTime::default();
                fix.speed_over_ground = 0.0;
                fix.course_over_ground = 0.0;
            }
            SentenceUpdate::Gsa(fix_type) => {
                fix.fix_type = fix_type;
            }
        }
    }
}

/// Decode the fields of a sentence of a known kind
pub fn decode(kind: SentenceKind, fields: &[&str]) -> Option<SentenceUpdate> {
    match kind {
        SentenceKind::Gga => decode_gga(fields).map(SentenceUpdate::Gga),
        SentenceKind::Rmc => Some(SentenceUpdate::Rmc(decode_rmc(fields))),
        SentenceKind::Gsa => Some(SentenceUpdate::Gsa(decode_gsa(fields))),
    }
}

/// Decode GGA (Global Positioning System Fix Data).
///
/// Truncated or overlong sentences are rejected as a whole.
pub fn decode_gga(fields: &[&str]) -> Option<GgaUpdate> {
    if fields.len() != GGA_FIELD_COUNT {
        return None;
    }

    Some(GgaUpdate {
        latitude: coord::latitude(fields[2], fields[3]),
        longitude: coord::longitude(fields[4], fields[5]),
        satellites: parse_u32_or_zero(fields[7]),
        altitude: parse_f64_or_zero(fields[9]),
    })
}

/// Decode RMC (Recommended Minimum Specific GNSS Data).
///
/// Missing fields read as empty and therefore as 0.
pub fn decode_rmc(fields: &[&str]) -> RmcUpdate {
    if field(fields, 2) != "A" {
        return RmcUpdate::Void;
    }

    let time = field(fields, 1);
    let date = field(fields, 9);

    RmcUpdate::Active {
        datetime: GpsDateTime {
            hour: slice_u8(time, 0),
            minute: slice_u8(time, 2),
            second: slice_u8(time, 4),
            day: slice_u8(date, 0),
            month: slice_u8(date, 2),
            year: slice_u8(date, 4),
        },
        speed_over_ground: parse_f64_or_zero(field(fields, 7)) * KNOTS_TO_MPS,
        course_over_ground: parse_f64_or_zero(field(fields, 8)),
    }
}

/// Decode GSA (DOP and active satellites); only the fix mode is kept.
pub fn decode_gsa(fields: &[&str]) -> FixType {
    FixType::from_code(parse_u32_or_zero(field(fields, 2)))
}

fn field<'a>(fields: &[&'a str], index: usize) -> &'a str {
    fields.get(index).copied().unwrap_or("")
}

/// Two-character fixed-width slice starting at `start`, parsed as an integer
fn slice_u8(s: &str, start: usize) -> u8 {
    s.get(start..start + 2)
        .and_then(|part| part.parse::<u8>().ok())
        .unwrap_or(0)
}

fn parse_u32_or_zero(s: &str) -> u32 {
    s.trim().parse::<u32>().unwrap_or(0)
}
