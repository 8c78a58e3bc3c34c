// src/gps/data.rs
//! Location, time and fix state maintained from decoded sentences

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::format::format_fixed;

/// Qualitative GPS lock state.
///
/// Discriminants match the NMEA GSA fix-mode code (1 = no fix, 2 = 2D,
/// 3 = 3D), with 0 reserved for a receiver that reported nothing usable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum FixType {
    Offline = 0,
    #[default]
    None = 1,
    Fix2D = 2,
    Fix3D = 3,
}

impl FixType {
    /// Map a GSA fix-mode code onto a fix type; unknown codes are `Offline`
    pub fn from_code(code: u32) -> Self {
        match code {
            1 => FixType::None,
            2 => FixType::Fix2D,
            3 => FixType::Fix3D,
            _ => FixType::Offline,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            FixType::Offline => "Offline",
            FixType::None => "No fix",
            FixType::Fix2D => "2D fix",
            FixType::Fix3D => "3D fix",
        }
    }
}

/// UTC date and time as reported by RMC. The year is two digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GpsDateTime {
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    pub day: u8,
    pub month: u8,
    pub year: u8,
}

impl GpsDateTime {
    /// Convert to a calendar date/time, assuming the 21st century.
    ///
    /// Returns `None` for the zeroed (stale) record or any out-of-range field.
    pub fn to_naive(&self) -> Option<NaiveDateTime> {
        NaiveDate::from_ymd_opt(
            2000 + i32::from(self.year),
            u32::from(self.month),
            u32::from(self.day),
        )?
        .and_hms_opt(
            u32::from(self.hour),
            u32::from(self.minute),
            u32::from(self.second),
        )
    }
}

/// The live location record.
///
/// Only the ingestion path mutates a `LocationFix`; everyone else reads
/// copies through [`crate::tracker::FixReader`].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LocationFix {
    pub(crate) datetime: GpsDateTime,
    pub(crate) latitude: f64,
    pub(crate) longitude: f64,
    pub(crate) altitude: f64,
    pub(crate) speed_over_ground: f64, // m/s
    pub(crate) course_over_ground: f64, // degrees
    pub(crate) fix_type: FixType,
    pub(crate) satellites: u32,
    pub(crate) valid_message_count: u64,
}

impl LocationFix {
    pub fn new() -> Self {
        Self::default()
    }

    /// Latitude in signed decimal degrees
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude in signed decimal degrees
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Altitude in meters
    pub fn altitude(&self) -> f64 {
        self.altitude
    }

    /// Ground speed in meters per second
    pub fn speed_over_ground(&self) -> f64 {
        self.speed_over_ground
    }

    /// Course over ground in degrees
    pub fn course_over_ground(&self) -> f64 {
        self.course_over_ground
    }

    pub fn satellites(&self) -> u32 {
        self.satellites
    }

    pub fn fix_type(&self) -> FixType {
        self.fix_type
    }

    /// Check if the receiver reports a 2D or 3D fix
    pub fn has_fix(&self) -> bool {
        self.fix_type > FixType::None
    }

    pub fn datetime(&self) -> GpsDateTime {
        self.datetime
    }

    pub fn hour(&self) -> u8 {
        self.datetime.hour
    }

    pub fn minute(&self) -> u8 {
        self.datetime.minute
    }

    pub fn second(&self) -> u8 {
        self.datetime.second
    }

    pub fn day(&self) -> u8 {
        self.datetime.day
    }

    pub fn month(&self) -> u8 {
        self.datetime.month
    }

    /// Two-digit year
    pub fn year(&self) -> u8 {
        self.datetime.year
    }

    /// Number of successfully decoded counted sentences
    pub fn valid_message_count(&self) -> u64 {
        self.valid_message_count
    }

    /// Format a coordinate with the truncating fixed-precision formatter
    pub fn format_coordinate(value: f64, precision: usize) -> String {
        format_fixed(value, precision)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let fix = LocationFix::new();
        assert_eq!(fix.latitude(), 0.0);
        assert_eq!(fix.longitude(), 0.0);
        assert_eq!(fix.altitude(), 0.0);
        assert_eq!(fix.satellites(), 0);
        assert_eq!(fix.fix_type(), FixType::None);
        assert_eq!(fix.valid_message_count(), 0);
        assert_eq!(fix.datetime(), GpsDateTime::default());
        assert!(!fix.has_fix());
    }

    #[test]
    fn test_has_fix_ordering() {
        let mut fix = LocationFix::new();
        fix.fix_type = FixType::Offline;
        assert!(!fix.has_fix());
        fix.fix_type = FixType::Fix2D;
        assert!(fix.has_fix());
        fix.fix_type = FixType::Fix3D;
        assert!(fix.has_fix());
    }

    #[test]
    fn test_fix_type_from_code() {
        assert_eq!(FixType::from_code(0), FixType::Offline);
        assert_eq!(FixType::from_code(1), FixType::None);
        assert_eq!(FixType::from_code(2), FixType::Fix2D);
        assert_eq!(FixType::from_code(3), FixType::Fix3D);
        assert_eq!(FixType::from_code(9), FixType::Offline);
    }

    #[test]
    fn test_datetime_to_naive() {
        let dt = GpsDateTime {
            hour: 12,
            minute: 35,
            second: 19,
            day: 23,
            month: 3,
            year: 94,
        };
        let naive = dt.to_naive().unwrap();
        assert_eq!(naive.to_string(), "2094-03-23 12:35:19");

        assert!(GpsDateTime::default().to_naive().is_none());
    }

    #[test]
    fn test_format_coordinate_truncates() {
        assert_eq!(LocationFix::format_coordinate(48.117_299, 4), "48.1172");
        assert_eq!(LocationFix::format_coordinate(-11.516_666, 2), "-11.51");
    }
}
