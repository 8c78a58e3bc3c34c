// src/gps/coord.rs
//! Degrees-minutes (DMM) to decimal degree conversion

/// Leading degree digits in an NMEA latitude field (`DDMM.mmmm`)
pub const LATITUDE_DEGREE_DIGITS: usize = 2;

/// Leading degree digits in an NMEA longitude field (`DDDMM.mmmm`)
pub const LONGITUDE_DEGREE_DIGITS: usize = 3;

/// Convert an NMEA degrees-minutes value and hemisphere letter into signed
/// decimal degrees.
///
/// `degree_digits` is the number of leading characters holding whole degrees;
/// everything after them is minutes. Values shorter than 4 characters yield 0
/// regardless of hemisphere. A part that fails to parse contributes 0.
pub fn convert_coordinate(value: &str, hemisphere: &str, degree_digits: usize) -> f64 {
    if value.len() < 4 {
        return 0.0;
    }

    let degrees = value
        .get(..degree_digits)
        .map(parse_f64_or_zero)
        .unwrap_or(0.0);
    let minutes = value
        .get(degree_digits..)
        .map(parse_f64_or_zero)
        .unwrap_or(0.0);

    let decimal = degrees + minutes / 60.0;

    if hemisphere.eq_ignore_ascii_case("S") || hemisphere.eq_ignore_ascii_case("W") {
        -decimal
    } else {
        decimal
    }
}

/// Convert an NMEA latitude field (`DDMM.mmmm`, `N`/`S`)
pub fn latitude(value: &str, hemisphere: &str) -> f64 {
    convert_coordinate(value, hemisphere, LATITUDE_DEGREE_DIGITS)
}

/// Convert an NMEA longitude field (`DDDMM.mmmm`, `E`/`W`)
pub fn longitude(value: &str, hemisphere: &str) -> f64 {
    convert_coordinate(value, hemisphere, LONGITUDE_DEGREE_DIGITS)
}

/// Parse a float, mapping failures and non-finite values (`NaN`, `inf`) to 0
pub(crate) fn parse_f64_or_zero(s: &str) -> f64 {
    s.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_latitude_north() {
        let lat = latitude("4807.038", "N");
        assert!(approx(lat, 48.0 + 7.038 / 60.0));
    }

    #[test]
    fn test_longitude_west_is_negative() {
        let lon = longitude("01131.000", "W");
        assert!(approx(lon, -(11.0 + 31.0 / 60.0)));
    }

    #[test]
    fn test_hemisphere_case_insensitive() {
        assert!(latitude("4916.45", "s") < 0.0);
        assert!(longitude("12311.12", "w") < 0.0);
        assert!(latitude("4916.45", "n") > 0.0);
    }

    #[test]
    fn test_short_value_is_zero() {
        for hemi in ["N", "S", "E", "W", ""] {
            assert_eq!(convert_coordinate("", hemi, 2), 0.0);
            assert_eq!(convert_coordinate("123", hemi, 2), 0.0);
            assert_eq!(convert_coordinate("12.", hemi, 3), 0.0);
        }
    }

    #[test]
    fn test_garbage_parts_clamp_to_zero() {
        // Degrees unparsable, minutes valid
        assert!(approx(convert_coordinate("xx30.0", "N", 2), 0.5));
        // Minutes unparsable
        assert!(approx(convert_coordinate("48abc", "N", 2), 48.0));
        // NaN text never leaks through
        assert_eq!(convert_coordinate("NaNNaN", "N", 3), 0.0);
    }

    #[test]
    fn test_parse_f64_or_zero() {
        assert_eq!(parse_f64_or_zero("545.4"), 545.4);
        assert_eq!(parse_f64_or_zero(""), 0.0);
        assert_eq!(parse_f64_or_zero("NaN"), 0.0);
        assert_eq!(parse_f64_or_zero("inf"), 0.0);
    }
}
