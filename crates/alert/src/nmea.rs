//! Minimal NMEA 0183 sentence parsing: just enough to pull a position out
//! of the GGA and RMC sentences every consumer receiver emits.

use crate::location::Location;

/// Parse one NMEA sentence. Returns a location only for GGA sentences with
/// a fix and RMC sentences with active status.
pub fn parse_sentence(line: &str) -> Option<Location> {
    let body = line.trim().strip_prefix('$')?;
    // Drop the checksum; receivers worth trusting repeat fixes every second
    let body = body.split('*').next()?;
    let fields: Vec<&str> = body.split(',').collect();
    let sentence_type = fields.first()?;

    if sentence_type.ends_with("GGA") {
        // Field 6 is fix quality; 0 means no fix
        let quality: u32 = fields.get(6)?.parse().ok()?;
        if quality == 0 {
            return None;
        }
        let latitude = parse_coordinate(fields.get(2)?, fields.get(3)?, 2)?;
        let longitude = parse_coordinate(fields.get(4)?, fields.get(5)?, 3)?;
        Some(Location {
            latitude,
            longitude,
        })
    } else if sentence_type.ends_with("RMC") {
        // Field 2 is status; anything but "A" is a void fix
        if *fields.get(2)? != "A" {
            return None;
        }
        let latitude = parse_coordinate(fields.get(3)?, fields.get(4)?, 2)?;
        let longitude = parse_coordinate(fields.get(5)?, fields.get(6)?, 3)?;
        Some(Location {
            latitude,
            longitude,
        })
    } else {
        None
    }
}

/// NMEA encodes coordinates as (d)ddmm.mmmm; latitude carries two degree
/// digits, longitude three.
fn parse_coordinate(value: &str, hemisphere: &str, degree_digits: usize) -> Option<f64> {
    if value.len() <= degree_digits {
        return None;
    }

    // Serial lines can carry arbitrary bytes; never slice mid-character
    let (degrees, minutes) = value.split_at_checked(degree_digits)?;
    let degrees: f64 = degrees.parse().ok()?;
    let minutes: f64 = minutes.parse().ok()?;
    let coordinate = degrees + minutes / 60.0;

    match hemisphere {
        "N" | "E" => Some(coordinate),
        "S" | "W" => Some(-coordinate),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_gga_with_fix() {
        let line = "$GPGGA,123519,4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,*47";
        let location = parse_sentence(line).unwrap();
        assert!((location.latitude - 48.1173).abs() < 1e-4);
        assert!((location.longitude - 11.5167).abs() < 1e-4);
    }

    #[test]
    fn rejects_gga_without_fix() {
        let line = "$GPGGA,123519,4807.038,N,01131.000,E,0,00,,,M,,M,,*66";
        assert!(parse_sentence(line).is_none());
    }

    #[test]
    fn parses_rmc_with_active_status() {
        let line = "$GPRMC,123519,A,4807.038,N,01131.000,E,022.4,084.4,230394,003.1,W*6A";
        let location = parse_sentence(line).unwrap();
        assert!((location.latitude - 48.1173).abs() < 1e-4);
    }

    #[test]
    fn rejects_rmc_with_void_status() {
        let line = "$GPRMC,123519,V,4807.038,N,01131.000,E,022.4,084.4,230394,003.1,W*7D";
        assert!(parse_sentence(line).is_none());
    }

    #[test]
    fn southern_and_western_hemispheres_are_negative() {
        let line = "$GPGGA,123519,3352.120,S,15112.500,W,1,08,0.9,10.0,M,,M,,*50";
        let location = parse_sentence(line).unwrap();
        assert!(location.latitude < 0.0);
        assert!(location.longitude < 0.0);
    }

    #[test]
    fn rejects_multibyte_garbage_in_coordinate_fields() {
        // A corrupted serial line can be valid UTF-8 with multi-byte
        // characters landing mid-field; parsing must reject it, not panic
        let line = "$GPGGA,123519,€807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,*47";
        assert!(parse_sentence(line).is_none());

        let line = "$GPRMC,123519,A,4807.038,N,€1131.000,E,022.4,084.4,230394,003.1,W*6A";
        assert!(parse_sentence(line).is_none());
    }

    #[test]
    fn ignores_unrelated_sentences_and_garbage() {
        assert!(parse_sentence("$GPGSV,3,1,11,03,03,111,00*74").is_none());
        assert!(parse_sentence("not an nmea sentence").is_none());
        assert!(parse_sentence("").is_none());
    }
}
