use crate::nmea;
use std::io::{BufRead, BufReader};
use std::time::Duration;
use thiserror::Error;

/// Coordinates in floating-point degrees. Negative latitude is south,
/// negative longitude is west.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    pub fn maps_link(&self) -> String {
        format!(
            "https://maps.google.com/?q={:.6},{:.6}",
            self.latitude, self.longitude
        )
    }
}

#[derive(Error, Debug)]
pub enum GpsError {
    #[error("failed to open GPS serial port {port}: {source}")]
    Open {
        port: String,
        source: serialport::Error,
    },
    #[error("GPS read failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("no GPS fix within the read window")]
    NoFix,
}

/// Source of GPS fixes. Implemented by the serial receiver and by test
/// fakes.
pub trait FixSource: Send {
    fn read_fix(&mut self) -> Result<Location, GpsError>;
}

/// Serial-connected NMEA receiver.
///
/// One read attempt scans a bounded number of sentences for a valid fix;
/// anything less yields an error so the caller can substitute the
/// fallback location.
pub struct GpsReceiver {
    port: String,
    baud_rate: u32,
    read_timeout: Duration,
    max_sentences: usize,
}

impl GpsReceiver {
    pub fn new(port: String, baud_rate: u32, read_timeout_ms: u64) -> Self {
        Self {
            port,
            baud_rate,
            read_timeout: Duration::from_millis(read_timeout_ms),
            max_sentences: 50,
        }
    }
}

impl FixSource for GpsReceiver {
    fn read_fix(&mut self) -> Result<Location, GpsError> {
        let port = serialport::new(self.port.as_str(), self.baud_rate)
            .timeout(self.read_timeout)
            .open()
            .map_err(|source| GpsError::Open {
                port: self.port.clone(),
                source,
            })?;

        let mut reader = BufReader::new(port);
        let mut line = String::new();

        for _ in 0..self.max_sentences {
            line.clear();
            if reader.read_line(&mut line)? == 0 {
                break;
            }

            if let Some(location) = nmea::parse_sentence(&line) {
                tracing::debug!(
                    latitude = location.latitude,
                    longitude = location.longitude,
                    "GPS fix acquired"
                );
                return Ok(location);
            }
        }

        Err(GpsError::NoFix)
    }
}
