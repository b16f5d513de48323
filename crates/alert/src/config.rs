use crate::location::Location;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct AlertConfig {
    pub gps_port: String,
    pub gps_baud_rate: u32,
    pub gps_read_timeout_ms: u64,
    /// Substituted whenever the GPS read fails.
    pub fallback_location: Location,
    /// Endpoint receiving alert notifications. None disables the outbound
    /// message entirely.
    pub webhook_url: Option<String>,
    pub device_id: String,
    /// Clips played back to back on a danger event, colon separated in
    /// the environment.
    pub audio_clips: Vec<PathBuf>,
}

impl AlertConfig {
    /// Load configuration from environment variables with sensible defaults
    pub fn from_env() -> anyhow::Result<Self> {
        let gps_port = env::var("GPS_PORT").unwrap_or_else(|_| "/dev/ttyUSB0".to_string());

        let gps_baud_rate = env::var("GPS_BAUD_RATE")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(9600);

        let gps_read_timeout_ms = env::var("GPS_READ_TIMEOUT_MS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(2000);

        let fallback_latitude = env::var("ALERT_FALLBACK_LAT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(17.5207);

        let fallback_longitude = env::var("ALERT_FALLBACK_LON")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(78.3680);

        let webhook_url = env::var("ALERT_WEBHOOK_URL").ok().filter(|s| !s.is_empty());

        let device_id = env::var("ALERT_DEVICE_ID").unwrap_or_else(|_| "firewatch-0".to_string());

        let audio_clips = env::var("ALERT_AUDIO_CLIPS")
            .unwrap_or_else(|_| {
                "assets/fire_alert.mp3:assets/emergency_exit_instructions.mp3".to_string()
            })
            .split(':')
            .filter(|s| !s.is_empty())
            .map(PathBuf::from)
            .collect();

        Ok(Self {
            gps_port,
            gps_baud_rate,
            gps_read_timeout_ms,
            fallback_location: Location {
                latitude: fallback_latitude,
                longitude: fallback_longitude,
            },
            webhook_url,
            device_id,
            audio_clips,
        })
    }
}
