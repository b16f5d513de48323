use std::env;

#[derive(Debug, Clone)]
pub struct CaptureConfig {
    pub device_id: u32,
    /// Fixed sleep between webcam reads.
    pub poll_interval_ms: u64,
}

impl CaptureConfig {
    /// Load configuration from environment variables with sensible defaults
    pub fn from_env() -> anyhow::Result<Self> {
        let device_id = env::var("DEVICE_ID")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(0);

        let poll_interval_ms = env::var("POLL_INTERVAL_MS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(100);

        Ok(Self {
            device_id,
            poll_interval_ms,
        })
    }
}
