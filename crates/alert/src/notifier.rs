use crate::location::Location;
use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;
use std::time::Duration;

#[derive(Debug, Serialize)]
pub struct AlertNotification {
    pub device_id: String,
    pub timestamp: String,
    pub label: String,
    pub confidence: f32,
    pub latitude: f64,
    pub longitude: f64,
    pub maps_link: String,
}

/// Outbound delivery of a serialized alert. Implemented by the HTTP
/// transport and by test fakes.
pub trait Transport: Send {
    fn send(&self, notification: &AlertNotification) -> Result<()>;
}

/// POSTs alerts as JSON to a configured webhook endpoint. Fire-and-forget:
/// no retry, no delivery confirmation.
pub struct HttpTransport {
    client: reqwest::blocking::Client,
    url: String,
}

impl HttpTransport {
    pub fn new(url: String) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { client, url })
    }
}

impl Transport for HttpTransport {
    fn send(&self, notification: &AlertNotification) -> Result<()> {
        let response = self
            .client
            .post(&self.url)
            .json(notification)
            .send()
            .context("Failed to send alert notification")?;

        if !response.status().is_success() {
            anyhow::bail!("alert endpoint returned {}", response.status());
        }

        Ok(())
    }
}

pub struct AlertNotifier {
    transport: Box<dyn Transport>,
    device_id: String,
}

impl AlertNotifier {
    pub fn new(transport: Box<dyn Transport>, device_id: String) -> Self {
        Self {
            transport,
            device_id,
        }
    }

    pub fn notify(&self, label: &str, confidence: f32, location: Location) -> Result<()> {
        let notification = AlertNotification {
            device_id: self.device_id.clone(),
            timestamp: Utc::now().to_rfc3339(),
            label: label.to_string(),
            confidence,
            latitude: location.latitude,
            longitude: location.longitude,
            maps_link: location.maps_link(),
        };

        self.transport.send(&notification)?;

        tracing::info!(
            latitude = location.latitude,
            longitude = location.longitude,
            "Location sent with alert"
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    struct RecordingTransport {
        sent: Arc<Mutex<Vec<(f64, f64)>>>,
    }

    impl Transport for RecordingTransport {
        fn send(&self, notification: &AlertNotification) -> Result<()> {
            self.sent
                .lock()
                .unwrap()
                .push((notification.latitude, notification.longitude));
            Ok(())
        }
    }

    #[test]
    fn notify_sends_exactly_one_message_with_coordinates() {
        let sent = Arc::new(Mutex::new(Vec::new()));
        let notifier = AlertNotifier::new(
            Box::new(RecordingTransport { sent: sent.clone() }),
            "test-device".to_string(),
        );

        let location = Location {
            latitude: 17.5207,
            longitude: 78.3680,
        };
        notifier.notify("Fire/Smoke", 0.92, location).unwrap();

        let sent = sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0], (17.5207, 78.3680));
    }
}
