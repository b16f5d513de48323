use crate::audio::AudioPlayer;
use crate::config::AlertConfig;
use crate::location::{FixSource, GpsReceiver, Location};
use crate::notifier::{AlertNotifier, HttpTransport};
use anyhow::Result;

/// One positive detection worth alerting on.
#[derive(Debug, Clone)]
pub struct AlertEvent {
    pub label: String,
    pub confidence: f32,
}

/// Runs the full alert side-effect chain for a danger event:
/// audio cue, GPS read (with fallback), outbound notification.
pub struct AlertDispatcher {
    audio: AudioPlayer,
    gps: Box<dyn FixSource>,
    notifier: Option<AlertNotifier>,
    fallback: Location,
}

impl AlertDispatcher {
    pub fn new(
        audio: AudioPlayer,
        gps: Box<dyn FixSource>,
        notifier: Option<AlertNotifier>,
        fallback: Location,
    ) -> Self {
        Self {
            audio,
            gps,
            notifier,
            fallback,
        }
    }

    pub fn from_config(config: &AlertConfig) -> Result<Self> {
        let audio = AudioPlayer::new(config.audio_clips.clone());

        let gps = Box::new(GpsReceiver::new(
            config.gps_port.clone(),
            config.gps_baud_rate,
            config.gps_read_timeout_ms,
        ));

        let notifier = match &config.webhook_url {
            Some(url) => Some(AlertNotifier::new(
                Box::new(HttpTransport::new(url.clone())?),
                config.device_id.clone(),
            )),
            None => None,
        };

        Ok(Self::new(audio, gps, notifier, config.fallback_location))
    }

    /// Dispatch one alert. Returns the location embedded in the outbound
    /// message; degraded effects (no GPS, failed send) never fail the
    /// dispatch itself.
    pub fn dispatch(&mut self, event: &AlertEvent) -> Location {
        tracing::warn!(
            label = %event.label,
            confidence = event.confidence,
            "Danger detected, dispatching alert"
        );

        self.audio.play_all();

        let location = match self.gps.read_fix() {
            Ok(location) => location,
            Err(e) => {
                tracing::warn!(error = %e, "GPS unavailable, using fallback location");
                self.fallback
            }
        };

        match &self.notifier {
            Some(notifier) => {
                if let Err(e) = notifier.notify(&event.label, event.confidence, location) {
                    tracing::error!(error = %e, "Alert notification failed");
                }
            }
            None => {
                tracing::info!("No alert endpoint configured, skipping notification");
            }
        }

        location
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::GpsError;
    use crate::notifier::{AlertNotification, Transport};
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    const FALLBACK: Location = Location {
        latitude: 17.5207,
        longitude: 78.3680,
    };

    struct DeadGps;

    impl FixSource for DeadGps {
        fn read_fix(&mut self) -> Result<Location, GpsError> {
            Err(GpsError::NoFix)
        }
    }

    struct LiveGps(Location);

    impl FixSource for LiveGps {
        fn read_fix(&mut self) -> Result<Location, GpsError> {
            Ok(self.0)
        }
    }

    struct CountingTransport {
        sends: Arc<AtomicUsize>,
    }

    impl Transport for CountingTransport {
        fn send(&self, _notification: &AlertNotification) -> anyhow::Result<()> {
            self.sends.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    fn event() -> AlertEvent {
        AlertEvent {
            label: "Fire/Smoke".to_string(),
            confidence: 0.9,
        }
    }

    #[test]
    fn gps_failure_degrades_to_fallback_location() {
        let mut dispatcher = AlertDispatcher::new(
            AudioPlayer::new(Vec::new()),
            Box::new(DeadGps),
            None,
            FALLBACK,
        );

        let location = dispatcher.dispatch(&event());
        assert_eq!(location, FALLBACK);
    }

    #[test]
    fn live_fix_is_used_when_available() {
        let fix = Location {
            latitude: 48.1173,
            longitude: 11.5167,
        };
        let mut dispatcher = AlertDispatcher::new(
            AudioPlayer::new(Vec::new()),
            Box::new(LiveGps(fix)),
            None,
            FALLBACK,
        );

        assert_eq!(dispatcher.dispatch(&event()), fix);
    }

    #[test]
    fn one_dispatch_sends_one_notification() {
        let sends = Arc::new(AtomicUsize::new(0));
        let notifier = AlertNotifier::new(
            Box::new(CountingTransport {
                sends: sends.clone(),
            }),
            "test-device".to_string(),
        );

        let mut dispatcher = AlertDispatcher::new(
            AudioPlayer::new(Vec::new()),
            Box::new(DeadGps),
            Some(notifier),
            FALLBACK,
        );

        dispatcher.dispatch(&event());
        assert_eq!(sends.load(Ordering::SeqCst), 1);

        dispatcher.dispatch(&event());
        assert_eq!(sends.load(Ordering::SeqCst), 2);
    }
}
