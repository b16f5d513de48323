pub mod audio;
pub mod config;
pub mod dispatcher;
pub mod location;
pub mod nmea;
pub mod notifier;

pub use audio::AudioPlayer;
pub use config::AlertConfig;
pub use dispatcher::{AlertDispatcher, AlertEvent};
pub use location::{FixSource, GpsError, GpsReceiver, Location};
pub use notifier::{AlertNotification, AlertNotifier, HttpTransport, Transport};
