pub mod config;
pub mod logging;
pub mod routes;
pub mod state;
pub mod stream;
pub mod wire;

#[cfg(all(feature = "ort-backend", not(feature = "burn-backend")))]
pub type ModelBackend = classifier::backend::ort::OrtBackend;

#[cfg(feature = "burn-backend")]
pub type ModelBackend = classifier::backend::burn::BurnBackend;

#[cfg(not(any(feature = "ort-backend", feature = "burn-backend")))]
compile_error!("At least one backend feature must be enabled: 'ort-backend' or 'burn-backend'");
