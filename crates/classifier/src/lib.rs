pub mod annotate;
pub mod backend;
pub mod detector;
pub mod metadata;
pub mod postprocess;
pub mod preprocess;

#[cfg(feature = "burn-backend")]
pub mod model;

// Re-export commonly used types for convenience
pub use backend::{ClassifierBackend, ClassifierOutput};
pub use detector::{Detection, DetectionResult, Detector, DetectorConfig, Label};
pub use metadata::ModelMetadata;
