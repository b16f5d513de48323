pub mod config;
pub mod decoder;
pub mod device;
pub mod frame;
pub mod pacing;
pub mod source;
pub mod webcam;

pub use config::CaptureConfig;
pub use decoder::{DecodeError, FrameDecoder, MjpegDecoder, YuyvDecoder};
pub use device::{CameraDevice, PixelFormat};
pub use frame::Frame;
pub use source::{FrameSource, V4lSource};
pub use webcam::Webcam;
