use crate::config::CaptureConfig;
use anyhow::{Context, Result, anyhow};
use common::retry::retry_with_backoff;
use v4l::{Device, FourCC, video::Capture};

const FOURCC_YUYV: FourCC = FourCC { repr: *b"YUYV" };
const FOURCC_MJPG: FourCC = FourCC { repr: *b"MJPG" };

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    Yuyv,
    Mjpeg,
}

fn find_usable_camera() -> Option<u32> {
    v4l::context::enum_devices()
        .into_iter()
        .find(|dev| {
            Device::with_path(dev.path())
                .and_then(|d| d.query_caps())
                .map(|caps| {
                    caps.capabilities
                        .contains(v4l::capability::Flags::VIDEO_CAPTURE)
                })
                .unwrap_or(false)
        })
        .map(|dev| dev.index() as u32)
}

fn open_device(index: u32) -> Result<Device> {
    if let Ok(dev) = Device::new(index as usize)
        && dev.query_caps().is_ok()
    {
        return Ok(dev);
    }

    tracing::debug!(
        "Camera index {} busy or missing, scanning alternatives...",
        index
    );

    let best_idx = find_usable_camera().ok_or_else(|| anyhow!("No usable video devices found"))?;
    Device::new(best_idx as usize).context("Failed to open fallback camera device")
}

/// Select best pixel format: prefer YUYV (faster decode), fallback to MJPEG
fn select_format(device: &Device) -> Result<PixelFormat> {
    let formats = device.enum_formats()?;

    tracing::debug!("Available formats:");
    for fmt in &formats {
        tracing::debug!("  {:?}: {}", fmt.fourcc, fmt.description);
    }

    if formats.iter().any(|f| f.fourcc == FOURCC_YUYV) {
        return Ok(PixelFormat::Yuyv);
    }

    if formats.iter().any(|f| f.fourcc == FOURCC_MJPG) {
        return Ok(PixelFormat::Mjpeg);
    }

    Err(anyhow!(
        "Camera supports neither YUYV nor MJPEG - available: {:?}",
        formats.iter().map(|f| f.fourcc).collect::<Vec<_>>()
    ))
}

pub struct CameraDevice {
    pub device: Device,
    pub width: u32,
    pub height: u32,
    pub pixel_format: PixelFormat,
}

impl CameraDevice {
    pub fn open(config: &CaptureConfig) -> Result<Self> {
        let device = retry_with_backoff(|| open_device(config.device_id), 10, 200, "Camera init")?;

        let caps = device.query_caps()?;
        tracing::info!("Camera opened: {} ({})", caps.card, caps.driver);

        let pixel_format = select_format(&device)?;
        let fourcc = match pixel_format {
            PixelFormat::Yuyv => FOURCC_YUYV,
            PixelFormat::Mjpeg => FOURCC_MJPG,
        };

        let mut format = device.format()?;
        format.fourcc = fourcc;
        let format = device.set_format(&format)?;

        tracing::info!(
            "Capture format: {}x{} {:?} ({:?})",
            format.width,
            format.height,
            format.fourcc,
            pixel_format
        );

        Ok(Self {
            device,
            width: format.width,
            height: format.height,
            pixel_format,
        })
    }
}
