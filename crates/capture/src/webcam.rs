use crate::config::CaptureConfig;
use crate::decoder::{FrameDecoder, MjpegDecoder, YuyvDecoder};
use crate::device::{CameraDevice, PixelFormat};
use crate::frame::Frame;
use crate::pacing::Pacing;
use crate::source::{FrameSource, V4lSource};
use anyhow::Result;
use std::ops::ControlFlow;

/// Blocking webcam capture loop.
///
/// Frames are read sequentially with a fixed sleep between iterations.
/// A device read failure terminates the loop with an error; the callback
/// can end it cleanly by returning `ControlFlow::Break`.
pub struct Webcam {
    device: CameraDevice,
    decoder: Box<dyn FrameDecoder>,
    pacing: Pacing,
}

impl Webcam {
    pub fn open(config: &CaptureConfig) -> Result<Self> {
        let device = CameraDevice::open(config)?;

        let decoder: Box<dyn FrameDecoder> = match device.pixel_format {
            PixelFormat::Yuyv => Box::new(YuyvDecoder::new()),
            PixelFormat::Mjpeg => Box::new(MjpegDecoder::new()?),
        };

        Ok(Self {
            device,
            decoder,
            pacing: Pacing::new(config.poll_interval_ms),
        })
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.device.width, self.device.height)
    }

    pub fn run<F>(&mut self, on_frame: F) -> Result<()>
    where
        F: FnMut(Frame) -> ControlFlow<()>,
    {
        let Self {
            device,
            decoder,
            pacing,
        } = self;

        let mut source = V4lSource::new(&device.device)?;

        tracing::info!("Webcam loop started");

        run_loop(
            &mut source,
            decoder.as_mut(),
            pacing,
            device.width,
            device.height,
            on_frame,
        )
    }
}

fn run_loop<S, F>(
    source: &mut S,
    decoder: &mut dyn FrameDecoder,
    pacing: &Pacing,
    width: u32,
    height: u32,
    mut on_frame: F,
) -> Result<()>
where
    S: FrameSource,
    F: FnMut(Frame) -> ControlFlow<()>,
{
    let mut frame_number = 0u64;

    loop {
        let raw = source.next_frame()?;

        let pixels = decoder.decode(raw, width, height)?;

        let frame = Frame {
            frame_number,
            width,
            height,
            pixels: pixels.to_vec(),
        };
        frame_number += 1;

        if frame_number % 30 == 0 {
            tracing::debug!(frame_number, "Webcam capture running");
        }

        if let ControlFlow::Break(()) = on_frame(frame) {
            tracing::info!("Webcam loop stopped by caller");
            return Ok(());
        }

        pacing.pause();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    /// Serves a fixed number of 2x1 YUYV frames, then reports exhaustion.
    struct ScriptedSource {
        frames: Vec<Vec<u8>>,
        served: usize,
    }

    impl ScriptedSource {
        fn with_frames(count: usize) -> Self {
            Self {
                frames: vec![vec![128u8, 128, 128, 128]; count],
                served: 0,
            }
        }
    }

    impl FrameSource for ScriptedSource {
        fn next_frame(&mut self) -> Result<&[u8]> {
            if self.served == self.frames.len() {
                return Err(anyhow!("no more frames"));
            }
            self.served += 1;
            Ok(&self.frames[self.served - 1])
        }
    }

    #[test]
    fn loop_terminates_with_error_when_source_is_exhausted() {
        let mut source = ScriptedSource::with_frames(2);
        let mut decoder = YuyvDecoder::new();
        let mut seen = Vec::new();

        let result = run_loop(
            &mut source,
            &mut decoder,
            &Pacing::new(0),
            2,
            1,
            |frame| {
                seen.push(frame.frame_number);
                ControlFlow::Continue(())
            },
        );

        assert!(result.is_err());
        assert_eq!(seen, vec![0, 1]);
    }

    #[test]
    fn callback_break_exits_cleanly() {
        let mut source = ScriptedSource::with_frames(5);
        let mut decoder = YuyvDecoder::new();
        let mut seen = 0;

        let result = run_loop(
            &mut source,
            &mut decoder,
            &Pacing::new(0),
            2,
            1,
            |_frame| {
                seen += 1;
                if seen == 3 {
                    ControlFlow::Break(())
                } else {
                    ControlFlow::Continue(())
                }
            },
        );

        assert!(result.is_ok());
        assert_eq!(seen, 3);
    }

    #[test]
    fn decode_failure_terminates_the_loop() {
        // One-byte frame cannot be a 2x1 YUYV image
        let mut source = ScriptedSource {
            frames: vec![vec![0u8]],
            served: 0,
        };
        let mut decoder = YuyvDecoder::new();

        let result = run_loop(
            &mut source,
            &mut decoder,
            &Pacing::new(0),
            2,
            1,
            |_frame| ControlFlow::Continue(()),
        );

        assert!(result.is_err());
    }
}
