use anyhow::{Context, Result};
use v4l::{
    Device,
    buffer::Type,
    io::{mmap::Stream, traits::CaptureStream},
};

const BUFFER_COUNT: u32 = 4;

/// Source of raw camera frames. Implemented by the V4L2 stream and by
/// test fakes.
pub trait FrameSource {
    /// Next raw frame, or an error once the source has no more frames.
    fn next_frame(&mut self) -> Result<&[u8]>;
}

pub struct V4lSource<'a> {
    stream: Stream<'a>,
}

impl<'a> V4lSource<'a> {
    pub fn new(device: &'a Device) -> Result<Self> {
        let stream = Stream::with_buffers(device, Type::VideoCapture, BUFFER_COUNT)
            .context("Failed to create capture stream")?;
        Ok(Self { stream })
    }
}

impl FrameSource for V4lSource<'_> {
    fn next_frame(&mut self) -> Result<&[u8]> {
        self.stream
            .next()
            .map(|(data, _meta)| data)
            .context("Camera read failed")
    }
}
