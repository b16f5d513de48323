use thiserror::Error;

#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("JPEG decode failed: {0}")]
    Jpeg(#[from] turbojpeg::Error),
    #[error("frame truncated: expected at least {expected} bytes, got {actual}")]
    Truncated { expected: usize, actual: usize },
}

/// Trait for decoding raw camera frames to RGB.
pub trait FrameDecoder: Send {
    /// Decode raw frame data to RGB (3 bytes per pixel).
    /// Returns a reference to the decoder's internal buffer.
    fn decode(&mut self, raw: &[u8], width: u32, height: u32) -> Result<&[u8], DecodeError>;
}

/// BT.601 YUV to RGB, fixed point with an 8-bit fraction.
#[inline]
fn bt601_to_rgb(y: i32, u: i32, v: i32) -> [u8; 3] {
    let r = y + ((359 * v) >> 8);
    let g = y - ((88 * u + 183 * v) >> 8);
    let b = y + ((454 * u) >> 8);
    [
        r.clamp(0, 255) as u8,
        g.clamp(0, 255) as u8,
        b.clamp(0, 255) as u8,
    ]
}

/// YUYV (YUV 4:2:2) decoder.
///
/// YUYV packs 2 pixels in 4 bytes: [Y0, U, Y1, V]
pub struct YuyvDecoder {
    rgb_buffer: Vec<u8>,
}

impl Default for YuyvDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl YuyvDecoder {
    pub fn new() -> Self {
        Self {
            rgb_buffer: Vec::new(),
        }
    }
}

impl FrameDecoder for YuyvDecoder {
    fn decode(&mut self, raw: &[u8], width: u32, height: u32) -> Result<&[u8], DecodeError> {
        let expected = (width * height * 2) as usize;
        if raw.len() < expected {
            return Err(DecodeError::Truncated {
                expected,
                actual: raw.len(),
            });
        }

        let rgb_size = (width * height * 3) as usize;
        if self.rgb_buffer.len() < rgb_size {
            self.rgb_buffer.resize(rgb_size, 0);
        }

        // Some drivers pad rows; step by the actual stride, consume the
        // visible width.
        let row_bytes = (width * 2) as usize;
        let stride = raw.len() / height as usize;

        let mut out = 0;
        for row in 0..height as usize {
            let row_data = &raw[row * stride..row * stride + row_bytes];

            for quad in row_data.chunks_exact(4) {
                let y0 = quad[0] as i32;
                let u = quad[1] as i32 - 128;
                let y1 = quad[2] as i32;
                let v = quad[3] as i32 - 128;

                self.rgb_buffer[out..out + 3].copy_from_slice(&bt601_to_rgb(y0, u, v));
                self.rgb_buffer[out + 3..out + 6].copy_from_slice(&bt601_to_rgb(y1, u, v));
                out += 6;
            }
        }

        Ok(&self.rgb_buffer[..rgb_size])
    }
}

/// MJPEG decoder using turbojpeg (libjpeg-turbo)
pub struct MjpegDecoder {
    decompressor: turbojpeg::Decompressor,
    rgb_buffer: Vec<u8>,
}

impl MjpegDecoder {
    pub fn new() -> Result<Self, DecodeError> {
        Ok(Self {
            decompressor: turbojpeg::Decompressor::new()?,
            rgb_buffer: Vec::new(),
        })
    }
}

impl FrameDecoder for MjpegDecoder {
    fn decode(&mut self, raw: &[u8], _width: u32, _height: u32) -> Result<&[u8], DecodeError> {
        let header = self.decompressor.read_header(raw)?;
        let width = header.width;
        let height = header.height;
        let rgb_size = width * height * 3;

        if self.rgb_buffer.len() < rgb_size {
            self.rgb_buffer.resize(rgb_size, 0);
        }

        let output = turbojpeg::Image {
            pixels: &mut self.rgb_buffer[..rgb_size],
            width,
            pitch: width * 3,
            height,
            format: turbojpeg::PixelFormat::RGB,
        };

        self.decompressor.decompress(raw, output)?;

        Ok(&self.rgb_buffer[..rgb_size])
    }
}
