/// A decoded RGB frame (3 bytes per pixel, row major).
#[derive(Debug, Clone)]
pub struct Frame {
    pub frame_number: u64,
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}
