use anyhow::Result;
use image::{ImageBuffer, RgbImage, imageops};
use ndarray::{Array, IxDyn};

/// Convert raw RGB pixels into the NCHW float input the classifier expects.
///
/// The frame is resized to `target` x `target` and scaled to [0, 1].
pub fn rgb_to_input(
    pixels: &[u8],
    width: u32,
    height: u32,
    target: u32,
) -> Result<Array<f32, IxDyn>> {
    let expected = (width * height * 3) as usize;
    if pixels.len() != expected {
        anyhow::bail!(
            "Buffer size mismatch: expected {} bytes for {}x{} RGB, got {} bytes",
            expected,
            width,
            height,
            pixels.len()
        );
    }

    let img: RgbImage = ImageBuffer::from_raw(width, height, pixels.to_vec())
        .ok_or_else(|| anyhow::anyhow!("Failed to create image buffer"))?;

    let resized = imageops::resize(&img, target, target, imageops::FilterType::Triangle);

    let mut input = Array::zeros(IxDyn(&[1, 3, target as usize, target as usize]));
    for y in 0..target {
        for x in 0..target {
            let pixel = resized.get_pixel(x, y);
            input[[0, 0, y as usize, x as usize]] = pixel[0] as f32 / 255.0;
            input[[0, 1, y as usize, x as usize]] = pixel[1] as f32 / 255.0;
            input[[0, 2, y as usize, x as usize]] = pixel[2] as f32 / 255.0;
        }
    }

    Ok(input)
}
