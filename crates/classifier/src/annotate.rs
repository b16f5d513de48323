use image::{Rgb, RgbImage};

const BORDER_PX: u32 = 8;

pub const DANGER_COLOR: Rgb<u8> = Rgb([220, 38, 38]);
pub const NORMAL_COLOR: Rgb<u8> = Rgb([22, 163, 74]);

/// Burn a status border into the frame: red for danger, green for normal.
/// Frame dimensions are preserved.
pub fn annotate_frame(frame: &mut RgbImage, danger: bool) {
    let color = if danger { DANGER_COLOR } else { NORMAL_COLOR };
    let (width, height) = frame.dimensions();
    let border = BORDER_PX.min(width / 2).min(height / 2);

    for y in 0..height {
        for x in 0..width {
            if x < border || y < border || x >= width - border || y >= height - border {
                frame.put_pixel(x, y, color);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::ImageBuffer;

    #[test]
    fn preserves_dimensions() {
        let mut frame: RgbImage = ImageBuffer::new(64, 48);
        annotate_frame(&mut frame, true);
        assert_eq!(frame.dimensions(), (64, 48));
    }

    #[test]
    fn danger_paints_red_border_and_leaves_center() {
        let mut frame: RgbImage = ImageBuffer::new(64, 48);
        annotate_frame(&mut frame, true);
        assert_eq!(*frame.get_pixel(0, 0), DANGER_COLOR);
        assert_eq!(*frame.get_pixel(32, 24), Rgb([0, 0, 0]));
    }

    #[test]
    fn normal_paints_green_border() {
        let mut frame: RgbImage = ImageBuffer::new(32, 32);
        annotate_frame(&mut frame, false);
        assert_eq!(*frame.get_pixel(31, 31), NORMAL_COLOR);
    }
}
