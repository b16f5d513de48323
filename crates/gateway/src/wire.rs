use crate::state::FramePacket;
use anyhow::Result;
use image::RgbImage;
use std::io::Cursor;

/// Binary WebSocket framing: u32 LE JSON length, JSON metadata, JPEG bytes.
pub fn encode_packet(packet: &FramePacket) -> Result<Vec<u8>> {
    let json = serde_json::to_vec(&packet.metadata)?;

    let mut message = Vec::with_capacity(4 + json.len() + packet.jpeg_data.len());
    message.extend_from_slice(&(json.len() as u32).to_le_bytes());
    message.extend_from_slice(&json);
    message.extend_from_slice(&packet.jpeg_data);

    Ok(message)
}

pub fn rgb_to_jpeg(img: &RgbImage) -> Result<Vec<u8>> {
    let mut jpeg_bytes = Cursor::new(Vec::new());
    img.write_to(&mut jpeg_bytes, image::ImageFormat::Jpeg)?;
    Ok(jpeg_bytes.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::FrameMessage;
    use image::ImageBuffer;

    fn packet() -> FramePacket {
        FramePacket {
            metadata: FrameMessage {
                frame_number: 3,
                width: 32,
                height: 24,
                label: "Normal".to_string(),
                confidence: 0.87,
                status: "live".to_string(),
            },
            jpeg_data: vec![0xFF, 0xD8, 0xFF, 0xD9],
        }
    }

    #[test]
    fn framing_is_length_prefixed_json_then_jpeg() {
        let packet = packet();
        let message = encode_packet(&packet).unwrap();

        let json_len = u32::from_le_bytes(message[..4].try_into().unwrap()) as usize;
        let metadata: FrameMessage =
            serde_json::from_slice(&message[4..4 + json_len]).unwrap();

        assert_eq!(metadata.frame_number, 3);
        assert_eq!(metadata.label, "Normal");
        assert_eq!(&message[4 + json_len..], packet.jpeg_data.as_slice());
    }

    #[test]
    fn jpeg_encoding_emits_a_jpeg_stream() {
        let img: RgbImage = ImageBuffer::from_pixel(16, 16, image::Rgb([10, 200, 10]));
        let jpeg = rgb_to_jpeg(&img).unwrap();

        assert!(!jpeg.is_empty());
        assert_eq!(&jpeg[..2], &[0xFF, 0xD8]);
    }
}
