//! JPEG frame encoding
//!
//! Pure transformation from raw frames to transport-ready JPEG bytes. Safe
//! to call concurrently from any number of streaming tasks.

use bytes::Bytes;
use image::codecs::jpeg::JpegEncoder;
use image::{ImageBuffer, RgbImage};

use crate::capture::{Frame, PixelFormat};
use crate::error::EncodeError;

/// JPEG start-of-image marker
const JPEG_SOI: [u8; 2] = [0xFF, 0xD8];

/// Encode a frame as JPEG at the given quality (clamped to 1..=100)
///
/// RGB frames go through the JPEG encoder; MJPEG frames pass through after
/// a start-of-image check, since re-encoding an already compressed frame
/// would only cost quality.
pub fn encode_frame(frame: &Frame, quality: u8) -> Result<Bytes, EncodeError> {
    match frame.format {
        PixelFormat::Rgb24 => encode_rgb(frame, quality.clamp(1, 100)),
        PixelFormat::Mjpeg => passthrough_jpeg(frame),
    }
}

fn encode_rgb(frame: &Frame, quality: u8) -> Result<Bytes, EncodeError> {
    let expected = frame.width as usize * frame.height as usize * 3;
    if frame.data.len() != expected {
        return Err(EncodeError::DimensionMismatch {
            expected,
            actual: frame.data.len(),
        });
    }

    let image: RgbImage = ImageBuffer::from_raw(frame.width, frame.height, frame.data.to_vec())
        .ok_or(EncodeError::DimensionMismatch {
            expected,
            actual: frame.data.len(),
        })?;

    let mut jpeg = Vec::new();
    let mut encoder = JpegEncoder::new_with_quality(&mut jpeg, quality);
    encoder
        .encode_image(&image)
        .map_err(|err| EncodeError::Codec(err.to_string()))?;

    Ok(Bytes::from(jpeg))
}

fn passthrough_jpeg(frame: &Frame) -> Result<Bytes, EncodeError> {
    if frame.data.len() < JPEG_SOI.len() || frame.data[..2] != JPEG_SOI {
        return Err(EncodeError::NotJpeg);
    }

    Ok(frame.data.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::DeviceId;

    fn rgb_frame(width: u32, height: u32) -> Frame {
        let mut data = Vec::with_capacity(width as usize * height as usize * 3);
        for y in 0..height {
            for x in 0..width {
                data.push((x * 32) as u8);
                data.push((y * 32) as u8);
                data.push(128);
            }
        }

        Frame {
            data: Bytes::from(data),
            width,
            height,
            format: PixelFormat::Rgb24,
            sequence: 0,
            device: DeviceId::Index(0),
        }
    }

    #[test]
    fn test_encode_rgb_produces_jpeg() {
        let frame = rgb_frame(8, 8);
        let jpeg = encode_frame(&frame, 80).unwrap();

        // JPEG magic bytes
        assert_eq!(&jpeg[0..2], &[0xFF, 0xD8]);
    }

    #[test]
    fn test_encode_quality_extremes() {
        let frame = rgb_frame(8, 8);

        assert!(encode_frame(&frame, 1).is_ok());
        assert!(encode_frame(&frame, 100).is_ok());
        // Out-of-range quality is clamped, not rejected
        assert!(encode_frame(&frame, 0).is_ok());
    }

    #[test]
    fn test_encode_rejects_short_buffer() {
        let mut frame = rgb_frame(8, 8);
        frame.data = frame.data.slice(0..10);

        let result = encode_frame(&frame, 80);
        assert!(matches!(
            result,
            Err(EncodeError::DimensionMismatch {
                expected: 192,
                actual: 10
            })
        ));
    }

    #[test]
    fn test_mjpeg_passthrough() {
        let payload = Bytes::from_static(&[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10]);
        let frame = Frame {
            data: payload.clone(),
            width: 8,
            height: 8,
            format: PixelFormat::Mjpeg,
            sequence: 0,
            device: DeviceId::Index(0),
        };

        let jpeg = encode_frame(&frame, 80).unwrap();
        assert_eq!(jpeg, payload);
    }

    #[test]
    fn test_mjpeg_passthrough_rejects_garbage() {
        let frame = Frame {
            data: Bytes::from_static(b"not a jpeg"),
            width: 8,
            height: 8,
            format: PixelFormat::Mjpeg,
            sequence: 0,
            device: DeviceId::Index(0),
        };

        assert!(matches!(encode_frame(&frame, 80), Err(EncodeError::NotJpeg)));
    }
}
