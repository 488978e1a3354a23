//! Frame and device identity types
//!
//! Value types shared by the capture backends: the identity of a capture
//! device and the raw frames it yields.

use bytes::Bytes;

/// Identifier for a capture device
///
/// `Index` is the numeric id exposed on the switch endpoint. `Uri` names a
/// synthetic pattern (`synthetic:<n>`) or a device node path. Identifiers
/// are not unique across time: the same device may be closed and reopened.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DeviceId {
    /// Numeric device index (maps to `/dev/video<n>` on V4L2 hosts)
    Index(u32),
    /// Explicit source uri, e.g. `synthetic:1` or a device node path
    Uri(String),
}

impl DeviceId {
    /// Parse an identifier from a string: a bare integer or a uri
    pub fn parse(s: &str) -> Self {
        match s.parse::<u32>() {
            Ok(index) => DeviceId::Index(index),
            Err(_) => DeviceId::Uri(s.to_string()),
        }
    }
}

impl std::fmt::Display for DeviceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeviceId::Index(index) => write!(f, "{}", index),
            DeviceId::Uri(uri) => write!(f, "{}", uri),
        }
    }
}

impl From<u32> for DeviceId {
    fn from(index: u32) -> Self {
        DeviceId::Index(index)
    }
}

/// Pixel layout of a raw frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    /// Packed 8-bit RGB, 3 bytes per pixel
    Rgb24,
    /// Already JPEG-compressed (devices that deliver MJPG directly)
    Mjpeg,
}

/// One captured image
///
/// Cheap to clone: the pixel buffer is reference-counted via `Bytes`.
/// Frames are consumed by the encoder and discarded; nothing retains them
/// beyond one stream iteration.
#[derive(Debug, Clone)]
pub struct Frame {
    /// Raw pixel data
    pub data: Bytes,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Pixel layout of `data`
    pub format: PixelFormat,
    /// Sequence number, monotonic per open source
    pub sequence: u64,
    /// Device this frame was read from
    pub device: DeviceId,
}

impl Frame {
    /// Expected byte length of the pixel buffer, for packed formats
    pub fn expected_len(&self) -> Option<usize> {
        match self.format {
            PixelFormat::Rgb24 => Some(self.width as usize * self.height as usize * 3),
            PixelFormat::Mjpeg => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_index() {
        assert_eq!(DeviceId::parse("0"), DeviceId::Index(0));
        assert_eq!(DeviceId::parse("12"), DeviceId::Index(12));
    }

    #[test]
    fn test_parse_uri() {
        assert_eq!(
            DeviceId::parse("synthetic:1"),
            DeviceId::Uri("synthetic:1".to_string())
        );
        assert_eq!(
            DeviceId::parse("/dev/video0"),
            DeviceId::Uri("/dev/video0".to_string())
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(DeviceId::Index(3).to_string(), "3");
        assert_eq!(DeviceId::Uri("synthetic:0".to_string()).to_string(), "synthetic:0");
    }

    #[test]
    fn test_expected_len() {
        let frame = Frame {
            data: Bytes::new(),
            width: 4,
            height: 2,
            format: PixelFormat::Rgb24,
            sequence: 0,
            device: DeviceId::Index(0),
        };
        assert_eq!(frame.expected_len(), Some(24));
    }
}
