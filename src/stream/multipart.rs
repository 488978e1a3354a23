//! Multipart stream framing
//!
//! Byte-level framing for `multipart/x-mixed-replace` delivery: each frame
//! travels as one part behind a fixed boundary marker, and the connection
//! stays open while parts keep arriving. Browsers render this natively via
//! a plain `<img>` tag.

use bytes::{BufMut, Bytes, BytesMut};

/// Boundary marker separating parts
pub const BOUNDARY: &str = "frame";

/// Value for the HTTP `Content-Type` header of the whole stream
pub const CONTENT_TYPE: &str = "multipart/x-mixed-replace; boundary=frame";

const JPEG_PART_HEADER: &[u8] = b"--frame\r\nContent-Type: image/jpeg\r\n\r\n";

/// Placeholder part sent when a stream is rejected while the feed is off
pub(crate) const INACTIVE_PART: &[u8] =
    b"--frame\r\nContent-Type: text/plain\r\n\r\nCamera inactive\r\n\r\n";

/// Frame one JPEG image as a multipart part
pub fn jpeg_part(jpeg: &[u8]) -> Bytes {
    let mut part = BytesMut::with_capacity(JPEG_PART_HEADER.len() + jpeg.len() + 2);
    part.put_slice(JPEG_PART_HEADER);
    part.put_slice(jpeg);
    part.put_slice(b"\r\n");
    part.freeze()
}

/// The placeholder part as a ready-to-send chunk
pub fn inactive_part() -> Bytes {
    Bytes::from_static(INACTIVE_PART)
}
