//! Error types
//!
//! Failure taxonomy for capture, encoding and the server surface. None of
//! these are process-fatal once the server is up: a failed open is reported
//! to the caller, and a failed read or encode ends only the stream that hit
//! it.

use crate::capture::DeviceId;

/// Error type for camera device operations
#[derive(Debug, Clone)]
pub enum DeviceError {
    /// Device could not be opened or is not ready
    Unavailable(DeviceId),
    /// No device is currently open
    NoDevice,
    /// An open device stopped producing frames
    ReadFailed(String),
}

impl std::fmt::Display for DeviceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeviceError::Unavailable(device) => write!(f, "Camera {} unavailable", device),
            DeviceError::NoDevice => write!(f, "No camera device is open"),
            DeviceError::ReadFailed(reason) => write!(f, "Camera read failed: {}", reason),
        }
    }
}

impl std::error::Error for DeviceError {}

/// Error type for frame encoding
#[derive(Debug, Clone)]
pub enum EncodeError {
    /// Frame buffer length does not match the declared dimensions
    DimensionMismatch { expected: usize, actual: usize },
    /// A passthrough frame did not carry a JPEG payload
    NotJpeg,
    /// The JPEG encoder rejected the frame
    Codec(String),
}

impl std::fmt::Display for EncodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EncodeError::DimensionMismatch { expected, actual } => {
                write!(f, "Frame buffer is {} bytes, expected {}", actual, expected)
            }
            EncodeError::NotJpeg => write!(f, "Passthrough frame is not a JPEG"),
            EncodeError::Codec(reason) => write!(f, "JPEG encoding failed: {}", reason),
        }
    }
}

impl std::error::Error for EncodeError {}

/// Top-level error for server setup and serving
#[derive(Debug)]
pub enum Error {
    /// Socket bind or serve failure
    Io(std::io::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Io(err) => write!(f, "I/O error: {}", err),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

/// Convenience result alias for server operations
pub type Result<T> = std::result::Result<T, Error>;
