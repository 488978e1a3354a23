//! Frame source
//!
//! One open capture device: backend selection, open-time validation and
//! sequential frame reads. Synthetic patterns are always available; real
//! V4L2 devices sit behind the `capture-v4l2` feature. Exactly one
//! `FrameSource` exists per open device, and dropping it releases the
//! device handle.

use tokio::time::Duration;

use crate::error::DeviceError;

use super::frame::{DeviceId, Frame, PixelFormat};
use super::synthetic::{self, SyntheticSource};
#[cfg(feature = "capture-v4l2")]
use super::v4l2::V4l2Source;

/// Capture configuration shared by all backends
#[derive(Debug, Clone)]
pub struct SourceConfig {
    /// Requested frame width in pixels
    pub width: u32,

    /// Requested frame height in pixels
    pub height: u32,

    /// Pacing interval between synthetic frames
    pub frame_interval: Duration,

    /// Ceiling for a single device read
    pub read_timeout: Duration,

    /// Number of synthetic pattern indices that exist
    pub synthetic_devices: u32,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            frame_interval: Duration::from_millis(33), // ~30 fps
            read_timeout: Duration::from_secs(5),
            synthetic_devices: 2,
        }
    }
}

enum Backend {
    Synthetic(SyntheticSource),
    #[cfg(feature = "capture-v4l2")]
    V4l2(V4l2Source),
}

/// An open capture device yielding sequential frames
pub struct FrameSource {
    device: DeviceId,
    width: u32,
    height: u32,
    format: PixelFormat,
    sequence: u64,
    backend: Backend,
}

impl FrameSource {
    /// Open `device` and validate that it is ready to produce frames
    ///
    /// Numeric indices map to real devices when the `capture-v4l2` feature
    /// is enabled and to synthetic patterns otherwise; `synthetic:<n>` uris
    /// always address patterns. Any failure leaves nothing open.
    pub async fn open(device: DeviceId, config: &SourceConfig) -> Result<Self, DeviceError> {
        let backend = Self::open_backend(&device, config).await?;

        let (width, height, format) = match &backend {
            Backend::Synthetic(_) => (config.width, config.height, PixelFormat::Rgb24),
            #[cfg(feature = "capture-v4l2")]
            Backend::V4l2(source) => (source.width(), source.height(), source.format()),
        };

        Ok(Self {
            device,
            width,
            height,
            format,
            sequence: 0,
            backend,
        })
    }

    #[cfg(not(feature = "capture-v4l2"))]
    async fn open_backend(device: &DeviceId, config: &SourceConfig) -> Result<Backend, DeviceError> {
        let index =
            synthetic::pattern_index(device).ok_or_else(|| DeviceError::Unavailable(device.clone()))?;
        let source = SyntheticSource::open(index, config)
            .ok_or_else(|| DeviceError::Unavailable(device.clone()))?;

        Ok(Backend::Synthetic(source))
    }

    #[cfg(feature = "capture-v4l2")]
    async fn open_backend(device: &DeviceId, config: &SourceConfig) -> Result<Backend, DeviceError> {
        // `synthetic:` uris keep working alongside real devices
        if let DeviceId::Uri(uri) = device {
            if uri.starts_with(synthetic::SYNTHETIC_SCHEME) {
                let index = synthetic::pattern_index(device)
                    .ok_or_else(|| DeviceError::Unavailable(device.clone()))?;
                let source = SyntheticSource::open(index, config)
                    .ok_or_else(|| DeviceError::Unavailable(device.clone()))?;
                return Ok(Backend::Synthetic(source));
            }
        }

        match V4l2Source::open(device, config).await {
            Ok(source) => Ok(Backend::V4l2(source)),
            Err(err) => {
                tracing::debug!(device = %device, error = %err, "V4L2 open failed");
                Err(DeviceError::Unavailable(device.clone()))
            }
        }
    }

    /// Read the next frame from the device
    pub async fn read(&mut self) -> Result<Frame, DeviceError> {
        let data = match &mut self.backend {
            Backend::Synthetic(source) => source.next_frame(self.sequence).await,
            #[cfg(feature = "capture-v4l2")]
            Backend::V4l2(source) => source
                .read()
                .await
                .map_err(|err| DeviceError::ReadFailed(err.to_string()))?,
        };

        let frame = Frame {
            data,
            width: self.width,
            height: self.height,
            format: self.format,
            sequence: self.sequence,
            device: self.device.clone(),
        };
        self.sequence += 1;

        Ok(frame)
    }

    /// Identifier this source was opened with
    pub fn device(&self) -> &DeviceId {
        &self.device
    }
}
