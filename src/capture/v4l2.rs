//! V4L2 capture backend
//!
//! Drives a real Video4Linux device from a dedicated capture thread and
//! hands frames to the async side over a bounded channel. Keeping the
//! blocking `VIDIOC_DQBUF` loop off the runtime makes device reads
//! cancellable from the caller's point of view: abandoning a read drops
//! nothing but a channel recv.
//!
//! Only compiled with the `capture-v4l2` feature.

use std::io;

use bytes::Bytes;
use tokio::sync::{mpsc, oneshot};

use super::frame::{DeviceId, PixelFormat};
use super::source::SourceConfig;

/// Frame slots buffered between the capture thread and the reader
const CHANNEL_DEPTH: usize = 2;

/// Mmap buffers negotiated with the driver
const BUFFER_COUNT: u32 = 4;

/// Negotiated capture geometry, reported back once the device is streaming
struct StreamInfo {
    width: u32,
    height: u32,
    format: PixelFormat,
}

/// Handle to a streaming V4L2 device
///
/// The device and its buffer queue live on the capture thread; dropping the
/// handle closes the channel, which stops the thread after its current
/// dequeue and releases the device node.
pub(super) struct V4l2Source {
    frames: mpsc::Receiver<io::Result<Bytes>>,
    width: u32,
    height: u32,
    format: PixelFormat,
}

impl V4l2Source {
    /// Open `device` and start streaming
    ///
    /// Resolution is requested from the configuration; the driver may
    /// adjust it. RGB3 is preferred, MJPG devices are passed through
    /// compressed. Any setup failure is reported before this returns.
    pub(super) async fn open(device: &DeviceId, config: &SourceConfig) -> io::Result<Self> {
        let (ready_tx, ready_rx) = oneshot::channel();
        let (frame_tx, frame_rx) = mpsc::channel(CHANNEL_DEPTH);

        let path = device_path(device);
        let width = config.width;
        let height = config.height;

        std::thread::Builder::new()
            .name("v4l2-capture".to_string())
            .spawn(move || capture_thread(path, width, height, ready_tx, frame_tx))?;

        let info = match ready_rx.await {
            Ok(result) => result?,
            Err(_) => {
                return Err(io::Error::new(
                    io::ErrorKind::BrokenPipe,
                    "capture thread exited during setup",
                ))
            }
        };

        Ok(Self {
            frames: frame_rx,
            width: info.width,
            height: info.height,
            format: info.format,
        })
    }

    /// Receive the next captured frame
    pub(super) async fn read(&mut self) -> io::Result<Bytes> {
        match self.frames.recv().await {
            Some(result) => result,
            None => Err(io::Error::new(
                io::ErrorKind::BrokenPipe,
                "capture thread stopped",
            )),
        }
    }

    pub(super) fn width(&self) -> u32 {
        self.width
    }

    pub(super) fn height(&self) -> u32 {
        self.height
    }

    pub(super) fn format(&self) -> PixelFormat {
        self.format
    }
}

/// Map a device id to its node path
fn device_path(device: &DeviceId) -> String {
    match device {
        DeviceId::Index(index) => format!("/dev/video{}", index),
        DeviceId::Uri(uri) => uri.clone(),
    }
}

/// Blocking capture loop
///
/// Opens the device, negotiates a format, reports readiness, then dequeues
/// buffers until the receiver goes away or the driver errors out.
fn capture_thread(
    path: String,
    width: u32,
    height: u32,
    ready_tx: oneshot::Sender<io::Result<StreamInfo>>,
    frame_tx: mpsc::Sender<io::Result<Bytes>>,
) {
    use v4l::buffer::Type;
    use v4l::io::mmap::Stream;
    use v4l::io::traits::CaptureStream;
    use v4l::video::Capture;

    let setup = (|| {
        let device = v4l::Device::with_path(&path)?;

        let mut format = device.format()?;
        format.width = width;
        format.height = height;
        format.fourcc = v4l::FourCC::new(b"RGB3");
        let format = device.set_format(&format)?;

        let pixel_format = match &format.fourcc.repr {
            b"RGB3" => PixelFormat::Rgb24,
            b"MJPG" => PixelFormat::Mjpeg,
            other => {
                return Err(io::Error::new(
                    io::ErrorKind::Unsupported,
                    format!("unsupported fourcc {:?}", std::str::from_utf8(other)),
                ))
            }
        };

        let info = StreamInfo {
            width: format.width,
            height: format.height,
            format: pixel_format,
        };

        Ok((device, info))
    })();

    let (device, info) = match setup {
        Ok((device, info)) => (device, info),
        Err(err) => {
            let _ = ready_tx.send(Err(err));
            return;
        }
    };

    let mut stream = match Stream::with_buffers(&device, Type::VideoCapture, BUFFER_COUNT) {
        Ok(stream) => stream,
        Err(err) => {
            let _ = ready_tx.send(Err(err));
            return;
        }
    };

    if ready_tx.send(Ok(info)).is_err() {
        // Caller gave up while we were setting up
        return;
    }

    loop {
        let result = stream
            .next()
            .map(|(buf, _meta)| Bytes::copy_from_slice(buf));
        let failed = result.is_err();

        if frame_tx.blocking_send(result).is_err() {
            // Reader dropped the source
            return;
        }
        if failed {
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_device_path() {
        assert_eq!(device_path(&DeviceId::Index(0)), "/dev/video0");
        assert_eq!(device_path(&DeviceId::Index(2)), "/dev/video2");
        assert_eq!(
            device_path(&DeviceId::Uri("/dev/video9".to_string())),
            "/dev/video9"
        );
    }
}
