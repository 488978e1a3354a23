//! Synthetic capture backend
//!
//! Generates RGB test-pattern frames paced through the async clock. Always
//! compiled, so the full device-switch and streaming surface can run and be
//! tested on machines without cameras. Each pattern index renders with its
//! own tint, which makes frames attributable to their device in tests.

use bytes::Bytes;
use tokio::time::{Duration, Instant};

use super::frame::DeviceId;
use super::source::SourceConfig;

/// Uri scheme for addressing a synthetic pattern directly
pub const SYNTHETIC_SCHEME: &str = "synthetic:";

/// Red-channel tint for a pattern index
///
/// Spread out so neighbouring indices are visually distinct.
pub(crate) fn device_tint(index: u32) -> u8 {
    index.wrapping_mul(40).wrapping_add(32) as u8
}

/// Resolve a device id to a synthetic pattern index, if it names one
pub(crate) fn pattern_index(device: &DeviceId) -> Option<u32> {
    match device {
        DeviceId::Index(index) => Some(*index),
        DeviceId::Uri(uri) => uri.strip_prefix(SYNTHETIC_SCHEME)?.parse().ok(),
    }
}

/// Test-pattern generator for one synthetic device
pub(super) struct SyntheticSource {
    index: u32,
    width: u32,
    height: u32,
    interval: Duration,
    next_frame_at: Instant,
}

impl SyntheticSource {
    /// Open the pattern at `index`
    ///
    /// Returns `None` when the index is beyond the configured machine size,
    /// the analogue of a host with a fixed set of cameras.
    pub(super) fn open(index: u32, config: &SourceConfig) -> Option<Self> {
        if index >= config.synthetic_devices {
            return None;
        }

        Some(Self {
            index,
            width: config.width,
            height: config.height,
            interval: config.frame_interval,
            next_frame_at: Instant::now() + config.frame_interval,
        })
    }

    /// Produce the next frame, waiting out the configured frame interval
    ///
    /// Cancel-safe: a caller that gives up mid-wait leaves the pacing
    /// deadline untouched for the next read.
    pub(super) async fn next_frame(&mut self, sequence: u64) -> Bytes {
        tokio::time::sleep_until(self.next_frame_at).await;
        self.next_frame_at = Instant::now() + self.interval;

        self.render(sequence)
    }

    /// Render one RGB frame. R carries the device tint, G the sequence
    /// shade and B a gradient that moves with the sequence.
    fn render(&self, sequence: u64) -> Bytes {
        let tint = device_tint(self.index);
        let shade = sequence as u8;
        let mut data = Vec::with_capacity(self.width as usize * self.height as usize * 3);

        for y in 0..self.height {
            for x in 0..self.width {
                data.push(tint);
                data.push(shade);
                data.push(((x + y) as u64 + sequence) as u8);
            }
        }

        Bytes::from(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> SourceConfig {
        SourceConfig {
            width: 8,
            height: 4,
            frame_interval: Duration::from_millis(10),
            ..SourceConfig::default()
        }
    }

    #[test]
    fn test_pattern_index() {
        assert_eq!(pattern_index(&DeviceId::Index(1)), Some(1));
        assert_eq!(
            pattern_index(&DeviceId::Uri("synthetic:3".to_string())),
            Some(3)
        );
        assert_eq!(pattern_index(&DeviceId::Uri("/dev/video0".to_string())), None);
        assert_eq!(pattern_index(&DeviceId::Uri("synthetic:x".to_string())), None);
    }

    #[test]
    fn test_open_respects_machine_size() {
        let config = test_config();
        assert!(SyntheticSource::open(0, &config).is_some());
        assert!(SyntheticSource::open(1, &config).is_some());
        assert!(SyntheticSource::open(config.synthetic_devices, &config).is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_frames_carry_device_tint() {
        let config = test_config();
        let mut first = SyntheticSource::open(0, &config).unwrap();
        let mut second = SyntheticSource::open(1, &config).unwrap();

        let a = first.next_frame(0).await;
        let b = second.next_frame(0).await;

        assert_eq!(a.len(), 8 * 4 * 3);
        assert_eq!(a[0], device_tint(0));
        assert_eq!(b[0], device_tint(1));
        assert_ne!(a[0], b[0]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_sequence_changes_content() {
        let config = test_config();
        let mut source = SyntheticSource::open(0, &config).unwrap();

        let a = source.next_frame(0).await;
        let b = source.next_frame(1).await;

        assert_ne!(a, b);
        // Green channel carries the sequence shade in every pixel
        assert_eq!(a[1], 0);
        assert_eq!(b[1], 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reads_are_paced() {
        let config = test_config();
        let mut source = SyntheticSource::open(0, &config).unwrap();

        let started = Instant::now();
        source.next_frame(0).await;
        source.next_frame(1).await;

        assert!(started.elapsed() >= Duration::from_millis(20));
    }
}
