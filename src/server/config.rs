//! Server configuration

use std::net::SocketAddr;
use std::time::Duration;

use crate::capture::{DeviceId, SourceConfig};

/// Server configuration options
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to
    pub bind_addr: SocketAddr,

    /// Device opened at startup
    pub initial_device: DeviceId,

    /// JPEG quality for streamed frames (1-100)
    pub jpeg_quality: u8,

    /// Control channel broadcast capacity
    pub control_capacity: usize,

    /// Capture configuration shared by all device opens
    pub source: SourceConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:5000".parse().unwrap(),
            initial_device: DeviceId::Index(0),
            jpeg_quality: 80,
            control_capacity: 64,
            source: SourceConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Create a new config with custom bind address
    pub fn with_addr(addr: SocketAddr) -> Self {
        Self {
            bind_addr: addr,
            ..Default::default()
        }
    }

    /// Set the bind address
    pub fn bind(mut self, addr: SocketAddr) -> Self {
        self.bind_addr = addr;
        self
    }

    /// Set the device opened at startup
    pub fn initial_device(mut self, device: DeviceId) -> Self {
        self.initial_device = device;
        self
    }

    /// Set the JPEG quality, clamped to 1-100
    pub fn jpeg_quality(mut self, quality: u8) -> Self {
        self.jpeg_quality = quality.clamp(1, 100);
        self
    }

    /// Set the control channel broadcast capacity
    pub fn control_capacity(mut self, capacity: usize) -> Self {
        self.control_capacity = capacity;
        self
    }

    /// Set the requested capture resolution
    pub fn frame_size(mut self, width: u32, height: u32) -> Self {
        self.source.width = width;
        self.source.height = height;
        self
    }

    /// Set the pacing interval between frames
    pub fn frame_interval(mut self, interval: Duration) -> Self {
        self.source.frame_interval = interval;
        self
    }

    /// Set the ceiling for a single device read
    pub fn read_timeout(mut self, timeout: Duration) -> Self {
        self.source.read_timeout = timeout;
        self
    }

    /// Set how many synthetic pattern devices exist
    pub fn synthetic_devices(mut self, count: u32) -> Self {
        self.source.synthetic_devices = count;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default();

        assert_eq!(config.bind_addr.port(), 5000);
        assert_eq!(config.initial_device, DeviceId::Index(0));
        assert_eq!(config.jpeg_quality, 80);
        assert_eq!(config.control_capacity, 64);
        assert_eq!(config.source.width, 640);
        assert_eq!(config.source.height, 480);
        assert_eq!(config.source.read_timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_with_addr() {
        let addr: SocketAddr = "127.0.0.1:5001".parse().unwrap();
        let config = ServerConfig::with_addr(addr);

        assert_eq!(config.bind_addr.port(), 5001);
    }

    #[test]
    fn test_builder_bind() {
        let addr: SocketAddr = "0.0.0.0:8080".parse().unwrap();
        let config = ServerConfig::default().bind(addr);

        assert_eq!(config.bind_addr, addr);
    }

    #[test]
    fn test_builder_initial_device() {
        let config = ServerConfig::default().initial_device(DeviceId::Index(2));

        assert_eq!(config.initial_device, DeviceId::Index(2));
    }

    #[test]
    fn test_builder_jpeg_quality() {
        let config = ServerConfig::default().jpeg_quality(95);

        assert_eq!(config.jpeg_quality, 95);
    }

    #[test]
    fn test_builder_jpeg_quality_clamped() {
        // Quality must stay within what the encoder accepts
        assert_eq!(ServerConfig::default().jpeg_quality(0).jpeg_quality, 1);
        assert_eq!(ServerConfig::default().jpeg_quality(255).jpeg_quality, 100);
    }

    #[test]
    fn test_builder_frame_size() {
        let config = ServerConfig::default().frame_size(320, 240);

        assert_eq!(config.source.width, 320);
        assert_eq!(config.source.height, 240);
    }

    #[test]
    fn test_builder_read_timeout() {
        let config = ServerConfig::default().read_timeout(Duration::from_secs(2));

        assert_eq!(config.source.read_timeout, Duration::from_secs(2));
    }

    #[test]
    fn test_builder_chaining() {
        let addr: SocketAddr = "127.0.0.1:5000".parse().unwrap();
        let config = ServerConfig::default()
            .bind(addr)
            .initial_device(DeviceId::Uri("synthetic:1".to_string()))
            .jpeg_quality(70)
            .control_capacity(8)
            .frame_size(320, 240)
            .frame_interval(Duration::from_millis(50))
            .read_timeout(Duration::from_secs(1))
            .synthetic_devices(4);

        assert_eq!(config.bind_addr, addr);
        assert_eq!(
            config.initial_device,
            DeviceId::Uri("synthetic:1".to_string())
        );
        assert_eq!(config.jpeg_quality, 70);
        assert_eq!(config.control_capacity, 8);
        assert_eq!(config.source.width, 320);
        assert_eq!(config.source.frame_interval, Duration::from_millis(50));
        assert_eq!(config.source.read_timeout, Duration::from_secs(1));
        assert_eq!(config.source.synthetic_devices, 4);
    }
}
