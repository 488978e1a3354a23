//! Stream publisher
//!
//! Per-viewer delivery loop for one `/video` request. Each publisher walks
//! a small state machine that turns session frames into encoded multipart
//! parts until the feed is deactivated or the device errors out; a client
//! disconnect simply drops the publisher mid-body.

use std::convert::Infallible;
use std::sync::Arc;

use bytes::Bytes;
use futures_util::Stream;

use crate::encode;
use crate::session::CameraSession;

use super::multipart;

/// Lifecycle of one streaming request
///
/// `Starting -> Streaming -> Stopped`, or `Starting -> Rejected` when the
/// feed is inactive before the first frame. Both end states are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamState {
    /// No part produced yet
    Starting,
    /// Delivering frame parts
    Streaming,
    /// Ended after streaming began
    Stopped,
    /// Turned away before the first frame; one placeholder part was sent
    Rejected,
}

/// Multipart frame delivery for a single viewer
pub struct StreamPublisher {
    session: Arc<CameraSession>,
    quality: u8,
    state: StreamState,
    frames_sent: u64,
    bytes_sent: u64,
}

impl StreamPublisher {
    /// Create a publisher over the shared camera session
    pub fn new(session: Arc<CameraSession>, quality: u8) -> Self {
        Self {
            session,
            quality,
            state: StreamState::Starting,
            frames_sent: 0,
            bytes_sent: 0,
        }
    }

    /// Current lifecycle state
    pub fn state(&self) -> StreamState {
        self.state
    }

    /// Parts delivered so far
    pub fn frames_sent(&self) -> u64 {
        self.frames_sent
    }

    /// Bytes delivered so far, framing included
    pub fn bytes_sent(&self) -> u64 {
        self.bytes_sent
    }

    /// Produce the next chunk of the multipart body
    ///
    /// `None` means the body is complete and the connection should close.
    /// An inactive feed at start yields exactly one placeholder part; no
    /// device read happens on that path.
    pub async fn next_chunk(&mut self) -> Option<Bytes> {
        match self.state {
            StreamState::Starting => {
                if !self.session.is_active() {
                    self.state = StreamState::Rejected;
                    tracing::debug!("Stream rejected, camera inactive");
                    return Some(multipart::inactive_part());
                }

                self.state = StreamState::Streaming;
                tracing::debug!("Stream started");
                self.next_frame_part().await
            }
            StreamState::Streaming => self.next_frame_part().await,
            StreamState::Stopped | StreamState::Rejected => None,
        }
    }

    /// One streaming iteration: gate check, read, encode, frame
    async fn next_frame_part(&mut self) -> Option<Bytes> {
        if !self.session.is_active() {
            self.stop("camera deactivated");
            return None;
        }

        let frame = match self.session.read_frame().await {
            Ok(frame) => frame,
            Err(err) => {
                self.stop(&err.to_string());
                return None;
            }
        };

        let jpeg = match encode::encode_frame(&frame, self.quality) {
            Ok(jpeg) => jpeg,
            Err(err) => {
                self.stop(&err.to_string());
                return None;
            }
        };

        let part = multipart::jpeg_part(&jpeg);
        self.frames_sent += 1;
        self.bytes_sent += part.len() as u64;

        Some(part)
    }

    fn stop(&mut self, reason: &str) {
        self.state = StreamState::Stopped;
        tracing::info!(
            reason = reason,
            frames = self.frames_sent,
            bytes = self.bytes_sent,
            "Stream ended"
        );
    }

    /// Adapt the publisher into a body stream for the HTTP response
    pub fn into_stream(self) -> impl Stream<Item = Result<Bytes, Infallible>> {
        futures_util::stream::unfold(self, |mut publisher| async move {
            let chunk = publisher.next_chunk().await?;
            Some((Ok(chunk), publisher))
        })
    }
}
