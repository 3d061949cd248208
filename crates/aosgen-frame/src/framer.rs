use std::num::NonZeroUsize;

use bytes::Bytes;

use crate::codec::Frame;
use crate::error::Result;
use crate::link::LinkIdentifier;
use crate::observer::{FrameObserver, TracingObserver};

/// Default payload size per frame: 100 bytes.
pub const DEFAULT_CHUNK_SIZE: NonZeroUsize = match NonZeroUsize::new(100) {
    Some(size) => size,
    None => unreachable!(),
};

/// Configuration for message segmentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FramerConfig {
    /// Payload bytes per frame. Short final chunks are zero-padded to this
    /// size. Default: 100.
    pub chunk_size: NonZeroUsize,
}

impl Default for FramerConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

/// Partition `message` into consecutive chunks of `max_chunk_length` bytes.
///
/// Only the last chunk may be shorter. An empty message yields no chunks.
pub fn split_message(message: &[u8], max_chunk_length: NonZeroUsize) -> Vec<&[u8]> {
    message.chunks(max_chunk_length.get()).collect()
}

/// Splits one message into frames for a single link, up to a frame budget.
#[derive(Debug, Clone)]
pub struct MessageFramer {
    link: LinkIdentifier,
    max_frames: usize,
    message: Bytes,
    config: FramerConfig,
}

impl MessageFramer {
    /// Create a framer with default configuration.
    ///
    /// Identifiers are validated here, so a framer that exists can always
    /// generate its frames.
    pub fn new(
        spacecraft_id: i64,
        virtual_channel_id: i64,
        max_frames: usize,
        message: impl Into<Bytes>,
    ) -> Result<Self> {
        let link = LinkIdentifier::new(spacecraft_id, virtual_channel_id)?;
        Ok(Self::with_link(link, max_frames, message))
    }

    /// Create a framer for an already validated link.
    pub fn with_link(link: LinkIdentifier, max_frames: usize, message: impl Into<Bytes>) -> Self {
        Self {
            link,
            max_frames,
            message: message.into(),
            config: FramerConfig::default(),
        }
    }

    /// Replace the segmentation configuration.
    pub fn with_config(mut self, config: FramerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn link(&self) -> LinkIdentifier {
        self.link
    }

    pub fn max_frames(&self) -> usize {
        self.max_frames
    }

    pub fn message(&self) -> &[u8] {
        &self.message
    }

    pub fn config(&self) -> &FramerConfig {
        &self.config
    }

    /// Split the held message into chunks of `max_chunk_length` bytes.
    pub fn split_message(&self, max_chunk_length: NonZeroUsize) -> Vec<&[u8]> {
        split_message(&self.message, max_chunk_length)
    }

    /// Number of frames [`generate_frames`](Self::generate_frames) will
    /// produce.
    pub fn frame_count(&self) -> usize {
        self.chunk_count().min(self.max_frames)
    }

    fn chunk_count(&self) -> usize {
        self.message.len().div_ceil(self.config.chunk_size.get())
    }

    /// Encode the message, reporting progress through `tracing`.
    pub fn generate_frames(&self) -> Vec<Frame> {
        self.generate_frames_with(TracingObserver)
    }

    /// Encode the message, reporting progress to `observer`.
    ///
    /// `observer` may be an owned observer, `&mut impl FrameObserver` or
    /// `&mut dyn FrameObserver`.
    ///
    /// Produces `min(max_frames, chunk count)` frames in chunk order. Chunks
    /// past the frame budget are dropped and reported once through
    /// [`FrameObserver::on_truncated`].
    pub fn generate_frames_with<O: FrameObserver>(&self, mut observer: O) -> Vec<Frame> {
        let chunk_size = self.config.chunk_size;
        let chunks = self.split_message(chunk_size);
        let count = chunks.len().min(self.max_frames);

        let mut frames = Vec::with_capacity(count);
        // Only the final chunk can be short; allocate on first use.
        let mut padded = Vec::new();
        for (index, chunk) in chunks.iter().take(count).enumerate() {
            observer.on_chunk(index, chunk);

            let frame = if chunk.len() < chunk_size.get() {
                padded.clear();
                padded.extend_from_slice(chunk);
                padded.resize(chunk_size.get(), 0);
                Frame::from_link(self.link, &padded)
            } else {
                Frame::from_link(self.link, chunk)
            };

            observer.on_frame(index, &frame);
            frames.push(frame);
        }

        if chunks.len() > count {
            observer.on_truncated(count, chunks.len() - count);
        }

        frames
    }
}
