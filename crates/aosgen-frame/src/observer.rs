//! Diagnostic hooks for frame generation.
//!
//! Observers see each chunk before it is encoded, each finished frame, and
//! any chunks dropped by the frame budget. They never affect the output.

use crate::codec::Frame;

/// Receives generation events. Every method defaults to a no-op.
pub trait FrameObserver {
    /// Called with the unpadded chunk before it is encoded.
    fn on_chunk(&mut self, _index: usize, _chunk: &[u8]) {}

    /// Called after the frame for chunk `index` is produced.
    fn on_frame(&mut self, _index: usize, _frame: &Frame) {}

    /// Called once when `dropped` chunks did not fit the frame budget.
    fn on_truncated(&mut self, _emitted: usize, _dropped: usize) {}
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl FrameObserver for NoopObserver {}

/// Forwards events to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl FrameObserver for TracingObserver {
    fn on_chunk(&mut self, index: usize, chunk: &[u8]) {
        tracing::debug!(
            index,
            len = chunk.len(),
            chunk = %String::from_utf8_lossy(chunk),
            "encoding chunk"
        );
    }

    fn on_frame(&mut self, index: usize, frame: &Frame) {
        tracing::trace!(
            index,
            len = frame.len(),
            checksum = format_args!("{:08x}", frame.checksum()),
            "frame encoded"
        );
    }

    fn on_truncated(&mut self, emitted: usize, dropped: usize) {
        tracing::warn!(
            emitted,
            dropped,
            "message truncated: chunks exceed frame budget"
        );
    }
}

impl<T: FrameObserver + ?Sized> FrameObserver for &mut T {
    fn on_chunk(&mut self, index: usize, chunk: &[u8]) {
        (**self).on_chunk(index, chunk);
    }

    fn on_frame(&mut self, index: usize, frame: &Frame) {
        (**self).on_frame(index, frame);
    }

    fn on_truncated(&mut self, emitted: usize, dropped: usize) {
        (**self).on_truncated(emitted, dropped);
    }
}
