use std::io::{ErrorKind, Write};

use crate::codec::Frame;
use crate::error::{FrameError, Result};

/// Writes encoded frames back-to-back to a blocking `Write` sink.
///
/// Only `Interrupted` is retried; `WouldBlock` from a non-blocking sink is
/// reported as [`FrameError::Io`].
pub struct FrameWriter<T> {
    inner: T,
    frames_written: usize,
}

impl<T: Write> FrameWriter<T> {
    pub fn new(inner: T) -> Self {
        Self {
            inner,
            frames_written: 0,
        }
    }

    /// Write one complete frame (blocking).
    pub fn write_frame(&mut self, frame: &Frame) -> Result<()> {
        let buf = frame.as_bytes();
        let mut offset = 0usize;
        while offset < buf.len() {
            match self.inner.write(&buf[offset..]) {
                Ok(0) => return Err(FrameError::ConnectionClosed),
                Ok(n) => offset += n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(FrameError::Io(err)),
            }
        }
        self.frames_written += 1;
        Ok(())
    }

    /// Write every frame in order, then flush.
    pub fn write_all<'a, I>(&mut self, frames: I) -> Result<()>
    where
        I: IntoIterator<Item = &'a Frame>,
    {
        for frame in frames {
            self.write_frame(frame)?;
        }
        self.flush()
    }

    /// Flush the underlying sink.
    pub fn flush(&mut self) -> Result<()> {
        loop {
            match self.inner.flush() {
                Ok(()) => return Ok(()),
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(FrameError::Io(err)),
            }
        }
    }

    /// Frames fully written so far.
    pub fn frames_written(&self) -> usize {
        self.frames_written
    }

    pub fn get_ref(&self) -> &T {
        &self.inner
    }

    pub fn into_inner(self) -> T {
        self.inner
    }
}
