//! Seekable byte sources and the decoder pull shim
//!
//! A decoder normally opens media from a locator string; `ByteStream` lets
//! it pull bytes from an arbitrary in-process source instead, through the
//! narrow open/read/seek/close contract its I/O threads expect. The
//! session holds a shared reference to the source for its whole lifetime,
//! so the source cannot be destroyed mid-read even if the owning scope
//! exits.

use std::io;
use std::sync::Arc;

/// An arbitrary seekable byte source.
///
/// Implementations must be thread-safe: decoder I/O threads read at
/// explicit positions, so no internal cursor is required.
pub trait ByteSource: Send + Sync {
    /// Total size of the source in bytes.
    fn len(&self) -> u64;

    /// True when the source holds no bytes.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copy bytes starting at `pos` into `buf`, returning the number
    /// copied. Callers never request a range past `len()`.
    fn read_at(&self, pos: u64, buf: &mut [u8]) -> io::Result<usize>;
}

/// In-memory byte source.
#[derive(Debug, Clone)]
pub struct MemoryByteSource {
    data: Vec<u8>,
}

impl MemoryByteSource {
    /// Wrap a byte vector.
    pub fn new(data: Vec<u8>) -> Self {
        MemoryByteSource { data }
    }
}

impl ByteSource for MemoryByteSource {
    fn len(&self) -> u64 {
        self.data.len() as u64
    }

    fn read_at(&self, pos: u64, buf: &mut [u8]) -> io::Result<usize> {
        let start = pos.min(self.data.len() as u64) as usize;
        let end = (start + buf.len()).min(self.data.len());
        let count = end - start;
        buf[..count].copy_from_slice(&self.data[start..end]);
        Ok(count)
    }
}

/// One pull session over a byte source: a cursor plus the total length.
///
/// Exactly one session exists per player instance; it is closed explicitly
/// before a new one may be opened.
pub struct ByteStream {
    source: Arc<dyn ByteSource>,
    position: u64,
}

impl ByteStream {
    /// Begin a session at position zero.
    pub fn new(source: Arc<dyn ByteSource>) -> Self {
        ByteStream {
            source,
            position: 0,
        }
    }

    /// Report the total stream size to the decoder.
    pub fn open(&self) -> u64 {
        self.source.len()
    }

    /// Read up to `buf.len()` bytes at the cursor, clamped to the
    /// remaining bytes - never past end-of-stream.
    pub fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let remaining = self.source.len().saturating_sub(self.position);
        let to_read = (buf.len() as u64).min(remaining) as usize;

        if to_read == 0 {
            return Ok(0);
        }

        let read = self.source.read_at(self.position, &mut buf[..to_read])?;
        self.position += read as u64;

        Ok(read)
    }

    /// Move the cursor to an absolute offset.
    ///
    /// Fails (cursor unchanged) when `offset` is at or past the total
    /// length.
    pub fn seek(&mut self, offset: u64) -> io::Result<()> {
        if offset >= self.source.len() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "seek past end of stream",
            ));
        }

        self.position = offset;
        Ok(())
    }

    /// End the session, resetting the cursor to zero. Idempotent.
    pub fn close(&mut self) {
        self.position = 0;
    }

    /// Current cursor position.
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Total stream size in bytes.
    pub fn total_size(&self) -> u64 {
        self.source.len()
    }
}

impl io::Read for ByteStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        ByteStream::read(self, buf)
    }
}
