use bytes::{Buf, BytesMut};
use std::io;
use tracing::trace;

use crate::io::Transport;

/// Default capacity of the receive window.
pub const DEFAULT_RECV_BUFFER_SIZE: usize = 16 * 1024;

/// Buffers bytes read from a [`Transport`] until they are consumed.
///
/// The buffered window is consumed from the front with [`shift`](RecvBuffer::shift)
/// and refilled at the tail with [`fill`](RecvBuffer::fill); one fill performs at most
/// one read.
#[derive(Debug)]
pub struct RecvBuffer {
    buf: BytesMut,
    capacity: usize,
}

impl RecvBuffer {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_RECV_BUFFER_SIZE)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self { buf: BytesMut::with_capacity(capacity), capacity }
    }

    /// Reads once from `io` into the free tail of the window.
    ///
    /// Returns the number of bytes read, which is 0 when the window is already full
    /// or the transport has nothing to offer right now.
    ///
    /// # Errors
    ///
    /// Propagates the transport's read error unchanged.
    pub fn fill<T: Transport + ?Sized>(&mut self, io: &mut T) -> io::Result<usize> {
        let len = self.buf.len();
        if len >= self.capacity {
            return Ok(0);
        }

        self.buf.resize(self.capacity, 0);
        match io.read(&mut self.buf[len..]) {
            Ok(n) => {
                self.buf.truncate(len + n);
                trace!(read_bytes = n, buffered = self.buf.len(), "filled receive buffer");
                Ok(n)
            }
            Err(e) => {
                self.buf.truncate(len);
                Err(e)
            }
        }
    }

    /// The bytes currently buffered.
    #[inline]
    pub fn window(&self) -> &[u8] {
        &self.buf
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Discards the first `n` bytes of the window.
    ///
    /// # Panics
    ///
    /// Panics if `n` exceeds the window length.
    pub fn shift(&mut self, n: usize) {
        assert!(n <= self.buf.len(), "shift {n} exceeds buffered length {}", self.buf.len());
        self.buf.advance(n);
    }

    /// Discards the whole window.
    pub fn clear(&mut self) {
        self.buf.clear();
    }
}

impl Default for RecvBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::MockTransport;
    use mockall::Sequence;

    fn read_returning(mock: &mut MockTransport, seq: &mut Sequence, data: &'static [u8]) {
        mock.expect_read().times(1).in_sequence(seq).returning(move |buf| {
            buf[..data.len()].copy_from_slice(data);
            Ok(data.len())
        });
    }

    #[test]
    fn fill_shift_and_clear() {
        let mut mock = MockTransport::new();
        let mut seq = Sequence::new();
        read_returning(&mut mock, &mut seq, b"GET / HTTP/1.1\r\n");
        read_returning(&mut mock, &mut seq, b"\r\nbody");

        let mut buffer = RecvBuffer::new();
        assert!(buffer.is_empty());

        assert_eq!(buffer.fill(&mut mock).unwrap(), 16);
        assert_eq!(buffer.window(), b"GET / HTTP/1.1\r\n");

        buffer.shift(4);
        assert_eq!(buffer.window(), b"/ HTTP/1.1\r\n");

        assert_eq!(buffer.fill(&mut mock).unwrap(), 6);
        assert_eq!(buffer.window(), b"/ HTTP/1.1\r\n\r\nbody");

        buffer.clear();
        assert!(buffer.is_empty());
    }

    #[test]
    fn fill_never_exceeds_capacity() {
        let mut mock = MockTransport::new();
        mock.expect_read().times(1).returning(|buf| {
            assert_eq!(buf.len(), 4);
            buf.copy_from_slice(b"abcd");
            Ok(4)
        });

        let mut buffer = RecvBuffer::with_capacity(4);
        assert_eq!(buffer.fill(&mut mock).unwrap(), 4);
        // full window: no read is attempted
        assert_eq!(buffer.fill(&mut mock).unwrap(), 0);
        assert_eq!(buffer.window(), b"abcd");
    }

    #[test]
    fn read_error_leaves_window_untouched() {
        let mut mock = MockTransport::new();
        let mut seq = Sequence::new();
        read_returning(&mut mock, &mut seq, b"abc");
        mock.expect_read()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Err(io::Error::from(io::ErrorKind::ConnectionReset)));

        let mut buffer = RecvBuffer::new();
        buffer.fill(&mut mock).unwrap();

        let err = buffer.fill(&mut mock).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::ConnectionReset);
        assert_eq!(buffer.window(), b"abc");
    }

    #[test]
    #[should_panic(expected = "exceeds buffered length")]
    fn shift_past_window_panics() {
        let mut buffer = RecvBuffer::new();
        buffer.shift(1);
    }
}
