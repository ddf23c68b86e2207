use bytes::{Buf, Bytes};
use std::collections::VecDeque;
use std::io;
use tracing::trace;

use crate::io::Transport;

/// An ordered queue of pending output chunks.
#[derive(Debug, Default)]
pub struct SendBuffer {
    queue: VecDeque<Bytes>,
}

impl SendBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a chunk to the queue. Empty chunks are dropped.
    pub fn push(&mut self, bytes: impl Into<Bytes>) {
        let bytes = bytes.into();
        if !bytes.is_empty() {
            self.queue.push_back(bytes);
        }
    }

    /// Writes as many queued bytes as `io` accepts right now.
    ///
    /// Stops at the first short or zero-length write. Returns the number of bytes
    /// written, 0 meaning "try again when writable".
    ///
    /// # Errors
    ///
    /// Propagates the transport's write error unchanged; the unsent bytes stay queued.
    pub fn send<T: Transport + ?Sized>(&mut self, io: &mut T) -> io::Result<usize> {
        let mut total = 0;
        while let Some(front) = self.queue.front_mut() {
            let n = io.write(front)?;
            total += n;
            if n < front.len() {
                front.advance(n);
                break;
            }
            self.queue.pop_front();
        }

        trace!(sent_bytes = total, pending_chunks = self.queue.len(), "flushed send buffer");
        Ok(total)
    }

    /// Number of bytes still waiting to be written.
    pub fn pending_len(&self) -> usize {
        self.queue.iter().map(Bytes::len).sum()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
