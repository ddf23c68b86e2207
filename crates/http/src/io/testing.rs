use std::collections::VecDeque;
use std::io;

use crate::io::Transport;

/// A transport delivering pre-scripted chunks, one chunk (or its remainder) per read.
///
/// Once the script runs dry it either reports "nothing yet" (`want_read`) or, after
/// [`close`](ScriptedTransport::close), end of stream.
#[derive(Debug, Default)]
pub(crate) struct ScriptedTransport {
    chunks: VecDeque<Vec<u8>>,
    closed: bool,
    write_limit: Option<usize>,
    pub(crate) written: Vec<u8>,
    pub(crate) reads: usize,
    want_read: bool,
    want_write: bool,
}

impl ScriptedTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_chunks<I, C>(chunks: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: AsRef<[u8]>,
    {
        let mut transport = Self::new();
        for chunk in chunks {
            transport.push(chunk);
        }
        transport
    }

    pub(crate) fn push(&mut self, chunk: impl AsRef<[u8]>) {
        self.chunks.push_back(chunk.as_ref().to_vec());
    }

    pub(crate) fn close(&mut self) {
        self.closed = true;
    }

    pub(crate) fn set_write_limit(&mut self, limit: usize) {
        self.write_limit = Some(limit);
    }

    pub(crate) fn written_str(&self) -> &str {
        std::str::from_utf8(&self.written).unwrap()
    }
}

impl Transport for ScriptedTransport {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.reads += 1;
        self.want_read = false;
        self.want_write = false;

        let Some(mut chunk) = self.chunks.pop_front() else {
            self.want_read = !self.closed;
            return Ok(0);
        };

        let n = buf.len().min(chunk.len());
        buf[..n].copy_from_slice(&chunk[..n]);
        if n < chunk.len() {
            self.chunks.push_front(chunk.split_off(n));
        }
        Ok(n)
    }

    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.want_read = false;
        let n = self.write_limit.map_or(buf.len(), |limit| limit.min(buf.len()));
        self.want_write = n < buf.len();
        self.written.extend_from_slice(&buf[..n]);
        Ok(n)
    }

    fn want_read(&self) -> bool {
        self.want_read
    }

    fn want_write(&self) -> bool {
        self.want_write
    }
}
