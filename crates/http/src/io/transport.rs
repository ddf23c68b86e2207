//! The transport boundary of the engine.
//!
//! The engine never owns a socket. It borrows a [`Transport`] for the duration of a
//! single call, performs at most one non-blocking read (or one flush attempt) and
//! returns. Readiness polling, TLS and connection lifecycle stay with the caller.

use std::io::{self, ErrorKind, Read, Write};

/// A non-blocking byte transport.
///
/// `read` and `write` never block: when the underlying source has nothing to offer
/// (or cannot accept data) they return `Ok(0)` and raise [`want_read`](Transport::want_read)
/// or [`want_write`](Transport::want_write). A read of `Ok(0)` with both flags
/// cleared means the peer closed the connection.
#[cfg_attr(test, mockall::automock)]
pub trait Transport {
    /// Reads into `buf`, returning the number of bytes read.
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize>;

    /// Writes from `buf`, returning the number of bytes accepted.
    fn write(&mut self, buf: &[u8]) -> io::Result<usize>;

    /// Whether the last operation stopped because more input may arrive later.
    fn want_read(&self) -> bool;

    /// Whether the last operation stopped because the transport cannot take output yet.
    fn want_write(&self) -> bool;
}

/// Maps a `WouldBlock` result to `Ok(0)`, raising `flag`.
fn would_block(result: io::Result<usize>, flag: &mut bool) -> io::Result<usize> {
    match result {
        Err(e) if e.kind() == ErrorKind::WouldBlock => {
            *flag = true;
            Ok(0)
        }
        result => result,
    }
}

/// Adapts any non-blocking `std::io` stream, e.g. a `std::net::TcpStream` after
/// `set_nonblocking(true)`.
#[derive(Debug)]
pub struct NonBlockingIo<S> {
    inner: S,
    want_read: bool,
    want_write: bool,
}

impl<S> NonBlockingIo<S> {
    pub fn new(inner: S) -> Self {
        Self { inner, want_read: false, want_write: false }
    }

    pub fn get_ref(&self) -> &S {
        &self.inner
    }

    pub fn get_mut(&mut self) -> &mut S {
        &mut self.inner
    }

    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: Read + Write> Transport for NonBlockingIo<S> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.want_read = false;
        self.want_write = false;
        loop {
            match self.inner.read(buf) {
                Err(e) if e.kind() == ErrorKind::Interrupted => {}
                result => return would_block(result, &mut self.want_read),
            }
        }
    }

    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.want_read = false;
        self.want_write = false;
        loop {
            match self.inner.write(buf) {
                Err(e) if e.kind() == ErrorKind::Interrupted => {}
                result => return would_block(result, &mut self.want_write),
            }
        }
    }

    fn want_read(&self) -> bool {
        self.want_read
    }

    fn want_write(&self) -> bool {
        self.want_write
    }
}

/// Adapts a borrowed `tokio::net::TcpStream`.
///
/// Reads and writes go through `try_read`/`try_write`, so the engine stays
/// synchronous while a tokio task waits on `readable()`/`writable()` between calls.
#[derive(Debug)]
pub struct TokioTransport<'a> {
    stream: &'a tokio::net::TcpStream,
    want_read: bool,
    want_write: bool,
}

impl<'a> TokioTransport<'a> {
    pub fn new(stream: &'a tokio::net::TcpStream) -> Self {
        Self { stream, want_read: false, want_write: false }
    }
}

impl Transport for TokioTransport<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.want_read = false;
        self.want_write = false;
        would_block(self.stream.try_read(buf), &mut self.want_read)
    }

    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.want_read = false;
        self.want_write = false;
        would_block(self.stream.try_write(buf), &mut self.want_write)
    }

    fn want_read(&self) -> bool {
        self.want_read
    }

    fn want_write(&self) -> bool {
        self.want_write
    }
}
