//! Byte-level I/O plumbing, with no knowledge of HTTP.
//!
//! # Components
//!
//! - [`Transport`]: the non-blocking read/write capability the engine borrows per call
//!   - [`NonBlockingIo`]: adapter for non-blocking `std::io` streams
//!   - [`TokioTransport`]: adapter for a borrowed `tokio::net::TcpStream`
//! - [`RecvBuffer`]: the incoming byte window, filled on demand and consumed from the front
//! - [`SendBuffer`]: the outgoing chunk queue, flushed as far as the transport allows

mod recv_buffer;
mod send_buffer;
mod transport;

#[cfg(test)]
pub(crate) mod testing;

pub use recv_buffer::{DEFAULT_RECV_BUFFER_SIZE, RecvBuffer};
pub use send_buffer::SendBuffer;
pub use transport::{NonBlockingIo, TokioTransport, Transport};

#[cfg(test)]
pub(crate) use transport::MockTransport;
