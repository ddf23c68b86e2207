//! The per-connection request/response engine.
//!
//! # Components
//!
//! - [`HttpServer`]: owns the buffers and parsing state of one connection and
//!   drives it through the [`Phase`]s of a request/response cycle:
//!   - Receives request headers and `Content-Length` bodies from partial reads
//!   - Negotiates keep-alive and gzip per request
//!   - Checks Basic credentials
//!   - Queues responses and flushes them through partial writes
//!
//! The engine performs no I/O of its own: every receiving or sending call borrows a
//! [`Transport`](crate::io::Transport) and returns as soon as that transport has
//! nothing more to offer.

mod auth;
mod http_server;

pub use http_server::{HttpServer, Phase};
