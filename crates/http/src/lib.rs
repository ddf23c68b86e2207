//! An embeddable, non-blocking HTTP/1.x endpoint for RPC servers
//!
//! This crate provides the server side of one HTTP/1.x connection as a state machine
//! that an existing event loop can drive. It never owns a socket and never blocks:
//! each call borrows a [`Transport`](io::Transport), makes as much progress as the
//! transport allows right now and returns, so readiness polling stays with the caller.
//!
//! # Features
//!
//! - Incremental request header parsing across arbitrary partial reads
//! - `Content-Length` request bodies, with pipelined bytes preserved
//! - Keep-alive negotiation for HTTP/1.0 and HTTP/1.1 clients
//! - `Content-Encoding: gzip` announcement for clients accepting it
//! - Optional HTTP Basic authentication
//! - CORS `Access-Control-Allow-Origin` stamping
//! - `101 Switching Protocols` responses for protocol upgrades
//! - Queued responses flushed through partial writes
//!
//! # Example
//!
//! ```no_run
//! use std::error::Error;
//! use tokio::net::TcpListener;
//! use tracing::{error, info, warn, Level};
//! use tracing_subscriber::FmtSubscriber;
//! use micro_rpc_http::connection::HttpServer;
//! use micro_rpc_http::io::TokioTransport;
//!
//! #[tokio::main]
//! async fn main() {
//!     let subscriber = FmtSubscriber::builder()
//!         .with_max_level(Level::INFO)
//!         .finish();
//!     tracing::subscriber::set_global_default(subscriber)
//!         .expect("setting default subscriber failed");
//!
//!     let tcp_listener = match TcpListener::bind("127.0.0.1:6800").await {
//!         Ok(tcp_listener) => tcp_listener,
//!         Err(e) => {
//!             error!(cause = %e, "bind server error");
//!             return;
//!         }
//!     };
//!
//!     loop {
//!         let (tcp_stream, _remote_addr) = match tcp_listener.accept().await {
//!             Ok(stream_and_addr) => stream_and_addr,
//!             Err(e) => {
//!                 warn!(cause = %e, "failed to accept");
//!                 continue;
//!             }
//!         };
//!
//!         tokio::spawn(async move {
//!             match serve(tcp_stream).await {
//!                 Ok(()) => info!("connection shutdown"),
//!                 Err(e) => error!("service has error, cause {}, connection shutdown", e),
//!             }
//!         });
//!     }
//! }
//!
//! async fn serve(stream: tokio::net::TcpStream) -> Result<(), Box<dyn Error + Send + Sync>> {
//!     let mut server = HttpServer::new();
//!     loop {
//!         let header = loop {
//!             stream.readable().await?;
//!             if let Some(header) = server.receive_request(&mut TokioTransport::new(&stream))? {
//!                 break header;
//!             }
//!         };
//!         while !server.receive_body(&mut TokioTransport::new(&stream))? {
//!             stream.readable().await?;
//!         }
//!
//!         info!(path = header.path(), body_size = server.body().len(), "dispatching");
//!         server.feed_ok(server.body().to_vec(), "application/json-rpc");
//!
//!         while !server.send_buffer_is_empty() {
//!             stream.writable().await?;
//!             server.send_response(&mut TokioTransport::new(&stream))?;
//!         }
//!         if !server.supports_persistent_connection() {
//!             return Ok(());
//!         }
//!     }
//! }
//! ```
//!
//! # Architecture
//!
//! The crate is organized into several key modules:
//!
//! - [`connection`]: The per-connection engine, [`connection::HttpServer`]
//! - [`io`]: The transport boundary and the receive/send buffers
//! - [`codec`]: Header parsing, body accumulation and response head encoding
//! - [`protocol`]: Request/response types and errors
//! - [`config`]: Server side switches, credentials and buffer sizes
//!
//! ## Error Handling
//!
//! - [`protocol::HttpError`]: Top-level error type, distinguishing a peer that went
//!   away from a protocol violation and from a transport failure
//! - [`protocol::ParseError`]: Request parsing errors
//! - [`config::ConfigError`]: Invalid configuration values
//!
//! # Limitations
//!
//! - HTTP/1.0 and HTTP/1.1 only
//! - No chunked request bodies
//! - No TLS or compression; both belong to the embedding application
//! - Maximum header size: 8KB
//! - Maximum number of headers: 64

pub mod codec;
pub mod config;
pub mod connection;
pub mod io;
pub mod protocol;

mod utils;
pub(crate) use utils::ensure;
