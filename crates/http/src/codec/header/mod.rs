//! HTTP header processing module
//!
//! # Components
//!
//! - [`HeaderParser`]: Incrementally parses request headers from raw bytes
//!   - Tolerates headers split across any number of reads
//!   - Reports the bytes received past the end of headers
//!   - Enforces header size and count limits
//!
//! - [`encode_response_head`] / [`encode_upgrade_head`]: Serialize response heads
//!   - Fixed header order expected by RPC clients
//!   - Negotiated `Content-Encoding` and `Connection` headers

mod header_encoder;
mod header_parser;

pub use header_encoder::{encode_response_head, encode_upgrade_head};
pub use header_parser::HeaderParser;
