//! HTTP codec module for parsing requests and serializing responses
//!
//! Nothing in here performs I/O: the parser is fed byte slices and the encoders
//! write into a `BytesMut`.
//!
//! # Architecture
//!
//! - Request handling:
//!   - [`HeaderParser`]: incremental header parsing with byte put-back
//!   - [`BodyAccumulator`]: Content-Length bounded body collection
//!
//! - Response handling:
//!   - [`encode_response_head`]: the fixed response header set
//!   - [`encode_upgrade_head`]: the `101 Switching Protocols` head
//!
//! # Example
//!
//! ```
//! use micro_rpc_http::codec::HeaderParser;
//!
//! let mut parser = HeaderParser::new();
//! parser.update(b"GET /jsonrpc HTTP/1.1\r\nHo").unwrap();
//! assert!(!parser.end_of_headers());
//!
//! parser.update(b"st: localhost\r\n\r\n{}").unwrap();
//! assert!(parser.end_of_headers());
//! assert_eq!(parser.put_back_length(), 2);
//! assert_eq!(parser.request_header().unwrap().path(), "/jsonrpc");
//! ```

mod body;
mod header;

pub use body::BodyAccumulator;
pub use header::{HeaderParser, encode_response_head, encode_upgrade_head};
