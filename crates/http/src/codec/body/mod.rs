//! HTTP request body handling
//!
//! Only bodies delimited by `Content-Length` are supported; chunked transfer
//! encoding is not.

mod body_accumulator;

pub use body_accumulator::BodyAccumulator;
