//! HTTP response head serialization.
//!
//! Every regular response carries the same fixed header set, in this order:
//!
//! ```text
//! HTTP/1.1 <status> <reason>
//! Date: <date>
//! Content-Length: <n>
//! Expires: <date>
//! Cache-Control: no-cache
//! [Content-Type: <type>]
//! [Access-Control-Allow-Origin: <origin>]
//! [Content-Encoding: gzip]
//! [Connection: close]
//! <caller supplied lines>
//! ```
//!
//! followed by an empty line.

use bytes::{BufMut, BytesMut};
use http::HeaderValue;

use crate::protocol::{ResponseHead, UpgradeHead, reason_phrase};

/// Initial buffer size allocated for header serialization
const INIT_HEADER_SIZE: usize = 256;

/// Serializes a regular response head, including the terminating empty line.
pub fn encode_response_head(head: &ResponseHead<'_>, dst: &mut BytesMut) {
    dst.reserve(INIT_HEADER_SIZE + head.extra_headers.len());

    dst.put_slice(b"HTTP/1.1 ");
    dst.put_slice(head.status.as_str().as_bytes());
    dst.put_u8(b' ');
    dst.put_slice(reason_phrase(head.status).as_bytes());
    dst.put_slice(b"\r\n");

    put_header(dst, "Date", head.date);
    put_header_bytes(dst, "Content-Length", HeaderValue::from(head.content_length).as_bytes());
    put_header(dst, "Expires", head.date);
    dst.put_slice(b"Cache-Control: no-cache\r\n");

    if let Some(content_type) = head.content_type {
        put_header(dst, "Content-Type", content_type);
    }
    if let Some(origin) = head.allow_origin {
        put_header(dst, "Access-Control-Allow-Origin", origin);
    }
    if head.gzip {
        dst.put_slice(b"Content-Encoding: gzip\r\n");
    }
    if head.close {
        dst.put_slice(b"Connection: close\r\n");
    }

    dst.put_slice(head.extra_headers.as_bytes());
    dst.put_slice(b"\r\n");
}

/// Serializes a `101 Switching Protocols` head, including the terminating empty line.
pub fn encode_upgrade_head(head: &UpgradeHead<'_>, dst: &mut BytesMut) {
    dst.reserve(INIT_HEADER_SIZE + head.extra_headers.len());

    dst.put_slice(b"HTTP/1.1 101 Switching Protocols\r\n");
    put_header(dst, "Upgrade", head.protocol);
    dst.put_slice(b"Connection: Upgrade\r\n");
    dst.put_slice(head.extra_headers.as_bytes());
    dst.put_slice(b"\r\n");
}

#[inline]
fn put_header(dst: &mut BytesMut, name: &str, value: &str) {
    put_header_bytes(dst, name, value.as_bytes());
}

#[inline]
fn put_header_bytes(dst: &mut BytesMut, name: &str, value: &[u8]) {
    dst.put_slice(name.as_bytes());
    dst.put_slice(b": ");
    dst.put_slice(value);
    dst.put_slice(b"\r\n");
}
