//! HTTP response head definitions.
//!
//! The endpoint always answers with the same fixed header set, so a response head
//! is a plain description of the values that vary between responses. Serializing
//! it is the job of the [`codec`](crate::codec) module.

use http::StatusCode;

/// The variable parts of a regular response head.
///
/// `date` is used for both `Date` and `Expires`, which effectively disables caching.
#[derive(Debug, Clone, Copy)]
pub struct ResponseHead<'a> {
    pub status: StatusCode,
    pub date: &'a str,
    pub content_length: usize,
    pub content_type: Option<&'a str>,
    pub allow_origin: Option<&'a str>,
    pub gzip: bool,
    pub close: bool,
    /// Caller supplied header lines, each already terminated with `\r\n`.
    pub extra_headers: &'a str,
}

impl<'a> ResponseHead<'a> {
    pub fn new(status: StatusCode, date: &'a str, content_length: usize) -> Self {
        Self {
            status,
            date,
            content_length,
            content_type: None,
            allow_origin: None,
            gzip: false,
            close: false,
            extra_headers: "",
        }
    }
}

/// The head of a `101 Switching Protocols` response.
#[derive(Debug, Clone, Copy)]
pub struct UpgradeHead<'a> {
    pub protocol: &'a str,
    pub extra_headers: &'a str,
}
