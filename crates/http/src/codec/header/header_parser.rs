//! Incremental HTTP request header parser.
//!
//! Headers may arrive split across any number of partial reads. [`HeaderParser`]
//! accumulates everything it is fed and re-scans the accumulation with `httparse`
//! until the blank line ending the header block shows up (`\r\n\r\n`, or a bare
//! `\n\n` from lenient clients).
//!
//! Bytes fed after that blank line are not part of the header: they are the start of
//! the body (or of a following request) and are reported by
//! [`put_back_length`](HeaderParser::put_back_length) so the caller can keep them.
//!
//! # Limits
//!
//! - Maximum number of headers: 64
//! - Maximum header size: 8KB

use bytes::BytesMut;
use httparse::{Error, Status};
use tracing::trace;

use crate::ensure;
use crate::protocol::{ParseError, RequestHeader};

/// Maximum number of headers allowed in a request
const MAX_HEADER_NUM: usize = 64;

/// Maximum size in bytes allowed for the entire header section
const MAX_HEADER_BYTES: usize = 8 * 1024;

const AUTHORIZATION_PREFIX: &str = "authorization:";

#[derive(Debug, Default)]
pub struct HeaderParser {
    buf: BytesMut,
    /// Length of the header block, known once the end of headers was seen.
    header_len: Option<usize>,
}

impl HeaderParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `bytes` to the accumulation and looks for the end of the headers.
    ///
    /// Once the end of headers was found, further bytes only extend the put-back data.
    ///
    /// # Errors
    ///
    /// Returns `ParseError` if:
    /// - The accumulated bytes can not be the start of a valid request
    /// - The number of headers exceeds `MAX_HEADER_NUM`
    /// - The header block grows beyond `MAX_HEADER_BYTES`
    pub fn update(&mut self, bytes: &[u8]) -> Result<(), ParseError> {
        self.buf.extend_from_slice(bytes);
        if self.header_len.is_some() {
            return Ok(());
        }

        let mut headers = [httparse::EMPTY_HEADER; MAX_HEADER_NUM];
        let mut req = httparse::Request::new(&mut headers);

        let status = req.parse(&self.buf).map_err(|e| match e {
            Error::TooManyHeaders => ParseError::too_many_headers(MAX_HEADER_NUM),
            e => ParseError::invalid_header(e.to_string()),
        })?;

        match status {
            Status::Complete(header_len) => {
                trace!(header_size = header_len, "found end of headers");
                ensure!(header_len <= MAX_HEADER_BYTES, ParseError::too_large_header(header_len, MAX_HEADER_BYTES));
                self.header_len = Some(header_len);
            }
            Status::Partial => {
                ensure!(self.buf.len() <= MAX_HEADER_BYTES, ParseError::too_large_header(self.buf.len(), MAX_HEADER_BYTES));
            }
        }

        Ok(())
    }

    /// Whether the blank line ending the header block has been received.
    #[inline]
    pub fn end_of_headers(&self) -> bool {
        self.header_len.is_some()
    }

    /// Builds the structured request header from the accumulated header block.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::IncompleteHeader`] before the end of headers, or the
    /// parse error describing a malformed request line or field.
    pub fn request_header(&self) -> Result<RequestHeader, ParseError> {
        let header_len = self.header_len.ok_or(ParseError::IncompleteHeader)?;

        let mut headers = [httparse::EMPTY_HEADER; MAX_HEADER_NUM];
        let mut req = httparse::Request::new(&mut headers);
        match req.parse(&self.buf[..header_len]).map_err(ParseError::invalid_header)? {
            Status::Complete(_) => RequestHeader::try_from(req),
            Status::Partial => Err(ParseError::IncompleteHeader),
        }
    }

    /// Whether nothing has been fed since the last reset.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Number of accumulated bytes lying past the end of headers.
    #[inline]
    pub fn put_back_length(&self) -> usize {
        self.header_len.map_or(0, |header_len| self.buf.len() - header_len)
    }

    /// The header block as text, for logging. The value of `Authorization` is masked.
    pub fn header_string(&self) -> String {
        let header_len = self.header_len.unwrap_or(self.buf.len());
        let text = String::from_utf8_lossy(&self.buf[..header_len]);

        let mut out = String::with_capacity(text.len());
        for line in text.split_inclusive('\n') {
            let is_authorization = line
                .get(..AUTHORIZATION_PREFIX.len())
                .is_some_and(|prefix| prefix.eq_ignore_ascii_case(AUTHORIZATION_PREFIX));
            if is_authorization {
                out.push_str("Authorization: <redacted>");
                out.push_str(if line.ends_with("\r\n") { "\r\n" } else { "\n" });
            } else {
                out.push_str(line);
            }
        }
        out
    }

    /// Forgets everything, ready for the next request.
    pub fn reset(&mut self) {
        self.buf.clear();
        self.header_len = None;
    }
}
