use std::io;
use thiserror::Error;

/// Errors surfaced by the request/response engine.
///
/// Every variant is fatal for the current connection; the engine never retries
/// internally, retrying on readiness is left to the caller's event loop.
#[derive(Debug, Error)]
pub enum HttpError {
    #[error("connection closed by peer")]
    PeerClosed,

    #[error("protocol error: {source}")]
    Protocol {
        #[from]
        source: ParseError,
    },

    #[error("transport error: {source}")]
    Transport {
        #[from]
        source: io::Error,
    },
}

impl HttpError {
    #[inline]
    pub fn is_peer_closed(&self) -> bool {
        matches!(self, HttpError::PeerClosed)
    }

    #[inline]
    pub fn is_protocol(&self) -> bool {
        matches!(self, HttpError::Protocol { .. })
    }
}

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("header size too large, current: {current_size} exceed the limit {max_size}")]
    TooLargeHeader { current_size: usize, max_size: usize },

    #[error("header number exceed the limit {max_num}")]
    TooManyHeaders { max_num: usize },

    #[error("invalid header: {reason}")]
    InvalidHeader { reason: String },

    #[error("invalid http version: {0:?}")]
    InvalidVersion(Option<u8>),

    #[error("invalid http method")]
    InvalidMethod,

    #[error("invalid http uri")]
    InvalidUri,

    #[error("invalid content-length header: {reason}")]
    InvalidContentLength { reason: String },

    #[error("end of headers not reached yet")]
    IncompleteHeader,
}

impl ParseError {
    pub fn too_large_header(current_size: usize, max_size: usize) -> Self {
        Self::TooLargeHeader { current_size, max_size }
    }

    pub fn too_many_headers(max_num: usize) -> Self {
        Self::TooManyHeaders { max_num }
    }

    pub fn invalid_header<S: ToString>(str: S) -> Self {
        Self::InvalidHeader { reason: str.to_string() }
    }

    pub fn invalid_content_length<S: ToString>(str: S) -> Self {
        Self::InvalidContentLength { reason: str.to_string() }
    }
}
