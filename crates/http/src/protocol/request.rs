//! HTTP request header handling implementation.
//!
//! This module provides the core abstraction for a parsed HTTP request header.
//! It wraps the standard `http::Request` type and keeps the request-target exactly
//! as it was received, so RPC dispatching sees the raw path.

use http::header::{ACCEPT_ENCODING, CONNECTION, CONTENT_LENGTH};
use http::request::Parts;
use http::{HeaderMap, HeaderName, HeaderValue, Method, Request, Uri, Version};
use tracing::debug;

use crate::protocol::ParseError;
use crate::utils::has_token;

/// Represents an HTTP request header.
///
/// This struct wraps a `http::Request<()>` to provide:
/// - Access to standard HTTP header fields
/// - The raw request path as received on the wire
/// - The connection level negotiation derived from the fields
#[derive(Debug, Clone)]
pub struct RequestHeader {
    inner: Request<()>,
    path: String,
}

impl AsRef<Request<()>> for RequestHeader {
    fn as_ref(&self) -> &Request<()> {
        &self.inner
    }
}

impl RequestHeader {
    /// Consumes the header and returns the inner `Request<()>`.
    pub fn into_inner(self) -> Request<()> {
        self.inner
    }

    /// Attaches a body to this header, converting it into a full `Request<T>`.
    pub fn body<T>(self, body: T) -> Request<T> {
        self.inner.map(|()| body)
    }

    /// Returns a reference to the request's HTTP method.
    pub fn method(&self) -> &Method {
        self.inner.method()
    }

    /// Returns a reference to the request's URI.
    ///
    /// Targets `http::Uri` can not represent (unencoded `{`, `"`, `<` ...) yield `/`;
    /// [`path`](RequestHeader::path) always has the raw text.
    pub fn uri(&self) -> &Uri {
        self.inner.uri()
    }

    /// Returns the request-target exactly as it appeared in the request line.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the request's HTTP version.
    pub fn version(&self) -> Version {
        self.inner.version()
    }

    /// Returns a reference to the request's headers.
    pub fn headers(&self) -> &HeaderMap {
        self.inner.headers()
    }

    /// Returns the value of a header field as text, if present and visible ASCII.
    pub fn header_str(&self, name: impl http::header::AsHeaderName) -> Option<&str> {
        self.headers().get(name).and_then(|value| value.to_str().ok())
    }

    /// Parses the `Content-Length` field.
    ///
    /// An absent field means no body is expected and yields 0.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::InvalidContentLength`] if the value is not an integer
    /// or is negative.
    pub fn content_length(&self) -> Result<u64, ParseError> {
        let Some(value) = self.headers().get(CONTENT_LENGTH) else {
            return Ok(0);
        };

        let cl_str = value.to_str().map_err(|_e| ParseError::invalid_content_length("value can't to_str"))?;
        let length = cl_str
            .trim()
            .parse::<i64>()
            .map_err(|_e| ParseError::invalid_content_length(format!("value {cl_str} is not an integer")))?;

        u64::try_from(length).map_err(|_e| ParseError::invalid_content_length(format!("value {length} must not be negative")))
    }

    /// Whether the client allows the connection to be reused after this request.
    ///
    /// A `close` token always wins. Otherwise HTTP/1.1 is persistent by default
    /// and HTTP/1.0 needs an explicit `keep-alive` token.
    pub fn wants_persistent_connection(&self) -> bool {
        let connection = self.header_str(CONNECTION).unwrap_or_default();
        !has_token(connection, "close") && (self.version() == Version::HTTP_11 || has_token(connection, "keep-alive"))
    }

    /// Whether `gzip` appears as a whole token in `Accept-Encoding`.
    pub fn accepts_gzip(&self) -> bool {
        self.header_str(ACCEPT_ENCODING).is_some_and(|value| has_token(value, "gzip"))
    }
}

/// Converts request parts into a `RequestHeader`, using the URI text as the path.
impl From<Parts> for RequestHeader {
    #[inline]
    fn from(parts: Parts) -> Self {
        let path = parts.uri.to_string();
        Self { inner: Request::from_parts(parts, ()), path }
    }
}

/// Converts a parsed HTTP request into a `RequestHeader`.
///
/// Repeated fields keep their last occurrence.
impl TryFrom<httparse::Request<'_, '_>> for RequestHeader {
    type Error = ParseError;

    fn try_from(req: httparse::Request<'_, '_>) -> Result<Self, Self::Error> {
        let method = req.method.ok_or(ParseError::InvalidMethod)?;
        let method = Method::from_bytes(method.as_bytes()).map_err(|_e| ParseError::InvalidMethod)?;

        let path = req.path.ok_or(ParseError::InvalidUri)?;
        // `http::Uri` is stricter than the request line grammar; the raw path is kept either way
        let uri = path.parse::<Uri>().unwrap_or_else(|e| {
            debug!(path, cause = %e, "request-target is not a valid uri, using `/`");
            Uri::default()
        });

        let version = match req.version {
            Some(0) => Version::HTTP_10,
            Some(1) => Version::HTTP_11,
            v => return Err(ParseError::InvalidVersion(v)),
        };

        let mut inner = Request::new(());
        *inner.method_mut() = method;
        *inner.uri_mut() = uri;
        *inner.version_mut() = version;

        let headers = inner.headers_mut();
        headers.reserve(req.headers.len());
        for header in req.headers.iter() {
            let name = HeaderName::from_bytes(header.name.as_bytes()).map_err(ParseError::invalid_header)?;
            let value = HeaderValue::from_bytes(header.value).map_err(ParseError::invalid_header)?;
            headers.insert(name, value);
        }

        Ok(RequestHeader { inner, path: path.to_owned() })
    }
}
