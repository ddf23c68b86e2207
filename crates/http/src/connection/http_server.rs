use std::time::SystemTime;

use bytes::{Bytes, BytesMut};
use http::header::AUTHORIZATION;
use http::{HeaderValue, Method, StatusCode};
use tracing::{debug, info, trace, warn};

use crate::codec::{BodyAccumulator, HeaderParser, encode_response_head, encode_upgrade_head};
use crate::config::{Credentials, ServerConfig};
use crate::connection::auth::check_basic;
use crate::io::{RecvBuffer, SendBuffer, Transport};
use crate::protocol::{HttpError, RequestHeader, ResponseHead, UpgradeHead};

/// Where a connection is in its request/response cycle.
///
/// There is no separate "headers complete" phase: the call that completes the
/// header moves straight to `AwaitingBody`, or to `RequestComplete` when no body
/// is announced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    AwaitingHeaders,
    AwaitingBody,
    RequestComplete,
    Responding,
}

/// The server side of one HTTP/1.x connection.
///
/// `HttpServer` assembles one request at a time from partial reads and queues
/// responses for partial writes. It never blocks and never owns the socket: every
/// I/O operation borrows a [`Transport`], attempts a single read (or one flush) and
/// returns, so the caller's event loop decides when to call again.
///
/// A typical cycle:
///
/// 1. call [`receive_request`](HttpServer::receive_request) until it yields a header
/// 2. call [`receive_body`](HttpServer::receive_body) until it returns `true`
/// 3. dispatch on [`method`](HttpServer::method) / [`request_path`](HttpServer::request_path)
///    and [`body`](HttpServer::body), then [`feed_response`](HttpServer::feed_response)
/// 4. call [`send_response`](HttpServer::send_response) until
///    [`send_buffer_is_empty`](HttpServer::send_buffer_is_empty)
/// 5. reuse the connection if [`supports_persistent_connection`](HttpServer::supports_persistent_connection),
///    close it otherwise
#[derive(Debug)]
pub struct HttpServer {
    config: ServerConfig,
    recv_buffer: RecvBuffer,
    send_buffer: SendBuffer,
    header_parser: HeaderParser,
    body: BodyAccumulator,
    last_request_header: Option<RequestHeader>,
    accepts_persistent_connection: bool,
    accepts_gzip: bool,
    phase: Phase,
}

impl HttpServer {
    pub fn new() -> Self {
        Self::with_config(ServerConfig::default())
    }

    pub fn with_config(config: ServerConfig) -> Self {
        Self {
            recv_buffer: RecvBuffer::with_capacity(config.recv_buffer_size),
            send_buffer: SendBuffer::new(),
            header_parser: HeaderParser::new(),
            body: BodyAccumulator::new(),
            last_request_header: None,
            accepts_persistent_connection: true,
            accepts_gzip: false,
            phase: Phase::AwaitingHeaders,
            config,
        }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    #[inline]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Reads once if nothing is buffered; a read of nothing with no pending
    /// readiness means the peer is gone.
    fn fill_recv_buffer<T: Transport + ?Sized>(&mut self, io: &mut T) -> Result<(), HttpError> {
        if self.recv_buffer.is_empty() && self.recv_buffer.fill(io)? == 0 && !io.want_read() && !io.want_write() {
            let mid_request = match self.phase {
                Phase::AwaitingHeaders => !self.header_parser.is_empty(),
                Phase::AwaitingBody => true,
                Phase::RequestComplete | Phase::Responding => false,
            };
            if mid_request {
                warn!(phase = ?self.phase, "peer closed connection in the middle of a request");
            } else {
                debug!("peer closed connection");
            }
            return Err(HttpError::PeerClosed);
        }
        Ok(())
    }

    /// Tries to complete the next request header.
    ///
    /// Returns `Ok(None)` while the header is still incomplete; the bytes received
    /// so far are kept inside the parser. Once complete, the connection negotiation
    /// (keep-alive, gzip) is derived from the new header and any bytes received past
    /// the header stay buffered for [`receive_body`](HttpServer::receive_body).
    ///
    /// # Errors
    ///
    /// - [`HttpError::PeerClosed`] if the peer closed the connection
    /// - [`HttpError::Protocol`] for a malformed header or a bad `Content-Length`;
    ///   the header is still available through the accessors in the latter case
    /// - [`HttpError::Transport`] if reading failed
    pub fn receive_request<T: Transport + ?Sized>(&mut self, io: &mut T) -> Result<Option<RequestHeader>, HttpError> {
        self.fill_recv_buffer(io)?;

        self.header_parser.update(self.recv_buffer.window())?;
        if !self.header_parser.end_of_headers() {
            self.recv_buffer.clear();
            return Ok(None);
        }

        let header = self.header_parser.request_header()?;
        let put_back_length = self.header_parser.put_back_length();
        info!(
            method = %header.method(),
            path = header.path(),
            version = ?header.version(),
            "received request\n{}",
            self.header_parser.header_string()
        );

        self.recv_buffer.shift(self.recv_buffer.len() - put_back_length);
        self.last_request_header = Some(header.clone());
        self.body.reset(0);

        let content_length = header.content_length()?;
        self.body.reset(content_length);
        self.header_parser.reset();

        self.accepts_persistent_connection = header.wants_persistent_connection();
        self.accepts_gzip = header.accepts_gzip();
        self.phase = if content_length == 0 { Phase::RequestComplete } else { Phase::AwaitingBody };

        Ok(Some(header))
    }

    /// Collects body bytes of the last request.
    ///
    /// Returns `true` once the whole `Content-Length` has arrived, immediately so
    /// for requests without a body. Bytes past the body are left buffered for the
    /// next [`receive_request`](HttpServer::receive_request).
    ///
    /// # Errors
    ///
    /// [`HttpError::PeerClosed`] or [`HttpError::Transport`], as for `receive_request`.
    pub fn receive_body<T: Transport + ?Sized>(&mut self, io: &mut T) -> Result<bool, HttpError> {
        if self.body.is_complete() {
            return Ok(true);
        }

        self.fill_recv_buffer(io)?;

        let length = self.body.write(self.recv_buffer.window());
        self.recv_buffer.shift(length);
        trace!(received = self.body.written(), expected = self.body.target_length(), "received body bytes");

        let complete = self.body.is_complete();
        if complete {
            self.phase = Phase::RequestComplete;
        }
        Ok(complete)
    }

    /// Body of the last request, as far as it has been received.
    pub fn body(&self) -> &[u8] {
        self.body.as_bytes()
    }

    /// Takes the body of the last request out of the engine.
    pub fn take_body(&mut self) -> Bytes {
        self.body.take()
    }

    pub fn last_request_header(&self) -> Option<&RequestHeader> {
        self.last_request_header.as_ref()
    }

    pub fn method(&self) -> Option<&Method> {
        self.last_request_header.as_ref().map(RequestHeader::method)
    }

    pub fn request_path(&self) -> Option<&str> {
        self.last_request_header.as_ref().map(RequestHeader::path)
    }

    /// Queues a complete response. No I/O happens here.
    ///
    /// `headers` are extra header lines, each terminated with `\r\n`, written
    /// verbatim after the fixed ones. An empty `content_type` omits the header.
    pub fn feed_response(&mut self, status: StatusCode, headers: &str, body: impl Into<Bytes>, content_type: &str) {
        let body = body.into();
        let date = httpdate::fmt_http_date(SystemTime::now());

        let head = ResponseHead {
            content_type: Some(content_type).filter(|c| !c.is_empty()),
            allow_origin: self.config.allow_origin.as_deref().filter(|o| !o.is_empty()),
            gzip: self.supports_gzip(),
            close: !self.supports_persistent_connection(),
            extra_headers: headers,
            ..ResponseHead::new(status, &date, body.len())
        };

        let mut dst = BytesMut::new();
        encode_response_head(&head, &mut dst);
        debug!("sending response\n{}", String::from_utf8_lossy(&dst));

        self.send_buffer.push(dst.freeze());
        self.send_buffer.push(body);
        self.phase = Phase::Responding;
    }

    /// Queues a `200 OK` response without extra headers.
    pub fn feed_ok(&mut self, body: impl Into<Bytes>, content_type: &str) {
        self.feed_response(StatusCode::OK, "", body, content_type);
    }

    /// Queues a `101 Switching Protocols` response switching to `protocol`.
    pub fn feed_upgrade_response(&mut self, protocol: &str, headers: &str) {
        let mut dst = BytesMut::new();
        encode_upgrade_head(&UpgradeHead { protocol, extra_headers: headers }, &mut dst);
        debug!("sending upgrade response\n{}", String::from_utf8_lossy(&dst));

        self.send_buffer.push(dst.freeze());
        self.phase = Phase::Responding;
    }

    /// Writes as much of the queued response as the transport accepts right now.
    ///
    /// Returns the number of bytes written; 0 only means "try again when writable".
    ///
    /// # Errors
    ///
    /// [`HttpError::Transport`] if writing failed.
    pub fn send_response<T: Transport + ?Sized>(&mut self, io: &mut T) -> Result<usize, HttpError> {
        let sent = self.send_buffer.send(io)?;
        if self.send_buffer.is_empty() && self.phase == Phase::Responding {
            self.phase = Phase::AwaitingHeaders;
        }
        Ok(sent)
    }

    #[inline]
    pub fn send_buffer_is_empty(&self) -> bool {
        self.send_buffer.is_empty()
    }

    /// Checks the `Authorization` header of the last request.
    ///
    /// Always succeeds when no credentials are configured. Failing is not an
    /// error: the caller decides how to answer, usually with a `401`.
    pub fn authenticate(&self) -> bool {
        let Some(credentials) = &self.config.credentials else {
            return true;
        };

        let authorization = self
            .last_request_header
            .as_ref()
            .and_then(|header| header.headers().get(AUTHORIZATION))
            .map(HeaderValue::as_bytes);
        check_basic(credentials, authorization)
    }

    /// Installs Basic credentials. An empty username turns authentication off.
    pub fn set_username_password(&mut self, username: impl Into<String>, password: impl Into<String>) {
        let username = username.into();
        self.config.credentials = if username.is_empty() { None } else { Some(Credentials::new(username, password)) };
    }

    pub fn set_allow_origin(&mut self, origin: impl Into<String>) {
        self.config.allow_origin = Some(origin.into());
    }

    pub fn enable_keep_alive(&mut self) {
        self.config.keep_alive = true;
    }

    pub fn disable_keep_alive(&mut self) {
        self.config.keep_alive = false;
    }

    pub fn enable_gzip(&mut self) {
        self.config.gzip = true;
    }

    pub fn disable_gzip(&mut self) {
        self.config.gzip = false;
    }

    /// Whether the connection may be reused once the response is sent: the server
    /// allows keep-alive and the last request asked for it.
    #[inline]
    pub fn supports_persistent_connection(&self) -> bool {
        self.config.keep_alive && self.accepts_persistent_connection
    }

    /// Whether responses are announced as `Content-Encoding: gzip`: the server has
    /// gzip enabled and the last request accepts it.
    #[inline]
    pub fn supports_gzip(&self) -> bool {
        self.config.gzip && self.accepts_gzip
    }
}

impl Default for HttpServer {
    fn default() -> Self {
        Self::new()
    }
}
