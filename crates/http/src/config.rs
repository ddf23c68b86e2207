//! Engine configuration.
//!
//! Everything here is fixed for the lifetime of a connection: the server side
//! keep-alive and gzip switches, the CORS origin stamped on every response, the
//! optional Basic credentials and the receive window size.

use thiserror::Error;

use crate::io::DEFAULT_RECV_BUFFER_SIZE;

/// Username/password pair checked by Basic authentication.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self { username: username.into(), password: password.into() }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials").field("username", &self.username).field("password", &"<redacted>").finish()
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub(crate) keep_alive: bool,
    pub(crate) gzip: bool,
    pub(crate) allow_origin: Option<String>,
    pub(crate) credentials: Option<Credentials>,
    pub(crate) recv_buffer_size: usize,
}

impl ServerConfig {
    pub fn builder() -> ServerConfigBuilder {
        ServerConfigBuilder::new()
    }

    pub fn keep_alive(&self) -> bool {
        self.keep_alive
    }

    pub fn gzip(&self) -> bool {
        self.gzip
    }

    pub fn allow_origin(&self) -> Option<&str> {
        self.allow_origin.as_deref()
    }

    pub fn credentials(&self) -> Option<&Credentials> {
        self.credentials.as_ref()
    }

    pub fn recv_buffer_size(&self) -> usize {
        self.recv_buffer_size
    }
}

/// Keep-alive on, gzip off, no origin, no credentials, 16KB receive window.
impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            keep_alive: true,
            gzip: false,
            allow_origin: None,
            credentials: None,
            recv_buffer_size: DEFAULT_RECV_BUFFER_SIZE,
        }
    }
}

#[derive(Debug)]
pub struct ServerConfigBuilder {
    config: ServerConfig,
}

impl ServerConfigBuilder {
    fn new() -> Self {
        Self { config: ServerConfig::default() }
    }

    pub fn keep_alive(mut self, keep_alive: bool) -> Self {
        self.config.keep_alive = keep_alive;
        self
    }

    /// Allows `Content-Encoding: gzip` on responses to clients that accept it.
    ///
    /// The engine does not compress anything itself; enable this only when the
    /// bodies handed to it are already gzip encoded.
    pub fn gzip(mut self, gzip: bool) -> Self {
        self.config.gzip = gzip;
        self
    }

    pub fn allow_origin(mut self, origin: impl Into<String>) -> Self {
        self.config.allow_origin = Some(origin.into());
        self
    }

    pub fn credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.config.credentials = Some(Credentials::new(username, password));
        self
    }

    pub fn recv_buffer_size(mut self, size: usize) -> Self {
        self.config.recv_buffer_size = size;
        self
    }

    /// # Errors
    ///
    /// Fails on a zero sized receive window or credentials with an empty username.
    pub fn build(self) -> Result<ServerConfig, ConfigError> {
        if self.config.recv_buffer_size == 0 {
            return Err(ConfigError::ZeroRecvBufferSize);
        }
        if self.config.credentials.as_ref().is_some_and(|c| c.username.is_empty()) {
            return Err(ConfigError::EmptyUsername);
        }
        Ok(self.config)
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("receive buffer size must be greater than zero")]
    ZeroRecvBufferSize,
    #[error("username of the credentials must not be empty")]
    EmptyUsername,
}
