//! HTTP transport boundary
//!
//! The executor never touches sockets itself. It hands a [`PreparedRequest`]
//! to a [`Transport`] and gets back either the raw response or a
//! [`TransportError`] tagged with a [`FailureKind`]. Retry decisions and
//! pool eviction are made on that tag alone.

mod http;

pub use http::ReqwestTransport;

use crate::server::Server;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// HTTP method of a request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RestMethod {
    Get,
    Post,
    Put,
    Delete,
    Head,
}

impl RestMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            RestMethod::Get => "GET",
            RestMethod::Post => "POST",
            RestMethod::Put => "PUT",
            RestMethod::Delete => "DELETE",
            RestMethod::Head => "HEAD",
        }
    }

    /// Parse a method name, case-insensitively
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_uppercase().as_str() {
            "GET" => Some(RestMethod::Get),
            "POST" => Some(RestMethod::Post),
            "PUT" => Some(RestMethod::Put),
            "DELETE" => Some(RestMethod::Delete),
            "HEAD" => Some(RestMethod::Head),
            _ => None,
        }
    }

    /// Whether a body may be sent with this method
    pub fn allows_body(&self) -> bool {
        !matches!(self, RestMethod::Head)
    }
}

impl fmt::Display for RestMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Closed set of physical failure kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// No connection could be established to the target server
    ConnectRefused,
    /// Connection reset or closed mid-exchange
    ConnectionReset,
    /// Host name could not be resolved
    NameResolution,
    /// TLS handshake or certificate failure
    TlsHandshake,
    /// Connect or read timeout
    Timeout,
    /// Malformed HTTP exchange
    Protocol,
    /// Anything else
    Other,
}

impl FailureKind {
    /// Get kind as a string for metrics and logs
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::ConnectRefused => "connect_refused",
            FailureKind::ConnectionReset => "connection_reset",
            FailureKind::NameResolution => "name_resolution",
            FailureKind::TlsHandshake => "tls_handshake",
            FailureKind::Timeout => "timeout",
            FailureKind::Protocol => "protocol",
            FailureKind::Other => "other",
        }
    }

    /// Whether this failure means the target server itself could not be reached
    pub fn is_connect_failure(&self) -> bool {
        matches!(self, FailureKind::ConnectRefused)
    }

    /// Kinds retried by [`MaxAttemptsRetry`](crate::retry::MaxAttemptsRetry) by default
    pub fn default_recoverable() -> Vec<FailureKind> {
        vec![
            FailureKind::ConnectRefused,
            FailureKind::ConnectionReset,
            FailureKind::NameResolution,
            FailureKind::TlsHandshake,
        ]
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A failed physical attempt
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind} error for {url}: {message}")]
pub struct TransportError {
    pub kind: FailureKind,
    pub url: String,
    pub message: String,
}

impl TransportError {
    pub fn new(kind: FailureKind, url: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            url: url.into(),
            message: message.into(),
        }
    }
}

/// Basic-auth credentials
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: Option<String>,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: Option<String>) -> Self {
        Self {
            username: username.into(),
            password,
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// A request bound to one server, ready for dispatch
#[derive(Debug, Clone)]
pub struct PreparedRequest {
    pub method: RestMethod,
    pub server: Server,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<Vec<u8>>,
    /// Overrides the transport's request timeout for this request
    pub timeout: Option<Duration>,
    pub credentials: Option<Credentials>,
}

impl fmt::Display for PreparedRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.url)
    }
}

/// Raw response as delivered by the transport
#[derive(Debug, Clone, Default)]
pub struct RawResponse {
    pub status: u16,
    pub reason: Option<String>,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl RawResponse {
    /// Whether the status is in the 2xx range
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends prepared requests over the wire
#[async_trait]
pub trait Transport: Send + Sync {
    /// Perform one physical attempt
    async fn dispatch(&self, request: &PreparedRequest) -> Result<RawResponse, TransportError>;
}
