//! Client error types

use crate::server::Server;
use crate::transport::TransportError;
use thiserror::Error;

/// Errors surfaced by the client to its callers
///
/// A response that was delivered but reports failure (non-2xx, backend error)
/// is not an error here; it comes back as a non-succeeded
/// [`ActionResult`](crate::action::ActionResult).
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Could not connect to {server}: {source}")]
    CouldNotConnect {
        server: Server,
        #[source]
        source: TransportError,
    },

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("No server available in the pool")]
    EmptyPool,

    #[error("Malformed response from {url}: {reason}")]
    MalformedResponse {
        url: String,
        content_type: Option<String>,
        reason: String,
    },

    #[error("Invalid server address: {0}")]
    InvalidServer(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Client has been shut down")]
    Shutdown,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl ClientError {
    /// Get the error type as a string for metrics labeling
    pub fn error_type(&self) -> &'static str {
        match self {
            ClientError::CouldNotConnect { .. } => "could_not_connect",
            ClientError::Transport(e) => e.kind.as_str(),
            ClientError::EmptyPool => "empty_pool",
            ClientError::MalformedResponse { .. } => "malformed_response",
            ClientError::InvalidServer(_) => "invalid_server",
            ClientError::Config(_) => "config",
            ClientError::Shutdown => "shutdown",
            ClientError::Io(_) => "io",
            ClientError::Json(_) => "json",
            ClientError::Toml(_) => "toml",
            ClientError::Yaml(_) => "yaml",
        }
    }

    /// The server a connectivity failure was observed against, if any
    pub fn unreachable_server(&self) -> Option<&Server> {
        match self {
            ClientError::CouldNotConnect { server, .. } => Some(server),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;
