//! reqwest-backed transport

use super::{FailureKind, PreparedRequest, RawResponse, RestMethod, Transport, TransportError};
use crate::error::{ClientError, Result};
use async_trait::async_trait;
use std::error::Error as StdError;
use std::io;
use std::time::Duration;

/// Transport over a pooled `reqwest::Client`
#[derive(Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Build a transport with connect and overall request timeouts
    pub fn new(connect_timeout: Duration, read_timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .connect_timeout(connect_timeout)
            .timeout(read_timeout)
            .build()
            .map_err(|e| ClientError::Config(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { client })
    }

    /// Wrap an existing client
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn dispatch(
        &self,
        request: &PreparedRequest,
    ) -> std::result::Result<RawResponse, TransportError> {
        let method = match request.method {
            RestMethod::Get => reqwest::Method::GET,
            RestMethod::Post => reqwest::Method::POST,
            RestMethod::Put => reqwest::Method::PUT,
            RestMethod::Delete => reqwest::Method::DELETE,
            RestMethod::Head => reqwest::Method::HEAD,
        };

        let mut builder = self.client.request(method, &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }
        if let Some(timeout) = request.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(credentials) = &request.credentials {
            builder = builder.basic_auth(&credentials.username, credentials.password.as_ref());
        }

        let response = builder
            .send()
            .await
            .map_err(|e| to_transport_error(&e, &request.url))?;

        let status = response.status();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let body = response
            .bytes()
            .await
            .map_err(|e| to_transport_error(&e, &request.url))?;

        Ok(RawResponse {
            status: status.as_u16(),
            reason: status.canonical_reason().map(str::to_string),
            content_type,
            body: body.to_vec(),
        })
    }
}

fn to_transport_error(err: &reqwest::Error, url: &str) -> TransportError {
    TransportError::new(classify(err), url, error_chain(err))
}

/// Map a reqwest error onto a failure kind
///
/// The I/O error kind deep in the source chain is the most reliable signal;
/// resolver and TLS failures only surface as text.
fn classify(err: &reqwest::Error) -> FailureKind {
    let mut source: Option<&(dyn StdError + 'static)> = err.source();
    while let Some(e) = source {
        if let Some(io_err) = e.downcast_ref::<io::Error>() {
            if let Some(kind) = classify_io(io_err.kind()) {
                return kind;
            }
        }
        source = e.source();
    }

    if err.is_timeout() {
        return FailureKind::Timeout;
    }

    // The top-level message embeds the request URL, so only its causes are matched
    classify_message(&source_chain(err).to_lowercase()).unwrap_or_else(|| {
        if err.is_connect() {
            FailureKind::ConnectRefused
        } else if err.is_request() || err.is_body() || err.is_decode() {
            FailureKind::Protocol
        } else {
            FailureKind::Other
        }
    })
}

fn classify_io(kind: io::ErrorKind) -> Option<FailureKind> {
    match kind {
        io::ErrorKind::ConnectionRefused => Some(FailureKind::ConnectRefused),
        io::ErrorKind::ConnectionReset
        | io::ErrorKind::ConnectionAborted
        | io::ErrorKind::BrokenPipe
        | io::ErrorKind::UnexpectedEof => Some(FailureKind::ConnectionReset),
        io::ErrorKind::TimedOut => Some(FailureKind::Timeout),
        _ => None,
    }
}

fn classify_message(message: &str) -> Option<FailureKind> {
    if message.contains("dns error")
        || message.contains("failed to lookup address")
        || message.contains("name or service not known")
    {
        Some(FailureKind::NameResolution)
    } else if message.contains("tls")
        || message.contains("certificate")
        || message.contains("handshake")
        || message.contains("fatal alert")
    {
        Some(FailureKind::TlsHandshake)
    } else if message.contains("connection closed") || message.contains("connection reset") {
        Some(FailureKind::ConnectionReset)
    } else {
        None
    }
}

fn error_chain(err: &reqwest::Error) -> String {
    let causes = source_chain(err);
    if causes.is_empty() {
        err.to_string()
    } else {
        format!("{}: {}", err, causes)
    }
}

fn source_chain(err: &reqwest::Error) -> String {
    let mut parts = Vec::new();
    let mut source = err.source();
    while let Some(e) = source {
        parts.push(e.to_string());
        source = e.source();
    }
    parts.join(": ")
}
