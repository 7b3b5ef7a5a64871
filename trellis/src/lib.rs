//! Trellis - Failover HTTP client for clustered search backends
//!
//! Sends REST requests to one node of a cluster, rotating across a pool of
//! known servers and keeping that pool current by asking the cluster which
//! nodes it has.
//!
//! # Architecture
//!
//! - **Pool**: Round-robin server pool with a fixed bootstrap fallback
//! - **Retry**: Pluggable policy deciding whether a failed attempt is retried
//! - **Client**: Request executor running each logical request as a sequence of attempts
//! - **Discovery**: Background nodes-info scan that rewrites the pool
//! - **Transport**: reqwest-backed HTTP dispatch with failure classification
//!
//! # Example
//!
//! ```no_run
//! use trellis::{Client, ClientConfig, Ping};
//!
//! # async fn run() -> trellis::Result<()> {
//! let config = ClientConfig::with_servers(["http://localhost:9200"]);
//! let client = Client::new(config)?;
//! let result = client.execute(&Ping).await?;
//! println!("{}", result.json_string());
//! # Ok(())
//! # }
//! ```

pub mod action;
pub mod blocking;
pub mod client;
pub mod config;
pub mod discovery;
pub mod error;
pub mod metrics;
pub mod pool;
pub mod retry;
pub mod server;
pub mod transport;

#[cfg(test)]
mod mock;

pub use action::{Action, ActionResult, NodesInfo, Ping, RawAction};
pub use blocking::BlockingClient;
pub use client::{Client, ClientBuilder, RequestOptions, ResultHandler};
pub use config::{ClientConfig, DiscoveryConfig, RetryConfig};
pub use discovery::{DiscoveryOutcome, NodeChecker};
pub use error::{ClientError, Result};
pub use pool::ServerPool;
pub use retry::{MaxAttemptsRetry, NoRetry, RetryPolicy};
pub use server::Server;
pub use transport::{
    Credentials, FailureKind, PreparedRequest, RawResponse, ReqwestTransport, RestMethod,
    Transport, TransportError,
};
