//! Background topology discovery
//!
//! Periodically asks the cluster which nodes it has, through the client's
//! own executor, and rewrites the server pool from the answer:
//!
//! ```text
//! Idle ──timer──▶ Discovering ──┬─ nodes found ─────────▶ Applied   (set_servers)
//!                               ├─ no usable address ───▶ Unchanged
//!                               ├─ node unreachable ────▶ Evicted   (remove_server)
//!                               └─ any other failure ───▶ Bootstrap (reset to bootstrap)
//! ```
//!
//! Every outcome returns to Idle. Failures never leave an iteration; only
//! [`DiscoveryHandle::stop`] (or dropping the handle) ends the schedule.

mod address;

pub use address::{extract_servers, node_server, parse_publish_address};

use crate::action::NodesInfo;
use crate::client::{ClientInner, RequestOptions};
use crate::error::ClientError;
use crate::metrics;
use crate::server::Server;
use std::sync::Weak;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// Result of one discovery iteration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiscoveryOutcome {
    /// Pool replaced with the discovered servers
    Applied(Vec<Server>),
    /// Response carried no usable address; pool left as is
    Unchanged,
    /// The queried server was unreachable and was evicted
    Evicted(Server),
    /// Pool reset to the bootstrap set after a failed iteration
    Bootstrap,
    /// The client was dropped or shut down; the schedule ends, pool untouched
    ClientGone,
}

impl DiscoveryOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiscoveryOutcome::Applied(_) => "applied",
            DiscoveryOutcome::Unchanged => "unchanged",
            DiscoveryOutcome::Evicted(_) => "evicted",
            DiscoveryOutcome::Bootstrap => "bootstrap",
            DiscoveryOutcome::ClientGone => "client_gone",
        }
    }
}

/// Runs nodes-info scans against the client it belongs to
///
/// Holds only a weak reference, so the client's lifetime is never extended
/// by its own discovery task.
#[derive(Clone)]
pub struct NodeChecker {
    client: Weak<ClientInner>,
    action: NodesInfo,
    default_scheme: String,
}

impl NodeChecker {
    pub(crate) fn new(
        client: Weak<ClientInner>,
        action: NodesInfo,
        default_scheme: String,
    ) -> Self {
        Self {
            client,
            action,
            default_scheme,
        }
    }

    /// Run a single discovery iteration
    pub async fn run_once(&self) -> DiscoveryOutcome {
        let Some(client) = self.client.upgrade() else {
            return DiscoveryOutcome::ClientGone;
        };

        let outcome = match client.execute(&self.action, &RequestOptions::default()).await {
            Ok(result) if result.is_succeeded() => {
                let servers = extract_servers(result.json(), &self.default_scheme);
                if servers.is_empty() {
                    warn!("Nodes info returned no usable HTTP address, keeping current servers");
                    DiscoveryOutcome::Unchanged
                } else {
                    let hosts: Vec<&str> = servers.iter().map(Server::as_str).collect();
                    debug!(
                        count = servers.len(),
                        servers = %hosts.join(","),
                        "Discovered HTTP hosts"
                    );
                    client.pool.set_servers(servers.clone());
                    DiscoveryOutcome::Applied(servers)
                }
            }
            Ok(result) => {
                warn!(
                    status = result.response_code(),
                    error = result.error_message().unwrap_or(""),
                    "Nodes info request resulted in error"
                );
                client.pool.reset_to_bootstrap();
                DiscoveryOutcome::Bootstrap
            }
            Err(ClientError::Shutdown) => {
                debug!("Client shut down, skipping discovery");
                DiscoveryOutcome::ClientGone
            }
            Err(ClientError::CouldNotConnect { server, source }) => {
                error!(server = %server, error = %source, "Connect failure executing nodes info");
                client.pool.remove_server(&server);
                DiscoveryOutcome::Evicted(server)
            }
            Err(e) => {
                error!(error = %e, "Error executing nodes info");
                client.pool.reset_to_bootstrap();
                DiscoveryOutcome::Bootstrap
            }
        };

        metrics::record_discovery_run(outcome.as_str());
        outcome
    }

    /// Start the fixed-delay schedule on `runtime`
    pub(crate) fn spawn(
        self,
        runtime: &Handle,
        initial_delay: Duration,
        interval: Duration,
    ) -> DiscoveryHandle {
        let token = CancellationToken::new();
        let cancelled = token.clone();

        let task = runtime.spawn(async move {
            info!(
                initial_delay_ms = initial_delay.as_millis() as u64,
                interval_ms = interval.as_millis() as u64,
                "Starting node discovery"
            );

            tokio::select! {
                _ = cancelled.cancelled() => {
                    info!("Node discovery stopped");
                    return;
                }
                _ = tokio::time::sleep(initial_delay) => {}
            }

            loop {
                let outcome = tokio::select! {
                    _ = cancelled.cancelled() => break,
                    outcome = self.run_once() => outcome,
                };
                if outcome == DiscoveryOutcome::ClientGone {
                    break;
                }

                tokio::select! {
                    _ = cancelled.cancelled() => break,
                    _ = tokio::time::sleep(interval) => {}
                }
            }

            info!("Node discovery stopped");
        });

        DiscoveryHandle {
            token,
            task: Some(task),
        }
    }
}

/// Owns the running discovery task
///
/// Dropping the handle cancels and aborts the task.
pub struct DiscoveryHandle {
    token: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl DiscoveryHandle {
    /// Cancel the schedule and wait for the task to finish
    pub async fn stop(mut self) {
        self.token.cancel();
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                if e.is_panic() {
                    error!(error = %e, "Node discovery task panicked");
                }
            }
        }
    }

    pub fn is_finished(&self) -> bool {
        self.task.as_ref().map(|t| t.is_finished()).unwrap_or(true)
    }
}

impl Drop for DiscoveryHandle {
    fn drop(&mut self) {
        self.token.cancel();
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
