//! Blocking facade over [`Client`]
//!
//! Owns a private multi-threaded runtime, so it can be used from code that
//! has none. Must not be created or dropped from within an async context.

use crate::action::{Action, ActionResult};
use crate::client::{Client, ClientBuilder, RequestOptions, ResultHandler};
use crate::config::ClientConfig;
use crate::discovery::DiscoveryOutcome;
use crate::error::Result;
use crate::server::Server;
use tokio::runtime::Runtime;
use tokio::task::JoinHandle;

/// Synchronous client
pub struct BlockingClient {
    // Dropped before the runtime so the discovery task is cancelled first
    client: Client,
    runtime: Runtime,
}

impl BlockingClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        Self::from_builder(ClientBuilder::new(config))
    }

    /// Build the client from a configured builder on a fresh runtime
    pub fn from_builder(builder: ClientBuilder) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .thread_name("trellis-worker")
            .enable_all()
            .build()?;

        let client = {
            let _guard = runtime.enter();
            builder.build()?
        };

        Ok(Self { client, runtime })
    }

    /// Execute a request, blocking the calling thread until it completes
    pub fn execute<A: Action + ?Sized>(&self, action: &A) -> Result<ActionResult> {
        self.runtime.block_on(self.client.execute(action))
    }

    pub fn execute_with<A: Action + ?Sized>(
        &self,
        action: &A,
        options: &RequestOptions,
    ) -> Result<ActionResult> {
        self.runtime.block_on(self.client.execute_with(action, options))
    }

    /// Execute on the client's runtime and deliver the outcome to `handler`
    pub fn execute_async<A, H>(&self, action: A, handler: H) -> JoinHandle<()>
    where
        A: Action + 'static,
        H: ResultHandler,
    {
        self.client.execute_async(action, handler)
    }

    pub fn set_servers<I, S>(&self, addrs: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.client.set_servers(addrs)
    }

    pub fn servers(&self) -> Vec<Server> {
        self.client.servers()
    }

    pub fn discover(&self) -> DiscoveryOutcome {
        self.runtime.block_on(self.client.discover())
    }

    pub fn is_discovery_running(&self) -> bool {
        self.client.is_discovery_running()
    }

    /// Stop discovery and release the runtime
    pub fn shutdown(self) {
        self.runtime.block_on(self.client.shutdown());
    }

    /// The async client this facade drives
    pub fn client(&self) -> &Client {
        &self.client
    }
}
