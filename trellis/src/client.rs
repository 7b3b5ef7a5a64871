//! Failover client: request execution over the server pool
//!
//! Every logical request runs as a sequence of physical attempts. Each
//! attempt asks the pool for the next server, binds the request to it and
//! dispatches it. A failed attempt is handed to the retry policy; the next
//! attempt starts only after the previous one has failed.
//!
//! ```text
//! execute(action)
//!   └─ loop
//!        server  = pool.next_server()
//!        outcome = transport.dispatch(action @ server)
//!        ok          → action.create_result(response)     (never retried)
//!        err + retry → loop
//!        err         → CouldNotConnect(server) | Transport(err)
//! ```

use crate::action::{Action, ActionResult, NodesInfo};
use crate::config::ClientConfig;
use crate::discovery::{DiscoveryHandle, DiscoveryOutcome, NodeChecker};
use crate::error::{ClientError, Result};
use crate::metrics::{self, RequestTimer};
use crate::pool::ServerPool;
use crate::retry::{policy_from_config, RetryPolicy};
use crate::server::{parse_servers, Server};
use crate::transport::{Credentials, PreparedRequest, ReqwestTransport, RestMethod, Transport};
use flate2::write::GzEncoder;
use flate2::Compression;
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Receives the outcome of [`Client::execute_async`]
///
/// Exactly one of the two methods is called per request. Any
/// `FnOnce(Result<ActionResult>)` closure is a handler.
pub trait ResultHandler: Send + 'static {
    fn completed(self, result: ActionResult);
    fn failed(self, error: ClientError);
}

impl<F> ResultHandler for F
where
    F: FnOnce(Result<ActionResult>) + Send + 'static,
{
    fn completed(self, result: ActionResult) {
        self(Ok(result))
    }

    fn failed(self, error: ClientError) {
        self(Err(error))
    }
}

/// Per-request settings passed through to the transport
///
/// Unset fields fall back to the client configuration.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub timeout: Option<Duration>,
    pub credentials: Option<Credentials>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overall timeout for each attempt of this request
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Basic-auth credentials for this request only
    pub fn with_basic_auth(
        mut self,
        username: impl Into<String>,
        password: Option<String>,
    ) -> Self {
        self.credentials = Some(Credentials::new(username, password));
        self
    }
}

/// Request encoded once per logical request, bound to a server per attempt
struct EncodedRequest {
    method: RestMethod,
    uri: String,
    headers: Vec<(String, String)>,
    body: Option<Vec<u8>>,
    timeout: Option<Duration>,
    credentials: Option<Credentials>,
}

impl EncodedRequest {
    fn bind(&self, server: Server) -> PreparedRequest {
        PreparedRequest {
            method: self.method,
            url: server.url_for(&self.uri),
            server,
            headers: self.headers.clone(),
            body: self.body.clone(),
            timeout: self.timeout,
            credentials: self.credentials.clone(),
        }
    }
}

/// State shared between the client handle and its discovery task
pub(crate) struct ClientInner {
    pub(crate) pool: ServerPool,
    transport: Arc<dyn Transport>,
    retry: Box<dyn RetryPolicy>,
    default_headers: BTreeMap<String, String>,
    credentials: Option<Credentials>,
    request_compression: bool,
    closed: AtomicBool,
}

impl ClientInner {
    pub(crate) async fn execute<A: Action + ?Sized>(
        &self,
        action: &A,
        options: &RequestOptions,
    ) -> Result<ActionResult> {
        if self.closed.load(Ordering::SeqCst) {
            return Err(ClientError::Shutdown);
        }

        let timer = RequestTimer::new(action.method().as_str());
        let outcome = self.execute_attempts(action, options).await;
        match &outcome {
            Ok(result) => timer.success(result.is_succeeded()),
            Err(e) => timer.error(e.error_type()),
        }
        outcome
    }

    async fn execute_attempts<A: Action + ?Sized>(
        &self,
        action: &A,
        options: &RequestOptions,
    ) -> Result<ActionResult> {
        let encoded = self.encode(action, options)?;
        let mut attempts: u32 = 0;

        loop {
            let request = encoded.bind(self.pool.next_server()?);
            debug!(method = %request.method, url = %request.url, "Dispatching request");
            attempts += 1;

            let failure = match self.transport.dispatch(&request).await {
                Ok(response) => return action.create_result(response, &request.url),
                Err(failure) => failure,
            };

            metrics::record_attempt_failure(failure.kind.as_str(), request.server.as_str());
            if self.retry.should_retry(&failure, attempts, &request) {
                metrics::record_retry(failure.kind.as_str());
                debug!(
                    server = %request.server,
                    attempt = attempts,
                    kind = %failure.kind,
                    "Attempt failed, retrying"
                );
                continue;
            }

            return Err(if failure.kind.is_connect_failure() {
                ClientError::CouldNotConnect {
                    server: request.server,
                    source: failure,
                }
            } else {
                ClientError::Transport(failure)
            });
        }
    }

    fn encode<A: Action + ?Sized>(
        &self,
        action: &A,
        options: &RequestOptions,
    ) -> Result<EncodedRequest> {
        let method = action.method();

        let mut headers: BTreeMap<String, String> = self
            .default_headers
            .iter()
            .map(|(k, v)| (k.to_ascii_lowercase(), v.clone()))
            .collect();
        for (name, value) in action.headers() {
            headers.insert(name.to_ascii_lowercase(), value);
        }

        let body = match action.body()? {
            Some(body) if method.allows_body() => {
                headers
                    .entry("content-type".to_string())
                    .or_insert_with(|| "application/json; charset=utf-8".to_string());
                if self.request_compression {
                    headers.insert("content-encoding".to_string(), "gzip".to_string());
                    Some(gzip(body.as_bytes())?)
                } else {
                    Some(body.into_bytes())
                }
            }
            _ => None,
        };

        Ok(EncodedRequest {
            method,
            uri: action.uri(),
            headers: headers.into_iter().collect(),
            body,
            timeout: options.timeout,
            credentials: options
                .credentials
                .clone()
                .or_else(|| self.credentials.clone()),
        })
    }
}

fn gzip(data: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    Ok(encoder.finish()?)
}

/// Builds a [`Client`]
pub struct ClientBuilder {
    config: ClientConfig,
    transport: Option<Arc<dyn Transport>>,
    retry: Option<Box<dyn RetryPolicy>>,
}

impl ClientBuilder {
    /// Start from a configuration
    pub fn new(config: ClientConfig) -> Self {
        Self {
            config,
            transport: None,
            retry: None,
        }
    }

    /// Use a custom transport instead of reqwest
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Use a custom retry policy instead of the configured one
    pub fn retry_policy(mut self, policy: impl RetryPolicy + 'static) -> Self {
        self.retry = Some(Box::new(policy));
        self
    }

    /// Enable background discovery with the given schedule
    pub fn discovery(mut self, initial_delay: Duration, interval: Duration) -> Self {
        self.config.discovery.enabled = true;
        self.config.discovery.initial_delay_ms = initial_delay.as_millis() as u64;
        self.config.discovery.interval_ms = interval.as_millis() as u64;
        self
    }

    /// Build the client
    ///
    /// Must run inside a tokio runtime; the runtime is used for asynchronous
    /// execution and the discovery task.
    pub fn build(self) -> Result<Client> {
        self.config.validate()?;

        let runtime = Handle::try_current().map_err(|_| {
            ClientError::Config("client must be created within a tokio runtime".into())
        })?;

        let pool = ServerPool::new(self.config.bootstrap_servers()?)?;
        let transport = match self.transport {
            Some(transport) => transport,
            None => Arc::new(ReqwestTransport::new(
                self.config.connect_timeout(),
                self.config.read_timeout(),
            )?),
        };
        let retry = match self.retry {
            Some(retry) => retry,
            None => policy_from_config(&self.config.retry)?,
        };

        let inner = Arc::new(ClientInner {
            pool,
            transport,
            retry,
            default_headers: self.config.default_headers.clone(),
            credentials: self.config.credentials(),
            request_compression: self.config.request_compression,
            closed: AtomicBool::new(false),
        });

        let discovery = &self.config.discovery;
        let checker = NodeChecker::new(
            Arc::downgrade(&inner),
            NodesInfo::new().add_node(discovery.filter.clone()).with_http(),
            discovery.default_scheme.clone(),
        );

        let handle = if discovery.enabled {
            Some(checker.clone().spawn(
                &runtime,
                discovery.initial_delay(),
                discovery.interval(),
            ))
        } else {
            None
        };

        info!(
            servers = inner.pool.len(),
            discovery = discovery.enabled,
            "Client created"
        );

        Ok(Client {
            inner,
            checker,
            discovery: Mutex::new(handle),
            runtime,
        })
    }
}

/// Failover client for a clustered search backend
pub struct Client {
    inner: Arc<ClientInner>,
    checker: NodeChecker,
    discovery: Mutex<Option<DiscoveryHandle>>,
    runtime: Handle,
}

impl Client {
    /// Client with reqwest transport and configured retry/discovery
    pub fn new(config: ClientConfig) -> Result<Self> {
        ClientBuilder::new(config).build()
    }

    pub fn builder(config: ClientConfig) -> ClientBuilder {
        ClientBuilder::new(config)
    }

    /// Execute a logical request, retrying failed attempts per the retry policy
    ///
    /// Returns the mapped result for any delivered response, including
    /// non-succeeded ones. Errors mean no usable response was obtained.
    pub async fn execute<A: Action + ?Sized>(&self, action: &A) -> Result<ActionResult> {
        self.inner.execute(action, &RequestOptions::default()).await
    }

    /// Execute with per-request timeout or credentials
    pub async fn execute_with<A: Action + ?Sized>(
        &self,
        action: &A,
        options: &RequestOptions,
    ) -> Result<ActionResult> {
        self.inner.execute(action, options).await
    }

    /// Execute in the background and deliver the outcome to `handler`
    pub fn execute_async<A, H>(&self, action: A, handler: H) -> JoinHandle<()>
    where
        A: Action + 'static,
        H: ResultHandler,
    {
        self.execute_async_with(action, RequestOptions::default(), handler)
    }

    /// [`execute_async`](Self::execute_async) with per-request options
    pub fn execute_async_with<A, H>(
        &self,
        action: A,
        options: RequestOptions,
        handler: H,
    ) -> JoinHandle<()>
    where
        A: Action + 'static,
        H: ResultHandler,
    {
        let inner = Arc::clone(&self.inner);
        self.runtime.spawn(async move {
            match inner.execute(&action, &options).await {
                Ok(result) => handler.completed(result),
                Err(e) => {
                    warn!(error = %e, "Asynchronous execution failed");
                    handler.failed(e);
                }
            }
        })
    }

    /// Replace the server pool membership
    ///
    /// Every address must parse; on error the pool is left untouched. An
    /// empty list restores the bootstrap set.
    pub fn set_servers<I, S>(&self, addrs: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let servers = parse_servers(addrs)?;
        self.inner.pool.set_servers(servers);
        Ok(())
    }

    /// Current server pool membership
    pub fn servers(&self) -> Vec<Server> {
        self.inner.pool.servers().to_vec()
    }

    pub fn pool(&self) -> &ServerPool {
        &self.inner.pool
    }

    /// Run one discovery iteration now, independent of the schedule
    pub async fn discover(&self) -> DiscoveryOutcome {
        self.checker.run_once().await
    }

    #[cfg(test)]
    pub(crate) fn checker_for_tests(&self) -> NodeChecker {
        self.checker.clone()
    }

    /// Whether the background discovery task is running
    pub fn is_discovery_running(&self) -> bool {
        self.discovery
            .lock()
            .as_ref()
            .map(|h| !h.is_finished())
            .unwrap_or(false)
    }

    /// Stop discovery and refuse further requests
    ///
    /// Returns once the discovery task has terminated.
    pub async fn shutdown(&self) {
        self.inner.closed.store(true, Ordering::SeqCst);
        let handle = self.discovery.lock().take();
        if let Some(handle) = handle {
            handle.stop().await;
        }
        info!("Client shut down");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::{Ping, RawAction};
    use crate::mock::{json_response, refused, MockTransport};
    use crate::retry::MaxAttemptsRetry;
    use crate::transport::{FailureKind, TransportError};
    use serde_json::json;
    use std::io::Read;

    fn config(servers: &[&str]) -> ClientConfig {
        ClientConfig::with_servers(servers.iter().copied())
    }

    #[tokio::test]
    async fn test_retry_ceiling_then_could_not_connect() {
        let mock = MockTransport::new(|req| Err(refused(req)));
        let client = Client::builder(config(&["http://a:9200", "http://b:9200"]))
            .transport(mock.clone())
            .retry_policy(MaxAttemptsRetry::new(3).unwrap())
            .build()
            .unwrap();

        let err = client.execute(&Ping).await.unwrap_err();

        assert_eq!(mock.request_count(), 3);
        assert_eq!(
            mock.servers_hit(),
            vec!["http://a:9200", "http://b:9200", "http://a:9200"]
        );
        match err {
            ClientError::CouldNotConnect { server, .. } => {
                assert_eq!(server.as_str(), "http://a:9200")
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_default_policy_makes_single_attempt() {
        let mock = MockTransport::new(|req| Err(refused(req)));
        let client = Client::builder(config(&["http://a:9200", "http://b:9200"]))
            .transport(mock.clone())
            .build()
            .unwrap();

        let err = client.execute(&Ping).await.unwrap_err();
        assert_eq!(mock.request_count(), 1);
        assert!(err.unreachable_server().is_some());
    }

    #[tokio::test]
    async fn test_logical_failure_is_not_retried() {
        let mock = MockTransport::new(|_| {
            Ok(json_response(500, json!({"error": "shard failure", "status": 500})))
        });
        let client = Client::builder(config(&["http://a:9200", "http://b:9200"]))
            .transport(mock.clone())
            .retry_policy(MaxAttemptsRetry::new(5).unwrap())
            .build()
            .unwrap();

        let result = client.execute(&Ping).await.unwrap();

        assert_eq!(mock.request_count(), 1);
        assert!(!result.is_succeeded());
        assert_eq!(result.response_code(), 500);
        assert_eq!(result.error_message(), Some("\"shard failure\""));
    }

    #[tokio::test]
    async fn test_failover_to_next_server() {
        let mock = MockTransport::new(|req| {
            if req.server.as_str() == "http://a:9200" {
                Err(refused(req))
            } else {
                Ok(json_response(200, json!({"name": "node-b"})))
            }
        });
        let client = Client::builder(config(&["http://a:9200", "http://b:9200"]))
            .transport(mock.clone())
            .retry_policy(MaxAttemptsRetry::new(3).unwrap())
            .build()
            .unwrap();

        let result = client.execute(&Ping).await.unwrap();

        assert!(result.is_succeeded());
        assert_eq!(result.json_at(&["name"]).unwrap(), "node-b");
        assert_eq!(mock.servers_hit(), vec!["http://a:9200", "http://b:9200"]);
    }

    #[tokio::test]
    async fn test_non_connect_failure_surfaces_unwrapped() {
        let mock = MockTransport::new(|req| {
            Err(TransportError::new(FailureKind::Timeout, &req.url, "read timed out"))
        });
        let client = Client::builder(config(&["http://a:9200"]))
            .transport(mock.clone())
            .retry_policy(MaxAttemptsRetry::with_kinds(2, [FailureKind::Timeout]).unwrap())
            .build()
            .unwrap();

        let err = client.execute(&Ping).await.unwrap_err();

        assert_eq!(mock.request_count(), 2);
        match err {
            ClientError::Transport(failure) => assert_eq!(failure.kind, FailureKind::Timeout),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_unrecoverable_failure_stops_immediately() {
        let mock = MockTransport::new(|req| {
            Err(TransportError::new(FailureKind::Protocol, &req.url, "invalid status line"))
        });
        let client = Client::builder(config(&["http://a:9200", "http://b:9200"]))
            .transport(mock.clone())
            .retry_policy(MaxAttemptsRetry::new(5).unwrap())
            .build()
            .unwrap();

        assert!(matches!(
            client.execute(&Ping).await,
            Err(ClientError::Transport(_))
        ));
        assert_eq!(mock.request_count(), 1);
    }

    #[tokio::test]
    async fn test_malformed_response_is_terminal() {
        let mock = MockTransport::new(|_| {
            Ok(crate::transport::RawResponse {
                status: 200,
                reason: Some("OK".into()),
                content_type: Some("text/html".into()),
                body: b"<html></html>".to_vec(),
            })
        });
        let client = Client::builder(config(&["http://a:9200", "http://b:9200"]))
            .transport(mock.clone())
            .retry_policy(MaxAttemptsRetry::new(5).unwrap())
            .build()
            .unwrap();

        assert!(matches!(
            client.execute(&Ping).await,
            Err(ClientError::MalformedResponse { .. })
        ));
        assert_eq!(mock.request_count(), 1);
    }

    #[tokio::test]
    async fn test_headers_and_body_encoding() {
        let mock = MockTransport::new(|_| Ok(json_response(200, json!({}))));
        let mut cfg = config(&["http://a:9200"]);
        cfg.default_headers.insert("X-Opaque-Id".into(), "default".into());
        cfg.default_headers.insert("X-Tenant".into(), "acme".into());
        let client = Client::builder(cfg).transport(mock.clone()).build().unwrap();

        let action = RawAction::new(RestMethod::Post, "/twitter/_search")
            .with_body(r#"{"query":{"match_all":{}}}"#)
            .with_header("x-opaque-id", "override");
        client.execute(&action).await.unwrap();

        let request = &mock.requests()[0];
        let header = |name: &str| {
            request
                .headers
                .iter()
                .find(|(k, _)| k == name)
                .map(|(_, v)| v.clone())
        };
        assert_eq!(request.url, "http://a:9200/twitter/_search");
        assert_eq!(header("x-opaque-id").as_deref(), Some("override"));
        assert_eq!(header("x-tenant").as_deref(), Some("acme"));
        assert_eq!(
            header("content-type").as_deref(),
            Some("application/json; charset=utf-8")
        );
        assert_eq!(
            request.body.as_deref(),
            Some(br#"{"query":{"match_all":{}}}"#.as_slice())
        );
    }

    #[tokio::test]
    async fn test_request_compression() {
        let mock = MockTransport::new(|_| Ok(json_response(200, json!({}))));
        let mut cfg = config(&["http://a:9200"]);
        cfg.request_compression = true;
        let client = Client::builder(cfg).transport(mock.clone()).build().unwrap();

        let action = RawAction::new(RestMethod::Put, "/twitter").with_body(r#"{"settings":{}}"#);
        client.execute(&action).await.unwrap();

        let request = &mock.requests()[0];
        assert!(request
            .headers
            .iter()
            .any(|(k, v)| k == "content-encoding" && v == "gzip"));

        let mut decoded = String::new();
        flate2::read::GzDecoder::new(request.body.as_deref().unwrap())
            .read_to_string(&mut decoded)
            .unwrap();
        assert_eq!(decoded, r#"{"settings":{}}"#);
    }

    #[tokio::test]
    async fn test_head_drops_body() {
        let mock = MockTransport::new(|_| Ok(json_response(200, json!({}))));
        let client = Client::builder(config(&["http://a:9200"]))
            .transport(mock.clone())
            .build()
            .unwrap();

        let action = RawAction::new(RestMethod::Head, "/twitter").with_body("{}");
        client.execute(&action).await.unwrap();
        assert!(mock.requests()[0].body.is_none());
    }

    #[tokio::test]
    async fn test_execute_async_delivers_to_handler() {
        let mock = MockTransport::new(|_| Ok(json_response(200, json!({"ok": true}))));
        let client = Client::builder(config(&["http://a:9200"]))
            .transport(mock.clone())
            .build()
            .unwrap();

        let (tx, rx) = tokio::sync::oneshot::channel();
        client.execute_async(Ping, move |outcome: Result<ActionResult>| {
            let _ = tx.send(outcome);
        });

        let result = rx.await.unwrap().unwrap();
        assert!(result.is_succeeded());
    }

    #[tokio::test]
    async fn test_execute_async_delivers_failure() {
        let mock = MockTransport::new(|req| Err(refused(req)));
        let client = Client::builder(config(&["http://a:9200"]))
            .transport(mock.clone())
            .build()
            .unwrap();

        let (tx, rx) = tokio::sync::oneshot::channel();
        client
            .execute_async(Ping, move |outcome: Result<ActionResult>| {
                let _ = tx.send(outcome);
            })
            .await
            .unwrap();

        assert!(matches!(
            rx.await.unwrap(),
            Err(ClientError::CouldNotConnect { .. })
        ));
    }

    #[tokio::test]
    async fn test_execute_async_retries_before_delivering() {
        let mock = MockTransport::new(|req| {
            if req.server.as_str() == "http://a:9200" {
                Err(refused(req))
            } else {
                Ok(json_response(200, json!({"name": "node-b"})))
            }
        });
        let client = Client::builder(config(&["http://a:9200", "http://b:9200"]))
            .transport(mock.clone())
            .retry_policy(MaxAttemptsRetry::new(2).unwrap())
            .build()
            .unwrap();

        let (tx, rx) = tokio::sync::oneshot::channel();
        client
            .execute_async(Ping, move |outcome: Result<ActionResult>| {
                let _ = tx.send(outcome);
            })
            .await
            .unwrap();

        let result = rx.await.unwrap().unwrap();
        assert!(result.is_succeeded());
        assert_eq!(result.json_at(&["name"]).unwrap(), "node-b");
        assert_eq!(mock.request_count(), 2);
    }

    #[tokio::test]
    async fn test_request_options_reach_transport() {
        let mock = MockTransport::new(|_| Ok(json_response(200, json!({}))));
        let mut cfg = config(&["http://a:9200"]);
        cfg.username = Some("elastic".into());
        cfg.password = Some("changeme".into());
        let client = Client::builder(cfg).transport(mock.clone()).build().unwrap();

        client.execute(&Ping).await.unwrap();
        let options = RequestOptions::new()
            .with_timeout(Duration::from_millis(250))
            .with_basic_auth("ops", Some("s3cret".into()));
        client.execute_with(&Ping, &options).await.unwrap();

        let requests = mock.requests();
        assert_eq!(requests[0].timeout, None);
        assert_eq!(
            requests[0].credentials,
            Some(Credentials::new("elastic", Some("changeme".into())))
        );
        assert_eq!(requests[1].timeout, Some(Duration::from_millis(250)));
        assert_eq!(
            requests[1].credentials,
            Some(Credentials::new("ops", Some("s3cret".into())))
        );
    }

    #[tokio::test]
    async fn test_set_servers_validates_all_addresses() {
        let client = Client::builder(config(&["http://a:9200"]))
            .transport(MockTransport::new(|_| Ok(json_response(200, json!({})))))
            .build()
            .unwrap();

        assert!(client.set_servers(["http://c:9200", "ftp://bad"]).is_err());
        assert_eq!(client.servers()[0].as_str(), "http://a:9200");

        client.set_servers(["http://c:9200", "d:9200"]).unwrap();
        let names: Vec<String> = client.servers().iter().map(|s| s.to_string()).collect();
        assert_eq!(names, vec!["http://c:9200", "http://d:9200"]);
    }

    #[tokio::test]
    async fn test_shutdown_refuses_requests() {
        let mock = MockTransport::new(|_| Ok(json_response(200, json!({}))));
        let client = Client::builder(config(&["http://a:9200"]))
            .transport(mock.clone())
            .build()
            .unwrap();

        client.shutdown().await;
        assert!(matches!(
            client.execute(&Ping).await,
            Err(ClientError::Shutdown)
        ));
        assert_eq!(mock.request_count(), 0);
    }

    #[test]
    fn test_build_outside_runtime_fails() {
        let result = Client::builder(config(&["http://a:9200"])).build();
        assert!(matches!(result, Err(ClientError::Config(_))));
    }
}
