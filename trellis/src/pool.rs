//! Round-robin server pool with bootstrap fallback
//!
//! Membership is held as an immutable snapshot behind a lock. Readers clone
//! the snapshot `Arc` and pick from it; writers build a new snapshot and swap
//! it in. A reader therefore always sees either the old or the new set, never
//! a mix, and no lock is held while a request is in flight.

use crate::error::{ClientError, Result};
use crate::metrics;
use crate::server::Server;
use parking_lot::RwLock;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Candidate servers for outgoing requests
pub struct ServerPool {
    /// Addresses supplied at construction, never discarded
    bootstrap: Arc<Vec<Server>>,

    /// Current membership snapshot
    current: RwLock<Arc<Vec<Server>>>,

    /// Round-robin cursor into the current snapshot
    cursor: AtomicUsize,
}

impl ServerPool {
    /// Create a pool from the bootstrap set
    ///
    /// Duplicates are dropped. The bootstrap set must not be empty.
    pub fn new(bootstrap: Vec<Server>) -> Result<Self> {
        let bootstrap = dedup(bootstrap);
        if bootstrap.is_empty() {
            return Err(ClientError::Config(
                "at least one bootstrap server is required".into(),
            ));
        }

        let bootstrap = Arc::new(bootstrap);
        metrics::record_pool_size(bootstrap.len());

        Ok(Self {
            current: RwLock::new(Arc::clone(&bootstrap)),
            bootstrap,
            cursor: AtomicUsize::new(0),
        })
    }

    /// Next server in round-robin order
    pub fn next_server(&self) -> Result<Server> {
        let snapshot = self.snapshot();
        if snapshot.is_empty() {
            return Err(ClientError::EmptyPool);
        }
        let index = self.cursor.fetch_add(1, Ordering::Relaxed) % snapshot.len();
        Ok(snapshot[index].clone())
    }

    /// Replace the whole membership
    ///
    /// An empty set falls back to the bootstrap set.
    pub fn set_servers(&self, servers: Vec<Server>) {
        let servers = dedup(servers);
        let next = if servers.is_empty() {
            warn!("Empty server set supplied, falling back to bootstrap servers");
            Arc::clone(&self.bootstrap)
        } else {
            Arc::new(servers)
        };

        debug!(servers = %join(&next), "Replacing server pool");
        self.swap(next);
    }

    /// Restore the bootstrap set
    pub fn reset_to_bootstrap(&self) {
        info!(servers = %join(&self.bootstrap), "Resetting server pool to bootstrap servers");
        self.swap(Arc::clone(&self.bootstrap));
    }

    /// Evict a single server
    ///
    /// If the eviction empties the pool, the bootstrap set is restored.
    /// Returns whether the server was present.
    pub fn remove_server(&self, server: &Server) -> bool {
        let mut current = self.current.write();
        if !current.contains(server) {
            return false;
        }

        let remaining: Vec<Server> = current.iter().filter(|s| *s != server).cloned().collect();
        warn!(server = %server, "Removing server from pool");

        *current = if remaining.is_empty() {
            info!("Server pool emptied, falling back to bootstrap servers");
            Arc::clone(&self.bootstrap)
        } else {
            Arc::new(remaining)
        };
        self.cursor.store(0, Ordering::Relaxed);
        metrics::record_pool_size(current.len());
        info!(servers = %join(&current), "Server pool is now");
        true
    }

    /// Current membership snapshot
    pub fn servers(&self) -> Arc<Vec<Server>> {
        self.snapshot()
    }

    /// Bootstrap set
    pub fn bootstrap(&self) -> &[Server] {
        &self.bootstrap
    }

    /// Number of servers in the current membership
    pub fn len(&self) -> usize {
        self.snapshot().len()
    }

    /// Whether the current membership is empty (never true after construction)
    pub fn is_empty(&self) -> bool {
        self.snapshot().is_empty()
    }

    fn snapshot(&self) -> Arc<Vec<Server>> {
        Arc::clone(&self.current.read())
    }

    fn swap(&self, next: Arc<Vec<Server>>) {
        let len = next.len();
        *self.current.write() = next;
        self.cursor.store(0, Ordering::Relaxed);
        metrics::record_pool_size(len);
    }
}

fn dedup(servers: Vec<Server>) -> Vec<Server> {
    let mut unique = Vec::with_capacity(servers.len());
    for server in servers {
        if !unique.contains(&server) {
            unique.push(server);
        }
    }
    unique
}

fn join(servers: &[Server]) -> String {
    servers
        .iter()
        .map(Server::as_str)
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::parse_servers;
    use proptest::prelude::*;
    use std::collections::HashSet;
    use std::sync::atomic::AtomicBool;

    fn servers(addrs: &[&str]) -> Vec<Server> {
        parse_servers(addrs).unwrap()
    }

    fn names(servers: &[Server]) -> Vec<String> {
        servers.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_empty_bootstrap_rejected() {
        assert!(matches!(ServerPool::new(Vec::new()), Err(ClientError::Config(_))));
    }

    #[test]
    fn test_round_robin_cycles_in_stable_order() {
        let pool = ServerPool::new(servers(&["http://a:9200", "http://b:9200", "http://c:9200"]))
            .unwrap();

        let first: Vec<String> = (0..3).map(|_| pool.next_server().unwrap().to_string()).collect();
        let second: Vec<String> = (0..3).map(|_| pool.next_server().unwrap().to_string()).collect();

        assert_eq!(first, vec!["http://a:9200", "http://b:9200", "http://c:9200"]);
        assert_eq!(first, second);
    }

    #[test]
    fn test_set_servers_replaces_and_resets_cursor() {
        let pool = ServerPool::new(servers(&["http://a:9200", "http://b:9200"])).unwrap();
        pool.next_server().unwrap();

        pool.set_servers(servers(&["http://c:9200", "http://d:9200"]));
        assert_eq!(pool.next_server().unwrap().as_str(), "http://c:9200");
        assert_eq!(pool.next_server().unwrap().as_str(), "http://d:9200");
        assert_eq!(names(&pool.bootstrap().to_vec()), vec!["http://a:9200", "http://b:9200"]);
    }

    #[test]
    fn test_set_empty_falls_back_to_bootstrap() {
        let pool = ServerPool::new(servers(&["http://a:9200"])).unwrap();
        pool.set_servers(servers(&["http://c:9200"]));
        pool.set_servers(Vec::new());
        assert_eq!(names(&pool.servers()), vec!["http://a:9200"]);
    }

    #[test]
    fn test_remove_server_keeps_the_rest() {
        let pool = ServerPool::new(servers(&["http://a:9200"])).unwrap();
        pool.set_servers(servers(&["http://a:9200", "http://b:9200", "http://c:9200"]));

        assert!(pool.remove_server(&Server::parse("http://b:9200").unwrap()));
        assert_eq!(names(&pool.servers()), vec!["http://a:9200", "http://c:9200"]);

        assert!(!pool.remove_server(&Server::parse("http://zz:9200").unwrap()));
        assert_eq!(pool.len(), 2);
    }

    #[test]
    fn test_remove_last_discovered_restores_bootstrap() {
        let pool = ServerPool::new(servers(&["http://a:9200", "http://b:9200"])).unwrap();
        pool.set_servers(servers(&["http://c:9200"]));

        pool.remove_server(&Server::parse("http://c:9200").unwrap());

        let bootstrap: HashSet<String> = ["http://a:9200", "http://b:9200"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        for _ in 0..10 {
            assert!(bootstrap.contains(pool.next_server().unwrap().as_str()));
        }
    }

    #[test]
    fn test_concurrent_replace_never_yields_foreign_server() {
        let old = servers(&["http://a:9200", "http://b:9200"]);
        let new = servers(&["http://c:9200", "http://d:9200", "http://e:9200"]);
        let allowed: HashSet<Server> = old.iter().chain(new.iter()).cloned().collect();

        let pool = Arc::new(ServerPool::new(old.clone()).unwrap());
        let stop = Arc::new(AtomicBool::new(false));

        let writer = {
            let pool = Arc::clone(&pool);
            let stop = Arc::clone(&stop);
            let (old, new) = (old.clone(), new.clone());
            std::thread::spawn(move || {
                let mut flip = false;
                while !stop.load(Ordering::Relaxed) {
                    pool.set_servers(if flip { old.clone() } else { new.clone() });
                    flip = !flip;
                }
            })
        };

        for _ in 0..20_000 {
            let server = pool.next_server().unwrap();
            assert!(allowed.contains(&server), "unexpected server {}", server);
        }

        stop.store(true, Ordering::Relaxed);
        writer.join().unwrap();
    }

    proptest! {
        #[test]
        fn prop_n_calls_visit_each_server_once(count in 1usize..16, skip in 0usize..40) {
            let addrs: Vec<String> = (0..count).map(|i| format!("http://node{}:9200", i)).collect();
            let pool = ServerPool::new(parse_servers(&addrs).unwrap()).unwrap();

            for _ in 0..skip {
                pool.next_server().unwrap();
            }

            let seen: HashSet<Server> = (0..count).map(|_| pool.next_server().unwrap()).collect();
            prop_assert_eq!(seen.len(), count);
        }
    }
}
