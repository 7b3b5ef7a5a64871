//! Publish address parsing
//!
//! Nodes report their HTTP address in several textual forms depending on the
//! backend version:
//!
//! ```text
//! inet[host:9200]
//! inet[host/10.0.0.1:9200]
//! inet[/10.0.0.1:9200]
//! host/10.0.0.1:9200
//! 10.0.0.1:9200
//! ```
//!
//! When both a hostname and an address are present the address wins, since
//! the hostname is often only resolvable inside the cluster.

use crate::server::Server;
use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;
use tracing::debug;

fn address_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(?:inet\[)?(?:[^:/\[\]]*/)?([^:/\[\]]+):(\d+)\]?$")
            .expect("address pattern is valid")
    })
}

/// Normalize a reported address into a server, or `None` if it can't be parsed
///
/// `scheme` is prefixed as-is and must end in `://`.
pub fn parse_publish_address(raw: &str, scheme: &str) -> Option<Server> {
    let captures = address_pattern().captures(raw.trim())?;
    Server::parse(&format!("{}{}:{}", scheme, &captures[1], &captures[2])).ok()
}

/// The HTTP server a single nodes-info entry advertises
///
/// A present `http_address` key takes precedence over `http.publish_address`,
/// even when its value is null. Returns `None` for nodes without a usable
/// address.
pub fn node_server(node: &Value, scheme: &str) -> Option<Server> {
    let raw = match node.get("http_address") {
        Some(address) => address.as_str(),
        None => node
            .get("http")
            .and_then(|http| http.get("publish_address"))
            .and_then(Value::as_str),
    };
    raw.and_then(|r| parse_publish_address(r, scheme))
}

/// Collect the HTTP servers advertised in a nodes-info response
///
/// Nodes without a usable address are skipped; see [`node_server`].
pub fn extract_servers(response: &Value, scheme: &str) -> Vec<Server> {
    let Some(nodes) = response.get("nodes").and_then(Value::as_object) else {
        return Vec::new();
    };

    let mut servers: Vec<Server> = Vec::new();
    for (node_id, node) in nodes {
        match node_server(node, scheme) {
            Some(server) => {
                if !servers.contains(&server) {
                    servers.push(server);
                }
            }
            None => debug!(node = %node_id, "Skipping node without usable HTTP address"),
        }
    }
    servers
}
