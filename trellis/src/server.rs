//! Cluster member addresses

use crate::error::{ClientError, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use url::Url;

/// Base address of one cluster member (`scheme://host[:port][/prefix]`)
///
/// Servers compare, hash and deduplicate by their normalized string form, so
/// `HTTP://Node1:9200/` and `http://node1:9200` are the same server.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Server {
    base: String,
}

impl Server {
    /// Parse and normalize an address
    ///
    /// A missing scheme defaults to `http://`. Only `http` and `https` are
    /// accepted, and a host is required.
    pub fn parse(addr: &str) -> Result<Self> {
        let trimmed = addr.trim();
        if trimmed.is_empty() {
            return Err(ClientError::InvalidServer("empty address".into()));
        }

        let with_scheme = if trimmed.contains("://") {
            trimmed.to_string()
        } else {
            format!("http://{}", trimmed)
        };

        let url = Url::parse(&with_scheme)
            .map_err(|e| ClientError::InvalidServer(format!("'{}': {}", addr, e)))?;

        match url.scheme() {
            "http" | "https" => {}
            other => {
                return Err(ClientError::InvalidServer(format!(
                    "'{}': unsupported scheme '{}'",
                    addr, other
                )))
            }
        }

        let host = url
            .host_str()
            .ok_or_else(|| ClientError::InvalidServer(format!("'{}': missing host", addr)))?;

        let mut base = format!("{}://{}", url.scheme(), host);
        if let Some(port) = url.port() {
            base.push(':');
            base.push_str(&port.to_string());
        }
        base.push_str(url.path().trim_end_matches('/'));

        Ok(Self { base })
    }

    /// Normalized string form
    pub fn as_str(&self) -> &str {
        &self.base
    }

    /// Full request URL for a path relative to this server
    pub fn url_for(&self, path: &str) -> String {
        if path.is_empty() {
            self.base.clone()
        } else if path.starts_with('/') {
            format!("{}{}", self.base, path)
        } else {
            format!("{}/{}", self.base, path)
        }
    }
}

impl fmt::Display for Server {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.base)
    }
}

impl FromStr for Server {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self> {
        Server::parse(s)
    }
}

impl Serialize for Server {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.base)
    }
}

impl<'de> Deserialize<'de> for Server {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Server::parse(&raw).map_err(serde::de::Error::custom)
    }
}

/// Parse a list of addresses, dropping duplicates while keeping first-seen order
pub fn parse_servers<I, S>(addrs: I) -> Result<Vec<Server>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut servers: Vec<Server> = Vec::new();
    for addr in addrs {
        let server = Server::parse(addr.as_ref())?;
        if !servers.contains(&server) {
            servers.push(server);
        }
    }
    Ok(servers)
}
