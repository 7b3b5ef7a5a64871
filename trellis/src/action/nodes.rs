//! Nodes-info action used for topology discovery

use super::{Action, RestMethod};

/// `GET /_nodes/{nodes}/{info}`
#[derive(Debug, Clone, Default)]
pub struct NodesInfo {
    nodes: Vec<String>,
    info: Vec<String>,
}

impl NodesInfo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to nodes matching a node filter (`_all`, `_local`, `data:true`, ...)
    pub fn add_node(mut self, node: impl Into<String>) -> Self {
        self.nodes.push(node.into());
        self
    }

    /// Include HTTP info (publish addresses)
    pub fn with_http(self) -> Self {
        self.with_info("http")
    }

    pub fn with_info(mut self, info: impl Into<String>) -> Self {
        let info = info.into();
        if !self.info.contains(&info) {
            self.info.push(info);
        }
        self
    }
}

impl Action for NodesInfo {
    fn method(&self) -> RestMethod {
        RestMethod::Get
    }

    fn uri(&self) -> String {
        let nodes = if self.nodes.is_empty() {
            "_all".to_string()
        } else {
            self.nodes.join(",")
        };

        if self.info.is_empty() {
            format!("/_nodes/{}", nodes)
        } else {
            format!("/_nodes/{}/{}", nodes, self.info.join(","))
        }
    }
}
