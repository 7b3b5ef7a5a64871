use super::{Action, RestMethod};
use crate::error::Result;
use std::collections::BTreeMap;

/// `GET /`, the cheapest liveness check a cluster node answers
#[derive(Debug, Clone, Copy, Default)]
pub struct Ping;

impl Action for Ping {
    fn method(&self) -> RestMethod {
        RestMethod::Get
    }

    fn uri(&self) -> String {
        "/".to_string()
    }
}

/// Arbitrary request for endpoints without a dedicated builder
#[derive(Debug, Clone)]
pub struct RawAction {
    method: RestMethod,
    path: String,
    body: Option<String>,
    headers: BTreeMap<String, String>,
}

impl RawAction {
    pub fn new(method: RestMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
            headers: BTreeMap::new(),
        }
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }
}

impl Action for RawAction {
    fn method(&self) -> RestMethod {
        self.method
    }

    fn uri(&self) -> String {
        self.path.clone()
    }

    fn body(&self) -> Result<Option<String>> {
        Ok(self.body.clone())
    }

    fn headers(&self) -> BTreeMap<String, String> {
        self.headers.clone()
    }
}
