//! Request builders and response mapping
//!
//! An [`Action`] describes one logical request: path, method, body and
//! headers. It also maps the raw response into an [`ActionResult`], which
//! tells a delivered-but-failed response apart from a succeeded one.

mod generic;
mod nodes;

pub use generic::{Ping, RawAction};
pub use nodes::NodesInfo;

pub use crate::transport::RestMethod;

use crate::error::{ClientError, Result};
use crate::transport::RawResponse;
use serde_json::Value;
use std::collections::BTreeMap;

/// A logical request against the cluster
pub trait Action: Send + Sync {
    /// HTTP method
    fn method(&self) -> RestMethod;

    /// Path relative to the server base address
    fn uri(&self) -> String;

    /// Serialized request body
    fn body(&self) -> Result<Option<String>> {
        Ok(None)
    }

    /// Headers specific to this action
    fn headers(&self) -> BTreeMap<String, String> {
        BTreeMap::new()
    }

    /// Map a delivered response into a result
    fn create_result(&self, response: RawResponse, url: &str) -> Result<ActionResult> {
        ActionResult::from_response(response, url)
    }
}

/// Outcome of a delivered request
#[derive(Debug, Clone)]
pub struct ActionResult {
    json: Value,
    json_string: String,
    response_code: u16,
    reason: Option<String>,
    succeeded: bool,
    error_message: Option<String>,
}

impl ActionResult {
    /// Parse a raw response
    ///
    /// An empty body maps to `null`. A body that is not JSON is a
    /// [`ClientError::MalformedResponse`], since it usually means something
    /// other than the cluster (a proxy, a load balancer) answered.
    pub fn from_response(response: RawResponse, url: &str) -> Result<Self> {
        let json_string = String::from_utf8_lossy(&response.body).into_owned();

        let json = if json_string.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&json_string).map_err(|e| {
                let reason = match response.content_type.as_deref() {
                    Some(ct) if !ct.starts_with("application/json") => format!(
                        "yielded {}, should be json (status {})",
                        ct, response.status
                    ),
                    _ => format!("invalid JSON (status {}): {}", response.status, e),
                };
                ClientError::MalformedResponse {
                    url: url.to_string(),
                    content_type: response.content_type.clone(),
                    reason,
                }
            })?
        };

        let succeeded = response.is_success();
        let error_message = if succeeded {
            None
        } else {
            Some(match json.get("error") {
                Some(error) => error.to_string(),
                None => format!(
                    "{} {}",
                    response.status,
                    response.reason.as_deref().unwrap_or("")
                )
                .trim_end()
                .to_string(),
            })
        };

        Ok(Self {
            json,
            json_string,
            response_code: response.status,
            reason: response.reason,
            succeeded,
            error_message,
        })
    }

    /// Whether the cluster reported success
    pub fn is_succeeded(&self) -> bool {
        self.succeeded
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn response_code(&self) -> u16 {
        self.response_code
    }

    pub fn reason(&self) -> Option<&str> {
        self.reason.as_deref()
    }

    /// Parsed response body
    pub fn json(&self) -> &Value {
        &self.json
    }

    /// Raw response body
    pub fn json_string(&self) -> &str {
        &self.json_string
    }

    /// Value at a path of object keys
    pub fn json_at(&self, path: &[&str]) -> Option<&Value> {
        path.iter().try_fold(&self.json, |value, key| value.get(*key))
    }
}
