//! Retry policies for failed physical attempts
//!
//! A policy sees the failure of one attempt and decides whether the logical
//! request gets another one. Policies hold configuration only, so a single
//! instance is shared across all threads issuing requests.

use crate::config::RetryConfig;
use crate::error::{ClientError, Result};
use crate::transport::{FailureKind, PreparedRequest, TransportError};
use std::collections::HashSet;
use tracing::debug;

/// Decides whether a failed attempt is retried
pub trait RetryPolicy: Send + Sync {
    /// `attempts` counts the attempts made so far, including the failed one
    fn should_retry(
        &self,
        failure: &TransportError,
        attempts: u32,
        request: &PreparedRequest,
    ) -> bool;
}

/// Never retries
#[derive(Debug, Clone, Copy, Default)]
pub struct NoRetry;

impl RetryPolicy for NoRetry {
    fn should_retry(&self, _: &TransportError, _: u32, _: &PreparedRequest) -> bool {
        false
    }
}

/// Retries recoverable failures until a maximum number of attempts is reached
#[derive(Debug, Clone)]
pub struct MaxAttemptsRetry {
    max_attempts: u32,
    recoverable: HashSet<FailureKind>,
}

impl MaxAttemptsRetry {
    /// Retry the default recoverable kinds (refused, reset, DNS, TLS)
    pub fn new(max_attempts: u32) -> Result<Self> {
        Self::with_kinds(max_attempts, FailureKind::default_recoverable())
    }

    /// Retry only the given kinds
    pub fn with_kinds(
        max_attempts: u32,
        kinds: impl IntoIterator<Item = FailureKind>,
    ) -> Result<Self> {
        if max_attempts == 0 {
            return Err(ClientError::Config("max_attempts must be at least 1".into()));
        }
        let recoverable: HashSet<FailureKind> = kinds.into_iter().collect();
        if recoverable.is_empty() {
            return Err(ClientError::Config(
                "recoverable failure kinds must not be empty".into(),
            ));
        }
        Ok(Self {
            max_attempts,
            recoverable,
        })
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn is_recoverable(&self, kind: FailureKind) -> bool {
        self.recoverable.contains(&kind)
    }
}

impl RetryPolicy for MaxAttemptsRetry {
    fn should_retry(
        &self,
        failure: &TransportError,
        attempts: u32,
        request: &PreparedRequest,
    ) -> bool {
        if attempts >= self.max_attempts {
            debug!(
                request = %request,
                attempts,
                max_attempts = self.max_attempts,
                error = %failure,
                "Maximum number of attempts reached"
            );
            return false;
        }

        if self.is_recoverable(failure.kind) {
            debug!(request = %request, attempts, kind = %failure.kind, "Retrying request");
            true
        } else {
            debug!(
                request = %request,
                kind = %failure.kind,
                "Not retrying request due to unrecoverable failure"
            );
            false
        }
    }
}

/// Build the policy described by a retry configuration
///
/// `max_attempts` of 0 or 1 means a single attempt, which is [`NoRetry`].
pub fn policy_from_config(config: &RetryConfig) -> Result<Box<dyn RetryPolicy>> {
    if config.max_attempts <= 1 {
        return Ok(Box::new(NoRetry));
    }
    let kinds = if config.recoverable.is_empty() {
        FailureKind::default_recoverable()
    } else {
        config.recoverable.clone()
    };
    Ok(Box::new(MaxAttemptsRetry::with_kinds(config.max_attempts, kinds)?))
}
