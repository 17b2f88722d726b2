use std::collections::HashMap;

use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("field \"{0}\" already written; use the explicit replace_ accessor to overwrite")]
    AlreadySet(&'static str),
}

/// Per-test-case state shared between steps.
///
/// Replaces process-wide globals (current access token, signup data, ...)
/// with an owned object created at the start of a test case and passed to
/// each collaborating step. Typed fields are single-writer: the first step
/// that produces a value writes it, later writes are an error unless they
/// go through the explicit `replace_` accessor.
#[derive(Debug, Clone)]
pub struct TestSessionContext {
    id: Uuid,
    created_at: DateTime<Utc>,
    access_token: Option<String>,
    values: HashMap<String, String>,
}

impl TestSessionContext {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            access_token: None,
            values: HashMap::new(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// First write of the access token, typically by the login step.
    pub fn set_access_token(&mut self, token: impl Into<String>) -> Result<(), SessionError> {
        if self.access_token.is_some() {
            return Err(SessionError::AlreadySet("access_token"));
        }
        self.access_token = Some(token.into());
        Ok(())
    }

    /// Deliberate token refresh (e.g. re-login mid-test).
    pub fn replace_access_token(&mut self, token: impl Into<String>) {
        tracing::debug!(session = %self.id, "access token replaced");
        self.access_token = Some(token.into());
    }

    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    /// Loosely-typed step data (signup email, booked slot id, ...).
    /// Last write wins; steps that need single-writer semantics should
    /// promote the field to a typed accessor instead.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Default for TestSessionContext {
    fn default() -> Self {
        Self::new()
    }
}
