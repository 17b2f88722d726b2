use std::future::Future;
use std::time::{Duration, Instant};

use reqwest::header::HeaderMap as Headers;
use serde::de::DeserializeOwned;
use tokio::sync::broadcast::error::RecvError;
use tokio::time;

use crate::driver::{NetworkResponse, Page, Status};
use crate::schema;
use crate::{RendezError, Result};

use super::matcher::{StatusMatcher, UrlMatcher};

/// Entry point for arming captures on one page.
///
/// Holds the defaults (timeout, accepted statuses) that individual captures
/// start from; both come from the shared harness configuration unless
/// overridden per call.
pub struct Correlator {
    page: Page,
    default_timeout: Duration,
    default_status: StatusMatcher,
}

impl Correlator {
    pub fn new(page: &Page) -> Self {
        let config = crate::config::HarnessConfig::shared();
        Self {
            page: page.clone(),
            default_timeout: config.default_timeout(),
            default_status: config.default_status_matcher(),
        }
    }

    pub fn with_timeout(page: &Page, timeout: Duration) -> Self {
        let mut correlator = Self::new(page);
        correlator.default_timeout = timeout;
        correlator
    }

    /// Create a pending capture for responses whose URL satisfies `url`.
    /// The capture is armed and resolved by [`PendingCapture::trigger`].
    pub fn expect(&self, url: UrlMatcher) -> PendingCapture {
        PendingCapture {
            page: self.page.clone(),
            url,
            status: self.default_status.clone(),
            timeout: self.default_timeout,
        }
    }
}

/// One in-flight expectation of a network response.
///
/// Consumed by [`trigger`](PendingCapture::trigger), so a capture resolves
/// exactly once and cannot be reused.
pub struct PendingCapture {
    page: Page,
    url: UrlMatcher,
    status: StatusMatcher,
    timeout: Duration,
}

impl PendingCapture {
    pub fn status(mut self, status: StatusMatcher) -> Self {
        self.status = status;
        self
    }

    pub fn within(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Subscribe to the page's response stream, run `action` exactly once,
    /// then wait for the first response matching both matchers.
    ///
    /// The subscription is created before `action` runs, so a response
    /// emitted synchronously during the action is still observed. A failing
    /// action propagates as [`RendezError::TriggerFailed`] and the wait
    /// never begins; after that point the only failure mode is
    /// [`RendezError::Timeout`].
    pub async fn trigger<F, Fut>(self, action: F) -> Result<CapturedResponse>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<()>>,
    {
        let mut rx = self.page.subscribe();
        let armed_at = Instant::now();

        tracing::debug!(matcher = %self.url, status = %self.status, "capture armed");

        action()
            .await
            .map_err(|e| RendezError::TriggerFailed(e.to_string()))?;

        let mut responses_seen = 0usize;
        loop {
            let Some(remaining) = self.timeout.checked_sub(armed_at.elapsed()) else {
                return Err(self.timeout_error(responses_seen));
            };

            match time::timeout(remaining, rx.recv()).await {
                Err(_) => return Err(self.timeout_error(responses_seen)),
                Ok(Err(RecvError::Closed)) => return Err(RendezError::StreamClosed),
                Ok(Err(RecvError::Lagged(skipped))) => {
                    tracing::warn!(skipped, "response stream lagged, events dropped");
                }
                Ok(Ok(event)) => {
                    // URL containment first, status set second
                    if self.url.matches(&event.url) && self.status.matches(event.status.code()) {
                        tracing::debug!(
                            url = %event.url,
                            status = event.status.code(),
                            elapsed_ms = armed_at.elapsed().as_millis() as u64,
                            "capture resolved"
                        );
                        return Ok(CapturedResponse::from_event(event, armed_at.elapsed()));
                    }
                    responses_seen += 1;
                    tracing::trace!(url = %event.url, "response ignored by capture");
                }
            }
        }
    }

    fn timeout_error(&self, responses_seen: usize) -> RendezError {
        RendezError::Timeout {
            matcher: format!("{}, {}", self.url, self.status),
            timeout: self.timeout,
            responses_seen,
        }
    }
}

/// A resolved capture, owned by the caller that armed it.
///
/// `parsed` is best-effort: a blank or malformed body leaves it `None`
/// (with a logged warning) rather than failing the capture, so a bad
/// payload cannot abort unrelated assertions later in the test.
#[derive(Debug, Clone)]
pub struct CapturedResponse {
    pub status: Status,
    pub headers: Headers,
    pub raw_body: String,
    pub parsed: Option<serde_json::Value>,
    /// Time from arming to resolution
    pub elapsed: Duration,
}

impl CapturedResponse {
    fn from_event(event: NetworkResponse, elapsed: Duration) -> Self {
        let parsed = schema::decode_soft(&event.body);
        Self {
            status: event.status,
            headers: event.headers,
            raw_body: event.body,
            parsed,
            elapsed,
        }
    }

    /// Decode the raw body into a typed record. Soft like `parsed`: any
    /// decode failure yields `None`.
    pub fn decode<T: DeserializeOwned>(&self) -> Option<T> {
        schema::decode_soft(&self.raw_body)
    }

    /// Walk a dot-separated path through the parsed body.
    /// `field("data.price")` on `{"data":{"price":"1,299"}}` yields the
    /// `"1,299"` value.
    pub fn field(&self, path: &str) -> Option<&serde_json::Value> {
        let mut current = self.parsed.as_ref()?;
        for segment in path.split('.') {
            current = current.get(segment)?;
        }
        Some(current)
    }

    /// String view of [`field`](Self::field), for UI-text reconciliation.
    pub fn field_str(&self, path: &str) -> Option<&str> {
        self.field(path)?.as_str()
    }
}
