use chrono::{DateTime, Utc};
use reqwest::header::HeaderMap as Headers;

use crate::{RendezError, Result};

/// One observed network response on a page.
///
/// Browser-driver adapters build one of these from their response hook and
/// hand it to [`Page::emit_response`](crate::driver::Page::emit_response);
/// the correlator consumes them from the page's stream.
#[derive(Debug, Clone)]
pub struct NetworkResponse {
    /// Absolute request URL the response belongs to
    pub url: String,
    pub status: Status,
    pub headers: Headers,
    pub body: String,
    /// When the harness observed the response
    pub received_at: DateTime<Utc>,
}

impl NetworkResponse {
    pub fn new(url: impl Into<String>, status: u16, headers: Headers, body: String) -> Result<Self> {
        Ok(Self {
            url: url.into(),
            status: Status::new(status)?,
            headers,
            body,
            received_at: Utc::now(),
        })
    }

    /// Shorthand for building an event without headers, used by adapters
    /// that cannot surface them and by tests.
    pub fn bare(url: impl Into<String>, status: u16, body: impl Into<String>) -> Result<Self> {
        Self::new(url, status, Headers::new(), body.into())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Status(u16);

impl Status {
    pub fn new(code: u16) -> Result<Self> {
        if (100..600).contains(&code) {
            Ok(Self(code))
        } else {
            Err(RendezError::Other(format!(
                "Invalid HTTP status code: {}",
                code
            )))
        }
    }

    pub fn code(&self) -> u16 {
        self.0
    }

    pub fn is_success(&self) -> bool {
        (200..=299).contains(&self.0)
    }

    pub fn is_redirect(&self) -> bool {
        (300..=399).contains(&self.0)
    }

    pub fn is_client_error(&self) -> bool {
        (400..=499).contains(&self.0)
    }

    pub fn is_server_error(&self) -> bool {
        (500..=599).contains(&self.0)
    }

    pub fn reason_phrase(&self) -> &'static str {
        match self.0 {
            200 => "OK",
            201 => "Created",
            204 => "No Content",
            304 => "Not Modified",
            400 => "Bad Request",
            401 => "Unauthorized",
            403 => "Forbidden",
            404 => "Not Found",
            405 => "Method Not Allowed",
            500 => "Internal Server Error",
            502 => "Bad Gateway",
            503 => "Service Unavailable",
            _ => "Unknown",
        }
    }
}
