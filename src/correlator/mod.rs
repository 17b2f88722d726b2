pub mod capture;
pub mod matcher;

// Re-export commonly used types for convenient access
pub use capture::{CapturedResponse, Correlator, PendingCapture};
pub use matcher::{StatusMatcher, UrlMatcher};
