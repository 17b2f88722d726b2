pub mod config;
pub mod correlator;
pub mod driver;
pub mod error;
pub mod flow;
pub mod logger;
pub mod report;
pub mod schema;
pub mod session;
pub mod utils;

// Re-export commonly used types
pub use correlator::{CapturedResponse, Correlator, StatusMatcher, UrlMatcher};
pub use driver::{NetworkResponse, Page, Status};
pub use error::{RendezError, Result};
