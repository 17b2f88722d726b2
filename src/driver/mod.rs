pub mod events;
pub mod http;
pub mod page;

// Re-export commonly used types for convenient access
pub use events::{NetworkResponse, Status};
pub use http::HttpDriver;
pub use page::Page;
