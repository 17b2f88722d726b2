pub mod envelope;

pub use envelope::{ApiEnvelope, decode_soft};
