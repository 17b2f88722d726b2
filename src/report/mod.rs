pub mod reporter;
pub mod types;

pub use reporter::StepReporter;
pub use types::{Attachment, RunSummary, StepOutcome, StepResult};
