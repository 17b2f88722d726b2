use std::path::PathBuf;
use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::correlator::CapturedResponse;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    Passed,
    Failed(String),
    Skipped,
}

/// File captured alongside a step (screenshot, response dump, ...).
#[derive(Debug, Clone)]
pub struct Attachment {
    pub name: String,
    pub path: PathBuf,
}

/// The outcome of one test step.
#[derive(Debug, Clone)]
pub struct StepResult {
    /// Step position within the test case (from 1)
    pub step_number: usize,

    pub name: String,

    pub outcome: StepOutcome,

    pub duration: Duration,

    pub started_at: DateTime<Utc>,

    /// The response this step captured, when it armed one
    pub captured: Option<CapturedResponse>,

    pub attachments: Vec<Attachment>,
}

impl StepResult {
    pub fn passed(step_number: usize, name: impl Into<String>, duration: Duration) -> Self {
        Self {
            step_number,
            name: name.into(),
            outcome: StepOutcome::Passed,
            duration,
            started_at: Utc::now(),
            captured: None,
            attachments: Vec::new(),
        }
    }

    pub fn failed(
        step_number: usize,
        name: impl Into<String>,
        duration: Duration,
        message: impl Into<String>,
    ) -> Self {
        Self {
            step_number,
            name: name.into(),
            outcome: StepOutcome::Failed(message.into()),
            duration,
            started_at: Utc::now(),
            captured: None,
            attachments: Vec::new(),
        }
    }

    pub fn skipped(step_number: usize, name: impl Into<String>) -> Self {
        Self {
            step_number,
            name: name.into(),
            outcome: StepOutcome::Skipped,
            duration: Duration::from_secs(0),
            started_at: Utc::now(),
            captured: None,
            attachments: Vec::new(),
        }
    }

    pub fn with_capture(mut self, captured: CapturedResponse) -> Self {
        self.captured = Some(captured);
        self
    }

    pub fn attach(mut self, name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        self.attachments.push(Attachment {
            name: name.into(),
            path: path.into(),
        });
        self
    }

    pub fn is_passed(&self) -> bool {
        self.outcome == StepOutcome::Passed
    }

    pub fn is_skipped(&self) -> bool {
        self.outcome == StepOutcome::Skipped
    }
}

/// Aggregate over one test case's steps.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
    pub total_duration: Duration,
}

impl RunSummary {
    pub fn from_steps(steps: &[StepResult]) -> Self {
        let passed = steps.iter().filter(|s| s.is_passed()).count();
        let skipped = steps.iter().filter(|s| s.is_skipped()).count();
        let total_duration = steps.iter().map(|s| s.duration).sum();

        Self {
            total: steps.len(),
            passed,
            failed: steps.len() - passed - skipped,
            skipped,
            total_duration,
        }
    }

    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_counts() {
        let steps = vec![
            StepResult::passed(1, "login", Duration::from_millis(800)),
            StepResult::failed(2, "book lab test", Duration::from_millis(1200), "price mismatch"),
            StepResult::skipped(3, "order tracking"),
        ];

        let summary = RunSummary::from_steps(&steps);
        assert_eq!(summary.total, 3);
        assert_eq!(summary.passed, 1);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.total_duration, Duration::from_millis(2000));
        assert!(!summary.all_passed());
    }

    #[test]
    fn test_summary_all_passed() {
        let steps = vec![
            StepResult::passed(1, "a", Duration::from_millis(10)),
            StepResult::skipped(2, "b"),
        ];

        let summary = RunSummary::from_steps(&steps);
        assert!(summary.all_passed());
    }

    #[test]
    fn test_attachments() {
        let step = StepResult::passed(1, "dashboard", Duration::from_millis(5))
            .attach("screenshot", "/tmp/dashboard.png");

        assert_eq!(step.attachments.len(), 1);
        assert_eq!(step.attachments[0].name, "screenshot");
    }
}
