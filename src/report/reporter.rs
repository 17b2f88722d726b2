use colored::Colorize;

use crate::report::types::{RunSummary, StepOutcome, StepResult};
use crate::utils::{ResponseFormat, ResponseFormatter};

pub struct StepReporter {
    verbose: bool,
    formatter: ResponseFormatter,
}

impl StepReporter {
    pub fn new(verbose: bool) -> Self {
        let format = if verbose {
            ResponseFormat::Verbose
        } else {
            ResponseFormat::Compact
        };

        Self {
            verbose,
            formatter: ResponseFormatter::new(format),
        }
    }

    pub fn print_header(&self, case_name: &str, total: usize) {
        println!("\nRunning {} steps of {}...\n", total, case_name.bold());
    }

    /// Print one step line; failed steps always get the captured-response
    /// detail, passing ones only in verbose mode.
    pub fn print_step(&self, step: &StepResult) {
        match &step.outcome {
            StepOutcome::Skipped => {
                println!(
                    " {} [{}] {} {}",
                    "⊘".dimmed(),
                    step.step_number,
                    step.name,
                    "(skipped)".dimmed()
                );
                return;
            }
            StepOutcome::Passed => {
                println!(
                    " {} [{}] {} ({}ms)",
                    "✓".green(),
                    step.step_number,
                    step.name,
                    step.duration.as_millis()
                );
            }
            StepOutcome::Failed(message) => {
                println!(
                    " {} [{}] {} ({}ms)",
                    "✗".red(),
                    step.step_number,
                    step.name,
                    step.duration.as_millis()
                );
                println!("   {}: {}", "Error".red().bold(), message);
            }
        }

        if (self.verbose || !step.is_passed())
            && let Some(captured) = &step.captured
        {
            for line in self.formatter.format(captured).lines() {
                println!("   {}", line);
            }
            println!();
        }

        for attachment in &step.attachments {
            println!(
                "   {} {} -> {}",
                "•".dimmed(),
                attachment.name,
                attachment.path.display()
            );
        }
    }

    pub fn print_summary(&self, summary: &RunSummary) {
        println!("\n{}", "━".repeat(50));
        println!("{}", "Summary".bold());
        println!("{}", "━".repeat(50));

        if summary.skipped > 0 {
            println!(
                "  {}: {} passed, {} failed, {} skipped, {} total",
                "Steps".bold(),
                summary.passed.to_string().green(),
                summary.failed.to_string().red(),
                summary.skipped.to_string().dimmed(),
                summary.total
            );
        } else if summary.all_passed() {
            println!(
                "  {}: {} passed, {} total",
                "Steps".bold(),
                summary.passed.to_string().green(),
                summary.total
            );
        } else {
            println!(
                "  {}: {} passed, {} failed, {} total",
                "Steps".bold(),
                summary.passed.to_string().green(),
                summary.failed.to_string().red(),
                summary.total
            );
        }

        println!(
            "  {}: {:.3}s",
            "Duration".bold(),
            summary.total_duration.as_secs_f64()
        );
        println!();
    }
}

impl Default for StepReporter {
    fn default() -> Self {
        Self::new(false)
    }
}
