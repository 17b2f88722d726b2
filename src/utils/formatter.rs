use colored::*;

use crate::correlator::CapturedResponse;

pub enum ResponseFormat {
    Compact,
    Verbose,
}

pub struct ResponseFormatter {
    format: ResponseFormat,
}

impl ResponseFormatter {
    pub fn new(format: ResponseFormat) -> Self {
        Self { format }
    }

    pub fn format(&self, captured: &CapturedResponse) -> String {
        match self.format {
            ResponseFormat::Compact => self.format_compact(captured),
            ResponseFormat::Verbose => self.format_verbose(captured),
        }
    }

    fn status_line(&self, captured: &CapturedResponse) -> String {
        let line = format!(
            "HTTP {} {}",
            captured.status.code(),
            captured.status.reason_phrase()
        );
        if captured.status.is_success() {
            line.green().to_string()
        } else {
            line.red().to_string()
        }
    }

    fn format_compact(&self, captured: &CapturedResponse) -> String {
        format!(
            "{} ({} bytes, captured after {}ms)",
            self.status_line(captured),
            captured.raw_body.len(),
            captured.elapsed.as_millis()
        )
    }

    fn format_verbose(&self, captured: &CapturedResponse) -> String {
        let mut output = vec![self.format_compact(captured)];

        for (name, value) in captured.headers.iter() {
            output.push(format!(
                "{}: {}",
                name.as_str().dimmed(),
                value.to_str().unwrap_or("<non-utf8>")
            ));
        }

        match &captured.parsed {
            Some(value) => {
                let pretty = serde_json::to_string_pretty(value)
                    .unwrap_or_else(|_| captured.raw_body.clone());
                output.push(pretty);
            }
            None if captured.raw_body.is_empty() => {
                output.push("<empty body>".dimmed().to_string());
            }
            None => {
                output.push(format!("{} {}", "<unparsed>".yellow(), captured.raw_body));
            }
        }

        output.join("\n")
    }
}
