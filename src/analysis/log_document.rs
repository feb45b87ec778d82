use std::fmt;

use crate::core::constants::log_format;
use crate::core::types::{Summary, TestCase};

/// Human-readable rendering of a report: a summary header followed by one
/// block per test case.
#[derive(Debug)]
pub struct LogDocument<'a> {
    pub generated_at: String,
    pub summary: &'a Summary,
    pub tests: &'a [TestCase],
}

impl fmt::Display for LogDocument<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} - {}", log_format::TITLE, self.generated_at)?;
        writeln!(f, "{}: {}", log_format::NUM_TESTS, self.summary.total)?;
        writeln!(f, "{}: {}", log_format::NUM_PASSED, self.summary.passed)?;
        writeln!(f, "{}: {}", log_format::NUM_FAILED, self.summary.failed)?;
        writeln!(
            f,
            "{}: {:.2} seconds",
            log_format::TOTAL_DURATION,
            self.summary.duration
        )?;
        writeln!(f)?;

        for test in self.tests {
            writeln!(f, "{}: {}", log_format::TEST_CASE, test.name)?;
            writeln!(f, "{}: {}", log_format::OUTCOME, test.outcome)?;
            writeln!(f, "{}: {:.2} seconds", log_format::DURATION, test.duration)?;
            if test.is_failed()
                && let Some(message) = test.failure_message()
            {
                writeln!(f, "{}: {}", log_format::FAILURE_MESSAGE, message)?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

/// Short plain-text body used for the email
pub fn render_email_body(summary: &Summary) -> String {
    format!(
        "{} :\n\n{}: {}\n{}: {}\n{}: {}",
        log_format::TITLE,
        log_format::NUM_TESTS,
        summary.total,
        log_format::NUM_PASSED,
        summary.passed,
        log_format::NUM_FAILED,
        summary.failed
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(total: i64, failed: i64, duration: f64) -> Summary {
        Summary {
            total,
            passed: total - failed,
            failed,
            duration,
        }
    }

    fn case(name: &str, outcome: &str, duration: f64, longrepr: Option<&str>) -> TestCase {
        TestCase {
            name: name.to_string(),
            outcome: outcome.to_string(),
            duration,
            call: longrepr.map(|text| crate::core::types::TestCall {
                longrepr: Some(serde_json::Value::String(text.to_string())),
            }),
        }
    }

    #[test]
    fn test_header_lines() {
        let summary = summary(10, 2, 5.5);
        let document = LogDocument {
            generated_at: "2024-05-01 10:00:00.000000".to_string(),
            summary: &summary,
            tests: &[],
        };

        let rendered = document.to_string();
        assert_eq!(
            rendered,
            "Test Report Analysis - 2024-05-01 10:00:00.000000\n\
             Number of Tests: 10\n\
             Number of Tests Passed: 8\n\
             Number of Tests Failed: 2\n\
             Total Duration: 5.50 seconds\n\n"
        );
    }

    #[test]
    fn test_failed_case_has_failure_message() {
        let summary = summary(2, 1, 0.3);
        let tests = vec![
            case("test_ok", "passed", 0.1, Some("ignored")),
            case("test_bad", "failed", 0.2, Some("AssertionError: boom")),
        ];
        let document = LogDocument {
            generated_at: "now".to_string(),
            summary: &summary,
            tests: &tests,
        };

        let rendered = document.to_string();
        assert!(rendered.contains(
            "Test Case: test_ok\nOutcome: passed\nDuration: 0.10 seconds\n\n"
        ));
        assert!(rendered.contains(
            "Test Case: test_bad\nOutcome: failed\nDuration: 0.20 seconds\nFailure Message: AssertionError: boom\n\n"
        ));
        assert_eq!(rendered.matches("Failure Message:").count(), 1);
    }

    #[test]
    fn test_duration_rounding() {
        let summary = summary(1, 0, 1.005);
        let tests = vec![case("test_slow", "passed", 12.3456, None)];
        let document = LogDocument {
            generated_at: "now".to_string(),
            summary: &summary,
            tests: &tests,
        };

        let rendered = document.to_string();
        assert!(rendered.contains("Duration: 12.35 seconds"));
    }

    #[test]
    fn test_email_body() {
        assert_eq!(
            render_email_body(&summary(10, 2, 5.5)),
            "Test Report Analysis :\n\nNumber of Tests: 10\nNumber of Tests Passed: 8\nNumber of Tests Failed: 2"
        );
    }
}
