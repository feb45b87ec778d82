//! User-facing status lines for reportmail

use std::path::Path;

use crate::core::constants::error_messages;
use crate::core::types::Summary;

pub fn analysis_written_message(log_path: &Path) -> String {
    format!("Test report analysis written to {}", log_path.display())
}

pub fn email_sent_message(recipient: &str) -> String {
    format!("Email sent to {recipient} with attachments.")
}

pub fn summary_message(summary: &Summary) -> String {
    format!(
        "{} tests: {} passed, {} failed in {:.2} seconds",
        summary.total, summary.passed, summary.failed, summary.duration
    )
}

/// Printed when `report.summary` or `report.tests` is missing
pub fn display_invalid_format() {
    println!("{}", error_messages::INVALID_REPORT_FORMAT);
}

pub fn display_analysis_written(log_path: &Path) {
    println!("{}", analysis_written_message(log_path));
}

pub fn display_summary(summary: &Summary) {
    println!("{}", summary_message(summary));
}

pub fn display_analysis_complete() {
    println!("Test report analysis completed successfully.");
}

pub fn display_email_sent(recipient: &str) {
    println!("{}", email_sent_message(recipient));
}

pub fn display_email_skipped() {
    println!("Email delivery skipped (--no-email).");
}
