use chrono::{DateTime, Local};
use serde_json::Value;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::analysis::log_document::{LogDocument, render_email_body};
use crate::config::Config;
use crate::core::constants::{log_format, report_keys};
use crate::core::error::{ReportMailError, Result};
use crate::core::types::{Summary, TestCase};
use crate::reporting::logging;

/// Files and values produced by a completed analysis
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisArtifacts {
    pub summary: Summary,
    pub log_path: PathBuf,
    pub formatted_path: PathBuf,
    pub email_body: String,
}

impl AnalysisArtifacts {
    /// Files to attach to the report email, log first
    pub fn attachments(&self) -> Vec<PathBuf> {
        vec![self.log_path.clone(), self.formatted_path.clone()]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisOutcome {
    /// Both output files were written
    Completed(AnalysisArtifacts),
    /// `report.summary` or `report.tests` is missing; nothing was written
    InvalidFormat,
}

/// Turns a JSON test report into a formatted copy, a text log and an email body.
#[derive(Debug, Clone)]
pub struct Analyzer {
    log_path: PathBuf,
    formatted_path: PathBuf,
    generated_at: Option<DateTime<Local>>,
}

impl Analyzer {
    pub fn new(log_path: impl Into<PathBuf>, formatted_path: impl Into<PathBuf>) -> Self {
        Self {
            log_path: log_path.into(),
            formatted_path: formatted_path.into(),
            generated_at: None,
        }
    }

    pub fn from_config(config: &Config, working_dir: &Path) -> Self {
        Self::new(
            config.log_path(working_dir),
            config.formatted_report_path(working_dir),
        )
    }

    /// Pin the timestamp written into the log header instead of using the clock.
    pub fn generated_at(mut self, timestamp: DateTime<Local>) -> Self {
        self.generated_at = Some(timestamp);
        self
    }

    pub fn analyze(&self, report_path: &Path) -> Result<AnalysisOutcome> {
        let document = load_report(report_path)?;
        logging::log_report_loaded(report_path);

        let report = document
            .get(report_keys::REPORT)
            .filter(|value| value.is_object())
            .ok_or_else(|| {
                ReportMailError::MalformedReport(format!(
                    "'{}' has no top-level '{}' object",
                    report_path.display(),
                    report_keys::REPORT
                ))
            })?;

        let (Some(summary_value), Some(tests_value)) = (
            report.get(report_keys::SUMMARY),
            report.get(report_keys::TESTS),
        ) else {
            logging::log_warning("Report is missing 'summary' or 'tests'");
            return Ok(AnalysisOutcome::InvalidFormat);
        };

        fs::write(&self.formatted_path, serde_json::to_string_pretty(&document)?)?;
        logging::log_file_written("formatted report", &self.formatted_path);

        let summary = decode_summary(summary_value)?;
        logging::log_summary(&summary);

        let tests = decode_tests(tests_value)?;

        let timestamp = self.generated_at.unwrap_or_else(Local::now);
        let log = LogDocument {
            generated_at: format_timestamp(&timestamp),
            summary: &summary,
            tests: &tests,
        };
        fs::write(&self.log_path, log.to_string())?;
        logging::log_file_written("analysis log", &self.log_path);

        Ok(AnalysisOutcome::Completed(AnalysisArtifacts {
            summary,
            log_path: self.log_path.clone(),
            formatted_path: self.formatted_path.clone(),
            email_body: render_email_body(&summary),
        }))
    }
}

/// Read and parse the report, mapping a missing file to `FileNotFound`.
pub fn load_report(path: &Path) -> Result<Value> {
    let content = fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => ReportMailError::FileNotFound(path.display().to_string()),
        _ => ReportMailError::Io(e),
    })?;

    Ok(serde_json::from_str(&content)?)
}

/// Header timestamp; the fraction is left out when it is exactly zero.
fn format_timestamp(timestamp: &DateTime<Local>) -> String {
    let layout = if timestamp.timestamp_subsec_micros() == 0 {
        log_format::TIMESTAMP_WHOLE_SECONDS
    } else {
        log_format::TIMESTAMP
    };
    timestamp.format(layout).to_string()
}

fn decode_summary(summary: &Value) -> Result<Summary> {
    if !summary.is_object() {
        return Err(ReportMailError::MalformedReport(format!(
            "'{}.{}' is not an object",
            report_keys::REPORT,
            report_keys::SUMMARY
        )));
    }
    Ok(Summary::from_summary_value(summary))
}

/// Decode `report.tests` into typed entries, naming the first malformed one.
fn decode_tests(tests: &Value) -> Result<Vec<TestCase>> {
    let entries = tests.as_array().ok_or_else(|| {
        ReportMailError::MalformedReport(format!(
            "'{}.{}' is not a list",
            report_keys::REPORT,
            report_keys::TESTS
        ))
    })?;

    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let test: TestCase = serde_json::from_value(entry.clone()).map_err(|e| {
                ReportMailError::MalformedReport(format!("test #{index}: {e}"))
            })?;

            if test.is_failed() && test.failure_message().is_none() {
                return Err(ReportMailError::MalformedReport(format!(
                    "test #{index} '{}' failed without 'call.longrepr'",
                    test.name
                )));
            }

            Ok(test)
        })
        .collect()
}
