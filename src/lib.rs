//! Summarize a pytest JSON report into a text log and email it, together
//! with a pretty-printed copy of the report, over SMTP with implicit TLS.

pub mod analysis;
pub mod config;
pub mod core;
pub mod mail;
pub mod reporting;
pub mod ui;

// Re-export commonly used items
pub use analysis::{AnalysisArtifacts, AnalysisOutcome, Analyzer};
pub use config::{CliConfig, Config};
pub use crate::core::{ReportMailError, Result, Summary, TestCase};
pub use mail::{EmailRequest, MailSettings, SendMail, SmtpMailer};
