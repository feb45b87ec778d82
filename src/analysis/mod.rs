//! Report analysis
//!
//! This module loads a JSON test report, writes the formatted copy and
//! the text log, and derives the summary used for the email body.

pub mod analyzer;
pub mod log_document;

// Re-export commonly used items
pub use analyzer::{AnalysisArtifacts, AnalysisOutcome, Analyzer, load_report};
pub use log_document::{LogDocument, render_email_body};
