// Command-line interface definitions and parsing for reportmail

use crate::config::CliConfig;
use clap::Parser;

/// Summarize a JSON test report and email the results.
///
/// With no arguments, reads `report.json` from the current directory, writes
/// `formatted_report.json` and `test_analysis.log` next to it, and mails both
/// to RECEIVER_EMAIL using SMTP_USER / SMTP_PASSWORD.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    // Files
    /// Report to analyze (default: $REPORT_FILE or report.json)
    #[arg(long, value_name = "FILE", help_heading = "Files")]
    pub report: Option<String>,

    /// Log file to write (default: $LOG_FILE or test_analysis.log)
    #[arg(long, value_name = "FILE", help_heading = "Files")]
    pub log_file: Option<String>,

    /// Formatted report copy to write (default: formatted_report.json)
    #[arg(long, value_name = "FILE", help_heading = "Files")]
    pub formatted_report: Option<String>,

    // Delivery
    /// Analyze only; do not send the email
    #[arg(long, help_heading = "Delivery")]
    pub no_email: bool,

    // Output & Verbosity
    /// Suppress status output
    #[arg(short = 'q', long, help_heading = "Output & Verbosity")]
    pub quiet: bool,

    /// Enable verbose logging
    #[arg(short = 'v', long, help_heading = "Output & Verbosity")]
    pub verbose: bool,

    // Configuration
    /// Use specific config file
    #[arg(long, value_name = "FILE", help_heading = "Configuration")]
    pub config: Option<String>,

    /// Ignore config files
    #[arg(long, help_heading = "Configuration")]
    pub no_config: bool,
}

/// Convert parsed arguments into the configuration overlay
pub fn cli_to_config(cli: &Cli) -> CliConfig {
    CliConfig {
        report_file: cli.report.clone(),
        log_file: cli.log_file.clone(),
        formatted_report_file: cli.formatted_report.clone(),
        no_email: cli.no_email,
        quiet: cli.quiet,
        verbose: cli.verbose,
        config_file: cli.config.clone(),
        no_config: cli.no_config,
    }
}
