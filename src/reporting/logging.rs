use crate::config::Config;
use crate::core::types::Summary;
use log::{debug, error, info, warn};
use std::path::Path;

/// Initialize the logger with appropriate level based on verbosity
pub fn init_logger(verbose: bool, quiet: bool) {
    let rust_log = std::env::var("RUST_LOG").ok();

    // `try_init` so repeated calls (tests) don't panic
    let _ = logger_builder(verbose, quiet, rust_log.as_deref()).try_init();

    debug!("Logger initialized");
}

/// `--quiet` and `--verbose` win; otherwise `RUST_LOG` directives apply on top of Off.
fn logger_builder(verbose: bool, quiet: bool, rust_log: Option<&str>) -> env_logger::Builder {
    let mut builder = env_logger::Builder::new();
    builder
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(false);

    if quiet {
        builder.filter_level(log::LevelFilter::Off);
    } else if verbose {
        builder.filter_level(log::LevelFilter::Debug);
    } else {
        builder.filter_level(log::LevelFilter::Off);
        if let Some(directives) = rust_log {
            builder.parse_filters(directives);
        }
    }

    builder
}

/// Log configuration information. The password is never logged.
pub fn log_config_info(config: &Config, working_dir: &Path) {
    info!("Working directory: {}", working_dir.display());
    info!(
        "Files: report={}, log={}, formatted={}",
        config.report_path(working_dir).display(),
        config.log_path(working_dir).display(),
        config.formatted_report_path(working_dir).display()
    );
    info!(
        "SMTP: host={}, port={}, user={}, receiver={}",
        config.smtp_host.as_deref().unwrap_or("-"),
        config.smtp_port.map(|p| p.to_string()).as_deref().unwrap_or("-"),
        config.smtp_user.as_deref().unwrap_or("-"),
        config.receiver_email.as_deref().unwrap_or("-")
    );
}

/// Log where environment values were loaded from
pub fn log_dotenv(path: Option<&Path>) {
    match path {
        Some(path) => debug!("Loaded environment from {}", path.display()),
        None => debug!("No .env file found"),
    }
}

pub fn log_report_loaded(path: &Path) {
    info!("Loaded report {}", path.display());
}

/// Log derived summary statistics
pub fn log_summary(summary: &Summary) {
    if summary.all_passed() {
        info!(
            "✅ {}/{} tests passed ({:.2}s)",
            summary.passed, summary.total, summary.duration
        );
    } else {
        warn!(
            "❌ {}/{} tests passed, {} failed ({:.2}s)",
            summary.passed, summary.total, summary.failed, summary.duration
        );
    }
}

pub fn log_file_written(kind: &str, path: &Path) {
    info!("Wrote {kind} to {}", path.display());
}

/// Log the start of an SMTP delivery
pub fn log_mail_start(host: &str, port: u16, recipient: &str, attachments: usize) {
    info!("Sending report to {recipient} via {host}:{port} with {attachments} attachment(s)");
}

pub fn log_smtp_response(code: &str) {
    debug!("SMTP server answered {code}");
}

pub fn log_mail_sent(recipient: &str) {
    info!("Report delivered to {recipient}");
}

/// Log error information
pub fn log_error(message: &str, source: Option<&dyn std::error::Error>) {
    match source {
        Some(err) => error!("{message}: {err}"),
        None => error!("{message}"),
    }
}

/// Log warning information
pub fn log_warning(message: &str) {
    warn!("{message}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_logger_initialization_is_repeatable() {
        init_logger(true, false);
        init_logger(false, true);
        init_logger(false, false);
    }

    #[test]
    fn test_rust_log_applies_without_flags() {
        let logger = logger_builder(false, false, Some("debug")).build();
        assert_eq!(logger.filter(), log::LevelFilter::Debug);

        let logger = logger_builder(false, false, None).build();
        assert_eq!(logger.filter(), log::LevelFilter::Off);
    }

    #[test]
    fn test_flags_override_rust_log() {
        let logger = logger_builder(false, true, Some("debug")).build();
        assert_eq!(logger.filter(), log::LevelFilter::Off);

        let logger = logger_builder(true, false, Some("warn")).build();
        assert_eq!(logger.filter(), log::LevelFilter::Debug);
    }

    #[test]
    fn test_log_config_info_with_defaults() {
        log_config_info(&Config::default(), Path::new("/tmp"));
    }

    #[test]
    fn test_log_config_info_without_smtp_values() {
        let config = Config {
            smtp_host: None,
            smtp_port: None,
            ..Default::default()
        };
        log_config_info(&config, Path::new("."));
    }

    #[test]
    fn test_log_summary_variants() {
        log_summary(&Summary {
            total: 3,
            passed: 3,
            failed: 0,
            duration: 0.5,
        });
        log_summary(&Summary {
            total: 3,
            passed: 1,
            failed: 2,
            duration: 1.25,
        });
    }

    #[test]
    fn test_log_mail_lifecycle() {
        log_mail_start("smtp.gmail.com", 465, "team@example.com", 2);
        log_smtp_response("250");
        log_mail_sent("team@example.com");
    }

    #[test]
    fn test_log_error_with_source() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        log_error("Failed to read report", Some(&io_error));
        log_error("Something went wrong", None);
        log_warning("Report is missing 'tests'");
    }

    #[test]
    fn test_log_dotenv() {
        log_dotenv(Some(Path::new(".env")));
        log_dotenv(None);
    }
}
