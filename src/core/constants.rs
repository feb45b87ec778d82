/// Application-wide constants to avoid magic values throughout the codebase.
///
/// This module centralizes file names, environment variable names, SMTP
/// endpoints and the fixed strings that appear in the generated log and email.
/// Default configuration values
pub mod defaults {
    /// Report file read from the working directory
    pub const REPORT_FILE: &str = "report.json";
    /// Log file written to the working directory
    pub const LOG_FILE: &str = "test_analysis.log";
    /// Pretty-printed copy of the report
    pub const FORMATTED_REPORT_FILE: &str = "formatted_report.json";
    /// SMTP relay used when none is configured
    pub const SMTP_HOST: &str = "smtp.gmail.com";
    /// Implicit TLS submission port
    pub const SMTP_PORT: u16 = 465;
    /// Subject line of the outgoing email
    pub const SUBJECT: &str = "Test Report";
    /// Config file looked up in the working directory and its parents
    pub const CONFIG_FILE: &str = ".reportmail.toml";
    /// How many parent directories are searched for a config file
    pub const CONFIG_SEARCH_DEPTH: usize = 3;
}

/// Environment variable names
pub mod env_vars {
    pub const SMTP_USER: &str = "SMTP_USER";
    pub const SMTP_PASSWORD: &str = "SMTP_PASSWORD";
    pub const RECEIVER_EMAIL: &str = "RECEIVER_EMAIL";
    pub const REPORT_FILE: &str = "REPORT_FILE";
    pub const LOG_FILE: &str = "LOG_FILE";
    pub const SMTP_HOST: &str = "SMTP_HOST";
    pub const SMTP_PORT: &str = "SMTP_PORT";

    /// Every variable the configuration layer reads
    pub const ALL: [&str; 7] = [
        SMTP_USER,
        SMTP_PASSWORD,
        RECEIVER_EMAIL,
        REPORT_FILE,
        LOG_FILE,
        SMTP_HOST,
        SMTP_PORT,
    ];
}

/// Keys and values of the pytest JSON report
pub mod report_keys {
    pub const REPORT: &str = "report";
    pub const SUMMARY: &str = "summary";
    pub const TESTS: &str = "tests";
    pub const NUM_TESTS: &str = "num_tests";
    pub const FAILED: &str = "failed";
    pub const DURATION: &str = "duration";
    /// Outcome value that adds a failure message to the log
    pub const OUTCOME_FAILED: &str = "failed";
}

/// Fixed text of the log document and email body
pub mod log_format {
    pub const TITLE: &str = "Test Report Analysis";
    pub const NUM_TESTS: &str = "Number of Tests";
    pub const NUM_PASSED: &str = "Number of Tests Passed";
    pub const NUM_FAILED: &str = "Number of Tests Failed";
    pub const TOTAL_DURATION: &str = "Total Duration";
    pub const TEST_CASE: &str = "Test Case";
    pub const OUTCOME: &str = "Outcome";
    pub const DURATION: &str = "Duration";
    pub const FAILURE_MESSAGE: &str = "Failure Message";
    /// Timestamp layout of the log header (local time, microseconds)
    pub const TIMESTAMP: &str = "%Y-%m-%d %H:%M:%S%.6f";
    /// Header layout when the microsecond part is zero
    pub const TIMESTAMP_WHOLE_SECONDS: &str = "%Y-%m-%d %H:%M:%S";
}

/// Error message constants
pub mod error_messages {
    /// Printed when `report.summary` or `report.tests` is missing
    pub const INVALID_REPORT_FORMAT: &str = "Error: Invalid JSON report format.";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_file_names() {
        assert_eq!(defaults::REPORT_FILE, "report.json");
        assert_eq!(defaults::LOG_FILE, "test_analysis.log");
        assert_eq!(defaults::FORMATTED_REPORT_FILE, "formatted_report.json");
    }

    #[test]
    fn test_smtp_defaults() {
        assert_eq!(defaults::SMTP_HOST, "smtp.gmail.com");
        assert_eq!(defaults::SMTP_PORT, 465);
        assert_eq!(defaults::SUBJECT, "Test Report");
    }

    #[test]
    fn test_env_var_names_are_unique() {
        let mut names = env_vars::ALL.to_vec();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), env_vars::ALL.len());
    }
}
