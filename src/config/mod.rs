//! Configuration management
//!
//! This module loads configuration from TOML files, the process environment
//! (optionally seeded from a `.env` file) and CLI arguments, and resolves it
//! into the paths and mail settings the rest of the crate uses.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::constants::{defaults, env_vars};
use crate::core::error::{ReportMailError, Result};
use crate::mail::MailSettings;

#[derive(Clone, Serialize, Deserialize)]
pub struct Config {
    /// JSON report to analyze, relative to the working directory
    pub report_file: Option<String>,

    /// Text log to write, relative to the working directory
    pub log_file: Option<String>,

    /// Pretty-printed copy of the report, relative to the working directory
    pub formatted_report_file: Option<String>,

    /// SMTP relay host (implicit TLS)
    pub smtp_host: Option<String>,

    /// SMTP relay port
    pub smtp_port: Option<u16>,

    /// SMTP login, also used as the sender address
    pub smtp_user: Option<String>,

    /// SMTP password
    pub smtp_password: Option<String>,

    /// Address the report is sent to
    pub receiver_email: Option<String>,

    /// Subject line of the email
    pub subject: Option<String>,

    /// Enable verbose logging
    pub verbose: Option<bool>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            report_file: Some(defaults::REPORT_FILE.to_string()),
            log_file: Some(defaults::LOG_FILE.to_string()),
            formatted_report_file: Some(defaults::FORMATTED_REPORT_FILE.to_string()),
            smtp_host: Some(defaults::SMTP_HOST.to_string()),
            smtp_port: Some(defaults::SMTP_PORT),
            smtp_user: None,
            smtp_password: None,
            receiver_email: None,
            subject: Some(defaults::SUBJECT.to_string()),
            verbose: Some(false),
        }
    }
}

// Keeps the password out of logs and panic messages.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("report_file", &self.report_file)
            .field("log_file", &self.log_file)
            .field("formatted_report_file", &self.formatted_report_file)
            .field("smtp_host", &self.smtp_host)
            .field("smtp_port", &self.smtp_port)
            .field("smtp_user", &self.smtp_user)
            .field(
                "smtp_password",
                &self.smtp_password.as_ref().map(|_| "<redacted>"),
            )
            .field("receiver_email", &self.receiver_email)
            .field("subject", &self.subject)
            .field("verbose", &self.verbose)
            .finish()
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            ReportMailError::Config(format!(
                "Could not read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| {
            ReportMailError::Config(format!(
                "Invalid TOML in config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Try to find and load a config file in `dir` or its parents
    pub fn load_from_standard_locations(dir: &Path) -> Self {
        for ancestor in dir.ancestors().take(defaults::CONFIG_SEARCH_DEPTH + 1) {
            let candidate = ancestor.join(defaults::CONFIG_FILE);
            if candidate.is_file() {
                if let Ok(config) = Self::load_from_file(&candidate) {
                    return config;
                }
            }
        }

        Self::default()
    }

    /// Merge values from the process environment (environment takes precedence over files)
    pub fn merge_with_process_env(&mut self) -> Result<()> {
        self.merge_with_env(|key| std::env::var(key).ok())
    }

    /// Merge values from an environment lookup. Empty values are ignored.
    pub fn merge_with_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(user) = get(env_vars::SMTP_USER) {
            self.smtp_user = Some(user);
        }
        if let Some(password) = get(env_vars::SMTP_PASSWORD) {
            self.smtp_password = Some(password);
        }
        if let Some(receiver) = get(env_vars::RECEIVER_EMAIL) {
            self.receiver_email = Some(receiver);
        }
        if let Some(report_file) = get(env_vars::REPORT_FILE) {
            self.report_file = Some(report_file);
        }
        if let Some(log_file) = get(env_vars::LOG_FILE) {
            self.log_file = Some(log_file);
        }
        if let Some(host) = get(env_vars::SMTP_HOST) {
            self.smtp_host = Some(host);
        }
        if let Some(port) = get(env_vars::SMTP_PORT) {
            let port = port.trim().parse::<u16>().map_err(|_| {
                ReportMailError::Config(format!(
                    "{} '{port}' is not a valid port number",
                    env_vars::SMTP_PORT
                ))
            })?;
            self.smtp_port = Some(port);
        }

        Ok(())
    }

    /// Merge this config with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli_config: &CliConfig) {
        if let Some(ref report_file) = cli_config.report_file {
            self.report_file = Some(report_file.clone());
        }
        if let Some(ref log_file) = cli_config.log_file {
            self.log_file = Some(log_file.clone());
        }
        if let Some(ref formatted) = cli_config.formatted_report_file {
            self.formatted_report_file = Some(formatted.clone());
        }
        if cli_config.verbose {
            self.verbose = Some(true);
        }
    }

    /// Path of the input report inside `working_dir`
    pub fn report_path(&self, working_dir: &Path) -> PathBuf {
        working_dir.join(self.report_file.as_deref().unwrap_or(defaults::REPORT_FILE))
    }

    /// Path of the generated log inside `working_dir`
    pub fn log_path(&self, working_dir: &Path) -> PathBuf {
        working_dir.join(self.log_file.as_deref().unwrap_or(defaults::LOG_FILE))
    }

    /// Path of the pretty-printed report copy inside `working_dir`
    pub fn formatted_report_path(&self, working_dir: &Path) -> PathBuf {
        working_dir.join(
            self.formatted_report_file
                .as_deref()
                .unwrap_or(defaults::FORMATTED_REPORT_FILE),
        )
    }

    pub fn subject(&self) -> &str {
        self.subject.as_deref().unwrap_or(defaults::SUBJECT)
    }

    /// Resolve credentials, addresses and relay into mail settings.
    ///
    /// Fails with a configuration error naming the first missing variable.
    pub fn mail_settings(&self) -> Result<MailSettings> {
        let username = required(&self.smtp_user, env_vars::SMTP_USER)?;
        let password = required(&self.smtp_password, env_vars::SMTP_PASSWORD)?;
        let receiver = required(&self.receiver_email, env_vars::RECEIVER_EMAIL)?;

        Ok(MailSettings {
            host: self
                .smtp_host
                .clone()
                .unwrap_or_else(|| defaults::SMTP_HOST.to_string()),
            port: self.smtp_port.unwrap_or(defaults::SMTP_PORT),
            sender: username.parse()?,
            recipient: receiver.parse()?,
            username: username.to_string(),
            password: password.to_string(),
        })
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.smtp_port == Some(0) {
            return Err(ReportMailError::Config(
                "SMTP port cannot be 0. Expected a port number between 1-65535.".to_string(),
            ));
        }

        let file_names = [
            ("report_file", &self.report_file),
            ("log_file", &self.log_file),
            ("formatted_report_file", &self.formatted_report_file),
        ];
        for (key, value) in file_names {
            if let Some(name) = value
                && name.trim().is_empty()
            {
                return Err(ReportMailError::Config(format!(
                    "'{key}' cannot be empty. Expected a file name."
                )));
            }
        }

        if let Some(ref host) = self.smtp_host
            && host.trim().is_empty()
        {
            return Err(ReportMailError::Config(
                "'smtp_host' cannot be empty.".to_string(),
            ));
        }

        Ok(())
    }
}

fn required<'a>(value: &'a Option<String>, name: &str) -> Result<&'a str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ReportMailError::Config(format!("{name} is not set")))
}

/// Load a `.env` file from the working directory or its parents into the
/// process environment. Variables already set are left alone.
pub fn load_dotenv() -> Option<PathBuf> {
    dotenvy::dotenv().ok()
}

/// Configuration options that can come from CLI
#[derive(Debug, Default)]
pub struct CliConfig {
    // Files
    pub report_file: Option<String>,           // --report
    pub log_file: Option<String>,              // --log-file
    pub formatted_report_file: Option<String>, // --formatted-report

    // Behavior
    pub no_email: bool, // --no-email

    // Output
    pub quiet: bool,   // --quiet
    pub verbose: bool, // --verbose

    // Configuration
    pub config_file: Option<String>, // --config
    pub no_config: bool,             // --no-config
}
