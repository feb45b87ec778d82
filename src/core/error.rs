use std::fmt;

/// Error types for reportmail operations
#[derive(Debug)]
pub enum ReportMailError {
    /// IO error (file operations, etc.)
    Io(std::io::Error),

    /// JSON parsing or serialization error
    Json(serde_json::Error),

    /// TOML parsing error
    TomlParsing(toml::de::Error),

    /// Configuration error
    Config(String),

    /// File not found error
    FileNotFound(String),

    /// Report is valid JSON but an entry does not have the expected shape
    MalformedReport(String),

    /// Sender or recipient address could not be parsed
    Address(lettre::address::AddressError),

    /// Attachment or header could not be turned into a message part
    Message(String),

    /// Message composition error
    Email(lettre::error::Error),

    /// SMTP connection, authentication or delivery error
    Smtp(lettre::transport::smtp::Error),
}

impl fmt::Display for ReportMailError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportMailError::Io(err) => write!(f, "IO error: {err}"),
            ReportMailError::Json(err) => write!(f, "JSON error: {err}"),
            ReportMailError::TomlParsing(err) => write!(f, "TOML parsing error: {err}"),
            ReportMailError::Config(msg) => write!(f, "Configuration error: {msg}"),
            ReportMailError::FileNotFound(path) => write!(f, "File not found: {path}"),
            ReportMailError::MalformedReport(msg) => write!(f, "Malformed report: {msg}"),
            ReportMailError::Message(msg) => write!(f, "Message error: {msg}"),
            ReportMailError::Address(err) => write!(f, "Address error: {err}"),
            ReportMailError::Email(err) => write!(f, "Email error: {err}"),
            ReportMailError::Smtp(err) => write!(f, "SMTP error: {err}"),
        }
    }
}

impl std::error::Error for ReportMailError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ReportMailError::Io(err) => Some(err),
            ReportMailError::Json(err) => Some(err),
            ReportMailError::TomlParsing(err) => Some(err),
            ReportMailError::Address(err) => Some(err),
            ReportMailError::Email(err) => Some(err),
            ReportMailError::Smtp(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ReportMailError {
    fn from(err: std::io::Error) -> Self {
        ReportMailError::Io(err)
    }
}

impl From<serde_json::Error> for ReportMailError {
    fn from(err: serde_json::Error) -> Self {
        ReportMailError::Json(err)
    }
}

impl From<toml::de::Error> for ReportMailError {
    fn from(err: toml::de::Error) -> Self {
        ReportMailError::TomlParsing(err)
    }
}

impl From<lettre::address::AddressError> for ReportMailError {
    fn from(err: lettre::address::AddressError) -> Self {
        ReportMailError::Address(err)
    }
}

impl From<lettre::error::Error> for ReportMailError {
    fn from(err: lettre::error::Error) -> Self {
        ReportMailError::Email(err)
    }
}

impl From<lettre::transport::smtp::Error> for ReportMailError {
    fn from(err: lettre::transport::smtp::Error) -> Self {
        ReportMailError::Smtp(err)
    }
}

/// Type alias for Results using ReportMailError
pub type Result<T> = std::result::Result<T, ReportMailError>;
