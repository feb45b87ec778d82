//! Email composition and delivery
//!
//! This module builds the multipart report email and sends it over
//! SMTP with implicit TLS.

pub mod message;
pub mod transport;

// Re-export commonly used items
pub use message::{EmailRequest, compose_message};
pub use transport::{MailSettings, SendMail, SmtpMailer, deliver};
