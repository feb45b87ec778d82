use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use std::fmt;

use crate::core::error::Result;
use crate::mail::message::{EmailRequest, compose_message};
use crate::reporting::logging;

/// Resolved relay, credentials and addresses for one send
#[derive(Clone)]
pub struct MailSettings {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub sender: Mailbox,
    pub recipient: Mailbox,
}

impl fmt::Debug for MailSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MailSettings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("sender", &self.sender)
            .field("recipient", &self.recipient)
            .finish()
    }
}

pub trait SendMail {
    fn send_mail(&self, message: &Message) -> Result<()>;
}

/// Sends over SMTP with implicit TLS, one connection per message.
pub struct SmtpMailer {
    transport: SmtpTransport,
}

impl SmtpMailer {
    pub fn new(settings: &MailSettings) -> Result<Self> {
        let credentials = Credentials::new(settings.username.clone(), settings.password.clone());
        let transport = SmtpTransport::relay(&settings.host)?
            .port(settings.port)
            .credentials(credentials)
            .build();

        Ok(Self { transport })
    }
}

impl SendMail for SmtpMailer {
    fn send_mail(&self, message: &Message) -> Result<()> {
        let response = self.transport.send(message)?;
        logging::log_smtp_response(&response.code().to_string());
        Ok(())
    }
}

/// Compose the request and hand it to `mailer` exactly once.
pub fn deliver<M>(mailer: &M, settings: &MailSettings, request: &EmailRequest) -> Result<()>
where
    M: SendMail + ?Sized,
{
    let message = compose_message(&settings.sender, &settings.recipient, request)?;
    logging::log_mail_start(
        &settings.host,
        settings.port,
        &settings.recipient.to_string(),
        request.attachments.len(),
    );

    mailer.send_mail(&message).inspect_err(|e| {
        logging::log_error("Could not send email", Some(e));
    })?;

    logging::log_mail_sent(&settings.recipient.to_string());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::ReportMailError;
    use std::cell::RefCell;
    use std::fs;
    use tempfile::TempDir;

    #[derive(Default)]
    struct RecordingMailer {
        sent: RefCell<Vec<Message>>,
    }

    impl SendMail for RecordingMailer {
        fn send_mail(&self, message: &Message) -> Result<()> {
            self.sent.borrow_mut().push(message.clone());
            Ok(())
        }
    }

    struct FailingMailer;

    impl SendMail for FailingMailer {
        fn send_mail(&self, _message: &Message) -> Result<()> {
            Err(ReportMailError::Io(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                "connection refused",
            )))
        }
    }

    fn settings() -> MailSettings {
        MailSettings {
            host: "smtp.gmail.com".to_string(),
            port: 465,
            username: "ci@example.com".to_string(),
            password: "secret".to_string(),
            sender: "ci@example.com".parse().unwrap(),
            recipient: "team@example.com".parse().unwrap(),
        }
    }

    #[test]
    fn test_deliver_sends_exactly_once() -> Result<()> {
        let dir = TempDir::new()?;
        let log_path = dir.path().join("test_analysis.log");
        let json_path = dir.path().join("formatted_report.json");
        fs::write(&log_path, "log")?;
        fs::write(&json_path, "{}")?;

        let mailer = RecordingMailer::default();
        let request = EmailRequest::new("Test Report", "body")
            .with_attachment(&log_path)
            .with_attachment(&json_path);

        deliver(&mailer, &settings(), &request)?;

        let sent = mailer.sent.borrow();
        assert_eq!(sent.len(), 1);
        let raw = String::from_utf8_lossy(&sent[0].formatted()).into_owned();
        assert_eq!(raw.matches("Content-Disposition: attachment").count(), 2);
        assert_eq!(sent[0].envelope().to().len(), 1);
        assert_eq!(sent[0].envelope().to()[0].to_string(), "team@example.com");

        Ok(())
    }

    #[test]
    fn test_deliver_propagates_send_failure() {
        let request = EmailRequest::new("Test Report", "body");
        let result = deliver(&FailingMailer, &settings(), &request);
        assert!(matches!(result, Err(ReportMailError::Io(_))));
    }

    #[test]
    fn test_deliver_does_not_send_when_attachment_missing() {
        let mailer = RecordingMailer::default();
        let request =
            EmailRequest::new("Test Report", "body").with_attachment("/no/such/dir/report.log");

        assert!(deliver(&mailer, &settings(), &request).is_err());
        assert!(mailer.sent.borrow().is_empty());
    }

    #[test]
    fn test_smtp_mailer_builds_without_connecting() {
        assert!(SmtpMailer::new(&settings()).is_ok());
    }

    #[test]
    fn test_settings_debug_redacts_password() {
        let debug = format!("{:?}", settings());
        assert!(!debug.contains("secret"));
        assert!(debug.contains("smtp.gmail.com"));
    }
}
