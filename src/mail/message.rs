use lettre::Message;
use lettre::message::header::ContentType;
use lettre::message::{Attachment, Mailbox, MultiPart, SinglePart};
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::error::{ReportMailError, Result};

const ATTACHMENT_CONTENT_TYPE: &str = "application/octet-stream";

/// Everything needed to compose one outgoing email
#[derive(Debug, Clone, PartialEq)]
pub struct EmailRequest {
    pub subject: String,
    pub body: String,
    /// Files attached in order, each under its base name
    pub attachments: Vec<PathBuf>,
}

impl EmailRequest {
    pub fn new(subject: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            body: body.into(),
            attachments: Vec::new(),
        }
    }

    pub fn with_attachment(mut self, path: impl Into<PathBuf>) -> Self {
        self.attachments.push(path.into());
        self
    }
}

/// Compose a `multipart/mixed` message: the plain-text body first, then one
/// binary part per attachment.
pub fn compose_message(
    sender: &Mailbox,
    recipient: &Mailbox,
    request: &EmailRequest,
) -> Result<Message> {
    let content_type = ContentType::parse(ATTACHMENT_CONTENT_TYPE)
        .map_err(|e| ReportMailError::Message(format!("Invalid attachment content type: {e}")))?;

    let mut multipart = MultiPart::mixed().singlepart(SinglePart::plain(request.body.clone()));
    for path in &request.attachments {
        multipart = multipart.singlepart(attachment_part(path, content_type.clone())?);
    }

    let message = Message::builder()
        .from(sender.clone())
        .to(recipient.clone())
        .subject(request.subject.clone())
        .multipart(multipart)?;

    Ok(message)
}

fn attachment_part(path: &Path, content_type: ContentType) -> Result<SinglePart> {
    let file_name = attachment_name(path)?;
    let content = fs::read(path)?;
    Ok(Attachment::new(file_name).body(content, content_type))
}

/// Base file name an attachment is sent under
pub fn attachment_name(path: &Path) -> Result<String> {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| {
            ReportMailError::Message(format!(
                "Attachment path '{}' has no file name",
                path.display()
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn mailbox(address: &str) -> Mailbox {
        address.parse().unwrap()
    }

    fn formatted(message: &Message) -> String {
        String::from_utf8_lossy(&message.formatted()).into_owned()
    }

    #[test]
    fn test_two_attachments_produce_two_named_parts() -> Result<()> {
        let dir = TempDir::new()?;
        let log_path = dir.path().join("test_analysis.log");
        let json_path = dir.path().join("formatted_report.json");
        fs::write(&log_path, "Number of Tests: 10\n")?;
        fs::write(&json_path, "{\n  \"report\": {}\n}")?;

        let request = EmailRequest::new("Test Report", "Number of Tests: 10")
            .with_attachment(&log_path)
            .with_attachment(&json_path);
        let message = compose_message(
            &mailbox("ci@example.com"),
            &mailbox("team@example.com"),
            &request,
        )?;

        let raw = formatted(&message);
        assert_eq!(raw.matches("Content-Disposition: attachment").count(), 2);
        assert!(raw.contains("filename=\"test_analysis.log\""));
        assert!(raw.contains("filename=\"formatted_report.json\""));
        assert!(!raw.contains(&dir.path().display().to_string()));

        Ok(())
    }

    #[test]
    fn test_headers_and_body() -> Result<()> {
        let request = EmailRequest::new("Test Report", "Number of Tests Failed: 0");
        let message = compose_message(
            &mailbox("ci@example.com"),
            &mailbox("team@example.com"),
            &request,
        )?;

        let raw = formatted(&message);
        assert!(raw.contains("From: ci@example.com"));
        assert!(raw.contains("To: team@example.com"));
        assert!(raw.contains("Subject: Test Report"));
        assert!(raw.contains("multipart/mixed"));
        assert!(raw.contains("Number of Tests Failed: 0"));
        assert!(!raw.contains("Content-Disposition: attachment"));

        Ok(())
    }

    #[test]
    fn test_missing_attachment_is_an_io_error() {
        let request = EmailRequest::new("Test Report", "body")
            .with_attachment("/definitely/not/here/test_analysis.log");

        let result = compose_message(
            &mailbox("ci@example.com"),
            &mailbox("team@example.com"),
            &request,
        );
        assert!(matches!(result, Err(ReportMailError::Io(_))));
    }

    #[test]
    fn test_attachment_name_uses_base_name() -> Result<()> {
        assert_eq!(
            attachment_name(Path::new("/tmp/out/test_analysis.log"))?,
            "test_analysis.log"
        );
        assert!(attachment_name(Path::new("/")).is_err());
        Ok(())
    }
}
