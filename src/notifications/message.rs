//! Interview email rendering with Handlebars
//!
//! The composer turns an [`Assignment`] into a [`Notification`]: fixed
//! subject, HTML body greeting the candidate by name and quoting the slot
//! label verbatim. Values are HTML-escaped by the template engine.

use handlebars::Handlebars;
use serde::Serialize;
use std::path::Path;

use super::channels::{ChannelError, ChannelResult};
use super::Notification;
use crate::models::Assignment;

/// Default interview email template
const DEFAULT_TEMPLATE: &str = include_str!("../../templates/interview_email.hbs");

const TEMPLATE_NAME: &str = "interview_email";

/// Default email subject
pub const DEFAULT_SUBJECT: &str = "TalentSync Interview Schedule";

/// Default signature line
pub const DEFAULT_SIGNATURE: &str = "TalentSync Team";

/// Default link for candidate questions
pub const DEFAULT_SUPPORT_LINK: &str = "https://chatbot-ui-five-cyan-56.vercel.app/";

/// Template data for rendering
#[derive(Debug, Serialize)]
struct InterviewTemplateData<'a> {
    name: &'a str,
    slot: String,
    support_link: &'a str,
    sender_name: &'a str,
}

/// Renders interview notifications
#[derive(Debug)]
pub struct MessageComposer {
    handlebars: Handlebars<'static>,
    subject: String,
    support_link: String,
    signature: String,
}

impl MessageComposer {
    /// Create a composer with the embedded template
    pub fn new() -> ChannelResult<Self> {
        let mut handlebars = Handlebars::new();
        handlebars.set_strict_mode(true);
        handlebars
            .register_template_string(TEMPLATE_NAME, DEFAULT_TEMPLATE)
            .map_err(|e| ChannelError::Template(e.to_string()))?;

        Ok(Self {
            handlebars,
            subject: DEFAULT_SUBJECT.to_string(),
            support_link: DEFAULT_SUPPORT_LINK.to_string(),
            signature: DEFAULT_SIGNATURE.to_string(),
        })
    }

    /// Create a composer from a custom template file
    ///
    /// The template sees `name`, `slot`, `support_link` and `sender_name`.
    pub fn with_template(template_path: &Path) -> ChannelResult<Self> {
        let mut composer = Self::new()?;
        composer
            .handlebars
            .register_template_file(TEMPLATE_NAME, template_path)
            .map_err(|e| {
                ChannelError::Template(format!("{}: {e}", template_path.display()))
            })?;
        Ok(composer)
    }

    /// Set subject line
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = subject.into();
        self
    }

    /// Set support link
    pub fn with_support_link(mut self, link: impl Into<String>) -> Self {
        self.support_link = link.into();
        self
    }

    /// Set signature
    pub fn with_signature(mut self, signature: impl Into<String>) -> Self {
        self.signature = signature.into();
        self
    }

    /// Subject line used for every message
    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// Render the HTML body for an assignment
    pub fn render_body(&self, assignment: &Assignment) -> ChannelResult<String> {
        let data = InterviewTemplateData {
            name: &assignment.candidate.name,
            slot: assignment.slot_label(),
            support_link: &self.support_link,
            sender_name: &self.signature,
        };

        self.handlebars
            .render(TEMPLATE_NAME, &data)
            .map_err(|e| ChannelError::Template(e.to_string()))
    }

    /// Build the notification for an assignment
    pub fn compose(&self, assignment: &Assignment) -> ChannelResult<Notification> {
        Ok(Notification {
            to: assignment.candidate.contact.clone(),
            recipient_name: assignment.candidate.name.clone(),
            subject: self.subject.clone(),
            html_body: self.render_body(assignment)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Candidate;
    use crate::scheduler::TimeSlot;
    use chrono::NaiveDate;
    use std::io::Write;

    fn assignment(name: &str) -> Assignment {
        let start = NaiveDate::from_ymd_opt(2024, 6, 3)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        Assignment {
            position: 0,
            candidate: Candidate::new(name, "asha@example.com", 1),
            slot: TimeSlot::new(start, "IST"),
        }
    }

    #[test]
    fn test_default_message() {
        let composer = MessageComposer::new().unwrap();
        let notification = composer.compose(&assignment("Asha")).unwrap();

        assert_eq!(notification.to, "asha@example.com");
        assert_eq!(notification.subject, "TalentSync Interview Schedule");
        assert!(notification.html_body.contains("<p>Dear Asha,</p>"));
        assert!(notification
            .html_body
            .contains("Your interview is scheduled for 2024-06-03 09:00 IST."));
        assert!(notification.html_body.contains(DEFAULT_SUPPORT_LINK));
        assert!(notification
            .html_body
            .contains("Best regards,<br>TalentSync Team"));
    }

    #[test]
    fn test_name_is_escaped() {
        let composer = MessageComposer::new().unwrap();
        let body = composer.render_body(&assignment("<b>Eve</b>")).unwrap();
        assert!(body.contains("&lt;b&gt;Eve&lt;/b&gt;"));
        assert!(!body.contains("<b>Eve</b>"));
    }

    #[test]
    fn test_overrides() {
        let composer = MessageComposer::new()
            .unwrap()
            .with_subject("Your slot")
            .with_signature("Hiring Desk")
            .with_support_link("https://help.example.com");
        let notification = composer.compose(&assignment("Asha")).unwrap();

        assert_eq!(notification.subject, "Your slot");
        assert!(notification.html_body.contains("Hiring Desk"));
        assert!(notification.html_body.contains("https://help.example.com"));
    }

    #[test]
    fn test_custom_template_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{{{name}}}} @ {{{{slot}}}}").unwrap();

        let composer = MessageComposer::with_template(file.path()).unwrap();
        let body = composer.render_body(&assignment("Asha")).unwrap();
        assert_eq!(body, "Asha @ 2024-06-03 09:00 IST");
    }

    #[test]
    fn test_missing_template_file() {
        let err = MessageComposer::with_template(Path::new("/nonexistent/t.hbs")).unwrap_err();
        assert!(matches!(err, ChannelError::Template(_)));
    }
}
