//! Editable compose draft pre-filled for a recipient.

use crate::error::Result;
use crate::request::ComposeRequest;

/// The subject/body a user edits before sending.
///
/// Starts from a greeting template addressed to the recipient. Closing the
/// dialog without sending should [`reset`](Self::reset) it so edits never leak
/// into the next compose.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draft {
    /// Recipient display name, used by the template.
    pub name: String,
    /// Recipient address.
    pub to: String,
    /// Subject line.
    pub subject: String,
    /// Message body.
    pub body: String,
}

impl Draft {
    /// Creates a draft from the greeting template.
    #[must_use]
    pub fn for_recipient(name: impl Into<String>, to: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            subject: template_subject(&name),
            body: template_body(&name),
            to: to.into(),
            name,
        }
    }

    /// Restores the template subject and body, discarding edits.
    pub fn reset(&mut self) {
        self.subject = template_subject(&self.name);
        self.body = template_body(&self.name);
    }

    /// Whether the subject or body differ from the template.
    #[must_use]
    pub fn is_edited(&self) -> bool {
        self.subject != template_subject(&self.name) || self.body != template_body(&self.name)
    }

    /// Validates the draft into a request.
    ///
    /// # Errors
    ///
    /// Returns an error if the recipient, subject or body is blank.
    pub fn to_request(&self) -> Result<ComposeRequest> {
        ComposeRequest::new(&self.to, &self.subject, &self.body)
    }
}

fn template_subject(name: &str) -> String {
    format!("Hello {name}")
}

fn template_body(name: &str) -> String {
    format!("Hi {name},\n\nI hope this email finds you well.\n\nBest regards")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn test_template() {
        let draft = Draft::for_recipient("Ada", "ada@example.com");
        assert_eq!(draft.subject, "Hello Ada");
        assert_eq!(
            draft.body,
            "Hi Ada,\n\nI hope this email finds you well.\n\nBest regards"
        );
        assert!(!draft.is_edited());
    }

    #[test]
    fn test_reset_discards_edits() {
        let mut draft = Draft::for_recipient("Ada", "ada@example.com");
        draft.subject = "Lunch?".to_string();
        draft.body.clear();
        assert!(draft.is_edited());

        draft.reset();
        assert_eq!(draft, Draft::for_recipient("Ada", "ada@example.com"));
    }

    #[test]
    fn test_to_request_rejects_cleared_body() {
        let mut draft = Draft::for_recipient("Ada", "ada@example.com");
        draft.body = "   ".to_string();
        assert!(matches!(draft.to_request(), Err(Error::EmptyMessage)));
    }
}
