//! Compose requests and the URLs built from them.

use url::Url;

use crate::encoding::encode_component;
use crate::error::{Error, Result};

/// Default webmail compose endpoint.
pub const DEFAULT_COMPOSE_URL: &str = "https://mail.google.com/mail/?view=cm&fs=1";

/// A validated message ready to hand off.
///
/// Subject and body are stored trimmed and are never blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposeRequest {
    to: String,
    subject: String,
    body: String,
}

impl ComposeRequest {
    /// Builds a request from user-edited fields.
    ///
    /// # Errors
    ///
    /// Returns `Error::EmptyRecipient` if `to` is blank and
    /// `Error::EmptyMessage` if the subject or body is blank.
    pub fn new(to: &str, subject: &str, body: &str) -> Result<Self> {
        let to = to.trim();
        let subject = subject.trim();
        let body = body.trim();

        if to.is_empty() {
            return Err(Error::EmptyRecipient);
        }
        if subject.is_empty() || body.is_empty() {
            return Err(Error::EmptyMessage);
        }

        Ok(Self {
            to: to.to_string(),
            subject: subject.to_string(),
            body: body.to_string(),
        })
    }

    /// Recipient address.
    #[must_use]
    pub fn to(&self) -> &str {
        &self.to
    }

    /// Subject line.
    #[must_use]
    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// Message body.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// `mailto:` URI carrying the subject and body.
    ///
    /// The recipient goes in as-is; subject and body are percent-encoded.
    #[must_use]
    pub fn mailto_uri(&self) -> String {
        format!(
            "mailto:{}?subject={}&body={}",
            self.to,
            encode_component(&self.subject),
            encode_component(&self.body)
        )
    }

    /// Webmail compose URL with `to`, `su` and `body` parameters.
    #[must_use]
    pub fn web_compose_url(&self, endpoint: &ComposeEndpoint) -> String {
        let base = endpoint.as_str();
        let separator = match base.split_once('?') {
            None => "?",
            Some((_, query)) if query.is_empty() || query.ends_with('&') => "",
            Some(_) => "&",
        };

        format!(
            "{base}{separator}to={}&su={}&body={}",
            encode_component(&self.to),
            encode_component(&self.subject),
            encode_component(&self.body)
        )
    }
}

/// A webmail provider's compose endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposeEndpoint {
    base: String,
}

impl ComposeEndpoint {
    /// Parses and validates an endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL does not parse or is not http(s).
    pub fn parse(endpoint: &str) -> Result<Self> {
        let url = Url::parse(endpoint.trim())?;
        if !matches!(url.scheme(), "https" | "http") {
            return Err(Error::InvalidComposeUrl(format!(
                "unsupported scheme `{}`",
                url.scheme()
            )));
        }
        if url.fragment().is_some() {
            return Err(Error::InvalidComposeUrl(
                "fragment not allowed in compose URL".to_string(),
            ));
        }
        Ok(Self {
            base: url.as_str().to_string(),
        })
    }

    /// The endpoint as a string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.base
    }
}

impl Default for ComposeEndpoint {
    fn default() -> Self {
        Self {
            base: DEFAULT_COMPOSE_URL.to_string(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_new_trims_fields() {
        let req = ComposeRequest::new(" bob@x.com ", "  Hi ", "\nBody\n").unwrap();
        assert_eq!(req.to(), "bob@x.com");
        assert_eq!(req.subject(), "Hi");
        assert_eq!(req.body(), "Body");
    }

    #[test]
    fn test_new_rejects_blank_subject_or_body() {
        assert!(matches!(
            ComposeRequest::new("bob@x.com", "   ", "body"),
            Err(Error::EmptyMessage)
        ));
        assert!(matches!(
            ComposeRequest::new("bob@x.com", "subject", "\n\t"),
            Err(Error::EmptyMessage)
        ));
        assert!(matches!(
            ComposeRequest::new("", "subject", "body"),
            Err(Error::EmptyRecipient)
        ));
    }

    #[test]
    fn test_mailto_uri() {
        let req = ComposeRequest::new("bob@x.com", "Hello Bob", "Hi Bob,\n\nBye").unwrap();
        assert_eq!(
            req.mailto_uri(),
            "mailto:bob@x.com?subject=Hello%20Bob&body=Hi%20Bob%2C%0A%0ABye"
        );
    }

    #[test]
    fn test_web_compose_url_default_endpoint() {
        let req = ComposeRequest::new("bob@x.com", "Hi & bye", "ok").unwrap();
        assert_eq!(
            req.web_compose_url(&ComposeEndpoint::default()),
            "https://mail.google.com/mail/?view=cm&fs=1&to=bob%40x.com&su=Hi%20%26%20bye&body=ok"
        );
    }

    #[test]
    fn test_web_compose_url_without_query() {
        let endpoint = ComposeEndpoint::parse("https://webmail.example.org/compose").unwrap();
        let req = ComposeRequest::new("a@b.co", "s", "b").unwrap();
        assert_eq!(
            req.web_compose_url(&endpoint),
            "https://webmail.example.org/compose?to=a%40b.co&su=s&body=b"
        );
    }

    #[test]
    fn test_endpoint_rejects_non_http() {
        assert!(matches!(
            ComposeEndpoint::parse("mailto:someone@example.com"),
            Err(Error::InvalidComposeUrl(_))
        ));
        assert!(matches!(ComposeEndpoint::parse("not a url"), Err(Error::Url(_))));
        assert!(ComposeEndpoint::parse("https://x.io/c#frag").is_err());
    }
}
