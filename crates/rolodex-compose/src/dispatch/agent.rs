//! Platform mechanisms for handing a URL to a mail agent.

use tracing::debug;

/// Errors raised by a mail agent mechanism.
#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    /// The platform has no handler for the URL.
    #[error("No handler available: {0}")]
    NoHandler(String),

    /// Launching the handler failed.
    #[error("Launch failed: {0}")]
    Launch(String),
}

/// What an `open_window` call observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opened {
    /// A live window/tab handle came back.
    Handle,
    /// The call went through but no handle came back (popup blocked).
    Blocked,
}

/// Ways of launching a URL, in decreasing order of observability.
pub trait MailAgent {
    /// Opens `url` in a new browsing context and reports whether a live
    /// handle came back.
    ///
    /// # Errors
    ///
    /// Returns an error if the mechanism itself failed.
    fn open_window(&mut self, url: &str) -> Result<Opened, AgentError>;

    /// Follows `url` as if a link had been clicked.
    ///
    /// Success only means the click was dispatched; whether anything opened
    /// cannot be observed.
    ///
    /// # Errors
    ///
    /// Returns an error if the link could not be dispatched at all.
    fn follow_link(&mut self, url: &str) -> Result<(), AgentError>;
}

/// Mail agent backed by the operating system's URL handlers.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemMailAgent;

impl SystemMailAgent {
    /// Creates a new system agent.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl MailAgent for SystemMailAgent {
    fn open_window(&mut self, url: &str) -> Result<Opened, AgentError> {
        debug!(url, "Opening compose URL in browser");
        opener::open_browser(url).map_err(map_open_error)?;
        Ok(Opened::Handle)
    }

    fn follow_link(&mut self, url: &str) -> Result<(), AgentError> {
        debug!(url, "Handing URL to default handler");
        opener::open(url).map_err(map_open_error)
    }
}

fn map_open_error(err: opener::OpenError) -> AgentError {
    match err {
        opener::OpenError::Io(e) if e.kind() == std::io::ErrorKind::NotFound => {
            AgentError::NoHandler(e.to_string())
        }
        other => AgentError::Launch(other.to_string()),
    }
}
