//! Ordered hand-off of a composed message to a mail agent.
//!
//! The chain tries progressively less automatic mechanisms and stops at the
//! first one that counts as a success:
//!
//! 1. open the webmail compose URL in a new window (observable),
//! 2. follow the same URL as a link (not observable),
//! 3. follow the `mailto:` URI (not observable),
//! 4. manual fallback: expose the `mailto:` URI and copy it to the clipboard.
//!
//! Steps 2 and 3 cannot tell a blocked popup from a success. Under
//! [`DispatchPolicy::Optimistic`] they count as sent once dispatched;
//! [`DispatchPolicy::Strict`] skips them and goes straight to the fallback.

mod agent;
mod clipboard;

pub use agent::{AgentError, MailAgent, Opened, SystemMailAgent};
pub use clipboard::{Clipboard, ClipboardError, NoClipboard, SystemClipboard};

use tracing::{debug, info, warn};

use crate::request::{ComposeEndpoint, ComposeRequest};

const FALLBACK_MESSAGE: &str = "Automatic opening failed. Open the mailto link below or paste \
    the copied mailto URL into a new tab.";

/// How unobservable mechanisms are scored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum DispatchPolicy {
    /// A link dispatched without error counts as sent.
    #[default]
    Optimistic,
    /// Only an observed window handle counts; otherwise fall back.
    Strict,
}

/// One mechanism in the chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Webmail compose URL in a new window.
    OpenWebCompose,
    /// Webmail compose URL followed as a link.
    NavigateWebCompose,
    /// `mailto:` URI followed as a link.
    MailtoHandoff,
    /// Clickable URI plus clipboard copy.
    ManualFallback,
}

impl Strategy {
    /// Short label for logs and reports.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::OpenWebCompose => "webmail window",
            Self::NavigateWebCompose => "webmail link",
            Self::MailtoHandoff => "mail client",
            Self::ManualFallback => "manual",
        }
    }
}

/// How a single mechanism fared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptResult {
    /// Counted as a success; the chain stopped here.
    Succeeded,
    /// Went through but was observed to be blocked.
    Blocked,
    /// The mechanism raised an error.
    Failed(String),
    /// Not tried under the active policy.
    Skipped,
}

/// A record of one step of the chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attempt {
    /// Mechanism tried.
    pub strategy: Strategy,
    /// What happened.
    pub result: AttemptResult,
}

/// Outcome of the clipboard copy in the manual fallback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CopyStatus {
    /// The `mailto:` URI is on the clipboard.
    Copied,
    /// The `mailto:` URI is on the clipboard only while this process runs.
    Held,
    /// A clipboard exists but the copy failed.
    Failed(String),
    /// There is no clipboard to copy to.
    Unavailable,
}

/// Terminal state when no automatic mechanism can be trusted.
///
/// The `mailto:` URI reconstructs the composed message losslessly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManualFallback {
    /// URI the user can open by hand.
    pub mailto: String,
    /// Whether the URI made it onto the clipboard.
    pub copied: CopyStatus,
}

impl ManualFallback {
    /// User-facing instructions, worded by copy outcome.
    #[must_use]
    pub fn message(&self) -> String {
        match &self.copied {
            CopyStatus::Copied => {
                format!("{FALLBACK_MESSAGE} The mailto URL was copied to your clipboard.")
            }
            CopyStatus::Held => format!(
                "{FALLBACK_MESSAGE} The URL stays copied until this program exits: {}",
                self.mailto
            ),
            CopyStatus::Failed(_) => format!(
                "{FALLBACK_MESSAGE} If copying failed, paste this URL into a new tab: {}",
                self.mailto
            ),
            CopyStatus::Unavailable => format!(
                "{FALLBACK_MESSAGE} Paste this URL into a new tab: {}",
                self.mailto
            ),
        }
    }
}

/// Result of a dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Handed off; the compose dialog can close.
    Sent {
        /// Mechanism that took it.
        via: Strategy,
    },
    /// Every automatic mechanism was blocked or indeterminate; keep the
    /// dialog open and show the fallback.
    AwaitingManualAction(ManualFallback),
}

/// Outcome plus the trail of attempts that led to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchReport {
    /// Final outcome.
    pub outcome: Outcome,
    /// Each step tried, in order.
    pub attempts: Vec<Attempt>,
}

impl DispatchReport {
    /// Whether the message was handed off automatically.
    #[must_use]
    pub const fn is_sent(&self) -> bool {
        matches!(self.outcome, Outcome::Sent { .. })
    }
}

/// Runs the hand-off chain for composed messages.
#[derive(Debug)]
pub struct Dispatcher<A, C> {
    agent: A,
    clipboard: C,
    endpoint: ComposeEndpoint,
    policy: DispatchPolicy,
}

impl Dispatcher<SystemMailAgent, SystemClipboard> {
    /// Dispatcher wired to the operating system.
    #[must_use]
    pub fn system(endpoint: ComposeEndpoint, policy: DispatchPolicy) -> Self {
        Self::new(SystemMailAgent::new(), SystemClipboard::new(), endpoint, policy)
    }
}

impl<A: MailAgent, C: Clipboard> Dispatcher<A, C> {
    /// Creates a dispatcher from its parts.
    #[must_use]
    pub const fn new(
        agent: A,
        clipboard: C,
        endpoint: ComposeEndpoint,
        policy: DispatchPolicy,
    ) -> Self {
        Self {
            agent,
            clipboard,
            endpoint,
            policy,
        }
    }

    /// Active policy.
    #[must_use]
    pub const fn policy(&self) -> DispatchPolicy {
        self.policy
    }

    /// Borrow the mail agent.
    #[must_use]
    pub const fn agent(&self) -> &A {
        &self.agent
    }

    /// Borrow the clipboard.
    #[must_use]
    pub const fn clipboard(&self) -> &C {
        &self.clipboard
    }

    /// Hands `request` to the first mechanism that accepts it.
    ///
    /// Always returns; never loses the message.
    pub fn dispatch(&mut self, request: &ComposeRequest) -> DispatchReport {
        let web_url = request.web_compose_url(&self.endpoint);
        let mailto = request.mailto_uri();
        let mut attempts = Vec::with_capacity(4);

        // 1. New window: the only step that can observe blocking.
        let result = match self.agent.open_window(&web_url) {
            Ok(Opened::Handle) => AttemptResult::Succeeded,
            Ok(Opened::Blocked) => AttemptResult::Blocked,
            Err(e) => AttemptResult::Failed(e.to_string()),
        };
        if let Some(report) = record(&mut attempts, Strategy::OpenWebCompose, result) {
            return report;
        }

        // 2 and 3. Fire-and-forget links.
        for (strategy, url) in [
            (Strategy::NavigateWebCompose, web_url.as_str()),
            (Strategy::MailtoHandoff, mailto.as_str()),
        ] {
            let result = match self.policy {
                DispatchPolicy::Strict => AttemptResult::Skipped,
                DispatchPolicy::Optimistic => match self.agent.follow_link(url) {
                    Ok(()) => AttemptResult::Succeeded,
                    Err(e) => AttemptResult::Failed(e.to_string()),
                },
            };
            if let Some(report) = record(&mut attempts, strategy, result) {
                return report;
            }
        }

        // 4. Manual fallback.
        let copied = match self.clipboard.set_text(&mailto) {
            Ok(()) if self.clipboard.is_transient() => CopyStatus::Held,
            Ok(()) => CopyStatus::Copied,
            Err(ClipboardError::Unavailable(reason)) => {
                debug!(%reason, "No clipboard for fallback");
                CopyStatus::Unavailable
            }
            Err(ClipboardError::Copy(reason)) => {
                warn!(%reason, "Copying mailto URL failed");
                CopyStatus::Failed(reason)
            }
        };
        attempts.push(Attempt {
            strategy: Strategy::ManualFallback,
            result: AttemptResult::Succeeded,
        });

        info!(mailto = %mailto, "Dispatch unavailable, awaiting manual action");
        DispatchReport {
            outcome: Outcome::AwaitingManualAction(ManualFallback { mailto, copied }),
            attempts,
        }
    }
}

/// Appends an attempt; returns the final report if it ended the chain.
fn record(
    attempts: &mut Vec<Attempt>,
    strategy: Strategy,
    result: AttemptResult,
) -> Option<DispatchReport> {
    match &result {
        AttemptResult::Succeeded => info!(via = strategy.label(), "Message handed off"),
        AttemptResult::Skipped => debug!(step = strategy.label(), "Skipped by policy"),
        AttemptResult::Blocked => debug!(step = strategy.label(), "Blocked"),
        AttemptResult::Failed(reason) => warn!(step = strategy.label(), %reason, "Hand-off failed"),
    }

    let sent = result == AttemptResult::Succeeded;
    attempts.push(Attempt { strategy, result });

    sent.then(|| DispatchReport {
        outcome: Outcome::Sent { via: strategy },
        attempts: std::mem::take(attempts),
    })
}
