//! Compose dialog model.

use rolodex_compose::{
    Clipboard, CopyStatus, DispatchReport, Dispatcher, Draft, MailAgent, ManualFallback, Outcome,
};
use rolodex_core::{Contact, ContactId};
use tracing::debug;

/// State for the compose-email dialog.
#[derive(Debug, Clone, Default)]
pub struct ComposeState {
    /// Contact the dialog was opened for.
    pub recipient: Option<ContactId>,
    /// Subject/body being edited.
    pub draft: Option<Draft>,
    /// Fallback shown after automatic hand-off failed.
    pub fallback: Option<ManualFallback>,
}

impl ComposeState {
    /// Creates a closed dialog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens the dialog for `contact` with a fresh greeting template.
    ///
    /// Any fallback from a previous send is hidden. Reopening for the same
    /// recipient resets the existing draft.
    pub fn open(&mut self, contact: &Contact) {
        match self.draft.as_mut() {
            Some(draft) if self.recipient == Some(contact.id) && draft.to == contact.email => {
                draft.reset();
            }
            _ => self.draft = Some(Draft::for_recipient(&contact.name, &contact.email)),
        }
        self.recipient = Some(contact.id);
        self.fallback = None;
    }

    /// Whether the dialog is showing.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.draft.is_some()
    }

    /// Closes the dialog, discarding any edits.
    pub fn close(&mut self) {
        *self = Self::new();
    }

    /// Whether the fallback `mailto:` URI only stays on the clipboard while
    /// the process runs.
    #[must_use]
    pub fn holds_clipboard(&self) -> bool {
        self.is_open()
            && self
                .fallback
                .as_ref()
                .is_some_and(|fallback| fallback.copied == CopyStatus::Held)
    }

    /// Mutable access to the draft while the dialog is open.
    pub fn draft_mut(&mut self) -> Option<&mut Draft> {
        self.draft.as_mut()
    }

    /// Validates the draft and runs the dispatch chain.
    ///
    /// Closes the dialog when the message was handed off; keeps it open with
    /// the fallback attached otherwise.
    ///
    /// # Errors
    ///
    /// Returns an error without dispatching if the dialog is closed or the
    /// subject/body are blank.
    pub fn submit<A: MailAgent, C: Clipboard>(
        &mut self,
        dispatcher: &mut Dispatcher<A, C>,
    ) -> anyhow::Result<DispatchReport> {
        let draft = self
            .draft
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("compose dialog is not open"))?;
        let request = draft.to_request()?;
        debug!(edited = draft.is_edited(), "Sending draft");

        let report = dispatcher.dispatch(&request);
        match &report.outcome {
            Outcome::Sent { .. } => self.close(),
            Outcome::AwaitingManualAction(fallback) => self.fallback = Some(fallback.clone()),
        }
        Ok(report)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use rolodex_compose::{
        AgentError, ClipboardError, ComposeEndpoint, DispatchPolicy, NoClipboard, Opened,
    };

    struct Agent(bool);

    impl MailAgent for Agent {
        fn open_window(&mut self, _url: &str) -> Result<Opened, AgentError> {
            if self.0 {
                Ok(Opened::Handle)
            } else {
                Err(AgentError::Launch("blocked".to_string()))
            }
        }

        fn follow_link(&mut self, _url: &str) -> Result<(), AgentError> {
            Err(AgentError::Launch("blocked".to_string()))
        }
    }

    /// Clipboard whose contents vanish with the process.
    struct Selection;

    impl Clipboard for Selection {
        fn set_text(&mut self, _text: &str) -> Result<(), ClipboardError> {
            Ok(())
        }

        fn is_transient(&self) -> bool {
            true
        }
    }

    fn dispatcher(works: bool) -> Dispatcher<Agent, NoClipboard> {
        Dispatcher::new(
            Agent(works),
            NoClipboard,
            ComposeEndpoint::default(),
            DispatchPolicy::Optimistic,
        )
    }

    fn ada() -> Contact {
        Contact::new(ContactId::new(7), "Ada", "ada@example.com", "1")
    }

    #[test]
    fn test_open_uses_template() {
        let mut state = ComposeState::new();
        state.open(&ada());
        assert!(state.is_open());
        assert_eq!(state.draft.as_ref().unwrap().subject, "Hello Ada");
    }

    #[test]
    fn test_cancel_discards_edits() {
        let mut state = ComposeState::new();
        state.open(&ada());
        state.draft_mut().unwrap().subject = "Edited".to_string();

        state.close();
        assert!(!state.is_open());

        state.open(&ada());
        assert_eq!(state.draft.as_ref().unwrap().subject, "Hello Ada");
    }

    #[test]
    fn test_sent_closes_dialog() {
        let mut state = ComposeState::new();
        state.open(&ada());
        let report = state.submit(&mut dispatcher(true)).unwrap();
        assert!(report.is_sent());
        assert!(!state.is_open());
    }

    #[test]
    fn test_fallback_keeps_dialog_open() {
        let mut state = ComposeState::new();
        state.open(&ada());
        let report = state.submit(&mut dispatcher(false)).unwrap();
        assert!(!report.is_sent());
        assert!(state.is_open());
        assert!(state.fallback.as_ref().unwrap().mailto.starts_with("mailto:ada@example.com?"));
    }

    #[test]
    fn test_blank_body_is_rejected_before_dispatch() {
        let mut state = ComposeState::new();
        state.open(&ada());
        state.draft_mut().unwrap().body = "  ".to_string();

        let err = state.submit(&mut dispatcher(true)).unwrap_err();
        assert_eq!(err.to_string(), "Please fill in both subject and message");
        assert!(state.is_open());
    }

    #[test]
    fn test_reopen_resets_edits_in_place() {
        let mut state = ComposeState::new();
        state.open(&ada());
        state.draft_mut().unwrap().body = "Edited".to_string();

        state.open(&ada());
        let draft = state.draft.as_ref().unwrap();
        assert!(!draft.is_edited());
        assert_eq!(draft.body, "Hi Ada,\n\nI hope this email finds you well.\n\nBest regards");
    }

    #[test]
    fn test_holds_clipboard_only_for_transient_copy() {
        let mut state = ComposeState::new();
        state.open(&ada());
        state.submit(&mut dispatcher(false)).unwrap();
        assert!(!state.holds_clipboard());

        let mut held = Dispatcher::new(
            Agent(false),
            Selection,
            ComposeEndpoint::default(),
            DispatchPolicy::Optimistic,
        );
        state.submit(&mut held).unwrap();
        assert!(state.holds_clipboard());

        state.close();
        assert!(!state.holds_clipboard());
    }
}
