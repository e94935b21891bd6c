//! Integration tests for the dispatch chain.
//!
//! A scripted agent stands in for the platform so every combination of
//! blocked, failed and accepted mechanisms can be driven.

#![allow(clippy::unwrap_used)]

use proptest::prelude::*;
use rolodex_compose::{
    AgentError, Clipboard, ClipboardError, ComposeEndpoint, ComposeRequest, DispatchPolicy,
    Dispatcher, MailAgent, Opened, Outcome, decode_component,
};

#[derive(Debug, Clone, Copy)]
enum Behaviour {
    Accept,
    Block,
    Throw,
}

#[derive(Debug)]
struct ScriptedAgent {
    window: Behaviour,
    links: [Behaviour; 2],
    followed: usize,
}

impl MailAgent for ScriptedAgent {
    fn open_window(&mut self, _url: &str) -> Result<Opened, AgentError> {
        match self.window {
            Behaviour::Accept => Ok(Opened::Handle),
            Behaviour::Block => Ok(Opened::Blocked),
            Behaviour::Throw => Err(AgentError::Launch("scripted".to_string())),
        }
    }

    fn follow_link(&mut self, _url: &str) -> Result<(), AgentError> {
        let behaviour = self.links[self.followed.min(1)];
        self.followed += 1;
        match behaviour {
            Behaviour::Accept | Behaviour::Block => Ok(()),
            Behaviour::Throw => Err(AgentError::Launch("scripted".to_string())),
        }
    }
}

#[derive(Debug, Default)]
struct MemoryClipboard(Option<String>);

impl Clipboard for MemoryClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.0 = Some(text.to_string());
        Ok(())
    }
}

/// Pulls `subject` and `body` back out of a `mailto:` URI.
fn decode_mailto(uri: &str) -> (String, String, String) {
    let rest = uri.strip_prefix("mailto:").unwrap();
    let (to, query) = rest.split_once('?').unwrap();
    let mut subject = None;
    let mut body = None;
    for pair in query.split('&') {
        let (key, value) = pair.split_once('=').unwrap();
        match key {
            "subject" => subject = Some(decode_component(value).unwrap()),
            "body" => body = Some(decode_component(value).unwrap()),
            other => panic!("unexpected parameter {other}"),
        }
    }
    (to.to_string(), subject.unwrap(), body.unwrap())
}

fn behaviour() -> impl Strategy<Value = Behaviour> {
    prop_oneof![
        Just(Behaviour::Accept),
        Just(Behaviour::Block),
        Just(Behaviour::Throw)
    ]
}

fn policy() -> impl Strategy<Value = DispatchPolicy> {
    prop_oneof![Just(DispatchPolicy::Optimistic), Just(DispatchPolicy::Strict)]
}

proptest! {
    #[test]
    fn dispatch_always_terminates_and_fallback_is_lossless(
        subject in "\\PC{0,40}",
        body in "(\\PC|\n){0,120}",
        window in behaviour(),
        first in behaviour(),
        second in behaviour(),
        policy in policy(),
    ) {
        prop_assume!(!subject.trim().is_empty() && !body.trim().is_empty());
        let request = ComposeRequest::new("someone@example.com", &subject, &body).unwrap();

        let agent = ScriptedAgent { window, links: [first, second], followed: 0 };
        let mut dispatcher = Dispatcher::new(
            agent,
            MemoryClipboard::default(),
            ComposeEndpoint::default(),
            policy,
        );
        let report = dispatcher.dispatch(&request);

        match report.outcome {
            Outcome::Sent { .. } => prop_assert!(!report.attempts.is_empty()),
            Outcome::AwaitingManualAction(fallback) => {
                let (to, s, b) = decode_mailto(&fallback.mailto);
                prop_assert_eq!(to, "someone@example.com");
                prop_assert_eq!(s, subject.trim());
                prop_assert_eq!(b, body.trim());
                prop_assert_eq!(
                    dispatcher.clipboard().0.as_deref(),
                    Some(fallback.mailto.as_str())
                );
            }
        }
        prop_assert!(report.attempts.len() <= 4);
    }
}

#[test]
fn blank_subject_never_reaches_dispatch() {
    let err = ComposeRequest::new("someone@example.com", "  ", "body").unwrap_err();
    assert!(err.is_validation());
    assert_eq!(err.to_string(), "Please fill in both subject and message");
}

#[test]
fn mailto_accepted_means_no_fallback() {
    let request = ComposeRequest::new("a@b.co", "Hi", "There").unwrap();
    let agent = ScriptedAgent {
        window: Behaviour::Throw,
        links: [Behaviour::Throw, Behaviour::Accept],
        followed: 0,
    };
    let mut dispatcher = Dispatcher::new(
        agent,
        MemoryClipboard::default(),
        ComposeEndpoint::default(),
        DispatchPolicy::Optimistic,
    );

    let report = dispatcher.dispatch(&request);
    assert!(report.is_sent());
    assert!(dispatcher.clipboard().0.is_none());
}
