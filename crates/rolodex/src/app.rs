//! Command handling: routes each CLI action to the store or the dispatcher.

use anyhow::{Context, Result, bail};
use rolodex_compose::{Clipboard, ComposeEndpoint, Dispatcher, MailAgent};
use rolodex_core::{Contact, ContactId, ContactStore, Error, Storage};
use tracing::debug;

use crate::cli::Command;
use crate::model::{ComposeState, ContactForm, Layout};
use crate::view::{self, render_contact, render_contacts};

/// Asks the user a yes/no question.
pub type Confirm<'a> = &'a mut dyn FnMut(&str) -> bool;

/// Main application state.
pub struct App<S: Storage, A, C> {
    /// The address book.
    store: ContactStore<S>,
    /// Mail hand-off chain.
    dispatcher: Dispatcher<A, C>,
    /// Webmail endpoint, kept for previews.
    endpoint: ComposeEndpoint,
    /// Default listing layout.
    layout: Layout,
    /// Add/edit form.
    form: ContactForm,
    /// Compose dialog.
    compose: ComposeState,
}

impl<S: Storage, A: MailAgent, C: Clipboard> App<S, A, C> {
    /// Creates the application around a loaded store.
    pub fn new(
        store: ContactStore<S>,
        dispatcher: Dispatcher<A, C>,
        endpoint: ComposeEndpoint,
        layout: Layout,
    ) -> Self {
        Self {
            store,
            dispatcher,
            endpoint,
            layout,
            form: ContactForm::new(),
            compose: ComposeState::new(),
        }
    }

    /// Borrow the store.
    #[cfg(test)]
    pub const fn store(&self) -> &ContactStore<S> {
        &self.store
    }

    /// Whether the last fallback copy disappears when the process exits.
    pub fn holds_clipboard(&self) -> bool {
        self.compose.holds_clipboard()
    }

    /// Runs one command and returns what to print.
    ///
    /// # Errors
    ///
    /// Returns an error for validation failures, unknown ids, bad positions,
    /// and storage failures.
    pub fn run(&mut self, command: Command, confirm: Confirm<'_>) -> Result<String> {
        debug!(?command, "Running command");
        match command {
            Command::List { layout } => {
                let layout = layout.map_or(self.layout, Into::into);
                Ok(render_contacts(
                    &self.store.search_indexed(""),
                    layout,
                    view::EMPTY_STATE,
                ))
            }
            Command::Search { term, layout } => {
                let layout = layout.map_or(self.layout, Into::into);
                let empty = if self.store.is_empty() {
                    view::EMPTY_STATE
                } else {
                    view::NO_MATCHES
                };
                Ok(render_contacts(&self.store.search_indexed(&term), layout, empty))
            }
            Command::Add { name, email, phone } => {
                self.form = ContactForm {
                    name,
                    email,
                    phone,
                    editing: None,
                };
                let saved = self.submit_form()?;
                Ok(format!("Added contact:\n{}", self.card(&saved)))
            }
            Command::Edit {
                id,
                name,
                email,
                phone,
            } => {
                if name.is_none() && email.is_none() && phone.is_none() {
                    bail!("Nothing to change: pass --name, --email or --phone");
                }
                self.form = ContactForm::edit(self.contact(id)?);
                if let Some(name) = name {
                    self.form.name = name;
                }
                if let Some(email) = email {
                    self.form.email = email;
                }
                if let Some(phone) = phone {
                    self.form.phone = phone;
                }
                let saved = self.submit_form()?;
                Ok(format!("Updated contact:\n{}", self.card(&saved)))
            }
            Command::Remove { id, yes } => {
                let display = self.contact(id)?.display();
                if !yes && !confirm(&format!("Are you sure you want to delete {display}?")) {
                    return Ok("Cancelled.\n".to_string());
                }
                self.store.remove_by_id(id)?;
                self.form.forget(id);
                Ok(format!("Deleted {display}\n"))
            }
            Command::Move { id, position } => {
                let Some(to) = position.checked_sub(1) else {
                    bail!("Positions start at 1");
                };
                let name = self.contact(id)?.name.clone();
                let moved = self.store.reorder_by_id(id, to).map_err(|e| match e {
                    Error::Index { len, .. } => {
                        anyhow::anyhow!("Position {position} is out of bounds (1 to {len})")
                    }
                    other => other.into(),
                })?;
                if moved {
                    Ok(format!("Moved {name} to position {position}\n"))
                } else {
                    Ok(format!("{name} is already at position {position}\n"))
                }
            }
            Command::Email {
                id,
                subject,
                body,
                dry_run,
            } => self.email(id, subject, body, dry_run),
        }
    }

    fn email(
        &mut self,
        id: ContactId,
        subject: Option<String>,
        body: Option<String>,
        dry_run: bool,
    ) -> Result<String> {
        let contact = self.contact(id)?.clone();
        self.compose.open(&contact);
        debug!(recipient = ?self.compose.recipient, dry_run, "Compose dialog opened");

        if let Some(draft) = self.compose.draft_mut() {
            if let Some(subject) = subject {
                draft.subject = subject;
            }
            if let Some(body) = body {
                draft.body = body;
            }
        }

        if dry_run {
            let preview = self
                .compose
                .draft
                .as_ref()
                .context("compose dialog is not open")?
                .to_request()
                .map(|request| view::render_preview(&request, &self.endpoint));
            // Previewing never sends; the draft is discarded like a cancel.
            self.compose.close();
            return Ok(preview?);
        }

        let report = self.compose.submit(&mut self.dispatcher)?;
        Ok(view::render_report(&report))
    }

    fn submit_form(&mut self) -> Result<Contact> {
        debug!(editing = self.form.is_editing(), "Submitting contact form");
        self.form.submit(&mut self.store).map_err(|e| match e {
            Error::Validation(errors) => anyhow::anyhow!(
                "{}",
                errors
                    .iter()
                    .map(|err| format!("{}: {}", err.field(), err.message()))
                    .collect::<Vec<_>>()
                    .join("\n")
            ),
            other => other.into(),
        })
    }

    fn contact(&self, id: ContactId) -> Result<&Contact> {
        self.store
            .get(id)
            .ok_or(Error::NotFound(id))
            .with_context(|| format!("no contact with id {id}"))
    }

    fn card(&self, contact: &Contact) -> String {
        let position = self.store.position_of(contact.id).unwrap_or_default();
        render_contact(position, contact)
    }
}
