//! Ordered contact store with snapshot persistence.

use std::collections::HashSet;

use tracing::{debug, warn};

use super::model::{Contact, ContactId};
use super::validation::validate_contact;
use crate::storage::Storage;
use crate::{Error, Result};

/// Source of creation timestamps in milliseconds.
pub type Clock = fn() -> i64;

fn system_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// The ordered address book.
///
/// Order is meaningful and persisted. Every successful mutation writes the
/// whole sequence back to the storage before returning; a failed write rolls
/// the in-memory change back.
pub struct ContactStore<S: Storage> {
    contacts: Vec<Contact>,
    storage: S,
    clock: Clock,
}

impl<S: Storage> std::fmt::Debug for ContactStore<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContactStore")
            .field("contacts", &self.contacts)
            .finish_non_exhaustive()
    }
}

impl<S: Storage> ContactStore<S> {
    /// Load the store from its backend.
    ///
    /// A missing blob yields an empty store. A blob that does not parse is
    /// quarantined and the store starts empty. Records that fail to parse on
    /// their own are dropped; the original blob is quarantined and the
    /// readable records are written back. Duplicate ids keep their first
    /// occurrence.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend itself cannot be read.
    pub fn load(mut storage: S) -> Result<Self> {
        let (contacts, skipped) = match storage.load()? {
            None => (Vec::new(), 0),
            Some(blob) => match serde_json::from_str::<Vec<serde_json::Value>>(&blob) {
                Ok(records) => parse_records(records),
                Err(e) => {
                    warn!(error = %e, "Stored contacts are unreadable, starting empty");
                    if let Err(e) = storage.quarantine() {
                        warn!(error = %e, "Failed to quarantine unreadable contacts");
                    }
                    (Vec::new(), 0)
                }
            },
        };

        let mut store = Self {
            contacts: dedupe(contacts),
            storage,
            clock: system_millis,
        };

        if skipped > 0 {
            warn!(skipped, kept = store.contacts.len(), "Recovered readable contacts");
            if let Err(e) = store.storage.quarantine() {
                warn!(error = %e, "Failed to quarantine unreadable contacts");
            } else if let Err(e) = store.persist() {
                warn!(error = %e, "Failed to write recovered contacts");
            }
        }

        debug!(count = store.contacts.len(), "Contacts loaded");
        Ok(store)
    }

    /// Replace the timestamp source used for new ids.
    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// All contacts in order.
    #[must_use]
    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    /// Number of contacts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    /// Whether the store holds no contacts.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    /// Current position of the contact with `id`.
    #[must_use]
    pub fn position_of(&self, id: ContactId) -> Option<usize> {
        self.contacts.iter().position(|c| c.id == id)
    }

    /// Look up a contact by id.
    #[must_use]
    pub fn get(&self, id: ContactId) -> Option<&Contact> {
        self.contacts.iter().find(|c| c.id == id)
    }

    /// Borrow the storage backend.
    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// Append a new contact.
    ///
    /// # Errors
    ///
    /// Returns `Error::Validation` if a field is missing or the email is
    /// malformed, or a storage error if the snapshot could not be written.
    pub fn add(&mut self, name: &str, email: &str, phone: &str) -> Result<Contact> {
        validate_contact(name, email, phone).map_err(Error::Validation)?;

        let contact = Contact::new(self.next_id()?, name, email, phone);
        self.contacts.push(contact.clone());

        if let Err(e) = self.persist() {
            self.contacts.pop();
            return Err(e);
        }

        debug!(id = %contact.id, "Contact added");
        Ok(contact)
    }

    /// Replace the contact at `position`, keeping its id and position.
    ///
    /// # Errors
    ///
    /// Returns `Error::Validation` for bad fields, `Error::Index` if
    /// `position` is out of bounds, or a storage error.
    pub fn update(
        &mut self,
        position: usize,
        name: &str,
        email: &str,
        phone: &str,
    ) -> Result<Contact> {
        validate_contact(name, email, phone).map_err(Error::Validation)?;
        self.check_position(position)?;

        let id = self.contacts[position].id;
        let updated = Contact::new(id, name, email, phone);
        let previous = std::mem::replace(&mut self.contacts[position], updated.clone());

        if let Err(e) = self.persist() {
            self.contacts[position] = previous;
            return Err(e);
        }

        debug!(%id, position, "Contact updated");
        Ok(updated)
    }

    /// Delete the contact at `position`, shifting later contacts left.
    ///
    /// # Errors
    ///
    /// Returns `Error::Index` if `position` is out of bounds, or a storage
    /// error.
    pub fn remove(&mut self, position: usize) -> Result<Contact> {
        self.check_position(position)?;

        let removed = self.contacts.remove(position);

        if let Err(e) = self.persist() {
            self.contacts.insert(position, removed);
            return Err(e);
        }

        debug!(id = %removed.id, position, "Contact removed");
        Ok(removed)
    }

    /// Move the contact at `from` so it ends up at `to`.
    ///
    /// `to` indexes the sequence after the contact has been taken out, so
    /// `[A, B, C, D]` with `reorder(0, 2)` becomes `[B, C, A, D]`. A missing
    /// position (an unset drag cursor) or `from == to` is a no-op. Returns
    /// whether the order changed; storage is only written on a change.
    ///
    /// # Errors
    ///
    /// Returns `Error::Index` if either position is out of bounds, or a
    /// storage error.
    pub fn reorder(&mut self, from: Option<usize>, to: Option<usize>) -> Result<bool> {
        let (Some(from), Some(to)) = (from, to) else {
            return Ok(false);
        };
        if from == to {
            return Ok(false);
        }
        self.check_position(from)?;
        self.check_position(to)?;

        let moved = self.contacts.remove(from);
        self.contacts.insert(to, moved);

        if let Err(e) = self.persist() {
            let moved = self.contacts.remove(to);
            self.contacts.insert(from, moved);
            return Err(e);
        }

        debug!(from, to, "Contacts reordered");
        Ok(true)
    }

    /// Contacts whose name or email contains `term`, ignoring case.
    ///
    /// A blank term returns everything. Relative order is preserved.
    #[must_use]
    pub fn search(&self, term: &str) -> Vec<&Contact> {
        self.search_indexed(term).into_iter().map(|(_, c)| c).collect()
    }

    /// Like [`search`](Self::search), paired with each contact's position.
    #[must_use]
    pub fn search_indexed(&self, term: &str) -> Vec<(usize, &Contact)> {
        let needle = term.trim().to_lowercase();
        self.contacts
            .iter()
            .enumerate()
            .filter(|(_, c)| needle.is_empty() || c.matches(&needle))
            .collect()
    }

    /// [`update`](Self::update) addressed by id.
    ///
    /// # Errors
    ///
    /// Returns `Error::NotFound` for an unknown id, otherwise as `update`.
    pub fn update_by_id(
        &mut self,
        id: ContactId,
        name: &str,
        email: &str,
        phone: &str,
    ) -> Result<Contact> {
        let position = self.require(id)?;
        self.update(position, name, email, phone)
    }

    /// [`remove`](Self::remove) addressed by id.
    ///
    /// # Errors
    ///
    /// Returns `Error::NotFound` for an unknown id, otherwise as `remove`.
    pub fn remove_by_id(&mut self, id: ContactId) -> Result<Contact> {
        let position = self.require(id)?;
        self.remove(position)
    }

    /// [`reorder`](Self::reorder) the contact with `id` to position `to`.
    ///
    /// # Errors
    ///
    /// Returns `Error::NotFound` for an unknown id, otherwise as `reorder`.
    pub fn reorder_by_id(&mut self, id: ContactId, to: usize) -> Result<bool> {
        let from = self.require(id)?;
        self.reorder(Some(from), Some(to))
    }

    fn require(&self, id: ContactId) -> Result<usize> {
        self.position_of(id).ok_or(Error::NotFound(id))
    }

    fn check_position(&self, position: usize) -> Result<()> {
        if position < self.contacts.len() {
            Ok(())
        } else {
            Err(Error::Index {
                position,
                len: self.contacts.len(),
            })
        }
    }

    /// Millisecond timestamp, bumped past the newest id on collision.
    fn next_id(&self) -> Result<ContactId> {
        let now = (self.clock)();
        match self.contacts.iter().map(|c| c.id.0).max() {
            Some(max) if max >= now => max
                .checked_add(1)
                .map(ContactId::new)
                .ok_or(Error::IdsExhausted),
            _ => Ok(ContactId::new(now)),
        }
    }

    fn persist(&mut self) -> Result<()> {
        let blob = serde_json::to_string(&self.contacts)?;
        self.storage.save(&blob)
    }
}

/// Parses each record on its own; returns the readable ones and how many
/// were skipped.
fn parse_records(records: Vec<serde_json::Value>) -> (Vec<Contact>, usize) {
    let total = records.len();
    let mut contacts = Vec::with_capacity(total);

    for (index, record) in records.into_iter().enumerate() {
        match serde_json::from_value::<Contact>(record) {
            Ok(contact) => contacts.push(contact),
            Err(e) => warn!(index, error = %e, "Skipping unreadable contact"),
        }
    }

    let skipped = total - contacts.len();
    (contacts, skipped)
}

fn dedupe(contacts: Vec<Contact>) -> Vec<Contact> {
    let mut seen = HashSet::with_capacity(contacts.len());
    let total = contacts.len();
    let unique: Vec<Contact> = contacts.into_iter().filter(|c| seen.insert(c.id)).collect();

    if unique.len() != total {
        warn!(
            dropped = total - unique.len(),
            "Dropped contacts with duplicate ids"
        );
    }
    unique
}
