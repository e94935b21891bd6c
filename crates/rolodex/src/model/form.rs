//! Contact form model.

use rolodex_core::{Contact, ContactId, ContactStore, Storage};

/// State for the add/edit contact form.
///
/// The editing cursor holds a contact id rather than a position, so a reorder
/// or delete between opening and submitting cannot retarget the edit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    /// Name field.
    pub name: String,
    /// Email field.
    pub email: String,
    /// Phone field.
    pub phone: String,
    /// Contact being edited, `None` when adding.
    pub editing: Option<ContactId>,
}

impl ContactForm {
    /// Creates an empty form in add mode.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a contact into the form and switches to edit mode.
    #[must_use]
    pub fn edit(contact: &Contact) -> Self {
        Self {
            name: contact.name.clone(),
            email: contact.email.clone(),
            phone: contact.phone.clone(),
            editing: Some(contact.id),
        }
    }

    /// Whether the form edits an existing contact.
    #[must_use]
    pub const fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    /// Clears the fields and returns to add mode.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Drops the editing cursor if it points at a deleted contact.
    pub fn forget(&mut self, id: ContactId) {
        if self.editing == Some(id) {
            self.reset();
        }
    }

    /// Saves the form into the store and resets it on success.
    ///
    /// Fields are trimmed before they reach the store. On failure the form
    /// keeps its contents so the user can correct them.
    ///
    /// # Errors
    ///
    /// Returns the store's error (validation, unknown id, storage).
    pub fn submit<S: Storage>(
        &mut self,
        store: &mut ContactStore<S>,
    ) -> rolodex_core::Result<Contact> {
        let (name, email, phone) = (self.name.trim(), self.email.trim(), self.phone.trim());

        let saved = match self.editing {
            None => store.add(name, email, phone)?,
            Some(id) => store.update_by_id(id, name, email, phone)?,
        };

        self.reset();
        Ok(saved)
    }
}
