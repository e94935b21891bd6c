//! Contact management: the ordered address book and its validation rules.

mod model;
mod store;
mod validation;

pub use model::{Contact, ContactId};
pub use store::{Clock, ContactStore};
pub use validation::{ValidationError, is_valid_email, validate_contact};
