//! Data models for the contact manager front end.

mod compose;
mod form;
mod settings;

pub use compose::ComposeState;
pub use form::ContactForm;
pub use settings::{AppSettings, Layout};
