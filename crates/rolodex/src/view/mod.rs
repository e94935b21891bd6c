//! Text rendering for terminal output.

mod compose;
mod contact_list;

pub use compose::{render_preview, render_report};
pub use contact_list::{EMPTY_STATE, NO_MATCHES, render_contact, render_contacts};
