//! Contact list rendering (cards and rows).

use std::fmt::Write as _;

use rolodex_core::Contact;

use crate::model::Layout;

/// Shown when there is nothing to list.
pub const EMPTY_STATE: &str = "No contacts yet. Add one with `rolodex add <name> <email> <phone>`.";

/// Shown when a search matched nothing.
pub const NO_MATCHES: &str = "No contacts match your search.";

/// Renders `(position, contact)` pairs in the chosen layout.
///
/// Positions are zero-based and shown 1-based.
#[must_use]
pub fn render_contacts(entries: &[(usize, &Contact)], layout: Layout, empty: &str) -> String {
    if entries.is_empty() {
        return format!("{empty}\n");
    }

    let mut out = String::new();
    for (position, contact) in entries {
        match layout {
            Layout::Grid => {
                out.push_str(&render_card(*position, contact));
                out.push('\n');
            }
            Layout::List => out.push_str(&render_row(*position, contact)),
        }
    }
    out
}

/// Renders a single contact as a card.
#[must_use]
pub fn render_contact(position: usize, contact: &Contact) -> String {
    render_card(position, contact)
}

fn render_card(position: usize, contact: &Contact) -> String {
    let avatar = format!("[{}]", contact.initials());
    let pad = " ".repeat(avatar.chars().count());
    let mut out = String::new();
    let _ = writeln!(out, "{avatar} {}  #{} (id {})", contact.name, position + 1, contact.id);
    let _ = writeln!(out, "{pad} email: {}", contact.email);
    let _ = writeln!(out, "{pad} phone: {}", contact.phone);
    out
}

fn render_row(position: usize, contact: &Contact) -> String {
    format!(
        "{:>3}. {:<4} {} <{}>  {}  (id {})\n",
        position + 1,
        contact.initials(),
        contact.name,
        contact.email,
        contact.phone,
        contact.id
    )
}
