//! # rolodex-core
//!
//! Core business logic for the `Rolodex` contact manager.
//!
//! This crate provides:
//! - **Contact Store** - ordered address book with add/edit/remove/reorder
//! - **Validation** - required fields and basic email syntax
//! - **Search** - case-insensitive filtering by name or email
//! - **Persistence** - whole-snapshot JSON blob behind a pluggable [`Storage`]

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

pub mod contacts;
mod error;
pub mod storage;

pub use contacts::{
    Clock, Contact, ContactId, ContactStore, ValidationError, is_valid_email, validate_contact,
};
pub use error::{Error, Result};
pub use storage::{JsonFileStorage, MemoryStorage, Storage};
