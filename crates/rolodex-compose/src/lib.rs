//! # rolodex-compose
//!
//! Hands a composed email to whatever mail agent is available.
//!
//! ## Features
//!
//! - **Compose requests**: validated recipient/subject/body triples
//! - **URL building**: webmail compose URLs and `mailto:` URIs with
//!   `encodeURIComponent`-compatible percent-encoding
//! - **Dispatch chain**: webmail window, webmail link, `mailto:` hand-off,
//!   then a manual fallback that copies the URI to the clipboard
//! - **Drafts**: greeting template that resets when the dialog is dismissed
//!
//! ## Quick Start
//!
//! ```ignore
//! use rolodex_compose::{ComposeEndpoint, Dispatcher, DispatchPolicy, Draft, Outcome};
//!
//! let draft = Draft::for_recipient("Ada", "ada@example.com");
//! let request = draft.to_request()?;
//!
//! let mut dispatcher = Dispatcher::system(ComposeEndpoint::default(), DispatchPolicy::Optimistic);
//! match dispatcher.dispatch(&request).outcome {
//!     Outcome::Sent { via } => println!("opened via {}", via.label()),
//!     Outcome::AwaitingManualAction(fallback) => println!("{}", fallback.message()),
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

pub mod dispatch;
mod draft;
pub mod encoding;
mod error;
mod request;

pub use dispatch::{
    AgentError, Attempt, AttemptResult, Clipboard, ClipboardError, CopyStatus, DispatchPolicy,
    DispatchReport, Dispatcher, MailAgent, ManualFallback, NoClipboard, Opened, Outcome, Strategy,
    SystemClipboard, SystemMailAgent,
};
pub use draft::Draft;
pub use encoding::{decode_component, encode_component};
pub use error::{Error, Result};
pub use request::{ComposeEndpoint, ComposeRequest, DEFAULT_COMPOSE_URL};
