//! CLI schema for the rolodex binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use rolodex_core::ContactId;

use crate::model::Layout;

#[derive(Parser, Debug)]
#[command(name = "rolodex")]
#[command(about = "Keep contacts and email them in one step")]
#[command(version)]
/// Command-line arguments.
pub struct Cli {
    /// Contacts file (overrides the settings file).
    #[arg(long, global = true, value_name = "PATH")]
    pub store: Option<PathBuf>,

    /// Settings file to read instead of the default location.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
///
/// Contacts are addressed by id; positions are 1-based.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show every contact in order
    List {
        /// Card grid or compact rows (defaults to the settings file)
        #[arg(long, value_enum)]
        layout: Option<LayoutArg>,
    },
    /// Filter contacts by name or email
    Search {
        /// Case-insensitive text to look for
        term: String,
        /// Card grid or compact rows (defaults to the settings file)
        #[arg(long, value_enum)]
        layout: Option<LayoutArg>,
    },
    /// Add a new contact at the end of the list
    Add {
        /// Full name
        name: String,
        /// Email address
        email: String,
        /// Phone number
        phone: String,
    },
    /// Change fields of an existing contact
    Edit {
        /// Contact id
        id: ContactId,
        /// New name
        #[arg(long)]
        name: Option<String>,
        /// New email address
        #[arg(long)]
        email: Option<String>,
        /// New phone number
        #[arg(long)]
        phone: Option<String>,
    },
    /// Delete a contact
    Remove {
        /// Contact id
        id: ContactId,
        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },
    /// Move a contact to a new position in the list
    Move {
        /// Contact id
        id: ContactId,
        /// Target position (1-based)
        position: usize,
    },
    /// Compose an email to a contact and hand it to a mail client
    Email {
        /// Contact id
        id: ContactId,
        /// Subject (defaults to a greeting)
        #[arg(long)]
        subject: Option<String>,
        /// Message body (defaults to a greeting)
        #[arg(long)]
        body: Option<String>,
        /// Print the compose URLs without opening anything
        #[arg(long)]
        dry_run: bool,
    },
}

/// Layout choice on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LayoutArg {
    /// Cards with avatar initials
    Grid,
    /// One line per contact
    List,
}

impl From<LayoutArg> for Layout {
    fn from(arg: LayoutArg) -> Self {
        match arg {
            LayoutArg::Grid => Self::Grid,
            LayoutArg::List => Self::List,
        }
    }
}
