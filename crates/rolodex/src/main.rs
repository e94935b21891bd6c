//! `Rolodex` - command-line contact manager
//!
//! Keeps an ordered address book on disk and hands composed emails to the
//! browser or the default mail client.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod app;
mod cli;
mod model;
mod view;

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use clap::Parser;
use rolodex_compose::Dispatcher;
use rolodex_core::{ContactStore, JsonFileStorage};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use app::App;
use cli::Cli;
use model::AppSettings;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let settings_path = cli.config.clone().unwrap_or_else(AppSettings::default_path);
    let settings = AppSettings::load(&settings_path)?;

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| settings.log_filter().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let store_path = cli.store.clone().unwrap_or_else(|| settings.store_path());
    info!(store = %store_path.display(), settings = %settings_path.display(), "Starting Rolodex");

    let store = ContactStore::load(JsonFileStorage::new(&store_path))
        .with_context(|| format!("loading contacts from {}", store_path.display()))?;
    let endpoint = settings.compose_endpoint()?;
    let dispatcher = Dispatcher::system(endpoint.clone(), settings.dispatch_policy);

    let mut app = App::new(store, dispatcher, endpoint, settings.layout);
    let output = app.run(cli.command, &mut prompt)?;
    print!("{output}");

    if app.holds_clipboard() {
        // The selection is served by this process; keep it until the user pasted.
        wait_for_enter("Press Enter once the link is pasted");
    }
    Ok(())
}

fn wait_for_enter(message: &str) {
    let mut stdout = std::io::stdout();
    let _ = write!(stdout, "{message}... ");
    let _ = stdout.flush();

    let mut line = String::new();
    let _ = std::io::stdin().lock().read_line(&mut line);
}

/// Yes/no prompt on the terminal; anything but `y`/`yes` declines.
fn prompt(question: &str) -> bool {
    let mut stdout = std::io::stdout();
    let _ = write!(stdout, "{question} [y/N] ");
    let _ = stdout.flush();

    let mut answer = String::new();
    if std::io::stdin().lock().read_line(&mut answer).is_err() {
        return false;
    }
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}
