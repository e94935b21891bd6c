//! Settings model.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rolodex_compose::{ComposeEndpoint, DEFAULT_COMPOSE_URL, DispatchPolicy};
use rolodex_core::JsonFileStorage;
use serde::{Deserialize, Serialize};

/// How contacts are laid out when listed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    /// Multi-line cards with avatar initials.
    #[default]
    Grid,
    /// One line per contact.
    List,
}

/// Application settings that persist across sessions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// Contacts file; `None` uses the data directory.
    pub store_path: Option<PathBuf>,
    /// Webmail compose endpoint.
    pub compose_url: String,
    /// Whether unobservable hand-offs count as sent.
    pub dispatch_policy: DispatchPolicy,
    /// Default listing layout.
    pub layout: Layout,
    /// `tracing` filter used when `RUST_LOG` is unset.
    pub log_filter: Option<String>,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            store_path: None,
            compose_url: DEFAULT_COMPOSE_URL.to_string(),
            dispatch_policy: DispatchPolicy::default(),
            layout: Layout::default(),
            log_filter: None,
        }
    }
}

impl AppSettings {
    /// Default settings location: `<config_dir>/rolodex/settings.json`.
    #[must_use]
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("rolodex")
            .join("settings.json")
    }

    /// Load settings from `path`; a missing file yields defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("reading settings from {}", path.display()))?;

        serde_json::from_str(&contents)
            .with_context(|| format!("parsing settings in {}", path.display()))
    }

    /// Contacts file, falling back to the data directory.
    #[must_use]
    pub fn store_path(&self) -> PathBuf {
        self.store_path
            .clone()
            .unwrap_or_else(JsonFileStorage::default_path)
    }

    /// Parsed webmail endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if `compose_url` is not an http(s) URL.
    pub fn compose_endpoint(&self) -> Result<ComposeEndpoint> {
        ComposeEndpoint::parse(&self.compose_url)
            .with_context(|| format!("invalid compose_url `{}`", self.compose_url))
    }

    /// Log filter, falling back to info for the workspace crates.
    #[must_use]
    pub fn log_filter(&self) -> String {
        self.log_filter
            .clone()
            .unwrap_or_else(|| "rolodex=info,rolodex_core=info,rolodex_compose=info".to_string())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = AppSettings::load(&dir.path().join("settings.json")).unwrap();
        assert_eq!(settings, AppSettings::default());
        assert_eq!(settings.dispatch_policy, DispatchPolicy::Optimistic);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"dispatch_policy":"strict","layout":"list"}"#).unwrap();

        let settings = AppSettings::load(&path).unwrap();
        assert_eq!(settings.dispatch_policy, DispatchPolicy::Strict);
        assert_eq!(settings.layout, Layout::List);
        assert_eq!(settings.compose_url, DEFAULT_COMPOSE_URL);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{layout:").unwrap();
        assert!(AppSettings::load(&path).is_err());
    }

    #[test]
    fn test_bad_compose_url() {
        let settings = AppSettings {
            compose_url: "ftp://example.com".to_string(),
            ..AppSettings::default()
        };
        assert!(settings.compose_endpoint().is_err());
    }

    #[test]
    fn test_store_path_override() {
        let settings = AppSettings {
            store_path: Some(PathBuf::from("/tmp/contacts.json")),
            ..AppSettings::default()
        };
        assert_eq!(settings.store_path(), PathBuf::from("/tmp/contacts.json"));
    }
}
