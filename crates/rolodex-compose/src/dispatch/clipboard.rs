//! Clipboard seam for the manual fallback.

/// Errors raised while copying to the clipboard.
#[derive(Debug, thiserror::Error)]
pub enum ClipboardError {
    /// No clipboard on this system (headless session, no display server).
    #[error("Clipboard unavailable: {0}")]
    Unavailable(String),

    /// The clipboard refused the text.
    #[error("Copy failed: {0}")]
    Copy(String),
}

/// Something that can hold copied text.
pub trait Clipboard {
    /// Replaces the clipboard contents with `text`.
    ///
    /// # Errors
    ///
    /// Returns an error if no clipboard is available or the copy failed.
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError>;

    /// Whether copied text disappears once this handle is dropped.
    ///
    /// X11 and Wayland serve the selection from the copying process, so the
    /// text is gone when the process exits unless a clipboard manager took it.
    fn is_transient(&self) -> bool {
        false
    }
}

/// The desktop clipboard.
///
/// The handle is opened on first copy and kept until this value is dropped,
/// which keeps the selection alive on X11 and Wayland.
#[derive(Default)]
pub struct SystemClipboard {
    handle: Option<arboard::Clipboard>,
}

impl SystemClipboard {
    /// Creates a new system clipboard.
    #[must_use]
    pub const fn new() -> Self {
        Self { handle: None }
    }
}

impl std::fmt::Debug for SystemClipboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SystemClipboard")
            .field("open", &self.handle.is_some())
            .finish()
    }
}

impl Clipboard for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        let clipboard = match self.handle.take() {
            Some(clipboard) => clipboard,
            None => {
                arboard::Clipboard::new().map_err(|e| ClipboardError::Unavailable(e.to_string()))?
            }
        };
        self.handle
            .insert(clipboard)
            .set_text(text)
            .map_err(|e| ClipboardError::Copy(e.to_string()))
    }

    fn is_transient(&self) -> bool {
        cfg!(all(
            unix,
            not(any(target_os = "macos", target_os = "ios", target_os = "android"))
        ))
    }
}

/// A clipboard that is never there.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoClipboard;

impl Clipboard for NoClipboard {
    fn set_text(&mut self, _text: &str) -> Result<(), ClipboardError> {
        Err(ClipboardError::Unavailable("clipboard disabled".to_string()))
    }
}
