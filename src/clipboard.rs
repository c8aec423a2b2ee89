//! Clipboard access for action links
//!
//! Uses arboard for cross-platform clipboard access. A terminal has no
//! browser to follow a link in, so "Learn More" puts the URL on the clipboard.

use anyhow::{Context, Result};
use arboard::Clipboard;

/// System clipboard handle, opened on first copy and kept for the life of the
/// app. On X11 the copied text is only served while its owner is alive.
#[derive(Default)]
pub struct LinkClipboard {
    inner: Option<Clipboard>,
}

impl LinkClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.inner.is_some()
    }

    /// Copy text to the system clipboard
    pub fn copy(&mut self, text: &str) -> Result<()> {
        if text.is_empty() {
            return Ok(()); // Nothing to copy
        }

        let mut clipboard = match self.inner.take() {
            Some(clipboard) => clipboard,
            None => Clipboard::new().context("Failed to open clipboard")?,
        };
        let result = clipboard
            .set_text(text.to_string())
            .context("Failed to write clipboard");
        self.inner = Some(clipboard);
        result?;

        tracing::debug!("Copied {} bytes to clipboard", text.len());
        Ok(())
    }
}
