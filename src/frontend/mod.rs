//! Frontend abstraction layer
//!
//! This module defines the `Frontend` trait the terminal frontend implements.
//! It provides a unified interface for event polling, rendering, and cleanup.

pub mod events;
pub mod tui;

use anyhow::Result;
pub use events::FrontendEvent;
pub use tui::TuiFrontend;

/// Frontend trait
///
/// Separates rendering concerns from the sheet cycler. The frontend reads the
/// pane model from the core and draws it; it never mutates widget state
/// except through the commands the main loop dispatches.
pub trait Frontend {
    /// Poll for user input events
    ///
    /// Returns all pending events (keyboard, mouse, resize, paste) converted
    /// to the frontend-agnostic `FrontendEvent` enum, or an empty list.
    fn poll_events(&mut self) -> Result<Vec<FrontendEvent>>;

    /// Render the current application state
    ///
    /// # Arguments
    /// - `app` - the `AppCore`; mutable so the frontend can clear its render flag
    fn render(&mut self, app: &mut dyn std::any::Any) -> Result<()>;

    /// Restore the terminal before exit
    fn cleanup(&mut self) -> Result<()>;

    /// Current terminal size in characters
    fn size(&self) -> (u16, u16);
}
