//! Frontend-agnostic input events.
//!
//! The terminal frontend translates crossterm's event stream into this enum so
//! the main loop only handles one event shape.

use crossterm::event::{KeyCode, KeyModifiers, MouseButton, MouseEventKind};

#[derive(Debug, Clone, PartialEq)]
pub enum FrontendEvent {
    /// Keyboard input
    Key {
        code: KeyCode,
        modifiers: KeyModifiers,
    },
    /// Mouse input
    Mouse {
        kind: MouseEventKind,
        x: u16,
        y: u16,
        modifiers: KeyModifiers,
    },
    /// Terminal resize
    Resize { width: u16, height: u16 },
    /// Bracketed paste
    Paste { text: String },
}

impl FrontendEvent {
    /// Position of a left-button press, if this is one
    pub fn left_click(&self) -> Option<(u16, u16)> {
        match self {
            FrontendEvent::Mouse {
                kind: MouseEventKind::Down(MouseButton::Left),
                x,
                y,
                ..
            } => Some((*x, *y)),
            _ => None,
        }
    }
}
