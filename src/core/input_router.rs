//! Input routing for the sheet pane
//!
//! Maps key presses in normal mode to pane actions. Formula editing is handled
//! by the frontend's text field and never reaches this router.

use crossterm::event::{KeyCode, KeyModifiers};

/// What a key press asks the pane to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaneAction {
    Quit,
    /// Move the cell selection by a delta
    MoveSelection { d_col: i32, d_row: i32 },
    /// Click the tab after the active one
    NextTab,
    /// Click the tab before the active one
    PrevTab,
    /// Click the tab at a zero-based position
    SelectTab(usize),
    /// Start editing the selected cell in the formula bar
    BeginEdit,
    /// Load the selected cell's card into the formula bar
    EditCard,
    RemoveSelected,
    ClearAll,
    CopyLink,
    None,
}

/// Route a key event in normal mode
pub fn route_key(code: KeyCode, modifiers: KeyModifiers) -> PaneAction {
    if modifiers.contains(KeyModifiers::CONTROL) {
        return match code {
            KeyCode::Char('c') | KeyCode::Char('q') => PaneAction::Quit,
            KeyCode::Char('l') => PaneAction::ClearAll,
            _ => PaneAction::None,
        };
    }

    match code {
        KeyCode::Char('q') | KeyCode::Esc => PaneAction::Quit,
        KeyCode::Up => PaneAction::MoveSelection { d_col: 0, d_row: -1 },
        KeyCode::Down => PaneAction::MoveSelection { d_col: 0, d_row: 1 },
        KeyCode::Left => PaneAction::MoveSelection { d_col: -1, d_row: 0 },
        KeyCode::Right => PaneAction::MoveSelection { d_col: 1, d_row: 0 },
        KeyCode::Tab | KeyCode::PageDown => PaneAction::NextTab,
        KeyCode::BackTab | KeyCode::PageUp => PaneAction::PrevTab,
        KeyCode::Char(c @ '1'..='9') => PaneAction::SelectTab(c as usize - '1' as usize),
        KeyCode::Enter | KeyCode::F(2) => PaneAction::BeginEdit,
        KeyCode::Char('e') => PaneAction::EditCard,
        KeyCode::Delete | KeyCode::Backspace => PaneAction::RemoveSelected,
        KeyCode::Char('y') => PaneAction::CopyLink,
        _ => PaneAction::None,
    }
}
