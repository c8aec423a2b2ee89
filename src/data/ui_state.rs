//! UI State - input focus and status line
//!
//! Independent of rendering; the frontend reads it to decide where keys go
//! and what the status line says.

/// Where keyboard input is routed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Keys navigate cells and tabs
    #[default]
    Normal,
    /// Keys edit the formula bar of the selected cell
    FormulaEdit,
}

#[derive(Debug, Clone, Default)]
pub struct UiState {
    pub input_mode: InputMode,
    /// Transient status line message
    pub status_text: String,
}

impl UiState {
    pub fn set_status(&mut self, text: impl Into<String>) {
        self.status_text = text.into();
    }
}
