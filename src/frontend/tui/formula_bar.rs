//! Formula bar: single-line editor for the selected cell's card.
//!
//! Wraps a tui-textarea field. Enter commits, Esc cancels, everything else
//! edits the text.

use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::Widget as RatatuiWidget,
};
use tui_textarea::{CursorMove, Input, Key, TextArea};

/// Outcome of a key press while editing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormulaInput {
    Continue,
    Commit(String),
    Cancel,
}

pub struct FormulaBar {
    textarea: TextArea<'static>,
    active: bool,
}

impl FormulaBar {
    pub fn new() -> Self {
        Self {
            textarea: TextArea::default(),
            active: false,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Start editing with `text` already in the field, cursor at the end
    pub fn begin(&mut self, text: &str) {
        let mut textarea = TextArea::new(vec![text.to_string()]);
        textarea.move_cursor(CursorMove::End);
        textarea.set_cursor_line_style(Style::default());
        self.textarea = textarea;
        self.active = true;
    }

    /// Close the editor without committing
    pub fn end(&mut self) {
        self.active = false;
    }

    pub fn text(&self) -> String {
        self.textarea.lines().join(" ")
    }

    pub fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> FormulaInput {
        match code {
            KeyCode::Enter => {
                self.active = false;
                FormulaInput::Commit(self.text())
            }
            KeyCode::Esc => {
                self.active = false;
                FormulaInput::Cancel
            }
            _ => {
                if let Some(input) = to_textarea_input(code, modifiers) {
                    self.textarea.input(input);
                }
                FormulaInput::Continue
            }
        }
    }

    /// Insert pasted text (newlines flattened, the field is single-line)
    pub fn paste(&mut self, text: &str) {
        let flat = text.replace(['\r', '\n'], " ");
        self.textarea.insert_str(flat);
    }

    pub fn render(&mut self, area: Rect, buf: &mut Buffer, cursor_bg: Color) {
        self.textarea.set_style(Style::default());
        self.textarea.set_cursor_style(
            Style::default()
                .bg(cursor_bg)
                .add_modifier(Modifier::REVERSED),
        );
        RatatuiWidget::render(&self.textarea, area, buf);
    }
}

impl Default for FormulaBar {
    fn default() -> Self {
        Self::new()
    }
}

/// Convert a crossterm key to tui-textarea's own input type
fn to_textarea_input(code: KeyCode, modifiers: KeyModifiers) -> Option<Input> {
    let key = match code {
        KeyCode::Char(c) => Key::Char(c),
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Delete => Key::Delete,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Home => Key::Home,
        KeyCode::End => Key::End,
        KeyCode::Tab => Key::Tab,
        _ => return None,
    };

    Some(Input {
        key,
        ctrl: modifiers.contains(KeyModifiers::CONTROL),
        alt: modifiers.contains(KeyModifiers::ALT),
        shift: modifiers.contains(KeyModifiers::SHIFT),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typing_then_commit() {
        let mut bar = FormulaBar::new();
        bar.begin("note");
        assert!(bar.is_active());

        for c in " two".chars() {
            assert_eq!(
                bar.handle_key(KeyCode::Char(c), KeyModifiers::NONE),
                FormulaInput::Continue
            );
        }
        assert_eq!(
            bar.handle_key(KeyCode::Enter, KeyModifiers::NONE),
            FormulaInput::Commit("note two".to_string())
        );
        assert!(!bar.is_active());
    }

    #[test]
    fn test_backspace_and_cancel() {
        let mut bar = FormulaBar::new();
        bar.begin("abc");
        bar.handle_key(KeyCode::Backspace, KeyModifiers::NONE);
        assert_eq!(bar.text(), "ab");
        assert_eq!(
            bar.handle_key(KeyCode::Esc, KeyModifiers::NONE),
            FormulaInput::Cancel
        );
    }

    #[test]
    fn test_end_closes_editor() {
        let mut bar = FormulaBar::new();
        bar.begin("draft");
        bar.end();
        assert!(!bar.is_active());
    }

    #[test]
    fn test_paste_flattens_newlines() {
        let mut bar = FormulaBar::new();
        bar.begin("");
        bar.paste("line one\nline two");
        assert_eq!(bar.text(), "line one line two");
    }
}
