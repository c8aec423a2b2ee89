//! TUI Frontend (ratatui-based)
//!
//! This module implements the Frontend trait using ratatui for terminal rendering.
//! It wraps crossterm for event handling and terminal management.

pub mod app;
pub mod colors;
pub mod formula_bar;
pub mod sheet_pane;

pub use app::TuiFrontend;
pub use formula_bar::FormulaInput;
pub use sheet_pane::PaneHit;
