//! Data layer - Pure state without UI coupling
//!
//! Sheets, cards, service copy and the pane model the frontend draws.
//! NO imports from frontend/ or any rendering code.

pub mod address;
pub mod card;
pub mod content;
pub mod pane;
pub mod service;
pub mod ui_state;

pub use address::CellAddress;
pub use card::{Card, CardMap, Sheet};
pub use content::{ContentBlock, SheetContent};
pub use pane::PaneState;
pub use service::{ServiceCatalog, ServiceDescriptor, SubService, PLACEHOLDER_DESCRIPTION};
pub use ui_state::{InputMode, UiState};
