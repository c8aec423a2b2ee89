//! Core logic layer
//!
//! Sheet selection, auto-cycle timing, card bookkeeping and input routing.
//! NO imports from frontend/ or rendering code.
//! Core updates the pane through the `SheetView` adapter, frontends read and render.

pub mod app_core;
pub mod auto_cycle;
pub mod cycler;
pub mod input_router;
pub mod link;
pub mod messages;
pub mod view;

pub use app_core::AppCore;
pub use messages::CyclerCommand;
pub use view::SheetView;
