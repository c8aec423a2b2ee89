//! Commands dispatched to the sheet cycler.
//!
//! Frontends translate clicks and keys into these; the auto-cycle timer task
//! sends `Tick`. The cycler handles one command at a time to completion.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CyclerCommand {
    /// A tab was clicked by the user (label as displayed)
    TabClicked(String),
    /// The auto-cycle timer fired
    Tick,
    SelectCell(String),
    EditCard(String),
    AddCard { address: String, content: String },
    RemoveCard(String),
    ClearAll,
}

impl CyclerCommand {
    /// Whether the command came from the user rather than the timer
    pub fn is_user_initiated(&self) -> bool {
        !matches!(self, CyclerCommand::Tick)
    }
}
