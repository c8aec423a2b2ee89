use crate::clipboard::LinkClipboard;
use crate::config::Config;
use crate::core::cycler::SheetCycler;
use crate::core::input_router::{route_key, PaneAction};
use crate::core::messages::CyclerCommand;
use crate::data::{CellAddress, InputMode, PaneState, UiState};
use crossterm::event::{KeyCode, KeyModifiers};
use tokio::sync::mpsc::UnboundedSender;

/// Core application state (frontend-agnostic)
///
/// AppCore owns the single sheet cycler of this process and everything the
/// frontend needs to route input: the input mode, the status line and the
/// running flag. The frontend only reads the pane and forwards events.
pub struct AppCore {
    /// Application configuration
    pub config: Config,

    /// The widget state machine, drawing into a `PaneState`
    pub cycler: SheetCycler<PaneState>,

    /// Input mode and status line
    pub ui_state: UiState,

    /// Application running flag
    pub running: bool,

    /// Set whenever something visible changed
    pub needs_render: bool,

    clipboard: LinkClipboard,
}

impl AppCore {
    /// Build the pane, launch the cycler (starting its timer when a tokio
    /// runtime is available) and show the default sheet
    pub fn new(config: Config, tick_tx: UnboundedSender<CyclerCommand>) -> Self {
        let pane = Self::pane_for(&config);
        let cycler = SheetCycler::launch(&config, pane, tick_tx);

        Self {
            config,
            cycler,
            ui_state: UiState::default(),
            running: true,
            needs_render: true,
            clipboard: LinkClipboard::new(),
        }
    }

    /// Empty pane sized and tabbed for `config`
    pub fn pane_for(config: &Config) -> PaneState {
        PaneState::new(&config.sheet_names(), config.grid.columns, config.grid.rows)
    }

    pub fn pane(&self) -> &PaneState {
        self.cycler.view()
    }

    pub fn input_mode(&self) -> InputMode {
        self.ui_state.input_mode
    }

    pub fn dispatch(&mut self, command: CyclerCommand) {
        if command.is_user_initiated() {
            tracing::debug!("Dispatching {:?}", command);
        }
        let sheet_before = self.cycler.current_sheet().to_string();
        self.cycler.dispatch(command);
        self.needs_render = true;

        // An open edit belongs to the sheet it was started on
        if self.ui_state.input_mode == InputMode::FormulaEdit
            && self.cycler.current_sheet() != sheet_before
        {
            tracing::debug!(
                "Sheet changed from '{}' to '{}' during edit, discarding it",
                sheet_before,
                self.cycler.current_sheet()
            );
            self.ui_state.input_mode = InputMode::Normal;
            self.ui_state
                .set_status(format!("Edit discarded: switched to {}", self.cycler.current_sheet()));
        }
    }

    /// Handle a key press in normal mode
    pub fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) {
        let action = route_key(code, modifiers);
        if action != PaneAction::None {
            tracing::debug!("Key {:?} -> {:?}", code, action);
        }
        self.apply(action);
    }

    fn apply(&mut self, action: PaneAction) {
        match action {
            PaneAction::Quit => {
                self.running = false;
            }
            PaneAction::MoveSelection { d_col, d_row } => {
                let pane = self.pane();
                let next = match pane.selected {
                    Some(current) => current.offset(d_col, d_row, pane.columns, pane.rows),
                    None => CellAddress::new(0, 0),
                };
                self.dispatch(CyclerCommand::SelectCell(next.to_string()));
            }
            PaneAction::NextTab => self.click_relative_tab(1),
            PaneAction::PrevTab => self.click_relative_tab(-1),
            PaneAction::SelectTab(index) => {
                let label = self.pane().tabs.get(index).map(|t| t.label.clone());
                if let Some(label) = label {
                    self.dispatch(CyclerCommand::TabClicked(label));
                }
            }
            PaneAction::BeginEdit => {
                if self.cycler.selected_cell().is_some() {
                    self.ui_state.input_mode = InputMode::FormulaEdit;
                    self.needs_render = true;
                } else {
                    self.ui_state.set_status("Select a cell first (arrow keys)");
                    self.needs_render = true;
                }
            }
            PaneAction::EditCard => {
                if let Some(address) = self.cycler.selected_cell().map(|s| s.to_string()) {
                    self.dispatch(CyclerCommand::EditCard(address));
                    self.ui_state.input_mode = InputMode::FormulaEdit;
                }
            }
            PaneAction::RemoveSelected => {
                if let Some(address) = self.cycler.selected_cell().map(|s| s.to_string()) {
                    self.dispatch(CyclerCommand::RemoveCard(address));
                }
            }
            PaneAction::ClearAll => self.dispatch(CyclerCommand::ClearAll),
            PaneAction::CopyLink => self.copy_action_link(None),
            PaneAction::None => {}
        }
    }

    /// Click the tab `step` positions away from the active one (wrapping)
    fn click_relative_tab(&mut self, step: isize) {
        let pane = self.pane();
        let count = pane.tabs.len();
        if count == 0 {
            return;
        }
        let current = pane
            .tabs
            .iter()
            .position(|t| t.active)
            .unwrap_or(self.cycler.current_index());
        let next = (current as isize + step).rem_euclid(count as isize) as usize;
        let label = pane.tabs[next].label.clone();
        self.dispatch(CyclerCommand::TabClicked(label));
    }

    /// Store the formula bar text as the selected cell's card
    pub fn commit_formula(&mut self, text: String) {
        if self.ui_state.input_mode != InputMode::FormulaEdit {
            tracing::debug!("Formula commit without an open edit, ignoring");
            return;
        }
        self.ui_state.input_mode = InputMode::Normal;
        if let Some(address) = self.cycler.selected_cell().map(|s| s.to_string()) {
            self.dispatch(CyclerCommand::AddCard {
                address: address.clone(),
                content: text,
            });
            // Refresh name box and formula from the stored card
            self.dispatch(CyclerCommand::SelectCell(address));
        }
        self.needs_render = true;
    }

    pub fn cancel_formula_edit(&mut self) {
        self.ui_state.input_mode = InputMode::Normal;
        self.needs_render = true;
    }

    /// Copy an action link (the pane's first one by default) to the clipboard
    pub fn copy_action_link(&mut self, url: Option<String>) {
        let url = match url.or_else(|| self.pane().content.primary_link().map(|s| s.to_string()))
        {
            Some(url) => url,
            None => return,
        };

        match self.clipboard.copy(&url) {
            Ok(()) => {
                tracing::info!("Copied action link: {}", url);
                self.ui_state.set_status(format!("Copied {}", url));
            }
            Err(e) => {
                tracing::warn!("Failed to copy action link: {}", e);
                self.ui_state.set_status(format!("Clipboard unavailable: {}", e));
            }
        }
        self.needs_render = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    fn app(variant: &str) -> AppCore {
        let config = Config::load_variant(variant).unwrap();
        let (tx, _rx) = mpsc::unbounded_channel();
        AppCore::new(config, tx)
    }

    #[test]
    fn test_number_key_counts_as_tab_click() {
        let mut app = app("roles");
        app.handle_key(KeyCode::Char('5'), KeyModifiers::NONE);
        assert_eq!(app.cycler.current_sheet(), "Broker");
        assert!(app.cycler.user_interacted());
        assert_eq!(app.pane().active_tab(), Some("Broker"));
    }

    #[test]
    fn test_tab_keys_wrap() {
        let mut app = app("roles");
        app.handle_key(KeyCode::BackTab, KeyModifiers::SHIFT);
        assert_eq!(app.cycler.current_sheet(), "Broker");
        app.handle_key(KeyCode::Tab, KeyModifiers::NONE);
        assert_eq!(app.cycler.current_sheet(), "Lender");
    }

    #[test]
    fn test_arrows_select_cells() {
        let mut app = app("services");
        app.handle_key(KeyCode::Down, KeyModifiers::NONE);
        assert_eq!(app.cycler.selected_cell(), Some("A1"));
        app.handle_key(KeyCode::Right, KeyModifiers::NONE);
        app.handle_key(KeyCode::Down, KeyModifiers::NONE);
        assert_eq!(app.cycler.selected_cell(), Some("B2"));
        assert_eq!(app.pane().name_box, "B2");
        // Selecting cells is not a tab click
        assert!(!app.cycler.user_interacted());
    }

    #[test]
    fn test_formula_edit_commits_card() {
        let mut app = app("services");
        app.handle_key(KeyCode::Enter, KeyModifiers::NONE);
        assert_eq!(app.input_mode(), InputMode::Normal);
        assert!(!app.ui_state.status_text.is_empty());

        app.handle_key(KeyCode::Right, KeyModifiers::NONE);
        app.handle_key(KeyCode::Enter, KeyModifiers::NONE);
        assert_eq!(app.input_mode(), InputMode::FormulaEdit);

        app.commit_formula("call back Tuesday".to_string());
        assert_eq!(app.input_mode(), InputMode::Normal);
        assert_eq!(app.cycler.get_all_cards()["A1"].content, "call back Tuesday");
        assert_eq!(app.pane().formula, "call back Tuesday");

        app.handle_key(KeyCode::Delete, KeyModifiers::NONE);
        assert!(app.cycler.get_all_cards().is_empty());
    }

    #[test]
    fn test_tick_during_edit_discards_it() {
        let mut app = app("roles");
        app.handle_key(KeyCode::Down, KeyModifiers::NONE);
        app.handle_key(KeyCode::Enter, KeyModifiers::NONE);
        assert_eq!(app.input_mode(), InputMode::FormulaEdit);

        app.dispatch(CyclerCommand::Tick);
        assert_eq!(app.cycler.current_sheet(), "Contractor");
        assert_eq!(app.input_mode(), InputMode::Normal);
        assert!(app.ui_state.status_text.contains("Contractor"));

        // A late commit of the Lender text must not land anywhere
        app.commit_formula("note typed on Lender".to_string());
        assert!(app.cycler.get_all_cards().is_empty());
        assert_eq!(app.cycler.stored_cards("Lender").map(|c| c.len()), Some(0));
    }

    #[test]
    fn test_tab_click_during_edit_discards_it() {
        let mut app = app("roles");
        app.handle_key(KeyCode::Down, KeyModifiers::NONE);
        app.handle_key(KeyCode::Enter, KeyModifiers::NONE);

        app.dispatch(CyclerCommand::TabClicked("Broker".to_string()));
        assert_eq!(app.input_mode(), InputMode::Normal);
        app.commit_formula("stray".to_string());
        assert!(app.cycler.get_all_cards().is_empty());
    }

    #[test]
    fn test_selecting_during_edit_keeps_it_open() {
        let mut app = app("roles");
        app.handle_key(KeyCode::Down, KeyModifiers::NONE);
        app.handle_key(KeyCode::Enter, KeyModifiers::NONE);
        app.dispatch(CyclerCommand::SelectCell("A1".to_string()));
        assert_eq!(app.input_mode(), InputMode::FormulaEdit);
    }

    #[test]
    fn test_cancel_edit_keeps_cards() {
        let mut app = app("services");
        app.handle_key(KeyCode::Down, KeyModifiers::NONE);
        app.handle_key(KeyCode::Enter, KeyModifiers::NONE);
        app.cancel_formula_edit();
        assert_eq!(app.input_mode(), InputMode::Normal);
        assert!(app.cycler.get_all_cards().is_empty());
    }

    #[test]
    fn test_quit_key() {
        let mut app = app("services");
        assert!(app.running);
        app.handle_key(KeyCode::Char('q'), KeyModifiers::NONE);
        assert!(!app.running);
    }
}
