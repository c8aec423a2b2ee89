//! Sheet cycler: active-sheet selection, auto-advance and card bookkeeping.
//!
//! The cycler owns all widget state. It never draws anything itself; every
//! visible change goes through the `SheetView` it was built with. Missing
//! cells on the view turn operations into silent no-ops.

use super::auto_cycle::AutoCycle;
use super::link::build_action_link;
use super::messages::CyclerCommand;
use super::view::SheetView;
use crate::config::{Config, LinkConfig};
use crate::data::{
    Card, CardMap, ContentBlock, ServiceCatalog, ServiceDescriptor, Sheet, SheetContent,
};
use std::collections::HashMap;
use tokio::sync::mpsc::UnboundedSender;

pub struct SheetCycler<V: SheetView> {
    view: V,
    catalog: ServiceCatalog,
    link: LinkConfig,
    /// Stored cards of every configured sheet (the current sheet's are stale
    /// until the next switch persists them)
    sheets: HashMap<String, Sheet>,
    /// Fixed cycle order
    sheet_names: Vec<String>,
    /// Cards of the current sheet
    cards: CardMap,
    selected_cell: Option<String>,
    current_sheet: String,
    current_index: usize,
    user_interacted: bool,
    auto_cycle: AutoCycle,
}

impl<V: SheetView> SheetCycler<V> {
    /// Build the cycler and show the default sheet. The timer is not started.
    pub fn new(config: &Config, mut view: V, tick_tx: UnboundedSender<CyclerCommand>) -> Self {
        let sheet_names = config.sheet_names();
        let sheets = sheet_names
            .iter()
            .map(|name| (name.clone(), Sheet::default()))
            .collect();

        let current_sheet = config.default_sheet().unwrap_or_default();
        let current_index = sheet_names
            .iter()
            .position(|n| *n == current_sheet)
            .unwrap_or(0);

        view.activate_tab(&current_sheet);

        let mut cycler = Self {
            view,
            catalog: config.catalog(),
            link: config.link.clone(),
            sheets,
            sheet_names,
            cards: CardMap::new(),
            selected_cell: None,
            current_sheet,
            current_index,
            user_interacted: false,
            auto_cycle: AutoCycle::new(config.cycler.period(), tick_tx),
        };
        cycler.render_sheet_content();
        cycler
    }

    /// Build the cycler, show the default sheet and start auto-cycling
    /// (unless the config disables autostart)
    pub fn launch(config: &Config, view: V, tick_tx: UnboundedSender<CyclerCommand>) -> Self {
        let mut cycler = Self::new(config, view, tick_tx);
        if config.cycler.autostart {
            cycler.start_auto_cycle();
        }
        tracing::info!(
            "Sheet cycler ready: {} sheets, showing '{}'",
            cycler.sheet_names.len(),
            cycler.current_sheet
        );
        cycler
    }

    pub fn dispatch(&mut self, command: CyclerCommand) {
        match command {
            CyclerCommand::TabClicked(label) => self.on_tab_clicked(&label),
            CyclerCommand::Tick => self.on_tick(),
            CyclerCommand::SelectCell(address) => self.select_cell(&address),
            CyclerCommand::EditCard(address) => self.edit_card(&address),
            CyclerCommand::AddCard { address, content } => self.add_card(&address, &content),
            CyclerCommand::RemoveCard(address) => self.remove_card(&address),
            CyclerCommand::ClearAll => self.clear_all_cards(),
        }
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn current_sheet(&self) -> &str {
        &self.current_sheet
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn sheet_names(&self) -> &[String] {
        &self.sheet_names
    }

    pub fn user_interacted(&self) -> bool {
        self.user_interacted
    }

    pub fn is_auto_cycling(&self) -> bool {
        self.auto_cycle.is_running()
    }

    pub fn selected_cell(&self) -> Option<&str> {
        self.selected_cell.as_deref()
    }

    /// Select a cell and surface its card (or nothing) in the formula bar
    pub fn select_cell(&mut self, address: &str) {
        if !self.view.has_cell(address) {
            tracing::debug!("select_cell: no cell '{}'", address);
            return;
        }

        self.view.set_selection(address);
        self.selected_cell = Some(address.to_string());
        self.view.set_name_box(address);

        let existing = self
            .cards
            .get(address)
            .map(|c| c.content.as_str())
            .unwrap_or("");
        self.view.set_formula(existing);
    }

    /// Load an existing card into the formula bar for editing
    pub fn edit_card(&mut self, address: &str) {
        if let Some(card) = self.cards.get(address) {
            self.view.set_formula(&card.content);
        }
    }

    pub fn add_card(&mut self, address: &str, content: &str) {
        if content.trim().is_empty() {
            return;
        }
        if !self.view.has_cell(address) {
            tracing::debug!("add_card: no cell '{}'", address);
            return;
        }

        if self.cards.contains_key(address) {
            self.view.remove_card(address);
        }

        self.view.place_card(address, content);
        self.cards
            .insert(address.to_string(), Card::new(address, content));
    }

    pub fn remove_card(&mut self, address: &str) {
        if !self.view.has_cell(address) || !self.cards.contains_key(address) {
            return;
        }
        self.view.remove_card(address);
        self.cards.remove(address);
    }

    /// Copy of the current sheet's cards
    pub fn get_all_cards(&self) -> CardMap {
        self.cards.clone()
    }

    pub fn clear_all_cards(&mut self) {
        let addresses: Vec<String> = self.cards.keys().cloned().collect();
        for address in addresses {
            self.remove_card(&address);
        }
    }

    /// Cards stored for `sheet` as of the last switch away from it
    pub fn stored_cards(&self, sheet: &str) -> Option<&CardMap> {
        self.sheets.get(sheet).map(|s| &s.cards)
    }

    pub fn switch_to_sheet(&mut self, sheet_name: &str) {
        tracing::debug!("Switching to sheet: {}", sheet_name);

        self.view.activate_tab(sheet_name);

        if let Some(sheet) = self.sheets.get_mut(&self.current_sheet) {
            sheet.cards = self.cards.clone();
        }

        self.clear_all_cards();

        self.current_sheet = sheet_name.to_string();
        self.cards = match self.sheets.get(sheet_name) {
            Some(sheet) => sheet.cards.clone(),
            None => {
                tracing::debug!("Sheet '{}' is not configured, showing placeholder", sheet_name);
                CardMap::new()
            }
        };
        for card in self.cards.values() {
            self.view.place_card(&card.address, &card.content);
        }

        // The formula bar must show the new sheet's card under the selection
        if let Some(address) = self.selected_cell.clone() {
            self.select_cell(&address);
        }

        self.render_sheet_content();
    }

    pub fn cycle_to_next_sheet(&mut self) {
        if self.sheet_names.is_empty() {
            return;
        }
        self.current_index = (self.current_index + 1) % self.sheet_names.len();
        let next = self.sheet_names[self.current_index].clone();
        tracing::info!("Auto-cycling to: {}", next);
        self.switch_to_sheet(&next);
    }

    pub fn start_auto_cycle(&mut self) {
        self.auto_cycle.start();
    }

    pub fn stop_auto_cycle(&mut self) {
        self.auto_cycle.stop();
    }

    fn on_tick(&mut self) {
        if self.user_interacted {
            tracing::trace!("Ignoring auto-cycle tick after user interaction");
            return;
        }
        self.cycle_to_next_sheet();
    }

    /// A user click ends auto-cycling for good.
    ///
    /// The cycle index is left where it was; only the name changes.
    pub fn on_tab_clicked(&mut self, label: &str) {
        let sheet_name = label.trim();
        tracing::info!("Tab clicked: {}", sheet_name);
        self.stop_auto_cycle();
        self.user_interacted = true;
        self.switch_to_sheet(sheet_name);
    }

    pub fn render_sheet_content(&mut self) {
        let descriptor = self.catalog.lookup(&self.current_sheet);
        let content = build_sheet_content(&self.current_sheet, &descriptor, &self.link);
        self.view.render_content(&content);
    }
}

/// One block per sub-service when the descriptor has them, otherwise a single
/// block carrying the descriptor's own copy
pub fn build_sheet_content(
    sheet: &str,
    descriptor: &ServiceDescriptor,
    link: &LinkConfig,
) -> SheetContent {
    let blocks = if descriptor.has_sub_services() {
        descriptor
            .services
            .iter()
            .map(|service| ContentBlock {
                title: service.title.clone(),
                description: service.description.clone(),
                action_label: link.button_label.clone(),
                action_url: build_action_link(link, sheet, Some(&service.title)),
            })
            .collect()
    } else {
        vec![ContentBlock {
            title: descriptor.title.clone(),
            description: descriptor.description.clone(),
            action_label: link.button_label.clone(),
            action_url: build_action_link(link, sheet, None),
        }]
    };

    SheetContent {
        sheet: sheet.to_string(),
        title: descriptor.title.clone(),
        blocks,
    }
}
