//! Rendering adapter consumed by the sheet cycler.
//!
//! The cycler decides what should be visible and calls into a `SheetView`;
//! how cells, tabs and the content pane are actually drawn is up to the
//! implementor. `PaneState` is the implementation the terminal frontend draws.

use crate::data::{PaneState, SheetContent};

pub trait SheetView {
    /// Whether a cell container exists for `address`
    fn has_cell(&self, address: &str) -> bool;

    /// Draw `content` as the card in `address`, replacing any card there
    fn place_card(&mut self, address: &str, content: &str);

    /// Remove the drawn card from `address` (no-op if none)
    fn remove_card(&mut self, address: &str);

    /// Highlight `address` as the selected cell, clearing any prior selection
    fn set_selection(&mut self, address: &str);

    fn set_name_box(&mut self, text: &str);

    fn set_formula(&mut self, text: &str);

    /// Mark the tab whose trimmed label equals `name` active, all others inactive
    fn activate_tab(&mut self, name: &str);

    /// Replace the content pane
    fn render_content(&mut self, content: &SheetContent);
}

impl SheetView for PaneState {
    fn has_cell(&self, address: &str) -> bool {
        self.cell(address).is_some()
    }

    fn place_card(&mut self, address: &str, content: &str) {
        if let Some(cell) = self.cell(address) {
            self.placed_cards.insert(cell, content.to_string());
        }
    }

    fn remove_card(&mut self, address: &str) {
        if let Some(cell) = self.cell(address) {
            self.placed_cards.remove(&cell);
        }
    }

    fn set_selection(&mut self, address: &str) {
        self.selected = self.cell(address);
    }

    fn set_name_box(&mut self, text: &str) {
        self.name_box = text.to_string();
    }

    fn set_formula(&mut self, text: &str) {
        self.formula = text.to_string();
    }

    fn activate_tab(&mut self, name: &str) {
        for tab in &mut self.tabs {
            tab.active = tab.label.trim() == name;
        }
    }

    fn render_content(&mut self, content: &SheetContent) {
        self.content = content.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::CellAddress;

    #[test]
    fn test_pane_ignores_unknown_cells() {
        let mut pane = PaneState::new(&["A".to_string()], 2, 2);
        pane.place_card("Z9", "lost");
        assert!(pane.placed_cards.is_empty());

        pane.place_card("B2", "kept");
        assert_eq!(pane.card_at(CellAddress::new(1, 1)), Some("kept"));

        pane.remove_card("B2");
        assert!(pane.placed_cards.is_empty());
    }

    #[test]
    fn test_activate_tab_matches_trimmed_label() {
        let mut pane = PaneState::new(&[" Lender ".to_string(), "Broker".to_string()], 2, 2);
        pane.activate_tab("Lender");
        assert!(pane.tabs[0].active);
        assert!(!pane.tabs[1].active);

        pane.activate_tab("Broker");
        assert!(!pane.tabs[0].active);
        assert!(pane.tabs[1].active);

        pane.activate_tab("Nobody");
        assert!(pane.tabs.iter().all(|t| !t.active));
    }
}
