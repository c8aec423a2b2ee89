//! Presentation state of the sheet pane.
//!
//! Pure data: the core writes it through the `SheetView` adapter and the
//! frontend reads it every frame. Nothing in here knows about terminals.

use super::address::CellAddress;
use super::content::SheetContent;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabState {
    pub label: String,
    pub active: bool,
}

#[derive(Debug, Clone)]
pub struct PaneState {
    pub tabs: Vec<TabState>,
    pub columns: u16,
    pub rows: u16,
    /// Card text currently drawn in each cell
    pub placed_cards: BTreeMap<CellAddress, String>,
    pub selected: Option<CellAddress>,
    pub name_box: String,
    pub formula: String,
    pub content: SheetContent,
}

impl PaneState {
    pub fn new(tab_labels: &[String], columns: u16, rows: u16) -> Self {
        Self {
            tabs: tab_labels
                .iter()
                .map(|label| TabState {
                    label: label.clone(),
                    active: false,
                })
                .collect(),
            columns,
            rows,
            placed_cards: BTreeMap::new(),
            selected: None,
            name_box: String::new(),
            formula: String::new(),
            content: SheetContent::default(),
        }
    }

    /// Resolve an address to a cell of this grid.
    ///
    /// Only the canonical spelling matches ("B3", not "b3" or " B3"), the same
    /// way an element lookup by exact attribute value would.
    pub fn cell(&self, address: &str) -> Option<CellAddress> {
        let parsed: CellAddress = address.parse().ok()?;
        if parsed.to_string() != address {
            return None;
        }
        if parsed.col >= self.columns || parsed.row >= self.rows {
            return None;
        }
        Some(parsed)
    }

    pub fn card_at(&self, cell: CellAddress) -> Option<&str> {
        self.placed_cards.get(&cell).map(|s| s.as_str())
    }

    pub fn active_tab(&self) -> Option<&str> {
        self.tabs
            .iter()
            .find(|t| t.active)
            .map(|t| t.label.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pane() -> PaneState {
        PaneState::new(&["One".to_string(), "Two".to_string()], 4, 5)
    }

    #[test]
    fn test_cell_lookup_is_exact_and_bounded() {
        let pane = pane();
        assert_eq!(pane.cell("A1"), Some(CellAddress::new(0, 0)));
        assert_eq!(pane.cell("D5"), Some(CellAddress::new(3, 4)));
        assert_eq!(pane.cell("E1"), None);
        assert_eq!(pane.cell("A6"), None);
        assert_eq!(pane.cell("a1"), None);
        assert_eq!(pane.cell("nonsense"), None);
    }

    #[test]
    fn test_no_tab_active_initially() {
        let pane = pane();
        assert_eq!(pane.active_tab(), None);
        assert_eq!(pane.tabs[1].label, "Two");
    }
}
