//! Cards and the sheets that store them.

use std::collections::BTreeMap;

/// A text annotation anchored to a cell address
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub address: String,
    pub content: String,
}

impl Card {
    pub fn new(address: &str, content: &str) -> Self {
        Self {
            address: address.to_string(),
            content: content.to_string(),
        }
    }
}

/// Address -> Card. Ordered so panes and tests see a stable iteration order.
pub type CardMap = BTreeMap<String, Card>;

/// Card storage of one tab (keyed by sheet name in the cycler)
#[derive(Debug, Clone, Default)]
pub struct Sheet {
    pub cards: CardMap,
}
