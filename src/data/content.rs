//! Rendered form of a sheet's promotional copy.
//!
//! The core builds a `SheetContent` from a `ServiceDescriptor` and hands it to
//! the view; frontends only draw what is in here.

/// One title/description/button group inside the content pane
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentBlock {
    pub title: String,
    pub description: String,
    pub action_label: String,
    pub action_url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SheetContent {
    /// Sheet the content was built for
    pub sheet: String,
    /// Descriptor title (the heading of the pane)
    pub title: String,
    pub blocks: Vec<ContentBlock>,
}

impl SheetContent {
    /// Link of the first block, if any
    pub fn primary_link(&self) -> Option<&str> {
        self.blocks.first().map(|b| b.action_url.as_str())
    }
}
