//! Static promotional copy attached to each sheet name.

use std::collections::HashMap;

pub const PLACEHOLDER_DESCRIPTION: &str = "Service description coming soon.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubService {
    pub title: String,
    pub description: String,
}

/// Title, description and optional sub-services for one sheet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceDescriptor {
    pub title: String,
    pub description: String,
    pub services: Vec<SubService>,
}

impl ServiceDescriptor {
    /// Descriptor used for sheet names missing from the catalog
    pub fn placeholder(sheet_name: &str) -> Self {
        Self {
            title: sheet_name.to_string(),
            description: PLACEHOLDER_DESCRIPTION.to_string(),
            services: Vec::new(),
        }
    }

    pub fn has_sub_services(&self) -> bool {
        !self.services.is_empty()
    }
}

/// Immutable lookup table: sheet name -> descriptor
#[derive(Debug, Clone, Default)]
pub struct ServiceCatalog {
    entries: HashMap<String, ServiceDescriptor>,
}

impl ServiceCatalog {
    pub fn new(entries: HashMap<String, ServiceDescriptor>) -> Self {
        Self { entries }
    }

    /// Descriptor for `sheet_name`, or a placeholder titled after the sheet
    pub fn lookup(&self, sheet_name: &str) -> ServiceDescriptor {
        self.entries
            .get(sheet_name)
            .cloned()
            .unwrap_or_else(|| ServiceDescriptor::placeholder(sheet_name))
    }
}
