//! Config validator
//!
//! Checks that a config describes a usable widget: a non-empty sheet list
//! with unique names, a default sheet that exists, a non-zero cycle period and
//! a grid the pane can address.

use crate::config::Config;
use std::collections::HashSet;

/// Largest grid the pane will draw
pub const MAX_COLUMNS: u16 = 26;
pub const MAX_ROWS: u16 = 999;

#[derive(Debug, Clone)]
pub enum ValidationIssue {
    NoSheets,
    DuplicateSheet { name: String },
    EmptySheetName { index: usize },
    UnknownDefaultSheet { name: String },
    ZeroPeriod,
    GridOutOfRange { columns: u16, rows: u16 },
    MissingTitle { name: String },
    SuspiciousBaseUrl { url: String },
}

impl ValidationIssue {
    pub fn severity(&self) -> ValidationSeverity {
        match self {
            ValidationIssue::MissingTitle { .. } | ValidationIssue::SuspiciousBaseUrl { .. } => {
                ValidationSeverity::Warning
            }
            _ => ValidationSeverity::Error,
        }
    }

    pub fn message(&self) -> String {
        match self {
            ValidationIssue::NoSheets => "No sheets configured".to_string(),
            ValidationIssue::DuplicateSheet { name } => {
                format!("Sheet '{}' is defined more than once", name)
            }
            ValidationIssue::EmptySheetName { index } => {
                format!("Sheet #{} has an empty name", index + 1)
            }
            ValidationIssue::UnknownDefaultSheet { name } => {
                format!("Default sheet '{}' is not in the sheet list", name)
            }
            ValidationIssue::ZeroPeriod => "cycler.period_ms must be greater than 0".to_string(),
            ValidationIssue::GridOutOfRange { columns, rows } => format!(
                "Grid {}x{} is out of range (1-{} columns, 1-{} rows)",
                columns, rows, MAX_COLUMNS, MAX_ROWS
            ),
            ValidationIssue::MissingTitle { name } => {
                format!("Sheet '{}' has no title, the name will be shown", name)
            }
            ValidationIssue::SuspiciousBaseUrl { url } => {
                format!("Link base_url '{}' is not an http(s) URL", url)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationSeverity {
    Error,
    Warning,
}

pub struct ValidationResult {
    pub issues: Vec<ValidationIssue>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        !self.has_errors()
    }

    pub fn has_errors(&self) -> bool {
        self.issues
            .iter()
            .any(|i| matches!(i.severity(), ValidationSeverity::Error))
    }

    pub fn has_warnings(&self) -> bool {
        self.issues
            .iter()
            .any(|i| matches!(i.severity(), ValidationSeverity::Warning))
    }

    pub fn errors(&self) -> Vec<&ValidationIssue> {
        self.issues
            .iter()
            .filter(|i| matches!(i.severity(), ValidationSeverity::Error))
            .collect()
    }

    pub fn warnings(&self) -> Vec<&ValidationIssue> {
        self.issues
            .iter()
            .filter(|i| matches!(i.severity(), ValidationSeverity::Warning))
            .collect()
    }
}

pub fn validate_config(config: &Config) -> ValidationResult {
    let mut issues = Vec::new();

    if config.sheets.is_empty() {
        issues.push(ValidationIssue::NoSheets);
    }

    let mut seen = HashSet::new();
    for (index, sheet) in config.sheets.iter().enumerate() {
        if sheet.name.trim().is_empty() {
            issues.push(ValidationIssue::EmptySheetName { index });
            continue;
        }
        if !seen.insert(sheet.name.as_str()) {
            issues.push(ValidationIssue::DuplicateSheet {
                name: sheet.name.clone(),
            });
        }
        if sheet.title.trim().is_empty() {
            issues.push(ValidationIssue::MissingTitle {
                name: sheet.name.clone(),
            });
        }
    }

    if let Some(default) = &config.cycler.default_sheet {
        if !config.sheets.iter().any(|s| &s.name == default) {
            issues.push(ValidationIssue::UnknownDefaultSheet {
                name: default.clone(),
            });
        }
    }

    if config.cycler.period_ms == 0 {
        issues.push(ValidationIssue::ZeroPeriod);
    }

    let grid = &config.grid;
    if grid.columns == 0 || grid.columns > MAX_COLUMNS || grid.rows == 0 || grid.rows > MAX_ROWS {
        issues.push(ValidationIssue::GridOutOfRange {
            columns: grid.columns,
            rows: grid.rows,
        });
    }

    let url = config.link.base_url.as_str();
    if !(url.starts_with("https://") || url.starts_with("http://")) {
        issues.push(ValidationIssue::SuspiciousBaseUrl {
            url: url.to_string(),
        });
    }

    ValidationResult { issues }
}
