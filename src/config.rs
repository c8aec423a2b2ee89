//! Configuration loader plus strongly typed settings structures.
//!
//! A config describes one deployment of the widget: the ordered sheet list
//! with its promotional copy, the cycle period, the scheduling link and the
//! pane colors. Variants ship embedded; the active profile lives in
//! `~/.sheet-cycler/config.toml` and is extracted from the default variant on
//! first run.

use crate::data::{ServiceCatalog, ServiceDescriptor, SubService};
use anyhow::{Context, Result};
use include_dir::{include_dir, Dir};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub mod validator;

// Embed every variant - automatically includes all files
static VARIANTS_DIR: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/defaults/variants");

// Variant extracted into a fresh profile
const DEFAULT_CONFIG: &str = include_str!("../defaults/variants/services.toml");

pub const DEFAULT_VARIANT: &str = "services";

/// Top-level configuration object
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub cycler: CyclerConfig,
    #[serde(default)]
    pub link: LinkConfig,
    #[serde(default)]
    pub grid: GridConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub sheets: Vec<SheetDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CyclerConfig {
    #[serde(default = "default_period_ms")]
    pub period_ms: u64,
    /// Sheet shown at startup (first sheet when unset)
    #[serde(default)]
    pub default_sheet: Option<String>,
    /// Start the auto-cycle timer on launch
    #[serde(default = "default_true")]
    pub autostart: bool,
}

impl Default for CyclerConfig {
    fn default() -> Self {
        Self {
            period_ms: default_period_ms(),
            default_sheet: None,
            autostart: true,
        }
    }
}

impl CyclerConfig {
    pub fn period(&self) -> Duration {
        Duration::from_millis(self.period_ms)
    }
}

/// Scheduling link built behind every "Learn More" button
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Query field tagged with the originating sheet name
    #[serde(default = "default_sheet_field")]
    pub sheet_field: String,
    /// Query field tagged with the sub-service title
    #[serde(default = "default_service_field")]
    pub service_field: String,
    #[serde(default = "default_button_label")]
    pub button_label: String,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            sheet_field: default_sheet_field(),
            service_field: default_service_field(),
            button_label: default_button_label(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridConfig {
    #[serde(default = "default_columns")]
    pub columns: u16,
    #[serde(default = "default_rows")]
    pub rows: u16,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            columns: default_columns(),
            rows: default_rows(),
        }
    }
}

/// Hex colors for the terminal pane
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_black")]
    pub tab_active_color: String,
    #[serde(default = "default_white")]
    pub tab_active_background: String,
    #[serde(default = "default_silver")]
    pub tab_inactive_color: String,
    #[serde(default = "default_gray")]
    pub grid_line_color: String,
    #[serde(default = "default_header_color")]
    pub header_color: String,
    #[serde(default = "default_blue")]
    pub selection_color: String,
    #[serde(default = "default_card_color")]
    pub card_color: String,
    #[serde(default = "default_white")]
    pub title_color: String,
    #[serde(default = "default_silver")]
    pub description_color: String,
    #[serde(default = "default_white")]
    pub button_color: String,
    #[serde(default = "default_blue")]
    pub button_background: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tab_active_color: default_black(),
            tab_active_background: default_white(),
            tab_inactive_color: default_silver(),
            grid_line_color: default_gray(),
            header_color: default_header_color(),
            selection_color: default_blue(),
            card_color: default_card_color(),
            title_color: default_white(),
            description_color: default_silver(),
            button_color: default_white(),
            button_background: default_blue(),
        }
    }
}

/// One configured sheet and its promotional copy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SheetDef {
    pub name: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub services: Vec<ServiceDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceDef {
    pub title: String,
    #[serde(default)]
    pub description: String,
}

fn default_period_ms() -> u64 {
    6000
}

fn default_true() -> bool {
    true
}

fn default_base_url() -> String {
    "https://calendly.com/consultation/discovery-call".to_string()
}

fn default_sheet_field() -> String {
    "a1".to_string()
}

fn default_service_field() -> String {
    "a2".to_string()
}

fn default_button_label() -> String {
    "Learn More".to_string()
}

fn default_columns() -> u16 {
    8
}

fn default_rows() -> u16 {
    16
}

fn default_black() -> String {
    "#000000".to_string()
}

fn default_white() -> String {
    "#FFFFFF".to_string()
}

fn default_silver() -> String {
    "#C0C0C0".to_string()
}

fn default_gray() -> String {
    "#808080".to_string()
}

fn default_header_color() -> String {
    "#A0A0A0".to_string()
}

fn default_blue() -> String {
    "#0054E3".to_string()
}

fn default_card_color() -> String {
    "#FFFF00".to_string()
}

impl Config {
    /// Parse a config from TOML text without validating it
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("Failed to parse config")
    }

    /// Ordered sheet names, in cycle order
    pub fn sheet_names(&self) -> Vec<String> {
        self.sheets.iter().map(|s| s.name.clone()).collect()
    }

    /// Sheet shown at startup
    pub fn default_sheet(&self) -> Option<String> {
        self.cycler
            .default_sheet
            .clone()
            .or_else(|| self.sheets.first().map(|s| s.name.clone()))
    }

    /// Build the descriptor lookup table for the configured sheets
    pub fn catalog(&self) -> ServiceCatalog {
        let entries: HashMap<String, ServiceDescriptor> = self
            .sheets
            .iter()
            .map(|sheet| {
                let descriptor = ServiceDescriptor {
                    title: if sheet.title.is_empty() {
                        sheet.name.clone()
                    } else {
                        sheet.title.clone()
                    },
                    description: sheet.description.clone(),
                    services: sheet
                        .services
                        .iter()
                        .map(|s| SubService {
                            title: s.title.clone(),
                            description: s.description.clone(),
                        })
                        .collect(),
                };
                (sheet.name.clone(), descriptor)
            })
            .collect();
        ServiceCatalog::new(entries)
    }

    /// Load the profile config (~/.sheet-cycler/config.toml), extracting the
    /// default variant first if it does not exist yet
    pub fn load() -> Result<Self> {
        Self::extract_defaults()?;
        let path = Self::config_path()?;
        Self::load_from_path(&path)
    }

    /// Load and validate a config file
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let contents =
            fs::read_to_string(path).context(format!("Failed to read config file: {:?}", path))?;
        let config: Config = toml::from_str(&contents)
            .context(format!("Failed to parse config file: {:?}", path))?;
        config.checked()
    }

    /// Load and validate one of the embedded variants
    pub fn load_variant(name: &str) -> Result<Self> {
        let file_name = format!("{}.toml", name);
        let file = VARIANTS_DIR.get_file(&file_name).with_context(|| {
            format!(
                "Unknown variant '{}' (available: {})",
                name,
                Self::list_variants().join(", ")
            )
        })?;
        let contents = file
            .contents_utf8()
            .context(format!("Variant '{}' is not valid UTF-8", name))?;
        let config: Config =
            toml::from_str(contents).context(format!("Failed to parse variant '{}'", name))?;
        config.checked()
    }

    /// Names of the embedded variants, sorted
    pub fn list_variants() -> Vec<String> {
        let mut names: Vec<String> = VARIANTS_DIR
            .files()
            .filter_map(|f| {
                let path = f.path();
                if path.extension().and_then(|e| e.to_str()) == Some("toml") {
                    path.file_stem()
                        .and_then(|s| s.to_str())
                        .map(|s| s.to_string())
                } else {
                    None
                }
            })
            .collect();
        names.sort();
        names
    }

    /// Run validation: errors abort, warnings are logged
    fn checked(self) -> Result<Self> {
        let validation = validator::validate_config(&self);
        for warning in validation.warnings() {
            tracing::warn!("Config warning: {}", warning.message());
        }
        if validation.has_errors() {
            let messages: Vec<String> = validation.errors().iter().map(|e| e.message()).collect();
            anyhow::bail!("Invalid config:\n  {}", messages.join("\n  "));
        }
        Ok(self)
    }

    /// Write the default config into the profile directory if missing
    pub fn extract_defaults() -> Result<()> {
        let path = Self::config_path()?;
        if path.exists() {
            return Ok(());
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .context(format!("Failed to create config directory: {:?}", parent))?;
        }
        fs::write(&path, DEFAULT_CONFIG)
            .context(format!("Failed to write default config: {:?}", path))?;
        tracing::info!("Extracted default config to {:?}", path);
        Ok(())
    }

    /// Get the base directory (~/.sheet-cycler/)
    /// Can be overridden with SHEET_CYCLER_DIR environment variable
    pub fn config_dir() -> Result<PathBuf> {
        if let Ok(custom_dir) = std::env::var("SHEET_CYCLER_DIR") {
            return Ok(PathBuf::from(custom_dir));
        }

        let home = dirs::home_dir().context("Could not find home directory")?;
        Ok(home.join(".sheet-cycler"))
    }

    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }
}
