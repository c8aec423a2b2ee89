//! Hex color parsing and the resolved pane palette.

use crate::config::UiConfig;
use ratatui::style::Color;

/// Parse a hex color string ("#RRGGBB") to a ratatui Color
pub fn parse_color(hex: &str) -> Option<Color> {
    let hex = hex.trim().trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }

    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;

    Some(Color::Rgb(r, g, b))
}

fn resolve(hex: &str, fallback: Color) -> Color {
    parse_color(hex).unwrap_or_else(|| {
        tracing::warn!("Invalid color '{}', using {:?}", hex, fallback);
        fallback
    })
}

/// Colors from `[ui]`, parsed once at startup
#[derive(Debug, Clone, Copy)]
pub struct PaneColors {
    pub tab_active: Color,
    pub tab_active_bg: Color,
    pub tab_inactive: Color,
    pub grid_line: Color,
    pub header: Color,
    pub selection: Color,
    pub card: Color,
    pub title: Color,
    pub description: Color,
    pub button: Color,
    pub button_bg: Color,
}

impl PaneColors {
    pub fn from_config(ui: &UiConfig) -> Self {
        Self {
            tab_active: resolve(&ui.tab_active_color, Color::Black),
            tab_active_bg: resolve(&ui.tab_active_background, Color::White),
            tab_inactive: resolve(&ui.tab_inactive_color, Color::Gray),
            grid_line: resolve(&ui.grid_line_color, Color::DarkGray),
            header: resolve(&ui.header_color, Color::Gray),
            selection: resolve(&ui.selection_color, Color::Blue),
            card: resolve(&ui.card_color, Color::Yellow),
            title: resolve(&ui.title_color, Color::White),
            description: resolve(&ui.description_color, Color::Gray),
            button: resolve(&ui.button_color, Color::White),
            button_bg: resolve(&ui.button_background, Color::Blue),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_color() {
        assert_eq!(parse_color("#0054E3"), Some(Color::Rgb(0x00, 0x54, 0xE3)));
        assert_eq!(parse_color("ffffff"), Some(Color::Rgb(255, 255, 255)));
        assert_eq!(parse_color("#fff"), None);
        assert_eq!(parse_color("#zzzzzz"), None);
    }

    #[test]
    fn test_invalid_config_color_falls_back() {
        let ui = UiConfig {
            card_color: "yellowish".to_string(),
            ..UiConfig::default()
        };
        let colors = PaneColors::from_config(&ui);
        assert_eq!(colors.card, Color::Yellow);
        assert_eq!(colors.button_bg, Color::Rgb(0x00, 0x54, 0xE3));
    }
}
