//! Spreadsheet-styled pane: name box and formula bar on top, a lettered grid
//! with the promotional content box floating over it, sheet tabs and a status
//! line at the bottom.
//!
//! Rendering also produces a `HitMap` so mouse clicks can be resolved to the
//! tab, cell or button that was drawn under them.

use super::colors::PaneColors;
use super::formula_bar::FormulaBar;
use crate::data::{CellAddress, PaneState, SheetContent};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, BorderType, Borders, Clear, Widget as RatatuiWidget},
};

const GUTTER_WIDTH: u16 = 4;
const MIN_CELL_WIDTH: u16 = 6;
const NAME_BOX_WIDTH: u16 = 8;
const MAX_CONTENT_WIDTH: u16 = 72;

/// What a mouse click landed on
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaneHit {
    Tab(String),
    Cell(CellAddress),
    /// A content-pane button; carries its link
    Action(String),
}

#[derive(Debug, Clone, Copy)]
struct GridGeometry {
    x: u16,
    y: u16,
    cell_width: u16,
    cols: u16,
    rows: u16,
}

/// Screen regions recorded during the last render
#[derive(Debug, Clone, Default)]
pub struct HitMap {
    tabs: Vec<(Rect, String)>,
    actions: Vec<(Rect, String)>,
    overlay: Option<Rect>,
    grid: Option<GridGeometry>,
}

fn contains(rect: &Rect, x: u16, y: u16) -> bool {
    x >= rect.x && x < rect.x + rect.width && y >= rect.y && y < rect.y + rect.height
}

impl HitMap {
    pub fn hit(&self, x: u16, y: u16) -> Option<PaneHit> {
        if let Some((_, url)) = self.actions.iter().find(|(r, _)| contains(r, x, y)) {
            return Some(PaneHit::Action(url.clone()));
        }
        // The content box covers the cells underneath it
        if self.overlay.as_ref().is_some_and(|r| contains(r, x, y)) {
            return None;
        }
        if let Some((_, label)) = self.tabs.iter().find(|(r, _)| contains(r, x, y)) {
            return Some(PaneHit::Tab(label.clone()));
        }

        let grid = self.grid?;
        if x < grid.x || y < grid.y {
            return None;
        }
        let col = (x - grid.x) / grid.cell_width;
        let row = y - grid.y;
        if col < grid.cols && row < grid.rows {
            Some(PaneHit::Cell(CellAddress::new(col, row)))
        } else {
            None
        }
    }
}

/// Everything the pane needs besides the pane model itself
pub struct PaneChrome<'a> {
    pub colors: &'a PaneColors,
    pub status: &'a str,
    pub cycle_label: &'a str,
}

pub fn render_sheet_pane(
    pane: &PaneState,
    formula_bar: &mut FormulaBar,
    chrome: &PaneChrome<'_>,
    area: Rect,
    buf: &mut Buffer,
) -> HitMap {
    let mut hits = HitMap::default();

    if area.width < 20 || area.height < 6 {
        buf.set_stringn(
            area.x,
            area.y,
            "Terminal too small",
            area.width as usize,
            Style::default(),
        );
        return hits;
    }

    let colors = chrome.colors;
    let top = Rect::new(area.x, area.y, area.width, 1);
    let grid_area = Rect::new(area.x, area.y + 1, area.width, area.height - 3);
    let tab_row = Rect::new(area.x, area.bottom() - 2, area.width, 1);
    let status_row = Rect::new(area.x, area.bottom() - 1, area.width, 1);

    render_formula_row(pane, formula_bar, colors, top, buf);
    hits.grid = render_grid(pane, colors, grid_area, buf);
    let (overlay, actions) = render_content(&pane.content, colors, grid_area, buf);
    hits.overlay = overlay;
    hits.actions = actions;
    hits.tabs = render_tabs(pane, colors, tab_row, buf);
    render_status(chrome, status_row, buf);

    hits
}

fn render_formula_row(
    pane: &PaneState,
    formula_bar: &mut FormulaBar,
    colors: &PaneColors,
    row: Rect,
    buf: &mut Buffer,
) {
    let name_style = Style::default().add_modifier(Modifier::REVERSED);
    let name = format!("{:<width$}", pane.name_box, width = NAME_BOX_WIDTH as usize);
    buf.set_stringn(row.x, row.y, &name, NAME_BOX_WIDTH as usize, name_style);

    let fx_x = row.x + NAME_BOX_WIDTH + 1;
    buf.set_string(fx_x, row.y, "fx", Style::default().fg(colors.header));

    let field = Rect::new(
        fx_x + 3,
        row.y,
        row.width.saturating_sub(NAME_BOX_WIDTH + 4),
        1,
    );
    if formula_bar.is_active() {
        formula_bar.render(field, buf, colors.selection);
    } else {
        buf.set_stringn(
            field.x,
            field.y,
            &pane.formula,
            field.width as usize,
            Style::default(),
        );
    }
}

fn render_grid(
    pane: &PaneState,
    colors: &PaneColors,
    area: Rect,
    buf: &mut Buffer,
) -> Option<GridGeometry> {
    if pane.columns == 0 || pane.rows == 0 || area.height < 2 || area.width <= GUTTER_WIDTH {
        return None;
    }

    let usable = area.width - GUTTER_WIDTH;
    let cell_width = (usable / pane.columns).max(MIN_CELL_WIDTH);
    let cols = pane.columns.min(usable / cell_width);
    let rows = pane.rows.min(area.height - 1);
    if cols == 0 {
        return None;
    }

    let header_style = Style::default().fg(colors.header);
    let line_style = Style::default().fg(colors.grid_line);
    let first_x = area.x + GUTTER_WIDTH;
    let first_y = area.y + 1;

    for col in 0..cols {
        let label = CellAddress::column_label(col);
        let x = first_x + col * cell_width;
        let pad = (cell_width.saturating_sub(label.len() as u16)) / 2;
        buf.set_string(x + pad, area.y, &label, header_style);
    }

    for row in 0..rows {
        let y = first_y + row;
        buf.set_string(area.x, y, format!("{:>3}", row + 1), header_style);

        for col in 0..cols {
            let cell = CellAddress::new(col, row);
            let x = first_x + col * cell_width;
            let text_width = (cell_width - 1) as usize;

            let selected = pane.selected == Some(cell);
            let mut style = Style::default();
            if let Some(card) = pane.card_at(cell) {
                style = style.fg(colors.card);
                let text: String = card.chars().take(text_width).collect();
                buf.set_string(x, y, text, style);
            }
            if selected {
                let rect = Rect::new(x, y, cell_width - 1, 1);
                buf.set_style(rect, style.bg(colors.selection).add_modifier(Modifier::BOLD));
            }
            buf.set_string(x + cell_width - 1, y, "│", line_style);
        }
    }

    Some(GridGeometry {
        x: first_x,
        y: first_y,
        cell_width,
        cols,
        rows,
    })
}

/// Greedy word wrap; words longer than `width` are split
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    if width == 0 {
        return lines;
    }

    let mut current = String::new();
    for word in text.split_whitespace() {
        let mut word: String = word.to_string();
        while word.chars().count() > width {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            let head: String = word.chars().take(width).collect();
            word = word.chars().skip(width).collect();
            lines.push(head);
        }
        if word.is_empty() {
            continue;
        }

        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };
        if needed > width {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(&word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

enum ContentLine {
    Title(String),
    Text(String),
    Button { label: String, url: String },
    Blank,
}

/// Draw the floating content box; returns its rect and the button regions
fn render_content(
    content: &SheetContent,
    colors: &PaneColors,
    area: Rect,
    buf: &mut Buffer,
) -> (Option<Rect>, Vec<(Rect, String)>) {
    if content.blocks.is_empty() || area.width < 12 || area.height < 5 {
        return (None, Vec::new());
    }

    let width = area.width.saturating_sub(4).min(MAX_CONTENT_WIDTH).max(12);
    let inner_width = width.saturating_sub(4) as usize;

    let mut lines = Vec::new();
    for (i, block) in content.blocks.iter().enumerate() {
        if i > 0 {
            lines.push(ContentLine::Blank);
        }
        // A single block repeats the box heading; skip the duplicate
        if content.blocks.len() > 1 || block.title != content.title {
            lines.push(ContentLine::Title(block.title.clone()));
        }
        for line in wrap_text(&block.description, inner_width) {
            lines.push(ContentLine::Text(line));
        }
        lines.push(ContentLine::Button {
            label: format!("[ {} ]", block.action_label),
            url: block.action_url.clone(),
        });
    }

    let height = (lines.len() as u16 + 2).min(area.height);
    let rect = Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    );

    Clear.render(rect, buf);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(content.title.as_str())
        .title_alignment(ratatui::layout::Alignment::Center)
        .title_style(
            Style::default()
                .fg(colors.title)
                .add_modifier(Modifier::BOLD),
        );
    let inner = block.inner(rect);
    block.render(rect, buf);

    let mut actions = Vec::new();
    for (offset, line) in lines.iter().enumerate() {
        let y = inner.y + offset as u16;
        if y >= inner.bottom() {
            break;
        }
        let centered = |text: &str| -> u16 {
            let len = (text.chars().count() as u16).min(inner.width);
            inner.x + (inner.width - len) / 2
        };
        match line {
            ContentLine::Title(text) => {
                buf.set_stringn(
                    centered(text),
                    y,
                    text,
                    inner.width as usize,
                    Style::default()
                        .fg(colors.title)
                        .add_modifier(Modifier::BOLD),
                );
            }
            ContentLine::Text(text) => {
                buf.set_stringn(
                    centered(text),
                    y,
                    text,
                    inner.width as usize,
                    Style::default().fg(colors.description),
                );
            }
            ContentLine::Button { label, url } => {
                let x = centered(label);
                let (end_x, _) = buf.set_stringn(
                    x,
                    y,
                    label,
                    inner.width as usize,
                    Style::default().fg(colors.button).bg(colors.button_bg),
                );
                actions.push((Rect::new(x, y, end_x - x, 1), url.clone()));
            }
            ContentLine::Blank => {}
        }
    }

    (Some(rect), actions)
}

fn render_tabs(
    pane: &PaneState,
    colors: &PaneColors,
    row: Rect,
    buf: &mut Buffer,
) -> Vec<(Rect, String)> {
    let mut tabs = Vec::new();
    let mut x = row.x;
    let separator_style = Style::default().fg(colors.grid_line);

    for tab in &pane.tabs {
        let text = format!(" {} ", tab.label.trim());
        let width = text.chars().count() as u16;
        if x + width > row.right() {
            break;
        }

        let style = if tab.active {
            Style::default()
                .fg(colors.tab_active)
                .bg(colors.tab_active_bg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(colors.tab_inactive)
        };
        buf.set_string(x, row.y, &text, style);
        tabs.push((Rect::new(x, row.y, width, 1), tab.label.clone()));
        x += width;

        if x < row.right() {
            buf.set_string(x, row.y, "│", separator_style);
            x += 1;
        }
    }

    tabs
}

fn render_status(chrome: &PaneChrome<'_>, row: Rect, buf: &mut Buffer) {
    let hints = "1-9/Tab: sheet  Arrows: cell  Enter: edit  Del: remove  y: copy link  q: quit";
    let left = if chrome.status.is_empty() {
        hints
    } else {
        chrome.status
    };
    let style = Style::default().fg(chrome.colors.header);

    let right_len = chrome.cycle_label.chars().count() as u16;
    let left_width = row.width.saturating_sub(right_len + 1);
    buf.set_stringn(row.x, row.y, left, left_width as usize, style);
    if right_len < row.width {
        buf.set_string(row.right() - right_len, row.y, chrome.cycle_label, style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::UiConfig;
    use crate::core::SheetView;
    use crate::data::ContentBlock;

    fn pane() -> PaneState {
        let mut pane = PaneState::new(
            &["Lender".to_string(), "Contractor".to_string(), "Broker".to_string()],
            4,
            6,
        );
        pane.activate_tab("Contractor");
        pane.place_card("B2", "hello world");
        pane.set_selection("A1");
        pane.set_name_box("A1");
        pane.render_content(&SheetContent {
            sheet: "Contractor".to_string(),
            title: "For Contractors".to_string(),
            blocks: vec![ContentBlock {
                title: "Permit Data Scraping".to_string(),
                description: "Track new permits.".to_string(),
                action_label: "Learn More".to_string(),
                action_url: "https://cal.example/?a1=Contractor".to_string(),
            }],
        });
        pane
    }

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect()
    }

    /// Column of `needle` in a rendered row (rows mix 1- and 3-byte symbols)
    fn find_col(line: &str, needle: &str) -> Option<u16> {
        line.char_indices()
            .position(|(i, _)| line[i..].starts_with(needle))
            .map(|p| p as u16)
    }

    fn render(pane: &PaneState, area: Rect) -> (Buffer, HitMap) {
        let colors = PaneColors::from_config(&UiConfig::default());
        let chrome = PaneChrome {
            colors: &colors,
            status: "",
            cycle_label: "auto-cycle: off",
        };
        let mut buf = Buffer::empty(area);
        let mut bar = FormulaBar::new();
        let hits = render_sheet_pane(pane, &mut bar, &chrome, area, &mut buf);
        (buf, hits)
    }

    #[test]
    fn test_tabs_are_drawn_and_clickable() {
        let pane = pane();
        let area = Rect::new(0, 0, 100, 30);
        let (buf, hits) = render(&pane, area);

        let tab_line = row_text(&buf, 28);
        assert!(tab_line.contains(" Lender "));
        assert!(tab_line.contains(" Contractor "));

        // " Lender " starts at x=0
        assert_eq!(hits.hit(2, 28), Some(PaneHit::Tab("Lender".to_string())));
        let broker_x = find_col(&tab_line, "Broker").unwrap();
        assert_eq!(hits.hit(broker_x, 28), Some(PaneHit::Tab("Broker".to_string())));
    }

    #[test]
    fn test_grid_cells_resolve_outside_content_box() {
        let pane = pane();
        let area = Rect::new(0, 0, 100, 30);
        let (buf, hits) = render(&pane, area);

        // First cell sits right of the gutter, below the header row
        assert_eq!(
            hits.hit(GUTTER_WIDTH, 2),
            Some(PaneHit::Cell(CellAddress::new(0, 0)))
        );
        assert!(row_text(&buf, 0).starts_with("A1"));
        assert!(row_text(&buf, 3).contains("hello"));
    }

    #[test]
    fn test_content_box_and_button() {
        let pane = pane();
        let area = Rect::new(0, 0, 100, 30);
        let (buf, hits) = render(&pane, area);

        let all: Vec<String> = (0..30).map(|y| row_text(&buf, y)).collect();
        let button_y = all
            .iter()
            .position(|line| line.contains("[ Learn More ]"))
            .unwrap() as u16;
        let button_x = find_col(&all[button_y as usize], "[ Learn").unwrap();
        assert_eq!(
            hits.hit(button_x + 2, button_y),
            Some(PaneHit::Action("https://cal.example/?a1=Contractor".to_string()))
        );
        assert!(all.iter().any(|l| l.contains("For Contractors")));
        assert!(all.iter().any(|l| l.contains("Track new permits.")));
    }

    #[test]
    fn test_tiny_area_renders_notice() {
        let pane = pane();
        let (buf, hits) = render(&pane, Rect::new(0, 0, 30, 4));
        assert!(row_text(&buf, 0).starts_with("Terminal too small"));
        assert_eq!(hits.hit(1, 1), None);
    }

    #[test]
    fn test_wrap_text() {
        assert_eq!(
            wrap_text("one two three four", 9),
            vec!["one two", "three", "four"]
        );
        assert_eq!(wrap_text("abcdefghij", 4), vec!["abcd", "efgh", "ij"]);
        assert!(wrap_text("anything", 0).is_empty());
    }
}
