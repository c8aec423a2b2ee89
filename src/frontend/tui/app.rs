use super::colors::PaneColors;
use super::formula_bar::{FormulaBar, FormulaInput};
use super::sheet_pane::{render_sheet_pane, HitMap, PaneChrome, PaneHit};
use crate::config::UiConfig;
use crate::core::AppCore;
use crate::data::InputMode;
use crate::frontend::{Frontend, FrontendEvent};
use anyhow::{Context, Result};
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers,
        MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;

/// Most events read in one frame; the rest wait for the next one
const MAX_EVENTS_PER_FRAME: usize = 64;

/// Read one frame's worth of events: wait up to `timeout` for the first, then
/// take only what is already queued
fn read_batch<P, R>(timeout: Duration, mut poll: P, mut read: R) -> io::Result<Vec<Event>>
where
    P: FnMut(Duration) -> io::Result<bool>,
    R: FnMut() -> io::Result<Event>,
{
    let mut batch = Vec::new();
    let mut wait = timeout;
    for _ in 0..MAX_EVENTS_PER_FRAME {
        if !poll(wait)? {
            break;
        }
        wait = Duration::ZERO;
        if let Ok(ev) = read() {
            batch.push(ev);
        }
    }
    Ok(batch)
}

/// TUI Frontend using ratatui
///
/// This frontend renders the sheet pane using ratatui (terminal UI library)
/// and handles events via crossterm. It keeps the formula bar editor and the
/// click regions of the last frame.
pub struct TuiFrontend {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    poll_timeout: Duration,
    colors: PaneColors,
    formula_bar: FormulaBar,
    hit_map: HitMap,
    restored: bool,
}

impl TuiFrontend {
    /// Create a new TUI frontend
    ///
    /// Initializes terminal in raw mode, enables mouse capture, and enters alternate screen.
    pub fn new(ui: &UiConfig) -> Result<Self> {
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
            .context("Failed to setup terminal")?;

        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor()?;

        Ok(Self {
            terminal,
            poll_timeout: Duration::from_millis(16), // ~60 FPS
            colors: PaneColors::from_config(ui),
            formula_bar: FormulaBar::new(),
            hit_map: HitMap::default(),
            restored: false,
        })
    }

    /// Resolve a click against the last rendered frame
    pub fn hit_test(&self, x: u16, y: u16) -> Option<PaneHit> {
        self.hit_map.hit(x, y)
    }

    /// Open the formula bar with the selected cell's current text
    pub fn begin_formula_edit(&mut self, text: &str) {
        self.formula_bar.begin(text);
    }

    pub fn formula_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> FormulaInput {
        self.formula_bar.handle_key(code, modifiers)
    }

    pub fn formula_paste(&mut self, text: &str) {
        self.formula_bar.paste(text);
    }

    /// Convert crossterm event to FrontendEvent
    fn convert_event(event: Event) -> Option<FrontendEvent> {
        // Mouse motion is reported continuously and never acted on
        if let Event::Mouse(mouse_event) = &event {
            if matches!(
                mouse_event.kind,
                MouseEventKind::Moved | MouseEventKind::Drag(_)
            ) {
                return None;
            }
        }

        match event {
            Event::Key(key_event) => {
                // Only process key press events (ignore repeats and releases)
                if key_event.kind != KeyEventKind::Press {
                    return None;
                }
                Some(FrontendEvent::Key {
                    code: key_event.code,
                    modifiers: key_event.modifiers,
                })
            }
            Event::Mouse(mouse_event) => Some(FrontendEvent::Mouse {
                kind: mouse_event.kind,
                x: mouse_event.column,
                y: mouse_event.row,
                modifiers: mouse_event.modifiers,
            }),
            Event::Resize(w, h) => Some(FrontendEvent::Resize {
                width: w,
                height: h,
            }),
            Event::Paste(text) => Some(FrontendEvent::Paste { text }),
            _ => None,
        }
    }
}

impl Frontend for TuiFrontend {
    fn poll_events(&mut self) -> Result<Vec<FrontendEvent>> {
        let batch = read_batch(self.poll_timeout, event::poll, event::read)?;
        Ok(batch.into_iter().filter_map(Self::convert_event).collect())
    }

    fn render(&mut self, core: &mut dyn std::any::Any) -> Result<()> {
        let core = core
            .downcast_mut::<AppCore>()
            .context("render() called with wrong type - expected AppCore")?;

        let cycle_label = if core.cycler.is_auto_cycling() {
            format!(
                "auto-cycle: every {}s",
                core.config.cycler.period_ms as f64 / 1000.0
            )
        } else {
            "auto-cycle: off".to_string()
        };
        let chrome = PaneChrome {
            colors: &self.colors,
            status: &core.ui_state.status_text,
            cycle_label: &cycle_label,
        };

        // The core may have discarded the edit (sheet changed under it)
        if core.input_mode() != InputMode::FormulaEdit && self.formula_bar.is_active() {
            self.formula_bar.end();
        }

        let pane = core.cycler.view();
        let formula_bar = &mut self.formula_bar;
        let mut hit_map = HitMap::default();
        self.terminal.draw(|f| {
            let area = f.area();
            hit_map = render_sheet_pane(pane, formula_bar, &chrome, area, f.buffer_mut());
        })?;
        self.hit_map = hit_map;
        core.needs_render = false;

        Ok(())
    }

    fn cleanup(&mut self) -> Result<()> {
        if self.restored {
            return Ok(());
        }
        self.restored = true;

        // Restore terminal
        disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        self.terminal.show_cursor()?;
        Ok(())
    }

    fn size(&self) -> (u16, u16) {
        let size = self.terminal.size().unwrap_or_default();
        (size.width, size.height)
    }
}

impl Drop for TuiFrontend {
    fn drop(&mut self) {
        // Ensure terminal is restored even if cleanup() wasn't called
        let _ = self.cleanup();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEvent, MouseButton, MouseEvent};

    fn key(c: char) -> Event {
        Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
    }

    fn mouse(kind: MouseEventKind) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column: 3,
            row: 4,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn test_batch_waits_once_then_drains_queue() {
        let queued = std::cell::RefCell::new(vec![key('a'), key('b')]);
        let mut waits = Vec::new();
        let batch = read_batch(
            Duration::from_millis(16),
            |wait| {
                waits.push(wait);
                Ok(!queued.borrow().is_empty())
            },
            || Ok(queued.borrow_mut().remove(0)),
        )
        .unwrap();

        assert_eq!(batch, vec![key('a'), key('b')]);
        assert_eq!(
            waits,
            vec![Duration::from_millis(16), Duration::ZERO, Duration::ZERO]
        );
    }

    #[test]
    fn test_endless_input_is_capped_per_frame() {
        let batch = read_batch(
            Duration::from_millis(16),
            |_| Ok(true),
            || Ok(mouse(MouseEventKind::Moved)),
        )
        .unwrap();
        assert_eq!(batch.len(), MAX_EVENTS_PER_FRAME);
    }

    #[test]
    fn test_mouse_motion_is_dropped() {
        assert_eq!(TuiFrontend::convert_event(mouse(MouseEventKind::Moved)), None);
        assert_eq!(
            TuiFrontend::convert_event(mouse(MouseEventKind::Drag(MouseButton::Left))),
            None
        );
        assert!(TuiFrontend::convert_event(mouse(MouseEventKind::Down(MouseButton::Left)))
            .is_some());
    }
}
