//! Sheet Cycler - spreadsheet-styled terminal widget
//!
//! Shows a row of sheet tabs, each carrying promotional copy and a scheduling
//! link, and cycles through them until the user picks one.

mod clipboard;
mod config;
mod core;
mod data;
mod frontend;

use anyhow::{bail, Context, Result};
use clap::{Parser as ClapParser, Subcommand};
use frontend::Frontend;
use std::path::PathBuf;

#[derive(ClapParser)]
#[command(name = "sheet-cycler")]
#[command(about = "Spreadsheet-styled sheet cycler", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, value_name = "FILE", conflicts_with = "variant")]
    config: Option<PathBuf>,

    /// Use one of the embedded variants instead of the profile config
    #[arg(short, long, value_name = "NAME")]
    variant: Option<String>,

    /// Custom data directory (default: ~/.sheet-cycler)
    /// Can also be set via SHEET_CYCLER_DIR environment variable
    #[arg(long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Override the auto-cycle period
    #[arg(long, value_name = "MS")]
    period_ms: Option<u64>,

    /// Do not start auto-cycling
    #[arg(long)]
    no_autostart: bool,

    /// Log file (the terminal belongs to the UI)
    #[arg(long, value_name = "FILE", default_value = "sheet-cycler.log")]
    log_file: PathBuf,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a config file (default: the profile config) and exit
    ValidateConfig {
        /// Config file to check
        #[arg(value_name = "FILE")]
        path: Option<PathBuf>,
    },
    /// List the embedded config variants
    ListVariants,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // TUI apps can't log to stdout, so we write to a file
    // (use RUST_LOG env var to control level, e.g. RUST_LOG=info)
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&cli.log_file)
        .context(format!("Failed to open log file: {:?}", cli.log_file))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
        )
        .with_writer(std::sync::Mutex::new(log_file))
        .with_ansi(false) // No color codes in log file
        .init();

    // Set custom data directory if specified (via CLI or environment variable)
    if let Some(data_dir) = &cli.data_dir {
        std::env::set_var("SHEET_CYCLER_DIR", data_dir);
        tracing::info!("Using custom data directory: {:?}", data_dir);
    } else if let Ok(env_dir) = std::env::var("SHEET_CYCLER_DIR") {
        tracing::info!("Using data directory from SHEET_CYCLER_DIR: {}", env_dir);
    }

    if let Some(command) = cli.command {
        match command {
            Commands::ValidateConfig { path } => {
                let path = match path {
                    Some(path) => path,
                    None => config::Config::config_path()?,
                };
                let ok = validate_config_file(&path)?;
                if !ok {
                    std::process::exit(1);
                }
            }
            Commands::ListVariants => {
                for name in config::Config::list_variants() {
                    let marker = if name == config::DEFAULT_VARIANT {
                        " (default)"
                    } else {
                        ""
                    };
                    println!("{}{}", name, marker);
                }
            }
        }
        return Ok(());
    }

    let mut config = if let Some(path) = &cli.config {
        config::Config::load_from_path(path)?
    } else if let Some(variant) = &cli.variant {
        config::Config::load_variant(variant)?
    } else {
        config::Config::load()?
    };

    if let Some(period_ms) = cli.period_ms {
        if period_ms == 0 {
            bail!("--period-ms must be greater than 0");
        }
        config.cycler.period_ms = period_ms;
    }
    if cli.no_autostart {
        config.cycler.autostart = false;
    }

    run_tui(config)
}

/// Print validation results for a config file; returns false on errors
fn validate_config_file(path: &std::path::Path) -> Result<bool> {
    println!("Validating config file: {:?}", path);
    let contents =
        std::fs::read_to_string(path).context(format!("Failed to read config file: {:?}", path))?;

    let config = match config::Config::from_toml_str(&contents) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("✗ {:#}", e);
            return Ok(false);
        }
    };
    println!("✓ Config parsed");
    println!("  {} sheets defined", config.sheets.len());

    let validation = config::validator::validate_config(&config);
    for error in validation.errors() {
        eprintln!("✗ Error: {}", error.message());
    }
    for warning in validation.warnings() {
        println!("⚠ Warning: {}", warning.message());
    }

    if validation.issues.is_empty() {
        println!("✓ Config is valid with no issues");
    }
    Ok(validation.is_valid())
}

/// Run TUI frontend
fn run_tui(config: config::Config) -> Result<()> {
    // The auto-cycle timer runs as a tokio task
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async_run_tui(config))
}

/// Async TUI main loop
async fn async_run_tui(config: config::Config) -> Result<()> {
    use crate::core::{AppCore, CyclerCommand};
    use frontend::TuiFrontend;
    use tokio::sync::mpsc;

    // Timer ticks arrive on this channel
    let (cycle_tx, mut cycle_rx) = mpsc::unbounded_channel::<CyclerCommand>();

    let mut app_core = AppCore::new(config, cycle_tx);
    let mut frontend = TuiFrontend::new(&app_core.config.ui)?;
    let (width, height) = frontend.size();
    tracing::info!("Terminal size: {}x{}", width, height);

    while app_core.running {
        // Poll for frontend events (keyboard, mouse, resize)
        let events = frontend.poll_events()?;
        for event in events {
            handle_frontend_event(&mut app_core, &mut frontend, event);
        }

        // Drain timer ticks
        while let Ok(command) = cycle_rx.try_recv() {
            app_core.dispatch(command);
        }

        if app_core.needs_render {
            frontend.render(&mut app_core)?;
        }
    }

    frontend.cleanup()?;
    tracing::info!("Exiting");
    Ok(())
}

fn handle_frontend_event(
    app_core: &mut crate::core::AppCore,
    frontend: &mut frontend::TuiFrontend,
    event: frontend::FrontendEvent,
) {
    use crate::core::CyclerCommand;
    use crate::data::InputMode;
    use frontend::tui::{FormulaInput, PaneHit};
    use frontend::FrontendEvent;

    if let Some((x, y)) = event.left_click() {
        match frontend.hit_test(x, y) {
            Some(PaneHit::Tab(label)) => {
                app_core.dispatch(CyclerCommand::TabClicked(label));
            }
            Some(PaneHit::Cell(cell)) => {
                if app_core.input_mode() == InputMode::FormulaEdit {
                    app_core.cancel_formula_edit();
                }
                app_core.dispatch(CyclerCommand::SelectCell(cell.to_string()));
            }
            Some(PaneHit::Action(url)) => {
                app_core.copy_action_link(Some(url));
            }
            None => {}
        }
        return;
    }

    match event {
        FrontendEvent::Key { code, modifiers } => {
            if app_core.input_mode() == InputMode::FormulaEdit {
                match frontend.formula_key(code, modifiers) {
                    FormulaInput::Continue => app_core.needs_render = true,
                    FormulaInput::Commit(text) => app_core.commit_formula(text),
                    FormulaInput::Cancel => app_core.cancel_formula_edit(),
                }
                return;
            }

            app_core.ui_state.status_text.clear();
            app_core.handle_key(code, modifiers);
            app_core.needs_render = true;

            if app_core.input_mode() == InputMode::FormulaEdit {
                let text = app_core.pane().formula.clone();
                frontend.begin_formula_edit(&text);
            }
        }
        FrontendEvent::Paste { text } => {
            if app_core.input_mode() == InputMode::FormulaEdit {
                frontend.formula_paste(&text);
                app_core.needs_render = true;
            }
        }
        FrontendEvent::Resize { width, height } => {
            tracing::debug!("Terminal resized to {}x{}", width, height);
            app_core.needs_render = true;
        }
        FrontendEvent::Mouse { .. } => {}
    }
}
