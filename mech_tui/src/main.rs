//! mech_tui - Interactive TUI for assembling and damage-testing mech loadouts

mod app;
mod ui;

use anyhow::{Context, Result};
use app::App;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use mech_core::{catalog::Catalog, config::load_toml, default_catalog, BuilderConstants};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::{Path, PathBuf};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Directory for the log file
const LOG_DIR_ENV: &str = "MECH_TUI_LOG_DIR";
/// Optional catalog directory replacing the bundled catalog
const CATALOG_DIR_ENV: &str = "MECH_TUI_CATALOG_DIR";
/// Optional builder constants file
const CONFIG_ENV: &str = "MECH_TUI_CONFIG";

fn setup_logging() -> Result<()> {
    let log_dir = std::env::var_os(LOG_DIR_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("logs"));
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("creating log directory {}", log_dir.display()))?;

    let file_appender = tracing_appender::rolling::never(&log_dir, "mech_tui.log");
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    // File only; the terminal belongs to the UI
    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .init();

    // Keep the writer alive for the whole process
    std::mem::forget(guard);

    tracing::info!("Log file: {}/mech_tui.log", log_dir.display());
    Ok(())
}

fn load_catalog() -> Result<Catalog> {
    match std::env::var_os(CATALOG_DIR_ENV) {
        Some(dir) => Catalog::load_from_dir(Path::new(&dir))
            .with_context(|| format!("loading catalog from {}", Path::new(&dir).display())),
        None => default_catalog().context("loading bundled catalog"),
    }
}

fn load_constants() -> Result<BuilderConstants> {
    let Some(path) = std::env::var_os(CONFIG_ENV) else {
        return Ok(BuilderConstants::default());
    };
    let path = PathBuf::from(path);
    let constants: BuilderConstants = load_toml(&path)
        .with_context(|| format!("loading builder constants from {}", path.display()))?;
    constants.validate().context("validating builder constants")?;
    Ok(constants)
}

fn main() -> Result<()> {
    setup_logging()?;

    let catalog = load_catalog()?;
    let constants = load_constants()?;
    let mut app = App::new(catalog, constants).context("creating initial build")?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match (key.code, key.modifiers) {
                    (KeyCode::Char('q'), _) | (KeyCode::Char('c'), KeyModifiers::CONTROL) => break,
                    (KeyCode::Tab, _) => app.next_tab(),
                    (KeyCode::BackTab, _) => app.prev_tab(),
                    (KeyCode::Char('1'), _) => app.set_tab(0),
                    (KeyCode::Char('2'), _) => app.set_tab(1),
                    (KeyCode::Char('3'), _) => app.set_tab(2),
                    (KeyCode::Char('4'), _) => app.set_tab(3),
                    (KeyCode::Char('5'), _) => app.set_tab(4),
                    (KeyCode::Up, _) | (KeyCode::Char('k'), _) => app.on_up(),
                    (KeyCode::Down, _) | (KeyCode::Char('j'), _) => app.on_down(),
                    (KeyCode::Left, _) | (KeyCode::Char('h'), _) => app.on_left(),
                    (KeyCode::Right, _) | (KeyCode::Char('l'), _) => app.on_right(),
                    (KeyCode::Enter, _) => app.on_enter(),
                    (KeyCode::Char('c'), _) => app.cycle_chassis(),
                    (KeyCode::Char('d'), _) => app.dump_snapshot(),
                    (KeyCode::Char('a'), _) => app.apply_damage(),
                    (KeyCode::Char('f'), _) => app.field_repair(),
                    (KeyCode::Char('r'), _) => app.reset_damage(),
                    (KeyCode::Char('u'), _) => app.remove_last_weapon(),
                    (KeyCode::Char('s'), _) => app.cycle_shield(),
                    (KeyCode::Char('m'), _) => app.cycle_armor_type(),
                    (KeyCode::Char('?'), _) => app.toggle_help(),
                    _ => {}
                }
            }
        }
    }
    Ok(())
}
