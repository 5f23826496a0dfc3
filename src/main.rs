use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use snack_analytics::{
    analytics::display::print_report,
    store::MongoStore,
    ui::{self, DashboardState, Tab},
    AnalyticsConfig, SnackAnalytics,
};
use tracing::{error, info};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, EnvFilter};

enum Mode {
    Dashboard,
    Plain,
    Json,
}

impl Mode {
    fn from_args() -> Result<Self> {
        match std::env::args().nth(1).as_deref() {
            None => Ok(Self::Dashboard),
            Some("--plain") => Ok(Self::Plain),
            Some("--json") => Ok(Self::Json),
            Some(other) => Err(anyhow::anyhow!(
                "unknown argument '{other}' (expected --plain or --json)"
            )),
        }
    }
}

fn init_file_logging(log_dir: &str) {
    let file_appender = RollingFileAppender::new(Rotation::NEVER, log_dir, "analytics.log");

    let _ = fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(file_appender)
        .with_ansi(false)
        .with_target(false)
        .with_line_number(true)
        .with_file(true)
        .with_level(true)
        .compact()
        .try_init();
}

/// Restores the terminal however the dashboard exits.
struct TerminalGuard {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalGuard {
    fn new() -> Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        Ok(Self { terminal })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let mode = Mode::from_args()?;
    let config = AnalyticsConfig::from_env()?;
    init_file_logging(&config.log_dir);

    info!("Starting snack analytics");
    info!(
        "Config: database={} leaderboard_size={} order_filter={:?}",
        config.database, config.leaderboard_size, config.order_filter
    );
    let store = MongoStore::connect(&config).await.map_err(|e| {
        error!("Store unavailable: {}", e);
        e
    })?;
    let analytics = SnackAnalytics::new(Arc::new(store), config);
    let report = analytics.compute().await?;

    match mode {
        Mode::Plain => print_report(&report)?,
        Mode::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        Mode::Dashboard => run_dashboard(&analytics, report).await?,
    }

    info!("Snack analytics finished");
    Ok(())
}

async fn run_dashboard(
    analytics: &SnackAnalytics,
    mut report: snack_analytics::analytics::types::AnalyticsReport,
) -> Result<()> {
    let mut guard = TerminalGuard::new()?;
    let mut state = DashboardState::default();
    if !report.sellers.is_empty() {
        state.sellers.select(Some(0));
    }

    loop {
        guard.terminal.draw(|f| ui::render(f, &report, &mut state))?;

        if !event::poll(Duration::from_millis(100))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        if state.detail.is_some() {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('q') | KeyCode::Backspace) {
                state.detail = None;
            }
            continue;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => break,
            KeyCode::Char('1') => state.tab = Tab::Leaderboard,
            KeyCode::Char('2') => state.tab = Tab::Sellers,
            KeyCode::Char('3') => state.tab = Tab::Snacks,
            KeyCode::Tab => state.tab = state.tab.next(),
            KeyCode::Down if state.tab == Tab::Sellers => state.select_next(report.sellers.len()),
            KeyCode::Up if state.tab == Tab::Sellers => state.select_previous(),
            KeyCode::Enter if state.tab == Tab::Sellers => {
                if let Some(seller) = state.sellers.selected().and_then(|i| report.sellers.get(i)) {
                    state.detail = analytics.seller_detail(&seller.seller).await?;
                    if state.detail.is_none() {
                        state.status = Some(format!("Seller {} no longer exists", seller.name));
                    }
                }
            }
            KeyCode::Char('r') => {
                report = analytics.compute().await?;
                state.status = None;
                let len = report.sellers.len();
                if state.sellers.selected().is_some_and(|i| i >= len) {
                    state.sellers.select(len.checked_sub(1));
                }
            }
            _ => {}
        }
    }

    Ok(())
}
