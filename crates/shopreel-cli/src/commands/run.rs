use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use tracing::info;

use shopreel_core::{catalog::Catalog, AppConfig};
use shopreel_tui::{
    app::{App, Mode},
    event::{AppEvent, EventHandler},
    input::handle_key_event,
    keymap::Keymap,
    widgets::{BannerWidget, HelpWidget, StatusBarWidget, TickerWidget},
};

pub async fn run(config: Arc<AppConfig>) -> Result<()> {
    let keymap = Keymap::from_config(&config.keymap);
    let catalog = Catalog::load_or_sample(config.catalog_path().as_deref())?;
    let mut app = App::new(config, catalog)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture, SetTitle("shopreel"))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, &mut app, &keymap);
    app.teardown();

    // Restore terminal even if the loop failed
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    info!("Preview closed");
    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
    keymap: &Keymap,
) -> Result<()> {
    let event_handler =
        EventHandler::with_animation_fps(app.config.ui.tick_rate_ms, app.config.ui.animation_fps);

    // Checked at the end of each iteration to pick the next poll timeout
    let mut needs_fast_update = false;
    let mut last_tick = Instant::now();

    loop {
        let now = Instant::now();
        app.tick(now.duration_since(last_tick), now);
        last_tick = now;

        terminal.draw(|frame| draw(frame, app, now))?;

        let event = if needs_fast_update {
            event_handler.next_animation()?
        } else {
            event_handler.next()?
        };
        if let Some(event) = event {
            match event {
                AppEvent::Key(key) => {
                    app.clear_status();
                    let action = handle_key_event(key, app, keymap);
                    app.apply_action(action, Instant::now());
                }
                AppEvent::MouseMove(column, row) => app.on_mouse_move(column, row),
                AppEvent::Resize(_, _) | AppEvent::Tick => {}
            }
        }

        needs_fast_update = app.needs_fast_update(Instant::now());

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

fn draw(frame: &mut Frame, app: &mut App, now: Instant) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(6),    // Banner
            Constraint::Length(8), // Ticker
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    // Remember where the carousels are for hover hit-testing
    app.banner_area = rows[0];
    app.ticker_area = rows[1];

    BannerWidget::render(frame, rows[0], app, now);
    TickerWidget::render(frame, rows[1], app);
    StatusBarWidget::render(frame, rows[2], app);

    if app.mode == Mode::Help {
        HelpWidget::render(frame, app);
    }
}
