use std::io;
use std::rc::Rc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::prelude::*;

use season_switcher::app::App;
use season_switcher::catalog::build_catalog;
use season_switcher::config::Config;
use season_switcher::keyboard::KeyHub;
use season_switcher::picker::SeasonSwitcher;
use season_switcher::route::{self, Router};
use season_switcher::seasons::{self, SeasonRecord};
use season_switcher::state::AppState;
use season_switcher::ui;

fn main() -> Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    let mut config = Config::from_env();
    config.apply_args(std::env::args().skip(1));

    let mut state = AppState::new();
    state.matcher = config.matcher;
    let records = load_feed(&config, &mut state);
    let catalog = Rc::new(build_catalog(&records));
    state.push_log(format!(
        "[INFO] {} seasons in {} groups",
        catalog.len(),
        catalog.groups().len()
    ));

    let initial_route = config
        .initial_route
        .clone()
        .or_else(|| {
            if config.remember_route {
                route::load_last_route()
            } else {
                None
            }
        })
        .unwrap_or_else(|| "/".to_string());
    let router = Router::new(&initial_route);
    let hub = KeyHub::new();
    let switcher = SeasonSwitcher::mount(Rc::clone(&catalog), router.season_param(), &hub);
    if let Some(param) = router.season_param() {
        if switcher.selected().is_none() {
            state.push_log(format!("[WARN] No season matches '{param}'"));
        }
    }

    let mut app = App::new(state, router, hub, switcher, config.matcher.matcher());

    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app, config.tick_rate);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if config.remember_route {
        if let Err(err) = route::save_last_route(app.router.current()) {
            eprintln!("warning: {err:#}");
        }
    }
    if let Err(err) = res {
        eprintln!("error: {err:#}");
    }
    Ok(())
}

fn load_feed(config: &Config, state: &mut AppState) -> Vec<SeasonRecord> {
    let Some(path) = &config.seasons_file else {
        return seasons::builtin_records().to_vec();
    };
    match seasons::load_records_from_file(path) {
        Ok(records) => {
            state.push_log(format!("[INFO] Season feed {}", path.display()));
            records
        }
        Err(err) => {
            state.push_log(format!("[WARN] {err:#}; using built-in seasons"));
            seasons::builtin_records().to_vec()
        }
    }
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App, tick_rate: Duration) -> Result<()> {
    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|f| {
            if let Some(switcher) = &app.switcher {
                ui::draw(f, switcher, &app.router, &app.state, app.matcher.as_ref());
            }
        })?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.on_key(key);
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
        }

        if app.state.should_quit {
            return Ok(());
        }
    }
}
