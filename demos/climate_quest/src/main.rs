//! Climate Quest
//!
//! Terminal front end for the climate engines:
//! - Timed quiz with lives, streaks and achievements
//! - Waste-sorting race against the clock
//! - Five-step carbon footprint calculator
//! - Assistant chat and AI-generated quizzes (needs an API key)
//! - Share links with QR codes for the site pages
//!
//! Settings come from `climate_quest.ron`; logs go to a file.

mod app;
mod config;
mod host;
mod ui;

use app::App;
use config::DemoConfig;
use crossterm::{
    cursor::{Hide, Show},
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::fs::File;
use std::io::stdout;
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

const POLL_INTERVAL: Duration = Duration::from_millis(50);

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = DemoConfig::discover()?;
    init_logging(&config)?;

    let seed = config
        .seed
        .unwrap_or_else(|| chrono::Utc::now().timestamp_millis() as u64);
    tracing::info!(seed, origin = %config.site_origin, "starting climate quest");
    let mut app = App::new(&config, seed)?;

    terminal::enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, Hide)?;

    let result = run(&mut stdout, &mut app);

    execute!(stdout, Show, LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;

    if let Err(e) = &result {
        tracing::error!(error = %e, "climate quest stopped");
    }
    result
}

fn init_logging(config: &DemoConfig) -> Result<(), Box<dyn std::error::Error>> {
    let file = File::create(&config.log_file)?;
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_filter))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn run(stdout: &mut std::io::Stdout, app: &mut App) -> Result<(), Box<dyn std::error::Error>> {
    ui::render(stdout, app)?;

    while !app.should_quit() {
        let mut dirty = false;

        if event::poll(POLL_INTERVAL)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    app.handle_key(key, Instant::now());
                    dirty = true;
                }
                Event::Resize(_, _) => dirty = true,
                _ => {}
            }
        }

        if app.pump(Instant::now()) {
            dirty = true;
        }

        if dirty && !app.should_quit() {
            ui::render(stdout, app)?;
        }
    }

    Ok(())
}
