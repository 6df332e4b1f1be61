//! pulse-tui - A terminal dashboard with sortable, paginated tables
//!
//! This is the main entry point for the pulse-tui application.
//! It uses the Component Architecture pattern from ratatui.

mod action;
mod app;
mod component;
mod components;
mod config;
mod model;
mod services;
mod tui;

use crate::action::Action;
use crate::app::App;
use crate::component::Component;
use crate::config::Config;
use crate::tui::Tui;
use anyhow::Result;
use crossterm::event::Event;
use simplelog::{LevelFilter, WriteLogger};
use std::fs::{self, File};
use std::str::FromStr;
use std::time::Duration;

/// Environment variable holding the log level
const LOG_LEVEL_ENV: &str = "PULSE_TUI_LOG";

fn main() -> Result<()> {
    init_logging();

    // Setup terminal
    let mut tui = Tui::new()?.with_tick_rate(Duration::from_millis(100));
    tui.enter()?;

    // Create app state
    let mut app = App::new();
    app.init()?;

    // Main event loop
    let result = run_app(&mut tui, &mut app);

    // Cleanup terminal
    tui.exit()?;

    // Handle any errors
    if let Err(err) = result {
        log::error!("fatal: {:#}", err);
        eprintln!("Error: {:?}", err);
        std::process::exit(1);
    }

    log::info!("bye");
    Ok(())
}

/// Log to a file in the config directory; the terminal belongs to the UI
fn init_logging() {
    let Some(dir) = Config::config_dir() else {
        return;
    };
    if fs::create_dir_all(&dir).is_err() {
        return;
    }

    let level = log_level(std::env::var(LOG_LEVEL_ENV).ok().as_deref());
    if let Ok(log_file) = File::create(dir.join("pulse-tui.log")) {
        let _ = WriteLogger::init(level, simplelog::Config::default(), log_file);
    }
    log::info!("pulse-tui {} starting", env!("CARGO_PKG_VERSION"));
}

/// Parse a level name, defaulting to `Info` when unset or unknown
fn log_level(value: Option<&str>) -> LevelFilter {
    value
        .and_then(|v| LevelFilter::from_str(v.trim()).ok())
        .unwrap_or(LevelFilter::Info)
}

/// Run the main application loop
fn run_app(tui: &mut Tui, app: &mut App) -> Result<()> {
    while !app.should_quit {
        // Draw the UI
        tui.draw(|frame| {
            let theme = app.theme;
            if let Err(e) = app.draw(frame, frame.area(), &theme) {
                log::error!("draw error: {:#}", e);
            }
        })?;

        // Poll for events
        if let Some(event) = tui.next_event()? {
            // Convert event to action
            let action = match event {
                Event::Key(key) => app.handle_key_event(key)?,
                Event::Resize(w, h) => Some(Action::Resize(w, h)),
                _ => None,
            };

            // Action might produce a follow-up action
            let mut current_action = action;
            while let Some(a) = current_action {
                current_action = app.update(a)?;
            }
        } else {
            // No event - send a tick for time-based updates
            app.update(Action::Tick)?;
        }
    }

    Ok(())
}
