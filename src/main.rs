//! Terminal garden runner (default binary).
//!
//! Generates a garden, then runs a fixed-rate loop: poll input until the next
//! tick, apply it, advance the simulation, and flush only what changed.

mod logger;

use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use log::info;

use my_garden::core::{GardenConfig, GardenState};
use my_garden::input::{handle_key_event, should_quit, InputMode};
use my_garden::term::{FrameBuffer, GardenView, TerminalRenderer, Viewport};

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as u32 ^ d.subsec_nanos())
        .unwrap_or(1)
}

fn main() -> Result<()> {
    let mut config = GardenConfig::from_env()?;
    if std::env::var_os("GARDEN_SEED").is_none() {
        config.seed = clock_seed();
    }
    if let Some(path) = config.log_path.clone() {
        logger::init(&path)?;
    }
    info!(
        "starting {}x{} garden, seed {}, tick {} ms",
        config.width, config.height, config.seed, config.tick_ms
    );

    // Generate before touching the terminal so errors print normally.
    let mut garden = GardenState::from_config(config)?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut garden);

    // Always try to restore terminal state.
    let _ = term.exit();
    info!("stopped after {} ticks", garden.ticks());
    result
}

fn run(term: &mut TerminalRenderer, garden: &mut GardenState) -> Result<()> {
    let view = GardenView::default();
    let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
    let mut fb = FrameBuffer::new(w, h);

    let tick_duration = Duration::from_millis(garden.config().tick_ms as u64);
    let mut last_tick = Instant::now();

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.update_into(garden, Viewport::new(w, h), &mut fb);
        term.draw(&fb)?;

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    let mode = InputMode::from_menu_open(garden.is_menu_open());
                    if should_quit(key, mode) {
                        return Ok(());
                    }
                    if let Some(action) = handle_key_event(key, mode) {
                        garden.apply_action(action);
                    }
                }
                Event::Resize(..) => {
                    term.invalidate();
                    garden.request_full_redraw();
                }
                _ => {}
            }
        }

        // Tick.
        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();
            garden.tick();
        }
    }
}
