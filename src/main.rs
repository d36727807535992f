//! Terminal blockfall runner.
//!
//! Owns one game session and the terminal. The loop renders, polls input
//! with a timeout bounded by the time left until the next fall step, and
//! ticks the session whenever the current fall interval has elapsed.

use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};

use blockfall::core::Game;
use blockfall::input::{is_start_key, key_to_command, should_quit};
use blockfall::term::{GameView, TerminalRenderer, Viewport};
use blockfall::types::{GRID_HEIGHT, GRID_WIDTH};

fn main() -> Result<()> {
    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer) -> Result<()> {
    let mut game = Game::new(GRID_WIDTH, GRID_HEIGHT, clock_seed());
    let view = GameView::default();

    let mut last_tick = Instant::now();

    loop {
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let fb = view.render(&game, Viewport::new(w, h));
        term.draw(&fb)?;

        // Input with timeout until the next fall step.
        let interval = Duration::from_millis(game.fall_interval_ms() as u64);
        let timeout = interval
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if is_start_key(key) && !game.is_started() {
                        game.start();
                        last_tick = Instant::now();
                    } else if let Some(command) = key_to_command(key) {
                        game.handle_input(command);
                    }
                }
            }
        }

        if last_tick.elapsed() >= interval {
            last_tick = Instant::now();
            game.tick();
        }
    }
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos())
        .unwrap_or(1)
}
