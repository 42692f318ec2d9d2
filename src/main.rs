//! Terminal runner (default binary).
//!
//! Keys feed the engine's command queue; the engine loop runs gravity on its own
//! runtime; this thread redraws whenever a new snapshot is published.
//!
//! Set `TETRIS_LOG_PATH` to log to a file (the terminal is busy drawing) and
//! `TETRIS_LOG` to pick the level.

use std::fs::OpenOptions;
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event};
use tracing::{info, Level};
use tracing_subscriber::prelude::*;

use ar_tetris::core::GameSnapshot;
use ar_tetris::engine::{EngineConfig, EngineRuntime, FanoutSink, JsonLinesSink, TracingSink};
use ar_tetris::input::{handle_key_event, should_quit};
use ar_tetris::term::{BellSink, FrameBuffer, GameView, TerminalRenderer, Viewport};

const FRAME: Duration = Duration::from_millis(16);

fn main() -> Result<()> {
    init_logging()?;

    let config = EngineConfig::from_env();
    let engine = EngineRuntime::start(&config, build_sink(&config)?)?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &engine);

    // Always try to restore terminal state.
    let _ = term.exit();

    let state = engine.shutdown()?;
    info!(score = state.score(), "exiting");
    result
}

fn init_logging() -> Result<()> {
    let Some(path) = std::env::var("TETRIS_LOG_PATH").ok().filter(|p| !p.trim().is_empty()) else {
        return Ok(());
    };

    let level = std::env::var("TETRIS_LOG")
        .ok()
        .and_then(|s| s.trim().parse::<Level>().ok())
        .unwrap_or(Level::INFO);

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("opening log file {path}"))?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .with(tracing_subscriber::filter::LevelFilter::from_level(level))
        .try_init()
        .context("installing tracing subscriber")?;

    info!("Logging initialized at level: {}", level);
    Ok(())
}

fn build_sink(config: &EngineConfig) -> Result<FanoutSink> {
    let mut sink = FanoutSink::new().with(TracingSink);
    if let Some(path) = &config.event_log_path {
        sink.push(JsonLinesSink::open(path)?);
    }
    if config.sound {
        sink.push(BellSink::stdout());
    }
    Ok(sink)
}

fn run(term: &mut TerminalRenderer, engine: &EngineRuntime) -> Result<()> {
    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut shown: Option<(GameSnapshot, Viewport)> = None;

    loop {
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let viewport = Viewport::new(w, h);
        let snap = engine.snapshot();

        if shown != Some((snap, viewport)) {
            view.render_into(&snap, viewport, &mut fb);
            term.draw_swap(&mut fb)?;
            shown = Some((snap, viewport));
        }

        if !event::poll(FRAME)? {
            continue;
        }

        match event::read()? {
            Event::Key(key) => {
                if should_quit(key) {
                    return Ok(());
                }
                if let Some(action) = handle_key_event(key) {
                    engine.send_action(action);
                }
            }
            Event::Resize(_, _) => {
                term.invalidate();
                shown = None;
            }
            _ => {}
        }
    }
}
