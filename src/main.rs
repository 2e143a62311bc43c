//! Tetrade terminal runner (default binary).
//!
//! Runs the session at 60 frames per second: keyboard events are collected between frames,
//! each frame updates the session once, dispatches its effects and redraws the screen.

use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};

use tetrade::core::render::draw_session;
use tetrade::core::{AudioDispatcher, Config, Session, SessionSnapshot};
use tetrade::input::{should_quit, KeyboardInput};
use tetrade::term::{FrameBuffer, SilentAudio, TermSurface, TerminalRenderer};
use tetrade::types::FRAME_RATE;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// JSON settings file. Recognised keys: `random_bag`, `sfx_volume`, `music_volume`, `seed`.
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Fixed RNG seed. Without one the seed comes from the frame the title screen was left on.
    #[arg(short, long)]
    seed: Option<u32>,
    /// Write log records to this file; stderr is hidden behind the game screen.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.log_file.as_deref())?;
    let config = load_config(&args)?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, config);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn init_logging(log_file: Option<&Path>) -> Result<()> {
    let default_filter = if log_file.is_some() { "info" } else { "error" };
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter));
    if let Some(path) = log_file {
        let file = File::create(path)
            .with_context(|| format!("create log file {}", path.display()))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }
    builder.init();
    Ok(())
}

fn load_config(args: &Args) -> Result<Config> {
    let mut config = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("read config {}", path.display()))?;
            serde_json::from_str::<Config>(&text)
                .with_context(|| format!("parse config {}", path.display()))?
        }
        None => Config::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    log::info!("config: {:?}", config);
    Ok(config)
}

fn run(term: &mut TerminalRenderer, config: Config) -> Result<()> {
    let mut session = Session::new(config);
    let mut keyboard = KeyboardInput::new();
    if term.has_release_events() {
        // the terminal reports releases; held keys stay held until then
        keyboard = keyboard.with_key_release_timeout_ms(u32::MAX);
    }
    let mut audio = SilentAudio::new();
    let mut dispatcher = AudioDispatcher::new();

    let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
    let mut fb = FrameBuffer::new(w, h);
    let mut snap = SessionSnapshot::new();

    let frame_duration = Duration::from_micros(1_000_000 / FRAME_RATE as u64);
    let mut next_frame = Instant::now();

    loop {
        // Input with timeout until next frame.
        let timeout = next_frame.saturating_duration_since(Instant::now());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    if key.kind == KeyEventKind::Press && should_quit(key) {
                        log::info!("quit after {} frames", session.frame());
                        return Ok(());
                    }
                    keyboard.handle_key_event(key);
                }
                Event::FocusLost => keyboard.reset(),
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        let now = Instant::now();
        if now < next_frame {
            continue;
        }
        next_frame += frame_duration;
        if now > next_frame + frame_duration * 4 {
            // fell behind (suspended, slow terminal); do not replay the missed frames
            next_frame = now + frame_duration;
        }

        let input = keyboard.frame();
        let effects = session.update(&input);
        dispatcher.dispatch(&effects, &mut audio);

        session.snapshot_into(&mut snap);
        let (w, h) = crossterm::terminal::size().unwrap_or((fb.width(), fb.height()));
        fb.resize(w, h);
        draw_session(&snap, &mut TermSurface::new(&mut fb));
        term.present(&mut fb)?;
    }
}
