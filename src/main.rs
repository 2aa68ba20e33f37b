//! A terminal playground for scroll- and gesture-driven motion effects.
//!
//! Run the binary to open the demo stages; `Tab` cycles through them.
//! Run with `--write-config` to dump the effective configuration.

mod app;
mod config;
mod core;
mod error;
mod ui;

use std::fs::File;
use std::io::{self, stderr, Stderr};
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};
use tokio::time::MissedTickBehavior;

use crate::app::{
    demo::DemoKind,
    event::{self, spawn_event_reader, AppEvent, EventReceiver},
    handler,
    state::AppState,
};
use crate::ui::layout::AppLayout;

/// How often the input task checks whether the app has gone away.
const INPUT_POLL: Duration = Duration::from_millis(50);

// ───────────────────────────────────────── CLI ───────────────

#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"), about = "Scroll and gesture motion playground")]
struct Cli {
    /// Demo to open first.
    #[arg(long, value_enum, default_value_t = DemoKind::Countdown)]
    demo: DemoKind,

    /// Countdown length in seconds.
    #[arg(long, default_value_t = 3600)]
    countdown: u64,

    /// Frames per second (clamped to 5-120).
    #[arg(long, default_value_t = 30)]
    fps: u32,

    /// Write tracing output to this file instead of stderr.
    #[arg(long)]
    log: Option<PathBuf>,

    /// Write the effective configuration to disk and exit.
    #[arg(long = "write-config")]
    write_config: bool,
}

fn init_tracing(log: Option<&PathBuf>) -> Result<()> {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env());
    match log {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("cannot create log file {}", path.display()))?;
            builder.with_writer(Mutex::new(file)).with_ansi(false).init();
        }
        // Only visible when RUST_LOG is set; never pollutes stdout.
        None => builder.with_writer(io::stderr).init(),
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log.as_ref())?;

    let user_config = config::AppConfig::load();

    if cli.write_config {
        let path = user_config.save()?;
        println!("{}", path.display());
        return Ok(());
    }

    let fps = cli.fps.clamp(5, 120);
    tracing::info!(demo = cli.demo.label(), fps, "starting");

    // ── terminal setup ────────────────────────────────────────
    enable_raw_mode()?;
    let mut stderr_handle = stderr();
    execute!(stderr_handle, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stderr());
    let mut terminal = Terminal::new(backend)?;

    // ── async channels ────────────────────────────────────────
    let epoch = Instant::now();
    let (tx, events) = event::channel();
    spawn_event_reader(tx.clone(), INPUT_POLL);
    let mut state = AppState::new(cli.demo, user_config, cli.countdown, tx, Duration::ZERO);

    let result = run(&mut terminal, &mut state, events, epoch, fps).await;

    // ── teardown (always, even after a loop error) ───────────
    drop(state);
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

async fn run(
    terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    state: &mut AppState,
    mut events: EventReceiver,
    epoch: Instant,
    fps: u32,
) -> Result<()> {
    let mut frames = tokio::time::interval(Duration::from_secs_f64(1.0 / f64::from(fps)));
    frames.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            biased;

            Some(event) = events.recv() => {
                let now = epoch.elapsed();
                match event {
                    AppEvent::Key(k) => handler::handle_key(state, k, now),
                    AppEvent::Mouse(m) => handler::handle_mouse(state, m, now),
                    AppEvent::Resize(w, h) => state.terminal_area = Rect::new(0, 0, w, h),
                    AppEvent::CountdownTick => state.demo.on_countdown_tick(now),
                }
            }

            _ = frames.tick() => {
                // Advance every engine, then draw what they settled on.
                let now = epoch.elapsed();
                let size = terminal.size()?;
                state.terminal_area = Rect::new(0, 0, size.width, size.height);
                let stage = AppLayout::from_area(state.terminal_area).stage_inner();
                state.frame(stage, now);
                terminal.draw(|frame| ui::draw(frame, state, now))?;
            }
        }

        if state.should_quit {
            break;
        }
    }
    Ok(())
}
