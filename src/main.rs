//! A scroll-driven services showcase for the terminal.
//!
//! Scrolling moves eight cards from a tiled grid into a collapsed stack,
//! then flips through the stack one service at a time while a companion
//! panel follows along.
//!
//! Run with `--write-config` to dump the effective settings to the config
//! file.

mod app;
mod config;
mod content;
mod core;
mod ui;

use std::fs::File;
use std::io::{self, stderr};
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use ratatui::{backend::CrosstermBackend, widgets::Paragraph, Terminal};
use tracing_subscriber::EnvFilter;

use crate::app::{
    event::{spawn_event_reader, AppEvent},
    handler,
    state::AppState,
    terminal::{self, FrameClock},
};
use crate::core::anim::{Prop, Target};
use crate::core::mode::Mode;
use crate::ui::{
    indicator::ProgressIndicator,
    layout::AppLayout,
    panel::ServicePanel,
    stage::{header_rows, Header, StageWidget},
    theme::Theme,
};

// ───────────────────────────────────────── CLI ───────────────

#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"), about = "Scroll-driven grid/stack services showcase")]
struct Cli {
    /// Config file (defaults to `$XDG_CONFIG_HOME/services-showcase/config.toml`).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the effective configuration to the config file and exit.
    #[arg(long = "write-config")]
    write_config: bool,

    /// Append logs to this file instead of stderr.
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,

    /// Override the wheel sensitivity.
    #[arg(long = "wheel-sensitivity")]
    wheel_sensitivity: Option<f64>,

    /// Override the frame interval in milliseconds (8-100).
    #[arg(long = "frame-ms")]
    frame_ms: Option<u64>,
}

fn init_tracing(log_file: Option<&PathBuf>) -> Result<()> {
    let builder = tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env());
    match log_file {
        Some(path) => {
            let file = File::options()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("opening log file {}", path.display()))?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).init();
        }
        // stderr is also the TUI surface, so this stays silent unless
        // RUST_LOG asks for output.
        None => builder.with_writer(io::stderr).init(),
    }
    Ok(())
}

fn render(frame: &mut ratatui::Frame, state: &AppState) {
    let layout = AppLayout::from_area(frame.area());
    let showcase = &state.showcase;
    let header_rows = header_rows(state.config.cell_height);

    frame.render_widget(Header, layout.header_area(header_rows));

    let frames = state.timeline.frames_in_paint_order(showcase.item_count());
    frame.render_widget(
        StageWidget::new(&frames, state.config.cell_width, state.config.cell_height)
            .active(showcase.active_index()),
        layout.stage_area,
    );

    if showcase.panel_mounted() {
        if let (Some(layout_units), Some(page_height)) = (showcase.layout(), showcase.panel_height()) {
            let offset = state.timeline.value_or(Target::Panel, Prop::PanelOffset, 0.0);
            frame.render_widget(
                ServicePanel::new(offset, page_height),
                layout.panel_area(layout_units.profile, header_rows),
            );
        }
    }

    let progress = state.timeline.value_or(Target::Indicator, Prop::Progress, 0.0);
    frame.render_widget(ProgressIndicator::new(progress), layout.indicator_area);

    let position = match (showcase.mode(), showcase.active_index()) {
        (Mode::Stacked, Some(i)) => format!("{}/{}", i + 1, showcase.item_count()),
        _ => "-".to_string(),
    };
    let motion = if showcase.transition_in_flight() {
        showcase
            .scheduler()
            .direction()
            .map(|d| format!(" ({})", d.label()))
            .unwrap_or_default()
    } else {
        String::new()
    };
    let status_text = format!(
        " {}{} | item {} | scroll {:.2} | {}",
        showcase.mode().label(),
        motion,
        position,
        showcase.scalar(),
        state.config.status_bar_hint(),
    );
    frame.render_widget(
        Paragraph::new(status_text).style(Theme::status_bar_style()),
        layout.status_area,
    );
}

// ───────────────────────────────────────── main ─────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_file.as_ref())?;

    let config_path = cli.config.clone().unwrap_or_else(config::config_path);
    let mut user_config = config::AppConfig::load(&config_path);
    if let Some(sensitivity) = cli.wheel_sensitivity.filter(|v| v.is_finite()) {
        user_config.wheel_sensitivity = sensitivity.abs();
    }
    if let Some(frame_ms) = cli.frame_ms {
        user_config.frame_ms = frame_ms.clamp(8, 100);
    }

    if cli.write_config {
        user_config.save(&config_path)?;
        println!("wrote {}", config_path.display());
        return Ok(());
    }

    let frame_interval = Duration::from_millis(user_config.frame_ms);
    let mut state = AppState::new(user_config);

    // ── terminal setup ────────────────────────────────────────
    let guard = terminal::enter()?;
    let backend = CrosstermBackend::new(stderr());
    let mut terminal = Terminal::new(backend)?;

    let size = terminal.size()?;
    state.resize(ratatui::layout::Rect::new(0, 0, size.width, size.height));
    tracing::debug!(width = size.width, height = size.height, "showcase started");

    // ── event loop ────────────────────────────────────────────
    let mut events = spawn_event_reader(frame_interval);
    let mut ticker = tokio::time::interval(frame_interval);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
    let mut clock = FrameClock::new(frame_interval, Instant::now());
    let mut dirty = true;

    let result: Result<()> = loop {
        if dirty {
            if let Err(err) = terminal.draw(|frame| render(frame, &state)) {
                break Err(err.into());
            }
            dirty = false;
        }

        tokio::select! {
            Some(event) = events.recv() => {
                match event {
                    AppEvent::Key(k) => handler::handle_key(&mut state, k),
                    AppEvent::Mouse(m) => handler::handle_mouse(&mut state, m),
                    AppEvent::Resize(w, h) => {
                        state.resize(ratatui::layout::Rect::new(0, 0, w, h));
                    }
                }
                dirty = true;
            }

            _ = ticker.tick() => {}
        }

        // Either branch may carry the frame, so input bursts never stall
        // running animations.
        if let Some(dt) = clock.take_due(Instant::now()) {
            if state.timeline.is_animating() {
                state.advance(dt);
                dirty = true;
            }
        }

        if state.should_quit {
            break Ok(());
        }
    };

    // ── teardown ──────────────────────────────────────────────
    drop(terminal);
    guard.finish()?;

    result
}
