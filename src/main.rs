//! A smooth-scrolling terminal pager.
//!
//! Run `glide FILE` to page a file, or pipe output into it.
//! Wheel and drag scrolling glide with an eased animation; keyboard
//! navigation jumps instantly.  Run with `--init-config` to print a
//! commented default config file.

mod app;
mod config;
mod core;
mod scroll;
mod ui;

use std::io::{self, stderr};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::CrosstermBackend,
    layout::Margin,
    widgets::{Block, Borders, Scrollbar, ScrollbarOrientation, ScrollbarState},
    Terminal,
};
use tokio::sync::mpsc::UnboundedReceiver;

use crate::app::{
    event::{spawn_event_reader, AppEvent},
    feed::{spawn_stdin_feed, FeedUpdate},
    handler,
    state::{ActiveView, AppState},
};
use crate::core::document::Document;
use crate::scroll::gate::{self, GateDecision, SystemProbe};
use crate::ui::{
    help::HelpPopup, layout::AppLayout, pager::PagerView, status::StatusBar, theme::Theme,
};

// ───────────────────────────────────────── CLI ───────────────

#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"), about = "Smooth-scrolling terminal pager")]
struct Cli {
    /// File to page (reads stdin when omitted).
    file: Option<PathBuf>,

    /// Disable the eased scroll animation.
    #[arg(long = "no-smooth")]
    no_smooth: bool,

    /// Disable mouse capture (wheel, drag, scrollbar).
    #[arg(long = "no-mouse")]
    no_mouse: bool,

    /// Easing factor per frame, 0 < ease <= 1 (overrides the config file).
    #[arg(long)]
    ease: Option<f32>,

    /// Print a commented default config file and exit.
    #[arg(long = "init-config")]
    init_config: bool,
}

// ───────────────────────────────────────── feed ──────────────

/// Await the next feed update, pending forever when there is no feed.
async fn next_feed(rx: &mut Option<UnboundedReceiver<FeedUpdate>>) -> Option<FeedUpdate> {
    match rx {
        Some(rx) => rx.recv().await,
        None => std::future::pending().await,
    }
}

fn apply_feed_update(state: &mut AppState, update: FeedUpdate) {
    match update {
        FeedUpdate::Line(line) => state.document.push_line(&line),
        FeedUpdate::Eof => {
            state.streaming = false;
            state.stream_eof = true;
            tracing::debug!("stdin feed reached end of input");
        }
    }
}

// ───────────────────────────────────────── main ─────────────

#[tokio::main]
async fn main() -> Result<()> {
    // Initialise tracing (only in debug builds / when RUST_LOG is set).
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr) // never pollute stdout
        .init();

    let cli = Cli::parse();

    if cli.init_config {
        print!("{}", config::AppConfig::default().serialise());
        return Ok(());
    }

    // ── configuration ─────────────────────────────────────────
    let mut user_config = config::AppConfig::load();
    if let Some(ease) = cli.ease {
        user_config.ease = ease.clamp(0.01, 1.0);
    }
    let mouse_enabled = user_config.mouse && !cli.no_mouse;
    let reduce_motion = user_config.reduce_motion || cli.no_smooth;

    // ── load the document ─────────────────────────────────────
    let mut streaming = false;
    let mut feed_rx: Option<UnboundedReceiver<FeedUpdate>> = None;
    let (document, source_name, modified) = match &cli.file {
        Some(path) => {
            let loaded = core::source::load_file(path, user_config.tab_width)?;
            (loaded.document, path.display().to_string(), loaded.modified)
        }
        None => {
            if io::stdin().is_tty() {
                bail!("no file given and stdin is a terminal (try `glide FILE`, or pipe into it)");
            }
            streaming = true;
            feed_rx = Some(spawn_stdin_feed());
            (Document::new(user_config.tab_width), "stdin".to_string(), None)
        }
    };

    // ── capability gate ───────────────────────────────────────
    let probe = SystemProbe::new(reduce_motion, mouse_enabled);
    let gate = gate::evaluate(&probe);
    if let GateDecision::Disabled(reason) = &gate {
        tracing::debug!("smooth scrolling disabled: {}", reason.describe());
    }

    let mut state = AppState::new(document, source_name, user_config, gate);
    state.modified = modified;
    state.streaming = streaming;
    state.follow = streaming;

    // ── terminal setup ────────────────────────────────────────
    enable_raw_mode()?;
    let mut stderr_handle = stderr();
    execute!(stderr_handle, EnterAlternateScreen)?;
    if mouse_enabled {
        execute!(stderr_handle, EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stderr());
    let mut terminal = Terminal::new(backend)?;

    let mut events = spawn_event_reader(Duration::from_millis(100));

    // ── event loop ────────────────────────────────────────────
    loop {
        // ── draw first ─────────────────────────────────────────
        // Always render before waiting so every state change above is
        // visible immediately.
        terminal.draw(|frame| {
            state.terminal_area = frame.area();
            let layout = AppLayout::from_area(frame.area());

            // Re-wrap when the pane width changed (the border eats 2 columns).
            let wrap_width = layout.pager_area.width.saturating_sub(2);
            let view_height = layout.pager_area.height.saturating_sub(2);
            if state.viewport.resize(wrap_width, view_height) {
                state.wrap.rewrap(&state.document, wrap_width);
            }
            let max = state.max_scroll();
            state.viewport.clamp(max);

            let pager_block = Block::default()
                .title(format!(" {} ", state.source_name))
                .title_style(Theme::title_style())
                .borders(Borders::ALL)
                .border_style(Theme::border_style());

            let pager = PagerView::new(&state.document, &state.wrap).block(pager_block);
            frame.render_stateful_widget(pager, layout.pager_area, &mut state.viewport);

            if max > 0 {
                let mut scrollbar_state =
                    ScrollbarState::new(max).position(state.viewport.top());
                frame.render_stateful_widget(
                    Scrollbar::new(ScrollbarOrientation::VerticalRight),
                    layout.pager_area.inner(Margin::new(0, 1)),
                    &mut scrollbar_state,
                );
            }

            let hint = state.config.status_bar_hint();
            frame.render_widget(
                StatusBar {
                    source_name: &state.source_name,
                    bytes: state.document.bytes(),
                    line_count: state.document.line_count(),
                    modified: state.modified,
                    top: state.viewport.top(),
                    max_scroll: max,
                    follow: state.follow,
                    stream_eof: state.stream_eof,
                    message: state.status_message.as_deref(),
                    hint: &hint,
                },
                layout.status_area,
            );

            if state.active_view == ActiveView::Help {
                frame.render_widget(
                    HelpPopup {
                        config: &state.config,
                        gate: &state.gate,
                    },
                    frame.area(),
                );
            }
        })?;

        // The draw above may have moved the viewport (resize clamp, wrap
        // growth).  An idle animator adopts the final position; a running
        // animation keeps its own course.
        let top = state.viewport.top() as f32;
        if let Some(engine) = &mut state.engine {
            engine.sync_native(top);
        }

        tokio::select! {
            biased;

            Some(event) = events.recv() => {
                match event {
                    AppEvent::Key(k) => handler::handle_key(&mut state, k),
                    AppEvent::Mouse(m) => handler::handle_mouse(&mut state, m),
                    AppEvent::Resize(_, _) => {}
                }
            }

            Some(update) = next_feed(&mut feed_rx) => {
                // Process the first update, then batch-drain everything
                // currently queued before re-wrapping.  A chatty producer
                // must not cost one wrap pass per line.
                apply_feed_update(&mut state, update);
                if let Some(rx) = &mut feed_rx {
                    while let Ok(update) = rx.try_recv() {
                        apply_feed_update(&mut state, update);
                    }
                }
                state.wrap.extend(&state.document);
                if state.follow {
                    let max = state.max_scroll();
                    handler::snap_to_tail(&mut state, max);
                }
            }

            _ = tokio::time::sleep_until(state.pump.deadline()), if state.pump.armed() => {
                state.pump.consume();
                let AppState { engine, pump, viewport, wrap, .. } = &mut state;
                if let Some(engine) = engine {
                    if let Some(row) = engine.tick(pump) {
                        let max = viewport.max_scroll(wrap.row_count());
                        viewport.set_top(row.max(0.0) as usize, max);
                    }
                }
            }
        }

        if state.should_quit {
            break;
        }
    }

    // ── teardown ──────────────────────────────────────────────
    if let Some(engine) = &mut state.engine {
        engine.shutdown(&mut state.pump);
    }

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    Ok(())
}
