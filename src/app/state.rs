//! Central application state.
//!
//! All mutable state lives here so that the rest of the app can be pure
//! functions over `&AppState` (rendering) or `&mut AppState` (event handling).

use std::time::SystemTime;

use ratatui::layout::Rect;

use crate::app::event::FramePump;
use crate::config::AppConfig;
use crate::core::document::{Document, WrapLayout};
use crate::core::viewport::Viewport;
use crate::scroll::engine::{ScrollTuning, SmoothScroll};
use crate::scroll::gate::GateDecision;

/// Which view / overlay is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveView {
    #[default]
    Pager,
    Help,
}

/// Top-level application state.
pub struct AppState {
    /// The document being paged.
    pub document: Document,
    /// Wrapped-row layout for the current pane width.
    pub wrap: WrapLayout,
    /// Platform scroll position and content-pane geometry.
    pub viewport: Viewport,
    /// Eased scroll animator.  `None` when the capability gate closed —
    /// every input then becomes an instant native jump.
    pub engine: Option<SmoothScroll>,
    /// Single-shot frame timer driving the animator.
    pub pump: FramePump,
    /// Gate outcome (shown in the help overlay).
    pub gate: GateDecision,
    /// Name shown in the status bar (`"stdin"` for piped input).
    pub source_name: String,
    /// File modification time, when paging a file.
    pub modified: Option<SystemTime>,
    /// Keep the viewport pinned to the tail while streaming.
    pub follow: bool,
    /// `true` while the stdin feed is still open.
    pub streaming: bool,
    /// `true` once a stdin feed has delivered end-of-input.
    pub stream_eof: bool,
    /// `true` while a left-button drag is moving the scrollbar thumb.
    pub dragging_scrollbar: bool,
    /// Controls the main event loop.
    pub should_quit: bool,
    /// An optional status message shown in the bottom bar.
    pub status_message: Option<String>,
    /// Which view / overlay is currently shown.
    pub active_view: ActiveView,
    /// User configuration (scroll feel + keybindings).
    pub config: AppConfig,
    /// Full terminal area from the last draw, for mouse hit-testing.
    pub terminal_area: Rect,
}

impl AppState {
    pub fn new(
        document: Document,
        source_name: String,
        config: AppConfig,
        gate: GateDecision,
    ) -> Self {
        let tuning = ScrollTuning {
            ease: config.ease,
            mouse_multiplier: config.mouse_multiplier,
            touch_multiplier: config.touch_multiplier,
        };
        let engine = gate.is_enabled().then(|| SmoothScroll::new(tuning, 0.0));

        Self {
            document,
            wrap: WrapLayout::default(),
            viewport: Viewport::default(),
            engine,
            pump: FramePump::new(),
            gate,
            source_name,
            modified: None,
            follow: false,
            streaming: false,
            stream_eof: false,
            dragging_scrollbar: false,
            should_quit: false,
            status_message: None,
            active_view: ActiveView::default(),
            config,
            terminal_area: Rect::default(),
        }
    }

    /// Greatest valid scroll offset for the current wrap + pane size.
    pub fn max_scroll(&self) -> usize {
        self.viewport.max_scroll(self.wrap.row_count())
    }
}
