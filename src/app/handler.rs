//! Input handling — maps key/mouse events to state mutations.
//!
//! Two kinds of scrolling meet here: wheel and drag input feeds the
//! animator (when the gate allowed one), everything else — keyboard
//! navigation, scrollbar jumps, the closed-gate fallback — writes the
//! viewport directly and lets the animator adopt the position while idle.

use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::config::Action;
use crate::ui::layout::AppLayout;

use super::state::{ActiveView, AppState};

/// Rows per wheel notch, before the mouse multiplier.
const WHEEL_STEP_ROWS: f32 = 3.0;

/// Process a key event, dispatching based on the active view.
pub fn handle_key(state: &mut AppState, key: KeyEvent) {
    // Ignore Release events (reported on supported terminals).
    if key.kind == KeyEventKind::Release {
        return;
    }

    // Ctrl+c always quits, regardless of view.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.should_quit = true;
        return;
    }

    match state.active_view {
        ActiveView::Pager => handle_pager_key(state, key),
        ActiveView::Help => handle_help_key(state, key),
    }
}

// ── Pager view (configurable bindings) ──────────────────────────

fn handle_pager_key(state: &mut AppState, key: KeyEvent) {
    let Some(action) = state.config.match_key(key) else {
        return;
    };

    let max = state.max_scroll();
    let page = (state.viewport.height() as isize - 2).max(1);
    let half = (state.viewport.height() as isize / 2).max(1);

    match action {
        Action::Quit => state.should_quit = true,
        Action::OpenHelp => state.active_view = ActiveView::Help,
        Action::LineUp => native_scroll_by(state, -1, max),
        Action::LineDown => native_scroll_by(state, 1, max),
        Action::HalfPageUp => native_scroll_by(state, -half, max),
        Action::HalfPageDown => native_scroll_by(state, half, max),
        Action::PageUp => native_scroll_by(state, -page, max),
        Action::PageDown => native_scroll_by(state, page, max),
        Action::GotoTop => native_jump_to(state, 0, max),
        Action::GotoBottom => native_jump_to(state, max, max),
        Action::ToggleFollow => toggle_follow(state, max),
    }
}

fn handle_help_key(state: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') => {
            state.active_view = ActiveView::Pager;
        }
        _ => {}
    }
}

// ── Native writers ──────────────────────────────────────────────

/// Keyboard navigation moves the viewport instantly; the animator adopts
/// the new position once it is idle.
fn native_scroll_by(state: &mut AppState, delta: isize, max: usize) {
    state.viewport.scroll_by(delta, max);
    after_native_write(state, delta > 0, max);
}

fn native_jump_to(state: &mut AppState, row: usize, max: usize) {
    let moved_down = row >= state.viewport.top();
    state.viewport.set_top(row, max);
    after_native_write(state, moved_down, max);
}

fn after_native_write(state: &mut AppState, moved_down: bool, max: usize) {
    if let Some(engine) = &mut state.engine {
        engine.sync_native(state.viewport.top() as f32);
    }
    update_follow(state, moved_down, max);
}

// ── Follow mode ─────────────────────────────────────────────────

fn toggle_follow(state: &mut AppState, max: usize) {
    state.follow = !state.follow;
    state.status_message =
        Some(if state.follow { "follow on" } else { "follow off" }.into());
    if state.follow {
        snap_to_tail(state, max);
    }
}

/// Chase the document tail: eased when the animator is on, instant
/// otherwise. Called on toggle and on streamed appends.
pub fn snap_to_tail(state: &mut AppState, max: usize) {
    match &mut state.engine {
        Some(engine) => engine.scroll_to(max as f32, max as f32, &mut state.pump),
        None => state.viewport.set_top(max, max),
    }
}

/// Streaming follow heuristics: scrolling up lets go of the tail,
/// reaching the bottom grabs it again.
fn update_follow(state: &mut AppState, moved_down: bool, max: usize) {
    if !state.streaming {
        return;
    }
    if !moved_down {
        if state.follow {
            state.follow = false;
            state.status_message = Some("follow off".into());
        }
        return;
    }
    let at_bottom = match &state.engine {
        Some(engine) => engine.target() >= max as f32,
        None => state.viewport.top() >= max,
    };
    if at_bottom && !state.follow {
        state.follow = true;
        state.status_message = Some("follow on".into());
    }
}

// ── Mouse ───────────────────────────────────────────────────────

/// Process a mouse event.  Wheel and content drags feed the animator;
/// scrollbar hits and the closed-gate fallback write the viewport
/// directly.
pub fn handle_mouse(state: &mut AppState, mouse: MouseEvent) {
    if state.active_view != ActiveView::Pager {
        return;
    }

    match mouse.kind {
        MouseEventKind::ScrollUp => wheel_input(state, -WHEEL_STEP_ROWS),
        MouseEventKind::ScrollDown => wheel_input(state, WHEEL_STEP_ROWS),
        MouseEventKind::Down(MouseButton::Left) => {
            if on_scrollbar(state, mouse.column) {
                state.dragging_scrollbar = true;
                scrollbar_jump(state, mouse.row);
            } else if let Some(engine) = &mut state.engine {
                engine.drag_start(mouse.row as f32);
            }
        }
        MouseEventKind::Drag(MouseButton::Left) => {
            if state.dragging_scrollbar {
                scrollbar_jump(state, mouse.row);
            } else {
                let max = state.max_scroll();
                if let Some(engine) = &mut state.engine {
                    engine.drag_move(mouse.row as f32, max as f32, &mut state.pump);
                    let dragged_down = engine.target() >= state.viewport.top() as f32;
                    update_follow(state, dragged_down, max);
                }
            }
        }
        MouseEventKind::Up(MouseButton::Left) => {
            state.dragging_scrollbar = false;
            if let Some(engine) = &mut state.engine {
                engine.drag_end();
            }
        }
        _ => {}
    }
}

fn wheel_input(state: &mut AppState, delta_rows: f32) {
    let max = state.max_scroll();
    match &mut state.engine {
        Some(engine) => engine.wheel(delta_rows, max as f32, &mut state.pump),
        // Closed gate: unmodified native scrolling, no multiplier.
        None => state.viewport.scroll_by(delta_rows as isize, max),
    }
    update_follow(state, delta_rows > 0.0, max);
}

/// The scrollbar occupies the rightmost column of the pager pane.
fn on_scrollbar(state: &AppState, column: u16) -> bool {
    let area = AppLayout::from_area(state.terminal_area).pager_area;
    area.width > 0 && column == area.right() - 1 && state.max_scroll() > 0
}

/// Jump to the proportional position for a scrollbar hit — a native
/// writer, exactly like keyboard navigation.
fn scrollbar_jump(state: &mut AppState, row: u16) {
    let area = AppLayout::from_area(state.terminal_area).pager_area;
    let track_top = area.y + 1;
    let track_len = area.height.saturating_sub(2).max(1);
    let clicked = row.saturating_sub(track_top).min(track_len - 1) as f32;
    let denom = track_len.saturating_sub(1).max(1) as f32;
    let max = state.max_scroll();
    let target = (clicked / denom * max as f32).round() as usize;
    native_jump_to(state, target, max);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::layout::Rect;

    use crate::config::AppConfig;
    use crate::core::document::Document;
    use crate::scroll::gate::{DisableReason, GateDecision};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    /// 100 short lines in a 42x13 terminal: 40x10 content pane,
    /// max_scroll 90.
    fn state(gate: GateDecision) -> AppState {
        let text = (0..100).map(|i| format!("line {i}")).collect::<Vec<_>>().join("\n");
        let mut state = AppState::new(
            Document::from_text(&text, 4),
            "test".into(),
            AppConfig::default(),
            gate,
        );
        state.wrap.rewrap(&state.document, 40);
        state.viewport.resize(40, 10);
        state.terminal_area = Rect::new(0, 0, 42, 13);
        state
    }

    fn smooth() -> AppState {
        state(GateDecision::Enabled)
    }

    fn gated() -> AppState {
        state(GateDecision::Disabled(DisableReason::ReducedMotion))
    }

    #[test]
    fn wheel_with_engine_retargets_without_moving_the_viewport() {
        let mut state = smooth();
        handle_mouse(&mut state, mouse(MouseEventKind::ScrollDown, 10, 5));
        let engine = state.engine.as_ref().unwrap();
        assert_eq!(engine.target(), 3.0);
        assert!(engine.is_animating());
        assert!(state.pump.armed(), "a frame must be scheduled");
        assert_eq!(state.viewport.top(), 0, "movement happens on the tick");
    }

    #[test]
    fn wheel_without_engine_jumps_instantly() {
        let mut state = gated();
        handle_mouse(&mut state, mouse(MouseEventKind::ScrollDown, 10, 5));
        assert_eq!(state.viewport.top(), 3);
        assert!(!state.pump.armed(), "closed gate must never schedule frames");
    }

    #[test]
    fn keyboard_navigation_is_a_native_writer() {
        let mut state = smooth();
        handle_key(&mut state, key(KeyCode::Char('j')));
        assert_eq!(state.viewport.top(), 1);
        let engine = state.engine.as_ref().unwrap();
        assert_eq!(engine.target(), 1.0, "idle animator must adopt the jump");
        assert!(!engine.is_animating());
    }

    #[test]
    fn goto_bottom_stops_at_max_scroll() {
        let mut state = smooth();
        handle_key(&mut state, key(KeyCode::End));
        assert_eq!(state.viewport.top(), 90);
    }

    #[test]
    fn drag_feeds_the_animator_with_the_touch_multiplier() {
        let mut state = smooth();
        handle_mouse(&mut state, mouse(MouseEventKind::Down(MouseButton::Left), 10, 5));
        handle_mouse(&mut state, mouse(MouseEventKind::Drag(MouseButton::Left), 10, 2));
        let engine = state.engine.as_ref().unwrap();
        // (5 - 2) rows * touch_multiplier 2.0
        assert_eq!(engine.target(), 6.0);
        handle_mouse(&mut state, mouse(MouseEventKind::Up(MouseButton::Left), 10, 2));
        handle_mouse(&mut state, mouse(MouseEventKind::Drag(MouseButton::Left), 10, 0));
        assert_eq!(
            state.engine.as_ref().unwrap().target(),
            6.0,
            "drag after release must not retarget"
        );
    }

    #[test]
    fn scrollbar_click_is_an_instant_proportional_jump() {
        let mut state = smooth();
        // Column 41 is the scrollbar; the track spans rows 1..=10.
        handle_mouse(&mut state, mouse(MouseEventKind::Down(MouseButton::Left), 41, 10));
        assert_eq!(state.viewport.top(), 90, "bottom of the track is max scroll");
        assert!(!state.pump.armed(), "scrollbar jumps are native writes");
    }

    #[test]
    fn ctrl_c_always_quits() {
        let mut state = smooth();
        state.active_view = ActiveView::Help;
        handle_key(
            &mut state,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        );
        assert!(state.should_quit);
    }

    #[test]
    fn help_overlay_opens_and_closes() {
        let mut state = smooth();
        handle_key(&mut state, key(KeyCode::Char('?')));
        assert_eq!(state.active_view, ActiveView::Help);
        handle_key(&mut state, key(KeyCode::Esc));
        assert_eq!(state.active_view, ActiveView::Pager);
    }

    #[test]
    fn scrolling_up_releases_follow() {
        let mut state = smooth();
        state.streaming = true;
        state.follow = true;
        handle_mouse(&mut state, mouse(MouseEventKind::ScrollUp, 10, 5));
        assert!(!state.follow);
    }

    #[test]
    fn reaching_the_bottom_restores_follow() {
        let mut state = smooth();
        state.streaming = true;
        handle_key(&mut state, key(KeyCode::End));
        assert!(state.follow);
    }
}
