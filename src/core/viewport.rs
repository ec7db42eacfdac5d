//! The pager's scroll position — integer rows with clamped writes.
//!
//! This is the "platform" side of scrolling: whatever the animation layer
//! or the key handlers ask for, the viewport never exposes an out-of-range
//! position.

/// Visible window onto the wrapped document. `top` is the first visible
/// wrapped row; `width`/`height` are the content-pane dimensions recorded
/// at the last draw.
#[derive(Debug, Default, Clone, Copy)]
pub struct Viewport {
    top: usize,
    width: u16,
    height: u16,
}

impl Viewport {
    pub fn top(&self) -> usize {
        self.top
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Record the content-pane size. Returns `true` when the width
    /// changed, i.e. the wrap layout is stale.
    pub fn resize(&mut self, width: u16, height: u16) -> bool {
        let stale = width != self.width;
        self.width = width;
        self.height = height;
        stale
    }

    /// Greatest valid `top` for a document of `total_rows` wrapped rows.
    pub fn max_scroll(&self, total_rows: usize) -> usize {
        total_rows.saturating_sub(self.height as usize)
    }

    /// Clamped absolute write.
    pub fn set_top(&mut self, row: usize, max_scroll: usize) {
        self.top = row.min(max_scroll);
    }

    /// Clamped relative write.
    pub fn scroll_by(&mut self, delta: isize, max_scroll: usize) {
        self.top = self.top.saturating_add_signed(delta).min(max_scroll);
    }

    /// Re-clamp after the content or the pane shrank.
    pub fn clamp(&mut self, max_scroll: usize) {
        self.top = self.top.min(max_scroll);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pane() -> Viewport {
        let mut vp = Viewport::default();
        vp.resize(80, 20);
        vp
    }

    #[test]
    fn max_scroll_is_zero_for_short_content() {
        let vp = pane();
        assert_eq!(vp.max_scroll(5), 0);
        assert_eq!(vp.max_scroll(20), 0);
        assert_eq!(vp.max_scroll(21), 1);
    }

    #[test]
    fn writes_clamp_at_both_ends() {
        let mut vp = pane();
        vp.scroll_by(-3, 100);
        assert_eq!(vp.top(), 0);
        vp.set_top(9999, 100);
        assert_eq!(vp.top(), 100);
        vp.scroll_by(5, 100);
        assert_eq!(vp.top(), 100);
    }

    #[test]
    fn clamp_pulls_top_back_after_shrink() {
        let mut vp = pane();
        vp.set_top(80, 100);
        vp.clamp(40);
        assert_eq!(vp.top(), 40);
        vp.clamp(60);
        assert_eq!(vp.top(), 40, "clamp must never move the viewport down");
    }

    #[test]
    fn resize_reports_width_changes_only() {
        let mut vp = pane();
        assert!(!vp.resize(80, 30));
        assert!(vp.resize(60, 30));
    }
}
