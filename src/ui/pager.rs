//! The pager widget — renders wrapped document rows into the viewport.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, StatefulWidget, Widget},
};

use crate::core::document::{Document, WrapLayout};
use crate::core::viewport::Viewport;

use super::theme::Theme;

/// The pager itself — created fresh each frame. The viewport it scrolls
/// lives in the app state and is passed in as widget state.
pub struct PagerView<'a> {
    document: &'a Document,
    wrap: &'a WrapLayout,
    block: Option<Block<'a>>,
}

impl<'a> PagerView<'a> {
    pub fn new(document: &'a Document, wrap: &'a WrapLayout) -> Self {
        Self {
            document,
            wrap,
            block: None,
        }
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }
}

impl<'a> StatefulWidget for PagerView<'a> {
    type State = Viewport;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        // Resolve the inner area (inside the optional block border).
        let inner = if let Some(ref block) = self.block {
            let inner = block.inner(area);
            block.clone().render(area, buf);
            inner
        } else {
            area
        };

        // The layout may have shrunk since the last event; never render
        // from a top row past the end of the document.
        let max = self.wrap.row_count().saturating_sub(inner.height as usize);
        state.clamp(max);

        for i in 0..inner.height {
            let row = state.top() + i as usize;
            if row >= self.wrap.row_count() {
                break;
            }
            let text = self.wrap.row_text(self.document, row);
            let line = Line::from(Span::styled(text, Theme::text_style()));
            buf.set_line(inner.x, inner.y + i, &line, inner.width);
        }
    }
}
