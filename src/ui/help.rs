//! Help popup overlay — key bindings and the scrolling mode.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget},
};

use crate::config::{Action, AppConfig};
use crate::scroll::gate::GateDecision;

/// Help popup overlay.
pub struct HelpPopup<'a> {
    pub config: &'a AppConfig,
    pub gate: &'a GateDecision,
}

impl<'a> Widget for HelpPopup<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Action::ALL.len() binding rows + 2 blanks + 1 mode line + 1 hint + 2 border
        let height = (Action::ALL.len() as u16) + 6;
        let popup = centered_fixed(48, height, area);
        Clear.render(popup, buf);

        let block = Block::default()
            .title(" Help ")
            .title_style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::DarkGray));

        let inner = block.inner(popup);
        block.render(popup, buf);

        let dim = Style::default().fg(Color::DarkGray);
        let mut lines = Vec::new();

        // ── Binding rows ────────────────────────────────────────
        for &action in Action::ALL {
            let keys_display = self.config.display_bindings(action);

            // Fixed-width columns: label left-aligned, keys right-aligned.
            let label_col = format!("   {:<20}", action.label());
            let inner_width = inner.width as usize;
            let keys_width = inner_width.saturating_sub(label_col.len()).max(1);
            let keys_col = format!("{keys_display:>keys_width$}");

            lines.push(Line::from(vec![
                Span::styled(label_col, Style::default().fg(Color::White)),
                Span::styled(keys_col, Style::default().fg(Color::Yellow)),
            ]));
        }

        // ── Scrolling mode ──────────────────────────────────────
        lines.push(Line::raw(""));
        let mode = match self.gate {
            GateDecision::Enabled => format!(
                "   smooth scrolling on  (ease {:.2})",
                self.config.ease
            ),
            GateDecision::Disabled(reason) => {
                format!("   smooth scrolling off — {}", reason.describe())
            }
        };
        lines.push(Line::from(Span::styled(mode, dim)));

        // ── Hint bar ────────────────────────────────────────────
        lines.push(Line::raw(""));
        lines.push(Line::from(Span::styled("   Esc: close", dim)));

        Paragraph::new(lines).render(inner, buf);
    }
}

/// Create a centered rectangle with fixed dimensions, clamped to the available area.
fn centered_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(w)) / 2;
    let y = area.y + (area.height.saturating_sub(h)) / 2;
    Rect::new(x, y, w, h)
}
