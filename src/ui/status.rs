//! Bottom status bar — source metadata on the left, position and mode
//! badges on the right.

use std::time::{SystemTime, UNIX_EPOCH};

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::Widget,
};

use super::theme::Theme;

pub struct StatusBar<'a> {
    pub source_name: &'a str,
    pub bytes: u64,
    pub line_count: usize,
    pub modified: Option<SystemTime>,
    pub top: usize,
    pub max_scroll: usize,
    pub follow: bool,
    pub stream_eof: bool,
    pub message: Option<&'a str>,
    pub hint: &'a str,
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 {
            return;
        }
        buf.set_style(area, Theme::status_bar_style());

        let mut left: Vec<Span> = vec![Span::styled(
            format!(" {} ", self.source_name),
            Theme::status_bar_style().add_modifier(Modifier::BOLD),
        )];

        let mut meta = format!("{}  {} lines", human_size(self.bytes), self.line_count);
        if let Some(modified) = self.modified {
            meta.push_str(&format!("  {}", format_ts(modified)));
        }
        meta.push_str("  ");
        left.push(Span::styled(meta, Theme::status_meta_style()));

        // A transient message replaces the key hint, never the metadata.
        match self.message {
            Some(msg) => left.push(Span::styled(format!("{msg} "), Theme::message_style())),
            None => left.push(Span::styled(
                format!("{} ", self.hint),
                Theme::status_meta_style(),
            )),
        }

        let mut right: Vec<Span> = Vec::new();
        if self.follow {
            right.push(Span::styled(" FOLLOW ", Theme::follow_badge_style()));
            right.push(Span::raw(" "));
        }
        if self.stream_eof {
            right.push(Span::styled(" EOF ", Theme::eof_badge_style()));
            right.push(Span::raw(" "));
        }
        right.push(Span::styled(
            format!("{:>3}% ", self.percent()),
            Theme::status_bar_style(),
        ));

        // Right-align the badges by padding the middle.
        let left_width: usize = left.iter().map(Span::width).sum();
        let right_width: usize = right.iter().map(Span::width).sum();
        let pad = (area.width as usize).saturating_sub(left_width + right_width);

        let mut spans = left;
        spans.push(Span::raw(" ".repeat(pad)));
        spans.extend(right);
        buf.set_line(area.x, area.y, &Line::from(spans), area.width);
    }
}

impl StatusBar<'_> {
    fn percent(&self) -> u16 {
        if self.max_scroll == 0 {
            return 100;
        }
        ((self.top as f32 / self.max_scroll as f32) * 100.0).round() as u16
    }
}

/// Human-readable size string.
fn human_size(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KiB", "MiB", "GiB", "TiB"];
    let mut size = bytes as f64;
    for &unit in UNITS {
        if size < 1024.0 {
            return format!("{size:.1} {unit}");
        }
        size /= 1024.0;
    }
    format!("{size:.1} PiB")
}

fn format_ts(time: SystemTime) -> String {
    use chrono::{Local, TimeZone};
    let unix_secs = time
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    let s = i64::try_from(unix_secs).unwrap_or(i64::MAX);
    match Local.timestamp_opt(s, 0).single() {
        Some(dt) => dt.format("%Y/%m/%d %H:%M").to_string(),
        None => "-".to_string(),
    }
}
