//! Document content and its width-dependent wrap layout.
//!
//! [`Document`] stores sanitized logical lines; [`WrapLayout`] maps them
//! onto terminal rows for a given pane width. The wrapped row count is
//! what scrolling is measured against: the furthest valid scroll offset
//! is always `rows - viewport height`.

use unicode_width::UnicodeWidthChar;

// ───────────────────────────────────────── document ──────────

/// Logical document content plus ingest bookkeeping.
#[derive(Debug)]
pub struct Document {
    lines: Vec<String>,
    tab_width: u16,
    bytes: u64,
}

impl Document {
    pub fn new(tab_width: u16) -> Self {
        Self {
            lines: Vec::new(),
            tab_width: tab_width.clamp(1, 16),
            bytes: 0,
        }
    }

    /// Build a document from a full text blob (file loading).
    pub fn from_text(text: &str, tab_width: u16) -> Self {
        let mut doc = Self::new(tab_width);
        for line in text.lines() {
            doc.push_line(line);
        }
        doc
    }

    /// Append one raw line. Tabs expand to the configured stop, a CR left
    /// over from CRLF input is stripped, other control characters are
    /// dropped.
    pub fn push_line(&mut self, raw: &str) {
        self.bytes += raw.len() as u64 + 1;
        let raw = raw.strip_suffix('\r').unwrap_or(raw);
        self.lines.push(sanitize(raw, self.tab_width));
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn line(&self, idx: usize) -> &str {
        &self.lines[idx]
    }

    /// Total ingested bytes (including line terminators).
    pub fn bytes(&self) -> u64 {
        self.bytes
    }
}

fn sanitize(raw: &str, tab_width: u16) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut col = 0usize;
    for ch in raw.chars() {
        match ch {
            '\t' => {
                let stop = tab_width as usize;
                let pad = stop - (col % stop);
                out.extend(std::iter::repeat(' ').take(pad));
                col += pad;
            }
            c if c.is_control() => {}
            c => {
                col += c.width().unwrap_or(0);
                out.push(c);
            }
        }
    }
    out
}

// ───────────────────────────────────────── wrap layout ───────

/// One wrapped row: a byte range of a logical line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RowSpan {
    line: usize,
    start: usize,
    end: usize,
}

/// Width-dependent mapping from logical lines to terminal rows.
///
/// Pager-style hard wrap: rows break exactly at the pane width, mid-word,
/// and a double-width character never straddles the break. Resizes
/// rebuild the whole mapping; streamed appends extend it incrementally.
#[derive(Debug, Default)]
pub struct WrapLayout {
    width: u16,
    rows: Vec<RowSpan>,
    /// Document lines already wrapped into `rows`.
    lines_wrapped: usize,
}

impl WrapLayout {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Rebuild the mapping for a new pane width.
    pub fn rewrap(&mut self, doc: &Document, width: u16) {
        self.width = width.max(1);
        self.rows.clear();
        self.lines_wrapped = 0;
        self.extend(doc);
    }

    /// Wrap lines appended to `doc` since the last call. Cheap for
    /// streaming input; a no-op when nothing was appended.
    pub fn extend(&mut self, doc: &Document) {
        for idx in self.lines_wrapped..doc.line_count() {
            wrap_line(doc.line(idx), idx, self.width.max(1), &mut self.rows);
        }
        self.lines_wrapped = doc.line_count();
    }

    /// The text slice behind a wrapped row.
    pub fn row_text<'a>(&self, doc: &'a Document, row: usize) -> &'a str {
        let span = &self.rows[row];
        &doc.line(span.line)[span.start..span.end]
    }
}

/// Hard-wrap one line. A character that alone exceeds the width still
/// gets a row (the renderer truncates); an empty line yields one row.
fn wrap_line(line: &str, idx: usize, width: u16, rows: &mut Vec<RowSpan>) {
    let width = width as usize;
    let mut start = 0;
    let mut col = 0;
    for (pos, ch) in line.char_indices() {
        let w = ch.width().unwrap_or(0);
        if col + w > width && col > 0 {
            rows.push(RowSpan { line: idx, start, end: pos });
            start = pos;
            col = 0;
        }
        col += w;
    }
    rows.push(RowSpan {
        line: idx,
        start,
        end: line.len(),
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc_of(lines: &[&str]) -> Document {
        let mut doc = Document::new(4);
        for line in lines {
            doc.push_line(line);
        }
        doc
    }

    fn rows_of(doc: &Document, width: u16) -> Vec<String> {
        let mut wrap = WrapLayout::default();
        wrap.rewrap(doc, width);
        (0..wrap.row_count())
            .map(|r| wrap.row_text(doc, r).to_string())
            .collect()
    }

    #[test]
    fn wraps_hard_at_the_pane_width() {
        let doc = doc_of(&["abcdefghij"]);
        assert_eq!(rows_of(&doc, 4), vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn empty_lines_occupy_one_row() {
        let doc = doc_of(&["a", "", "b"]);
        assert_eq!(rows_of(&doc, 10), vec!["a", "", "b"]);
    }

    #[test]
    fn wide_chars_never_straddle_the_break() {
        // 'あ' is double-width: "ab" fills 2 cols, the next row starts
        // with the full character instead of half of it.
        let doc = doc_of(&["abあcd"]);
        assert_eq!(rows_of(&doc, 3), vec!["ab", "あc", "d"]);
    }

    #[test]
    fn tabs_expand_to_the_stop() {
        let doc = doc_of(&["a\tb", "\tx"]);
        assert_eq!(doc.line(0), "a   b");
        assert_eq!(doc.line(1), "    x");
    }

    #[test]
    fn control_chars_and_trailing_cr_are_dropped() {
        let doc = doc_of(&["be\u{7}ep\r"]);
        assert_eq!(doc.line(0), "beep");
    }

    #[test]
    fn extend_matches_a_full_rewrap() {
        let mut doc = doc_of(&["first line here", "second"]);
        let mut incremental = WrapLayout::default();
        incremental.rewrap(&doc, 5);

        doc.push_line("and a third, longer still");
        doc.push_line("tail");
        incremental.extend(&doc);

        let mut fresh = WrapLayout::default();
        fresh.rewrap(&doc, 5);

        assert_eq!(incremental.row_count(), fresh.row_count());
        for row in 0..fresh.row_count() {
            assert_eq!(incremental.row_text(&doc, row), fresh.row_text(&doc, row));
        }
    }

    #[test]
    fn tracks_ingested_bytes() {
        let doc = doc_of(&["ab", "c"]);
        assert_eq!(doc.bytes(), 5);
        assert_eq!(doc.line_count(), 2);
    }
}
