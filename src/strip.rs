//! Conditional block stripping.
//!
//! A block opens with `{@label` and closes with `}@label`. Two forms are
//! removed, each replaced by a single space:
//!
//! ```text
//! foo(); {@dev console.log(x); }@dev bar();
//!
//! {@dev
//!     assertState(state);
//! }@dev
//! ```
//!
//! Matching is purely textual. String literals and comments are not
//! understood, and blocks of the same label do not nest: the first closer
//! after an opener ends the block. Unbalanced markers are left untouched.
//!
//! Labels are searched for literally, so a label containing characters like
//! `*` or `(` simply has to appear verbatim in the source to match.

/// Rewrites CR+LF, lone CR and LF as a single LF.
pub fn normalize_line_endings(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\r' {
            if chars.peek() == Some(&'\n') {
                chars.next();
            }
            out.push('\n');
        } else {
            out.push(c);
        }
    }
    out
}

/// Normalizes line endings, then removes every block of every label in
/// order. Each label's pass sees the output of the previous one.
pub fn strip<S: AsRef<str>>(text: &str, labels: &[S]) -> String {
    labels
        .iter()
        .fold(normalize_line_endings(text), |text, label| {
            strip_label(&text, label.as_ref())
        })
}

/// One strip pass: single-line blocks first, then multi-line blocks.
/// Expects LF line endings.
pub fn strip_label(text: &str, label: &str) -> String {
    let open = format!("{{@{label}");
    let close = format!("}}@{label}");

    let text = Form::SingleLine.remove(text, &open, &close);
    Form::MultiLine.remove(&text, &open, &close)
}

#[derive(Debug, Clone, Copy)]
enum Form {
    /// `{@label ... }@label` on one line.
    SingleLine,
    /// Opener line, any number of lines, then the closer.
    MultiLine,
}

impl Form {
    /// Start of the closer for an opener whose label ends at `body`.
    fn closing(self, text: &str, close: &str, body: usize) -> Option<usize> {
        let line_end = text[body..].find('\n').map(|i| body + i);
        match self {
            Form::SingleLine => {
                let line = &text[..line_end.unwrap_or(text.len())];
                find_marker(line, close, body)
            }
            // the rest of the opener's line belongs to the block
            Form::MultiLine => line_end.and_then(|nl| find_marker(text, close, nl + 1)),
        }
    }

    /// Replaces every block, leftmost first, with a single space.
    fn remove(self, text: &str, open: &str, close: &str) -> String {
        let mut out = String::with_capacity(text.len());
        let mut copied = 0;
        let mut from = 0;

        while let Some(start) = find_marker(text, open, from) {
            match self.closing(text, close, start + open.len()) {
                Some(close_at) => {
                    out.push_str(&text[copied..start]);
                    out.push(' ');
                    copied = close_at + close.len();
                    from = copied;
                }
                None => from = start + 1,
            }
        }

        out.push_str(&text[copied..]);
        out
    }
}

/// Finds the first `marker` at or after `from` that ends on a word boundary,
/// so `{@dev` never matches inside `{@devtools`.
fn find_marker(text: &str, marker: &str, from: usize) -> Option<usize> {
    let mut at = from;
    while let Some(pos) = text[at..].find(marker) {
        let start = at + pos;
        let end = start + marker.len();
        if is_boundary(text, end) {
            return Some(start);
        }
        // markers start with an ASCII brace, so this stays on a char boundary
        at = start + 1;
    }
    None
}

fn is_boundary(text: &str, at: usize) -> bool {
    let bytes = text.as_bytes();
    let before = at > 0 && is_word_byte(bytes[at - 1]);
    let after = bytes.get(at).is_some_and(|&b| is_word_byte(b));
    before != after
}

fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}
