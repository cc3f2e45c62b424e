//! Line classifier for the wire list.

/// The shape of one non-blank wire-list line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// Component header: starts with an uppercase letter.
    Header(Vec<&'a str>),
    /// Pin record: first field is all digits.
    Pin(Vec<&'a str>),
    /// Anything else.
    Ambiguous(&'a str),
}

/// A classified line together with its 1-based line number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line<'a> {
    pub number: usize,
    pub kind: LineKind<'a>,
}

/// Classify a single line. Returns `None` for blank lines.
pub fn classify(text: &str) -> Option<LineKind<'_>> {
    let text = text.trim();
    let first = text.chars().next()?;
    let fields: Vec<&str> = text.split_whitespace().collect();
    let kind = if first.is_ascii_uppercase() {
        LineKind::Header(fields)
    } else if fields[0].bytes().all(|b| b.is_ascii_digit()) {
        LineKind::Pin(fields)
    } else {
        LineKind::Ambiguous(text)
    };
    Some(kind)
}

/// Iterate over the classified, non-blank lines of a wire list.
pub fn lines(input: &str) -> impl Iterator<Item = Line<'_>> {
    input.lines().enumerate().filter_map(|(idx, text)| {
        classify(text).map(|kind| Line {
            number: idx + 1,
            kind,
        })
    })
}
