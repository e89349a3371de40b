//! Case-insensitive matching and `<mark>` highlighting.

use webdom::Element;

/// A run of text that either matches the query or not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
    pub matched: bool,
}

impl Segment {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            matched: false,
        }
    }

    pub fn matched(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            matched: true,
        }
    }
}

fn chars_eq_ignore_case(a: char, b: char) -> bool {
    a == b || a.to_lowercase().eq(b.to_lowercase())
}

/// Byte range of the first case-insensitive occurrence of `needle` in
/// `haystack` at or after byte offset `from`.
///
/// Compares char by char, so the range always lies on char boundaries of the
/// original text.
pub fn find_ignore_case(haystack: &str, needle: &str, from: usize) -> Option<(usize, usize)> {
    if needle.is_empty() || from > haystack.len() {
        return None;
    }

    let rest = haystack.get(from..)?;
    for (offset, _) in rest.char_indices() {
        let start = from + offset;
        let mut hay = haystack[start..].char_indices();
        let mut end = start;
        let mut matched = true;

        for n in needle.chars() {
            match hay.next() {
                Some((i, h)) if chars_eq_ignore_case(h, n) => end = start + i + h.len_utf8(),
                _ => {
                    matched = false;
                    break;
                }
            }
        }

        if matched {
            return Some((start, end));
        }
    }
    None
}

/// Whether `text` contains `query` ignoring case.
pub fn contains_ignore_case(text: &str, query: &str) -> bool {
    query.is_empty() || find_ignore_case(text, query, 0).is_some()
}

/// Split `text` into plain and matched segments for the trimmed `query`.
///
/// All non-overlapping matches are marked, scanning left to right. An empty
/// query yields the whole text as one plain segment.
pub fn highlight(text: &str, query: &str) -> Vec<Segment> {
    let query = query.trim();
    let mut segments = Vec::new();
    let mut cursor = 0;

    if !query.is_empty() {
        while let Some((start, end)) = find_ignore_case(text, query, cursor) {
            if start > cursor {
                segments.push(Segment::plain(&text[cursor..start]));
            }
            segments.push(Segment::matched(&text[start..end]));
            cursor = end;
        }
    }

    if cursor < text.len() {
        segments.push(Segment::plain(&text[cursor..]));
    }
    segments
}

/// Render segments as a `span` with matched runs wrapped in `<mark>`.
pub fn highlight_element(segments: &[Segment]) -> Element {
    Element::span()
        .class("search-highlight")
        .children(segments.iter().map(|segment| {
            if segment.matched {
                Element::new("mark").text_content(&segment.text)
            } else {
                Element::text(&segment.text)
            }
        }))
}
