//! Display-width helpers for labels that have to fit a column budget.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const ELLIPSIS: char = '…';

/// Width in columns. Wide glyphs (CJK, most emoji) count as two.
pub fn display_width(s: &str) -> usize {
    s.width()
}

pub fn char_width(c: char) -> usize {
    c.width().unwrap_or(0)
}

/// True for empty or whitespace-only strings.
pub fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

/// Cut `s` to at most `max_width` columns, ending in `…` when shortened.
pub fn truncate_to_width(s: &str, max_width: usize) -> String {
    if display_width(s) <= max_width {
        return s.to_string();
    }
    let Some(budget) = max_width.checked_sub(1) else {
        return String::new();
    };

    let mut used = 0;
    let cut = s
        .char_indices()
        .find_map(|(at, ch)| {
            used += char_width(ch);
            (used > budget).then_some(at)
        })
        .unwrap_or(s.len());
    format!("{}{ELLIPSIS}", &s[..cut])
}
