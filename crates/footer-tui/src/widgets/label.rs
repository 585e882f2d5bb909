//! Width-aware label truncation.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Cut `text` so it occupies at most `max` terminal columns, ending with `…`
/// when anything was dropped.
pub fn truncate(text: &str, max: usize) -> String {
    if UnicodeWidthStr::width(text) <= max {
        return text.to_string();
    }
    if max == 0 {
        return String::new();
    }

    let budget = max - 1;
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(ch);
    }
    out.push('…');
    out
}
