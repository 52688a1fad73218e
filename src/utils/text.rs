//! Text shortening helpers used by cards and tables.

use unicode_width::UnicodeWidthChar;

/// Keep the first `max_chars` characters, appending `...` when cut.
///
/// The budget counts characters, not bytes, so multi-byte text is never
/// split inside a code point.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        None => text.to_string(),
        Some((byte_idx, _)) => format!("{}...", &text[..byte_idx]),
    }
}

/// Truncate text to fit within `max_width` terminal columns, ellipsis included.
pub fn truncate_with_ellipsis(text: &str, max_width: usize) -> String {
    if max_width <= 3 {
        return "...".to_string();
    }

    let total_width: usize = text.chars().map(|c| c.width().unwrap_or(1)).sum();
    if total_width <= max_width {
        return text.to_string();
    }

    let budget = max_width - 3;
    let mut used = 0;
    let mut kept = String::new();
    for c in text.chars() {
        let w = c.width().unwrap_or(1);
        if used + w > budget {
            break;
        }
        used += w;
        kept.push(c);
    }

    format!("{}...", kept)
}

/// Format a number with thousands separators.
pub fn format_number(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
