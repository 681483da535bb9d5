use std::borrow::Cow;

/// Placeholder for absent or empty fields
pub const PLACEHOLDER: &str = "-";

/// Suffix marking a truncated field
pub const ELLIPSIS: &str = "...";

/// Escape text for embedding in markup
///
/// Quotes are escaped as well so the result can sit inside a quoted attribute or an
/// inline event-handler argument string.
pub fn escape(text: Option<&str>) -> String {
    let Some(text) = text else {
        return String::new();
    };

    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Cut `text` to `max_len` characters, appending the ellipsis when cut
///
/// Operates on raw text. Empty or absent input yields the placeholder dash.
pub fn truncate_raw(text: Option<&str>, max_len: usize) -> Cow<'_, str> {
    let text = match text {
        Some(t) if !t.is_empty() => t,
        _ => return Cow::Borrowed(PLACEHOLDER),
    };

    match text.char_indices().nth(max_len) {
        // More than max_len chars: cut at the byte offset of char #max_len
        Some((cut, _)) => Cow::Owned(format!("{}{}", &text[..cut], ELLIPSIS)),
        None => Cow::Borrowed(text),
    }
}

/// Truncate for markup: the length budget is spent on raw characters, then escaped
pub fn truncate(text: Option<&str>, max_len: usize) -> String {
    let text = match text {
        Some(t) if !t.is_empty() => t,
        _ => return PLACEHOLDER.to_string(),
    };

    match text.char_indices().nth(max_len) {
        Some((cut, _)) => format!("{}{}", escape(Some(&text[..cut])), ELLIPSIS),
        None => escape(Some(text)),
    }
}
