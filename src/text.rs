//! Plain-text escaping helpers for HTML and MarkdownV2 output.

/// Escapes the five HTML special characters.
///
/// # Example
///
/// ```
/// use sizhu::text::escape_html;
///
/// assert_eq!("&lt;b&gt;&amp;&quot;&#39;", escape_html("<b>&\"'"));
/// ```
pub fn escape_html(text: &str) -> String {
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

/// The characters MarkdownV2 requires to be backslash-escaped.
const MARKDOWN_V2_SPECIALS: &str = "_*[]()~`>#+-=|{}.!\\";

/// Escapes MarkdownV2 special characters, leaving those in `except` as-is.
///
/// Single pass: each special is escaped exactly once, and inserted
/// backslashes are never re-escaped. Chained per-character replacement
/// that handles `\` last would double-escape every earlier insertion.
///
/// # Example
///
/// ```
/// use sizhu::text::escape_markdown_v2;
///
/// assert_eq!("a\\.b\\*c", escape_markdown_v2("a.b*c", ""));
/// assert_eq!("a\\.b*c", escape_markdown_v2("a.b*c", "*"));
/// ```
pub fn escape_markdown_v2(text: &str, except: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if MARKDOWN_V2_SPECIALS.contains(c) && !except.contains(c) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
