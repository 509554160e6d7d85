use url::Url;

/// Neutralize server-supplied text before it reaches the terminal.
/// Strips ANSI escape sequences and control characters; newlines and
/// tabs collapse to single spaces so one item stays on one row.
pub fn clean_text(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '\u{1b}' {
            // CSI sequence: ESC [ ... final byte in @..~
            if chars.peek() == Some(&'[') {
                chars.next();
                for follow in chars.by_ref() {
                    if ('\u{40}'..='\u{7e}').contains(&follow) {
                        break;
                    }
                }
            }
            // Bare ESC (or non-CSI introducer) is dropped either way
            continue;
        }

        if c == '\n' || c == '\r' || c == '\t' {
            if !out.ends_with(' ') {
                out.push(' ');
            }
        } else if !c.is_control() {
            out.push(c);
        }
    }

    out
}

/// Validate a URL before handing it to the system browser.
/// Only absolute http/https URLs pass; everything else (javascript:,
/// data:, file:, relative paths) is rejected.
pub fn safe_link(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    let parsed = Url::parse(trimmed).ok()?;

    match parsed.scheme() {
        "http" | "https" => Some(parsed.to_string()),
        _ => None,
    }
}
