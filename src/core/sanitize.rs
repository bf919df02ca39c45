// src/core/sanitize.rs

pub fn normalize_entities(s: &str) -> String {
    s.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}

/// Remove any `( ... )` segments (e.g. header qualifiers `Time (SCY)`,
/// split annotations inside time cells). Greedy per pair, no nesting.
pub fn strip_parentheticals(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_paren = false;
    for ch in s.chars() {
        match ch {
            '(' => in_paren = true,
            ')' => in_paren = false,
            _ if !in_paren => out.push(ch),
            _ => {}
        }
    }
    out.trim().to_string()
}

/// Cells the site uses for "no value": blank, NULL, N/A, NA, or a dash.
pub fn is_placeholder(s: &str) -> bool {
    let v = s.trim();
    if v.is_empty() {
        return true;
    }
    matches!(
        v.to_ascii_uppercase().as_str(),
        "NULL" | "N/A" | "NA" | "-" | "\u{2014}"
    )
}
