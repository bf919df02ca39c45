// src/core/html.rs
//
// Tag-block scanning over the raw document text. The rankings pages are
// table soup with inconsistent quoting and casing; walking byte offsets
// is both faster and more forgiving than a full DOM parse.

pub fn to_lower(s: &str) -> String {
    s.chars()
        .map(|c| {
            if c.is_ascii() {
                c.to_ascii_lowercase()
            } else {
                c
            }
        })
        .collect()
}

/// Inner text of the first `open_pat …> … close_pat` region, case-insensitive.
pub fn slice_between_ci<'a>(s: &'a str, open_pat: &str, close_pat: &str) -> Option<&'a str> {
    let lc = to_lower(s);
    let open = to_lower(open_pat);
    let close = to_lower(close_pat);
    let o = lc.find(&open)?;
    let after = s[o..].find('>')? + o + 1;
    let cr = lc[after..].find(&close)?;
    Some(&s[after..after + cr])
}

/// Byte range of the next `<o …> … c` block at or after `from`.
/// The range covers the whole block including both tags.
pub fn next_tag_block_ci(s: &str, o: &str, c: &str, from: usize) -> Option<(usize, usize)> {
    let lc = to_lower(s);
    let ol = to_lower(o);
    let cl = to_lower(c);
    let start = lc.get(from..)?.find(&ol)? + from;
    let open_end = s[start..].find('>')? + start + 1;
    let end_rel = lc[open_end..].find(&cl)?;
    let end = open_end + end_rel + c.len();
    Some((start, end))
}

/// Content between the opening tag's `>` and the closing tag.
pub fn inner_after_open_tag(block: &str) -> String {
    if let Some(oe) = block.find('>') {
        if let Some(cs) = block.rfind('<') {
            if cs > oe {
                return block[oe + 1..cs].to_string();
            }
        }
    }
    s!()
}

pub fn strip_tags<S: AsRef<str>>(s: S) -> String {
    let s = s.as_ref();

    let mut out = String::with_capacity(s.len());
    let mut in_tag = false;

    for ch in s.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    super::sanitize::normalize_ws(&out)
}

/// The opening tag of a block, up to (not including) its `>`.
pub fn opener(block: &str) -> &str {
    let end = block.find('>').unwrap_or(block.len());
    &block[..end]
}

/// Whether the block's opening tag carries `needle` as (part of) its class.
/// Tolerates single quotes, double quotes, unquoted and multi-class values.
pub fn tag_has_class(block: &str, needle: &str) -> bool {
    let lc = to_lower(opener(block));
    lc.contains(&format!(r#"class="{}""#, needle))
        || lc.contains(&format!(r#"class='{}'"#, needle))
        || (lc.contains("class=") && lc.contains(needle))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slice_between_is_case_insensitive() {
        let doc = "<TABLE class=x><tr>hi</tr></TABLE>";
        assert_eq!(slice_between_ci(doc, "<table", "</table>"), Some("<tr>hi</tr>"));
    }

    #[test]
    fn next_tag_block_walks_forward() {
        let doc = "<td>a</td><td>b</td>";
        let (s1, e1) = next_tag_block_ci(doc, "<td", "</td>", 0).unwrap();
        assert_eq!(&doc[s1..e1], "<td>a</td>");
        let (s2, e2) = next_tag_block_ci(doc, "<td", "</td>", e1).unwrap();
        assert_eq!(inner_after_open_tag(&doc[s2..e2]), "b");
    }

    #[test]
    fn strip_tags_collapses_whitespace() {
        assert_eq!(strip_tags("<b>Jane\n  Doe</b>"), "Jane Doe");
    }

    #[test]
    fn class_check_tolerates_quote_styles() {
        assert!(tag_has_class(r#"<tr class="detail-row">x</tr>"#, "detail"));
        assert!(tag_has_class(r#"<tr class='detail'>x</tr>"#, "detail"));
        assert!(tag_has_class(r#"<tr class=detail>x</tr>"#, "detail"));
        assert!(!tag_has_class(r#"<tr id="detail">x</tr>"#, "detail"));
        // class attr must sit in the opener, not the body
        assert!(!tag_has_class(r#"<tr><td class="detail">x</td></tr>"#, "detail"));
    }
}
