// src/scrape/rankings.rs

use std::time::Instant;

use crate::core::html::{self, inner_after_open_tag, next_tag_block_ci, strip_tags, tag_has_class};
use crate::core::net::DocumentSource;
use crate::core::sanitize::{normalize_entities, strip_parentheticals};
use crate::error::Error;
use crate::query::EventQuery;
use crate::specs::rankings::{rankings_url, HeaderIndex};

/// Non-time results the site prints in the Time column.
pub const SPECIAL_TIMES: [&str; 4] = ["NT", "DQ", "NS", "DNF"];

/// One table row before school resolution: the cells that matter, cleaned.
/// `name` is empty when the table has no Name column (relay events).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawRow {
    pub name: String,
    pub school_cell: String,
    pub team_cell: String,
    pub time: String,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ParseStats {
    pub rows_seen: usize,
    pub skipped_empty: usize,
    pub skipped_no_time: usize,
}

#[derive(Clone, Debug, Default)]
pub struct RankingsBundle {
    pub headers: Vec<String>,
    pub header_index: HeaderIndex,
    pub rows: Vec<RawRow>,
    pub stats: ParseStats,
}

/// Fetch the rankings page for `query` and extract its rows.
pub async fn fetch_and_extract(
    source: &dyn DocumentSource,
    base_url: &str,
    query: &EventQuery,
) -> Result<RankingsBundle, Error> {
    let url = rankings_url(base_url, query);
    tracing::debug!(%url, "fetching rankings page");
    let doc = source.fetch(&url).await?;

    let t = Instant::now();
    let bundle = parse_doc(&doc);
    tracing::debug!(
        rows = bundle.rows.len(),
        stats = ?bundle.stats,
        elapsed = ?t.elapsed(),
        "parsed rankings page"
    );
    Ok(bundle)
}

/// Split out for unit tests and the bench.
pub fn parse_doc(doc: &str) -> RankingsBundle {
    // The page carries several tables (nav chrome, filters, the rankings).
    // Take the first whose header row has at least two cells.
    let mut pos = 0usize;
    while let Some((tb_s, tb_e)) = next_tag_block_ci(doc, "<table", "</table>", pos) {
        let table = &doc[tb_s..tb_e];
        pos = tb_e;

        let headers = read_header_cells(table);
        if headers.len() < 2 {
            continue;
        }
        return parse_table(table, headers);
    }

    tracing::debug!("no table with a usable header row");
    RankingsBundle::default()
}

/* ---------------- table walking ---------------- */

/// Header cells: the last `<tr>` of `<thead>` when present, else the first
/// `<tr>` that carries `<th>` cells.
fn read_header_cells(table: &str) -> Vec<String> {
    if let Some((th_s, th_e)) = next_tag_block_ci(table, "<thead", "</thead>", 0) {
        let thead = &table[th_s..th_e];
        let mut last = Vec::new();
        let mut pos = 0usize;
        while let Some((tr_s, tr_e)) = next_tag_block_ci(thead, "<tr", "</tr>", pos) {
            let cells = read_cells(&thead[tr_s..tr_e], "<th", "</th>");
            if !cells.is_empty() {
                last = cells;
            }
            pos = tr_e;
        }
        if !last.is_empty() {
            return last;
        }
    }

    let mut pos = 0usize;
    while let Some((tr_s, tr_e)) = next_tag_block_ci(table, "<tr", "</tr>", pos) {
        let cells = read_cells(&table[tr_s..tr_e], "<th", "</th>");
        if !cells.is_empty() {
            return cells;
        }
        pos = tr_e;
    }
    Vec::new()
}

fn read_cells(block: &str, open: &str, close: &str) -> Vec<String> {
    let mut cells = Vec::new();
    let mut pos = 0usize;
    while let Some((c_s, c_e)) = next_tag_block_ci(block, open, close, pos) {
        let inner = inner_after_open_tag(&block[c_s..c_e]);
        cells.push(strip_tags(normalize_entities(&inner)));
        pos = c_e;
    }
    cells
}

fn parse_table(table: &str, headers: Vec<String>) -> RankingsBundle {
    let header_index = HeaderIndex::from_cells(&headers);
    if !HeaderIndex::conforms(&headers) {
        tracing::debug!(?headers, "header row deviates from posted layout");
    }

    let mut stats = ParseStats::default();
    let mut rows = Vec::new();

    // Row scope: the <tbody> when the site emits one, the whole table
    // otherwise. Header rows carry <th> only and fall out naturally.
    let body = html::slice_between_ci(table, "<tbody", "</tbody>").unwrap_or(table);

    let mut pos = 0usize;
    while let Some((tr_s, tr_e)) = next_tag_block_ci(body, "<tr", "</tr>", pos) {
        let tr = &body[tr_s..tr_e];
        pos = tr_e;

        // Expandable split/detail rows shadow their parent row's data.
        if tag_has_class(tr, "detail") {
            continue;
        }

        let cells = read_cells(tr, "<td", "</td>");
        if cells.is_empty() {
            continue;
        }
        stats.rows_seen += 1;

        if cells.iter().all(|c| c.is_empty()) {
            stats.skipped_empty += 1;
            continue;
        }

        let Some(time) = find_time(&cells, &header_index) else {
            stats.skipped_no_time += 1;
            continue;
        };

        let cell_at = |i: Option<usize>| i.and_then(|i| cells.get(i)).cloned().unwrap_or_default();
        rows.push(RawRow {
            name: cell_at(header_index.name),
            school_cell: cell_at(header_index.school),
            team_cell: cell_at(header_index.team),
            time,
        });
    }

    RankingsBundle { headers, header_index, rows, stats }
}

/// Time column first; any cell as fallback. The site has shuffled columns
/// before, the time format has stayed put.
fn find_time(cells: &[String], idx: &HeaderIndex) -> Option<String> {
    if let Some(i) = idx.time {
        if let Some(v) = cells.get(i) {
            if time_like(v) {
                return Some(normalize_time(v));
            }
        }
    }
    cells.iter().find(|v| time_like(v)).map(|v| normalize_time(v))
}

/* ---------------- time cells ---------------- */

/// `NT`/`DQ`/`NS`/`DNF`, or `(m)m:ss.cc` / `ss.cc` once split annotations
/// and a single trailing letter (course suffix) are stripped.
pub fn time_like(s: &str) -> bool {
    let raw = s.trim().to_ascii_uppercase();
    if raw.is_empty() {
        return false;
    }
    if SPECIAL_TIMES.contains(&raw.as_str()) {
        return true;
    }
    looks_like_clock(&strip_time_decorations(&raw))
}

/// Uppercased special, or the bare clock reading.
pub fn normalize_time(s: &str) -> String {
    let raw = s.trim().to_ascii_uppercase();
    if SPECIAL_TIMES.contains(&raw.as_str()) {
        return raw;
    }
    strip_time_decorations(&raw)
}

fn strip_time_decorations(raw: &str) -> String {
    let mut t = strip_parentheticals(raw);
    if t.ends_with(|c: char| c.is_ascii_alphabetic()) {
        t.pop();
    }
    t.trim().to_string()
}

/// `d{1,2}.d{2}` optionally preceded by `d{1,2}:`.
fn looks_like_clock(t: &str) -> bool {
    let (minutes, seconds) = match t.split_once(':') {
        Some((m, s)) => (Some(m), s),
        None => (None, t),
    };
    if let Some(m) = minutes {
        if m.is_empty() || m.len() > 2 || !m.bytes().all(|b| b.is_ascii_digit()) {
            return false;
        }
    }
    let Some((whole, centis)) = seconds.split_once('.') else {
        return false;
    };
    !whole.is_empty()
        && whole.len() <= 2
        && whole.bytes().all(|b| b.is_ascii_digit())
        && centis.len() == 2
        && centis.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_like_accepts_clock_readings() {
        for v in ["22.31", "1:02.55", "10:15.00", "58.99Y", "1:23.45 (29.01)", "nt", "DQ"] {
            assert!(time_like(v), "{v:?} should be time-like");
        }
        for v in ["", "Riverside", "1:02", "123.45", "1:02.5", "12.345", "A Relay"] {
            assert!(!time_like(v), "{v:?} should not be time-like");
        }
    }

    #[test]
    fn normalize_time_strips_decorations() {
        assert_eq!(normalize_time("1:23.45 (29.01)"), "1:23.45");
        assert_eq!(normalize_time("58.99Y"), "58.99");
        assert_eq!(normalize_time("nt"), "NT");
    }

    const INDIVIDUAL_DOC: &str = r#"
        <html><body>
        <table class="nav"><tr><td>Home</td></tr></table>
        <table class="rankings">
          <thead>
            <tr><th colspan="4">Girls 100 Free</th></tr>
            <tr><th>Rank</th><th>Name</th><th>Team</th><th>Time (SCY)</th></tr>
          </thead>
          <tbody>
            <tr><td>1</td><td>Jane Doe</td><td>SPART</td><td>52.10</td></tr>
            <tr class="detail"><td colspan="4">25.01 / 27.09</td></tr>
            <tr><td>2</td><td>May Poe</td><td>RIVER</td><td>53.70Y</td></tr>
            <tr><td></td><td></td><td></td><td></td></tr>
            <tr><td>3</td><td>Ann Lee</td><td>NORTH</td><td>pending</td></tr>
          </tbody>
        </table>
        </body></html>
    "#;

    #[test]
    fn picks_the_table_with_headers_and_walks_rows() {
        let out = parse_doc(INDIVIDUAL_DOC);
        assert_eq!(out.headers.len(), 4);
        assert_eq!(out.header_index.name, Some(1));
        assert_eq!(out.rows.len(), 2);
        assert_eq!(
            out.rows[0],
            RawRow {
                name: s!("Jane Doe"),
                school_cell: s!("SPART"),
                team_cell: s!("SPART"),
                time: s!("52.10"),
            }
        );
        assert_eq!(out.rows[1].time, "53.70");
        assert_eq!(out.stats.rows_seen, 4);
        assert_eq!(out.stats.skipped_empty, 1);
        assert_eq!(out.stats.skipped_no_time, 1);
    }

    #[test]
    fn relay_table_without_name_column() {
        let doc = r#"
            <table>
              <tr><th>Rank</th><th>Team</th><th>Time</th></tr>
              <tr><td>1</td><td>SPART</td><td>1:48.22</td></tr>
              <tr><td>2</td><td>RIVER</td><td>1:50.01</td></tr>
            </table>
        "#;
        let out = parse_doc(doc);
        assert_eq!(out.header_index.name, None);
        assert_eq!(out.rows.len(), 2);
        assert!(out.rows.iter().all(|r| r.name.is_empty()));
        assert_eq!(out.rows[0].team_cell, "SPART");
    }

    #[test]
    fn time_found_outside_the_time_column() {
        // Shuffled columns: time sits where the site said Team.
        let doc = r#"
            <table>
              <tr><th>Name</th><th>Team</th></tr>
              <tr><td>Jo Ray</td><td>59.80</td></tr>
            </table>
        "#;
        let out = parse_doc(doc);
        assert_eq!(out.rows.len(), 1);
        assert_eq!(out.rows[0].time, "59.80");
    }

    #[test]
    fn markup_entities_and_nested_tags_are_cleaned() {
        let doc = r#"
            <table>
              <tr><th>Rank</th><th>Name</th><th>Team</th><th>Time</th></tr>
              <tr><td>1</td><td><a href="x">Lou&nbsp;Cruz</a></td><td><b>WEST</b></td><td>24.99</td></tr>
            </table>
        "#;
        let out = parse_doc(doc);
        assert_eq!(out.rows[0].name, "Lou Cruz");
        assert_eq!(out.rows[0].school_cell, "WEST");
    }

    #[test]
    fn no_usable_table_yields_empty_bundle() {
        let out = parse_doc("<html><body><p>maintenance</p></body></html>");
        assert!(out.rows.is_empty());
        assert!(out.headers.is_empty());

        let out = parse_doc("<table><tr><th>Only</th></tr></table>");
        assert!(out.rows.is_empty());
    }
}
