// src/specs/rankings.rs

//! Shape of the upstream rankings table: canonical columns, the header
//! aliases the site cycles through, and the URL that produces the page.

use crate::config::consts::{DIV_ID, ORG_ID, RANKINGS_PAGE};
use crate::core::sanitize::strip_parentheticals;
use crate::query::EventQuery;

/// The posted table layout, in order. Individual events carry all four;
/// relay events drop Name.
pub const EXPECTED_HEADERS: [&str; 4] = ["rank", "name", "team", "time"];

/// Lowercase, drop parenthetical qualifiers, squeeze out all whitespace.
/// `"Time (SCY)"` and `"TIME"` both become `"time"`.
pub fn normalize_header(h: &str) -> String {
    strip_parentheticals(h)
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Column positions resolved from the header row. First match wins;
/// `school` deliberately aliases to `team` so a Team column can answer
/// school lookups when the site omits a School column.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HeaderIndex {
    pub rank: Option<usize>,
    pub name: Option<usize>,
    pub school: Option<usize>,
    pub team: Option<usize>,
    pub time: Option<usize>,
}

impl HeaderIndex {
    pub fn from_cells(cells: &[String]) -> Self {
        let mut idx = Self::default();
        for (i, raw) in cells.iter().enumerate() {
            let h = normalize_header(raw);
            if idx.rank.is_none() && (h == "#" || h == "rank") {
                idx.rank = Some(i);
            }
            if idx.name.is_none() && matches!(h.as_str(), "name" | "swimmer" | "athlete") {
                idx.name = Some(i);
            }
            if idx.school.is_none()
                && matches!(h.as_str(), "school" | "highschool" | "hs" | "team")
            {
                idx.school = Some(i);
            }
            if idx.team.is_none() && h == "team" {
                idx.team = Some(i);
            }
            if idx.time.is_none() && h.starts_with("time") {
                idx.time = Some(i);
            }
        }
        idx
    }

    /// Exact match against the posted `Rank, Name, Team, Time` layout.
    /// Only used for a debug log when the site drifts.
    pub fn conforms(cells: &[String]) -> bool {
        cells.len() == EXPECTED_HEADERS.len()
            && cells
                .iter()
                .zip(EXPECTED_HEADERS)
                .all(|(c, want)| normalize_header(c) == want)
    }
}

/// Upstream URL for one event lookup.
pub fn rankings_url(base: &str, q: &EventQuery) -> String {
    let endpoint = join!(base.trim_end_matches('/'), "/", RANKINGS_PAGE);
    format!(
        "{endpoint}?course={}&div_id={DIV_ID}&org_id={ORG_ID}&gender={}&event={}",
        q.course.code(),
        q.gender.code(),
        percent_encode(&q.event),
    )
}

/// Query-component encoding. Event names are short ASCII ("200 Medley
/// Relay"); anything outside the unreserved set gets %XX-escaped.
fn percent_encode(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for b in s.bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(b as char);
            }
            _ => out.push_str(&format!("%{:02X}", b)),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::{Course, Gender};

    fn cells(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn normalize_header_variants() {
        assert_eq!(normalize_header("Time (SCY)"), "time");
        assert_eq!(normalize_header(" High School "), "highschool");
        assert_eq!(normalize_header("RANK"), "rank");
    }

    #[test]
    fn index_resolves_aliases() {
        let idx = HeaderIndex::from_cells(&cells(&["#", "Swimmer", "HS", "Time (SCY)"]));
        assert_eq!(idx.rank, Some(0));
        assert_eq!(idx.name, Some(1));
        assert_eq!(idx.school, Some(2));
        assert_eq!(idx.team, None);
        assert_eq!(idx.time, Some(3));
    }

    #[test]
    fn team_column_answers_both_school_and_team() {
        let idx = HeaderIndex::from_cells(&cells(&["Rank", "Team", "Time"]));
        assert_eq!(idx.school, Some(1));
        assert_eq!(idx.team, Some(1));
        assert_eq!(idx.name, None);
    }

    #[test]
    fn conformity_check() {
        assert!(HeaderIndex::conforms(&cells(&["Rank", "Name", "Team", "Time"])));
        assert!(!HeaderIndex::conforms(&cells(&["Rank", "Name", "Time"])));
    }

    #[test]
    fn url_encodes_event_and_codes() {
        let q = EventQuery {
            gender: Gender::Girls,
            event: s!("200 Medley Relay"),
            course: Course::Scy,
        };
        let url = rankings_url("https://example.test/reports/", &q);
        assert_eq!(
            url,
            "https://example.test/reports/report_rankings_enhanced.php?course=Y&div_id=2&org_id=1&gender=F&event=200%20Medley%20Relay"
        );
    }
}
