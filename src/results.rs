// src/results.rs

//! Turn scraped rows into the records the API serves: resolve each row to a
//! canonical school code, drop rows outside the allow-list, split
//! individuals from relays, dedup, and order by time.

use serde::Serialize;

use crate::core::net::DocumentSource;
use crate::core::sanitize::is_placeholder;
use crate::error::Error;
use crate::query::EventQuery;
use crate::schools::{normalize_code, SchoolDirectory};
use crate::scrape::{self, RankingsBundle, RawRow, SPECIAL_TIMES};

/// Wire shape: `{"name": …, "schoolCode": …, "time": …}`.
/// `name` is empty for relay entries.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ResultRecord {
    pub name: String,
    pub school_code: String,
    pub time: String,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AssembleStats {
    pub rows_in: usize,
    pub skipped_no_school: usize,
    pub skipped_not_allowed: usize,
    pub kept: usize,
}

/// One-call lookup: fetch, parse, assemble.
pub async fn lookup(
    source: &dyn DocumentSource,
    base_url: &str,
    query: &EventQuery,
    schools: &SchoolDirectory,
) -> Result<Vec<ResultRecord>, Error> {
    let bundle = scrape::fetch_and_extract(source, base_url, query).await?;
    Ok(assemble(&bundle, schools))
}

pub fn assemble(bundle: &RankingsBundle, schools: &SchoolDirectory) -> Vec<ResultRecord> {
    let mut stats = AssembleStats { rows_in: bundle.rows.len(), ..Default::default() };

    let mut individuals: Vec<ResultRecord> = Vec::new();
    let mut relays: Vec<ResultRecord> = Vec::new();

    for row in &bundle.rows {
        let Some(code) = resolve_school_code(row, schools) else {
            stats.skipped_no_school += 1;
            continue;
        };
        if !schools.is_allowed(&code) {
            stats.skipped_not_allowed += 1;
            continue;
        }
        stats.kept += 1;

        let record = ResultRecord {
            name: row.name.trim().to_string(),
            school_code: code,
            time: row.time.clone(),
        };
        if is_relay_entry(&record.name) {
            relays.push(record);
        } else {
            individuals.push(record);
        }
    }

    // A swimmer appears once per course/season split; keep the fastest.
    let mut merged = fastest_per_swimmer(individuals);

    // Relays carry no swimmer name; only exact repeats are duplicates.
    relays.dedup_by(|a, b| a.school_code == b.school_code && a.name == b.name && a.time == b.time);
    merged.extend(relays);

    merged.sort_by(|a, b| {
        time_sort_key(&a.time)
            .cmp(&time_sort_key(&b.time))
            .then_with(|| a.name.cmp(&b.name))
            .then_with(|| a.school_code.cmp(&b.school_code))
    });

    tracing::debug!(?stats, out = merged.len(), "assembled result records");
    merged
}

/* ---------------- school resolution ---------------- */

/// School column first: a bare code token is taken as-is, a school name is
/// looked up in the directory. Team column as last resort, normalized.
fn resolve_school_code(row: &RawRow, schools: &SchoolDirectory) -> Option<String> {
    if !is_placeholder(&row.school_cell) {
        if is_code_token(&row.school_cell) {
            return Some(normalize_code(&row.school_cell));
        }
        if let Some(code) = schools.code_for_name(&row.school_cell) {
            return Some(code.to_string());
        }
    }
    let team = normalize_code(&row.team_cell);
    if !team.is_empty() {
        return Some(team);
    }
    None
}

/// Short all-caps alphanumeric token, the way the site prints school codes.
pub fn is_code_token(s: &str) -> bool {
    let v = s.trim();
    (2..=6).contains(&v.len())
        && v.bytes().all(|b| b.is_ascii_uppercase() || b.is_ascii_digit())
}

/// Relay designations: empty name (the table had no Name column) or the
/// site's "A Relay" / "Relay" labels.
pub fn is_relay_entry(name: &str) -> bool {
    let v = name.trim();
    if v.is_empty() {
        return true;
    }
    let up = v.to_ascii_uppercase();
    match up.strip_suffix("RELAY") {
        Some(rest) => {
            let rest = rest.trim_end();
            rest.is_empty() || (rest.len() == 1 && rest.bytes().all(|b| b.is_ascii_uppercase()))
        }
        None => false,
    }
}

/* ---------------- dedup and ordering ---------------- */

fn fastest_per_swimmer(records: Vec<ResultRecord>) -> Vec<ResultRecord> {
    let mut out: Vec<ResultRecord> = Vec::with_capacity(records.len());
    for r in records {
        match out.iter_mut().find(|o| o.name.eq_ignore_ascii_case(&r.name)) {
            Some(best) => {
                if time_sort_key(&r.time) < time_sort_key(&best.time) {
                    *best = r;
                }
            }
            None => out.push(r),
        }
    }
    out
}

/// Centiseconds for real times. `NT`/`DQ`/`NS`/`DNF` and anything
/// unparseable sort last.
pub fn time_to_centis(t: &str) -> Option<u32> {
    if SPECIAL_TIMES.contains(&t) {
        return None;
    }
    let (minutes, rest) = match t.split_once(':') {
        Some((m, r)) => (m.parse::<u32>().ok()?, r),
        None => (0, t),
    };
    let (secs, centis) = rest.split_once('.')?;
    let secs = secs.parse::<u32>().ok()?;
    let centis = centis.parse::<u32>().ok()?;
    Some(minutes * 60_00 + secs * 100 + centis)
}

fn time_sort_key(t: &str) -> (u8, u32) {
    match time_to_centis(t) {
        Some(c) => (0, c),
        None => (1, 0),
    }
}
