// src/schools.rs

//! The allow-list: which school codes may appear in output, plus a
//! name → code map for rows where the site prints the full school name.
//! Loaded once at startup from a `code,name` CSV.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use crate::csv::{parse_rows, Delim};
use crate::error::Error;

/// Uppercase, word characters only. `"spart "` → `"SPART"`.
pub fn normalize_code(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

/// Lookup key for school names: uppercase letters and digits only, so
/// `"Riverside  High"` and `"RIVERSIDE HIGH."` collide.
pub fn normalize_school_name(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

#[derive(Clone, Debug, Default)]
pub struct SchoolDirectory {
    allowed: HashSet<String>,
    name_to_code: HashMap<String, String>,
    listing: Vec<(String, String)>, // (code, display name) in file order
}

impl SchoolDirectory {
    pub fn load(path: &Path) -> Result<Self, Error> {
        let text = fs::read_to_string(path)
            .map_err(|source| Error::AllowList { path: path.to_path_buf(), source })?;
        let dir = Self::from_csv_text(&text);
        if dir.is_empty() {
            return Err(Error::EmptyAllowList(path.to_path_buf()));
        }
        Ok(dir)
    }

    /// First row is the header and is always skipped. A row's first field is
    /// the code; everything after the first comma is the display name
    /// (school names contain commas more often than quoting does).
    pub fn from_csv_text(text: &str) -> Self {
        let mut dir = Self::default();

        for parts in parse_rows(text, Delim::Csv).into_iter().skip(1) {
            let Some(raw_code) = parts.first() else { continue };
            let code = normalize_code(raw_code);
            if code.is_empty() {
                continue;
            }

            let name = parts.get(1..).map(|rest| rest.join(",")).unwrap_or_default();
            let name = name.trim().to_string();

            if !name.is_empty() {
                let key = normalize_school_name(&name);
                if !key.is_empty() {
                    dir.name_to_code.entry(key).or_insert_with(|| code.clone());
                }
            }

            if dir.allowed.insert(code.clone()) {
                dir.listing.push((code, name));
            }
        }

        dir
    }

    pub fn is_allowed(&self, code: &str) -> bool {
        self.allowed.contains(code)
    }

    /// Resolve a school display name (however spaced/cased) to its code.
    pub fn code_for_name(&self, name: &str) -> Option<&str> {
        let key = normalize_school_name(name);
        if key.is_empty() {
            return None;
        }
        self.name_to_code.get(&key).map(String::as_str)
    }

    /// `(code, name)` pairs in file order, for the UI school key.
    pub fn listing(&self) -> &[(String, String)] {
        &self.listing
    }

    pub fn len(&self) -> usize {
        self.allowed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.allowed.is_empty()
    }
}
