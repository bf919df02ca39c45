// src/cli.rs
use std::{env, fs, path::PathBuf};

use crate::config::consts::{DEFAULT_ALLOWLIST, DEFAULT_BASE_URL, UPSTREAM_ENV};
use crate::config::options::ExportFormat;
use crate::core::net::HttpSource;
use crate::csv::rows_to_string;
use crate::query::EventQuery;
use crate::results::{self, ResultRecord};
use crate::schools::SchoolDirectory;

pub struct Params {
    pub gender: Option<String>,
    pub event: Option<String>,
    pub course: Option<String>,
    pub csv_path: PathBuf,           // school allow-list
    pub out: Option<PathBuf>,        // write here instead of stdout table
    pub format: ExportFormat,
    pub include_headers: bool,
    pub base_url: String,
}

impl Params {
    pub fn new() -> Self {
        Self {
            gender: None,
            event: None,
            course: None,
            csv_path: PathBuf::from(DEFAULT_ALLOWLIST),
            out: None,
            format: ExportFormat::Csv,
            include_headers: false,
            base_url: env::var(UPSTREAM_ENV).unwrap_or_else(|_| s!(DEFAULT_BASE_URL)),
        }
    }
}

impl Default for Params {
    fn default() -> Self {
        Self::new()
    }
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let params = parse_cli()?;

    let query = EventQuery::new(
        params.gender.as_deref(),
        params.event.as_deref(),
        params.course.as_deref(),
    )?;
    let schools = SchoolDirectory::load(&params.csv_path)?;
    let source = HttpSource::new()?;

    let rt = tokio::runtime::Builder::new_current_thread().enable_all().build()?;
    let records = rt.block_on(results::lookup(&source, &params.base_url, &query, &schools))?;

    match &params.out {
        Some(path) => {
            let text = export_string(&records, &params);
            fs::write(path, text)?;
            eprintln!("Wrote {} records to {}", records.len(), path.display());
        }
        None => print_table(&records),
    }
    Ok(())
}

fn parse_cli() -> Result<Params, Box<dyn std::error::Error>> {
    let mut params = Params::new();
    let mut args = env::args().skip(1);
    while let Some(a) = args.next() {
        match a.as_str() {
            "-g" | "--gender" => params.gender = Some(args.next().ok_or("Missing value for --gender")?),
            "-e" | "--event" => params.event = Some(args.next().ok_or("Missing value for --event")?),
            "-c" | "--course" => params.course = Some(args.next().ok_or("Missing value for --course")?),
            "--csv" => params.csv_path = PathBuf::from(args.next().ok_or("Missing value for --csv")?),
            "-o" | "--out" => params.out = Some(PathBuf::from(args.next().ok_or("Missing output path")?)),
            "--format" => {
                let v = args.next().ok_or("Missing value for --format")?;
                params.format = match v.to_ascii_lowercase().as_str() {
                    "csv" => ExportFormat::Csv,
                    "tsv" => ExportFormat::Tsv,
                    other => return Err(format!("Unknown format: {}", other).into()),
                };
            }
            "--include-headers" => params.include_headers = true,
            "--upstream" => params.base_url = args.next().ok_or("Missing value for --upstream")?,
            "-h" | "--help" => {
                eprintln!(include_str!("cli_help.txt"));
                std::process::exit(0);
            }
            _ => return Err(format!("Unknown arg: {}", a).into()),
        }
    }
    Ok(params)
}

/* ---------------- output ---------------- */

pub fn export_headers() -> Vec<String> {
    ["Rank", "Name", "School", "Time"].map(String::from).to_vec()
}

pub fn export_rows(records: &[ResultRecord]) -> Vec<Vec<String>> {
    records
        .iter()
        .enumerate()
        .map(|(i, r)| {
            vec![(i + 1).to_string(), r.name.clone(), r.school_code.clone(), r.time.clone()]
        })
        .collect()
}

fn export_string(records: &[ResultRecord], params: &Params) -> String {
    let headers = params.include_headers.then(export_headers);
    rows_to_string(&export_rows(records), &headers, params.format.delim())
}

fn print_table(records: &[ResultRecord]) {
    if records.is_empty() {
        println!("No results.");
        return;
    }
    let rows = export_rows(records);
    let name_w = rows.iter().map(|r| r[1].len()).max().unwrap_or(4).max(4);
    println!("{:>4}  {:<name_w$}  {:<6}  {}", "Rank", "Name", "School", "Time");
    for r in rows {
        println!("{:>4}  {:<name_w$}  {:<6}  {}", r[0], r[1], r[2], r[3]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, code: &str, time: &str) -> ResultRecord {
        ResultRecord { name: s!(name), school_code: s!(code), time: s!(time) }
    }

    #[test]
    fn export_rows_carry_rank() {
        let rows = export_rows(&[record("Jane", "SPART", "52.10"), record("May", "RIVER", "53.70")]);
        assert_eq!(rows[0][0], "1");
        assert_eq!(rows[1][0], "2");
        assert_eq!(rows[1][2], "RIVER");
    }

    #[test]
    fn export_string_respects_headers_flag() {
        let mut params = Params::new();
        params.include_headers = true;
        let text = export_string(&[record("Jane", "SPART", "52.10")], &params);
        assert_eq!(text, "Rank,Name,School,Time\n1,Jane,SPART,52.10\n");
    }
}
