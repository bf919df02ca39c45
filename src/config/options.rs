// src/config/options.rs
use std::env;
use std::path::PathBuf;

use crate::csv::Delim;

use super::consts::{DEFAULT_ALLOWLIST, DEFAULT_BASE_URL, DEFAULT_BIND, UPSTREAM_ENV};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Tsv,
}

impl ExportFormat {
    pub fn ext(&self) -> &'static str {
        match self { ExportFormat::Csv => "csv", ExportFormat::Tsv => "tsv" }
    }
    pub fn delim(&self) -> Delim {
        match self { ExportFormat::Csv => Delim::Csv, ExportFormat::Tsv => Delim::Tsv }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerOptions {
    pub bind: String,              // listen address, host:port
    pub csv_path: PathBuf,         // school allow-list
    pub base_url: String,          // upstream reports base
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            bind: s!(DEFAULT_BIND),
            csv_path: PathBuf::from(DEFAULT_ALLOWLIST),
            base_url: env::var(UPSTREAM_ENV).unwrap_or_else(|_| s!(DEFAULT_BASE_URL)),
        }
    }
}

impl ServerOptions {
    /// Parse server flags. `Ok(None)` means help was printed; caller exits.
    pub fn from_args<I: Iterator<Item = String>>(
        mut args: I,
    ) -> Result<Option<Self>, Box<dyn std::error::Error>> {
        let mut opts = Self::default();
        while let Some(a) = args.next() {
            match a.as_str() {
                "--bind" => opts.bind = args.next().ok_or("Missing value for --bind")?,
                "--csv" => {
                    opts.csv_path = PathBuf::from(args.next().ok_or("Missing value for --csv")?);
                }
                "--upstream" => {
                    opts.base_url = args.next().ok_or("Missing value for --upstream")?;
                }
                "-h" | "--help" => {
                    eprintln!(include_str!("server_help.txt"));
                    return Ok(None);
                }
                _ => return Err(format!("Unknown arg: {}", a).into()),
            }
        }
        Ok(Some(opts))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(parts: &[&str]) -> impl Iterator<Item = String> + use<> {
        parts.iter().map(|s| s.to_string()).collect::<Vec<_>>().into_iter()
    }

    #[test]
    fn defaults_when_no_args() {
        let opts = ServerOptions::from_args(argv(&[])).unwrap().unwrap();
        assert_eq!(opts.bind, DEFAULT_BIND);
        assert_eq!(opts.csv_path, PathBuf::from(DEFAULT_ALLOWLIST));
    }

    #[test]
    fn flags_override_defaults() {
        let opts = ServerOptions::from_args(argv(&[
            "--bind", "0.0.0.0:9000", "--csv", "lists/d2.csv", "--upstream", "http://localhost:1",
        ]))
        .unwrap()
        .unwrap();
        assert_eq!(opts.bind, "0.0.0.0:9000");
        assert_eq!(opts.csv_path, PathBuf::from("lists/d2.csv"));
        assert_eq!(opts.base_url, "http://localhost:1");
    }

    #[test]
    fn unknown_flag_is_an_error() {
        assert!(ServerOptions::from_args(argv(&["--nope"])).is_err());
    }
}
