// src/error.rs

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Crate-level failures. Per-row scrape oddities are not errors; malformed
/// rows are skipped and counted, see `scrape::ParseStats`.
#[derive(Debug, Error)]
pub enum Error {
    #[error("upstream request failed: {0}")]
    Upstream(#[from] reqwest::Error),

    #[error("upstream returned HTTP {status} for {url}")]
    UpstreamStatus { status: u16, url: String },

    #[error("allow-list {}: {}", .path.display(), .source)]
    AllowList {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("allow-list {} contains no school codes", .0.display())]
    EmptyAllowList(PathBuf),

    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Invalid or missing inbound filter params. Maps to HTTP 400.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueryError {
    #[error("missing required query param: {0}")]
    Missing(&'static str),

    #[error("unrecognized gender {0:?}")]
    Gender(String),

    #[error("unrecognized course {0:?}")]
    Course(String),

    #[error("event name exceeds {0} characters")]
    EventTooLong(usize),
}
