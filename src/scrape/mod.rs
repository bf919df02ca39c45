// src/scrape/mod.rs
mod rankings;

pub use rankings::{
    fetch_and_extract, normalize_time, parse_doc, time_like, ParseStats, RankingsBundle, RawRow,
    SPECIAL_TIMES,
};
