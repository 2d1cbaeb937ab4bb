use std::path::PathBuf;

use rust_decimal::Decimal;
use thiserror::Error;

/// Typed feed failures, one variant per cause, so callers can tell
/// "no file" from "bad JSON" from "nothing to do".
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("no feed source provided")]
    NoSource,

    #[error("cannot read feed {}: {source}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("feed {} is not valid JSON: {source}", path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("feed {} must be a top-level JSON array", path.display())]
    NotAnArray { path: PathBuf },

    #[error("feed {} record {index} is malformed: {source}", path.display())]
    MalformedRecord {
        path: PathBuf,
        index: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("feed {} contains no records", path.display())]
    Empty { path: PathBuf },

    #[error("exchange rate must be positive, got {rate}")]
    InvalidExchangeRate { rate: Decimal },
}
