use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

pub const SCHEMA_VERSION: u32 = 1;

pub const LOCAL_SOURCE: &str = "local";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitRecord {
    /// Repository name in remote mode, [`LOCAL_SOURCE`] in local mode.
    pub source: String,
    pub timestamp: DateTime<Utc>,
    pub author: Option<String>,
    pub message: Option<String>,
}

/// One calendar date with its commit count. `ordinal` is the proleptic
/// Gregorian day number (day 1 = 0001-01-01), strictly increasing in `date`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateBucket {
    pub date: NaiveDate,
    pub count: u32,
    pub ordinal: i64,
}

/// Schema for the `--json` bucket export.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub source: String,
    pub buckets: Vec<DateBucket>,
}
