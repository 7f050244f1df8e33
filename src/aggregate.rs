use std::collections::HashMap;

use chrono::NaiveDate;

use crate::model::{CommitRecord, DateBucket};
use crate::util::day_ordinal;

/// Fold commit records into per-date buckets, sorted ascending by date.
/// Records that differ only in time of day land in the same bucket.
pub fn date_buckets(records: &[CommitRecord]) -> Vec<DateBucket> {
    let mut counts: HashMap<NaiveDate, u32> = HashMap::new();

    for record in records {
        *counts.entry(record.timestamp.date_naive()).or_insert(0) += 1;
    }

    let mut buckets: Vec<DateBucket> = counts
        .into_iter()
        .map(|(date, count)| DateBucket {
            date,
            count,
            ordinal: day_ordinal(date),
        })
        .collect();

    buckets.sort_by(|a, b| a.date.cmp(&b.date));
    buckets
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};
    use pretty_assertions::assert_eq;

    fn record(timestamp: &str) -> CommitRecord {
        CommitRecord {
            source: "test".to_string(),
            timestamp: timestamp.parse::<DateTime<Utc>>().unwrap(),
            author: None,
            message: None,
        }
    }

    #[test]
    fn groups_by_calendar_date() {
        let records = vec![
            record("2024-01-01T09:00:00Z"),
            record("2024-01-01T17:30:00Z"),
        ];

        let buckets = date_buckets(&records);

        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].date.to_string(), "2024-01-01");
        assert_eq!(buckets[0].count, 2);
    }

    #[test]
    fn counts_sum_to_record_count() {
        let records = vec![
            record("2024-01-03T01:00:00Z"),
            record("2024-01-01T02:00:00Z"),
            record("2024-01-03T03:00:00Z"),
            record("2024-01-02T04:00:00Z"),
            record("2024-01-03T05:00:00Z"),
        ];

        let buckets = date_buckets(&records);

        let total: u32 = buckets.iter().map(|b| b.count).sum();
        assert_eq!(total as usize, records.len());
    }

    #[test]
    fn buckets_are_sorted_with_increasing_ordinals() {
        let records = vec![
            record("2024-03-15T12:00:00Z"),
            record("2023-11-02T12:00:00Z"),
            record("2024-01-20T12:00:00Z"),
        ];

        let buckets = date_buckets(&records);

        let dates: Vec<String> = buckets.iter().map(|b| b.date.to_string()).collect();
        assert_eq!(dates, vec!["2023-11-02", "2024-01-20", "2024-03-15"]);
        assert!(buckets.windows(2).all(|w| w[0].ordinal < w[1].ordinal));
    }

    #[test]
    fn empty_input_yields_no_buckets() {
        assert_eq!(date_buckets(&[]), Vec::new());
    }
}
