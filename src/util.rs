use chrono::{Datelike, NaiveDate};

/// Proleptic Gregorian day number of `date`; day 1 is 0001-01-01.
pub fn day_ordinal(date: NaiveDate) -> i64 {
    i64::from(date.num_days_from_ce())
}

pub fn date_from_ordinal(ordinal: i64) -> Option<NaiveDate> {
    i32::try_from(ordinal)
        .ok()
        .and_then(NaiveDate::from_num_days_from_ce_opt)
}

pub fn day_label(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn ordinal_of_known_dates() {
        assert_eq!(day_ordinal(date(1, 1, 1)), 1);
        assert_eq!(day_ordinal(date(1970, 1, 1)), 719_163);
    }

    #[test]
    fn ordinal_is_monotonic() {
        let earlier = date(2023, 12, 31);
        let later = date(2024, 1, 1);
        assert!(day_ordinal(earlier) < day_ordinal(later));
    }

    #[test]
    fn ordinal_round_trips() {
        let d = date(2024, 2, 29);
        assert_eq!(date_from_ordinal(day_ordinal(d)), Some(d));
    }

    #[test]
    fn out_of_range_ordinal_is_none() {
        assert_eq!(date_from_ordinal(i64::MAX), None);
    }

    #[test]
    fn label_is_iso_formatted() {
        assert_eq!(day_label(date(2024, 3, 7)), "2024-03-07");
    }
}
