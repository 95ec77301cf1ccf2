//! Calendar rules for the speed-control data set.
//!
//! Data was collected on weekdays between 2017-06-26 and 2017-09-30.
//! Weekends have no file at all, so they are filtered before any fetch.

use chrono::{Datelike, NaiveDate, Weekday};

/// First day with published data (a Monday).
pub fn min_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2017, 6, 26).expect("valid calendar date")
}

/// Last day of the collection period.
pub fn max_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2017, 9, 30).expect("valid calendar date")
}

/// Saturday and Sunday carry no data.
pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Key addressing exactly one remote resource (`YYYY-MM-DD`).
pub fn resource_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// German display format, `DD.MM.YYYY`.
pub fn format_display(date: NaiveDate) -> String {
    date.format("%d.%m.%Y").to_string()
}

/// Parse a `DD.MM.YYYY` string as shown in the date field.
pub fn parse_display(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%d.%m.%Y").ok()
}

/// Parse the `YYYY-MM-DD` wire form (native date-input value).
pub fn parse_key(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

/// Clamp an arbitrary date into the collection period.
pub fn clamp_to_range(date: NaiveDate) -> NaiveDate {
    date.clamp(min_date(), max_date())
}

/// Day before `date`, never leaving the collection period.
pub fn prev_day(date: NaiveDate) -> NaiveDate {
    clamp_to_range(date.pred_opt().unwrap_or(date))
}

/// Day after `date`, never leaving the collection period.
pub fn next_day(date: NaiveDate) -> NaiveDate {
    clamp_to_range(date.succ_opt().unwrap_or(date))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_range_endpoints() {
        assert_eq!(min_date(), d(2017, 6, 26));
        assert_eq!(max_date(), d(2017, 9, 30));
        assert_eq!(min_date().weekday(), Weekday::Mon);
    }

    #[test]
    fn test_saturday_is_weekend() {
        assert!(is_weekend(d(2017, 7, 1)));
    }

    #[test]
    fn test_sunday_is_weekend() {
        assert!(is_weekend(d(2017, 7, 2)));
    }

    #[test]
    fn test_tuesday_is_not_weekend() {
        assert!(!is_weekend(d(2017, 6, 27)));
    }

    #[test]
    fn test_max_date_is_a_saturday() {
        // The collection period deliberately ends on a no-data day.
        assert!(is_weekend(max_date()));
    }

    #[test]
    fn test_resource_key_format() {
        assert_eq!(resource_key(d(2017, 6, 27)), "2017-06-27");
        assert_eq!(resource_key(d(2017, 7, 3)), "2017-07-03");
    }

    #[test]
    fn test_display_roundtrip() {
        let date = d(2017, 8, 15);
        assert_eq!(format_display(date), "15.08.2017");
        assert_eq!(parse_display("15.08.2017"), Some(date));
    }

    #[test]
    fn test_parse_display_rejects_wire_form() {
        assert_eq!(parse_display("2017-08-15"), None);
    }

    #[test]
    fn test_parse_key() {
        assert_eq!(parse_key("2017-08-15"), Some(d(2017, 8, 15)));
        assert_eq!(parse_key("15.08.2017"), None);
    }

    #[test]
    fn test_clamp_before_range() {
        assert_eq!(clamp_to_range(d(2017, 1, 1)), min_date());
    }

    #[test]
    fn test_clamp_after_range() {
        assert_eq!(clamp_to_range(d(2026, 8, 7)), max_date());
    }

    #[test]
    fn test_clamp_inside_range() {
        assert_eq!(clamp_to_range(d(2017, 8, 15)), d(2017, 8, 15));
    }

    #[test]
    fn test_prev_day_stops_at_min() {
        assert_eq!(prev_day(d(2017, 6, 27)), min_date());
        assert_eq!(prev_day(min_date()), min_date());
    }

    #[test]
    fn test_next_day_stops_at_max() {
        assert_eq!(next_day(d(2017, 9, 29)), max_date());
        assert_eq!(next_day(max_date()), max_date());
    }

    #[test]
    fn test_next_day_crosses_month_boundary() {
        assert_eq!(next_day(d(2017, 6, 30)), d(2017, 7, 1));
    }
}
