//! Calendar-date formatting helpers.

use chrono::{DateTime, Utc};

/// Formats a wall-clock instant as a compact `yyyyMMdd` stamp.
///
/// # Examples
///
/// ```
/// use alibi_domain::common::date_stamp;
/// use chrono::{TimeZone, Utc};
///
/// let now = Utc.with_ymd_and_hms(2024, 1, 5, 10, 30, 0).unwrap();
/// assert_eq!(date_stamp(now), "20240105");
/// ```
pub fn date_stamp(now: DateTime<Utc>) -> String {
    now.format("%Y%m%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_date_stamp_pads_month_and_day() {
        let now = Utc.with_ymd_and_hms(2025, 3, 7, 23, 59, 59).unwrap();
        assert_eq!(date_stamp(now), "20250307");
    }

    #[test]
    fn test_date_stamp_ignores_time_of_day() {
        let morning = Utc.with_ymd_and_hms(2025, 12, 31, 0, 0, 0).unwrap();
        let night = Utc.with_ymd_and_hms(2025, 12, 31, 23, 0, 0).unwrap();
        assert_eq!(date_stamp(morning), date_stamp(night));
    }
}
