//! Excel serial date conversion (1900 date system).
//!
//! Serial 1 is 1900-01-01. The 1900 system carries the historical leap-year
//! bug: serial 60 is the non-existent 1900-02-29, so every date from
//! 1900-03-01 onward is one day further than a plain day count would give.

use chrono::{NaiveDate, NaiveDateTime, Timelike};

/// Convert a date-time to its 1900-system serial number.
///
/// The fractional part encodes the time of day. Returns `None` for dates
/// before 1899-12-31, which have no serial representation.
pub fn excel_serial_1900(value: NaiveDateTime) -> Option<f64> {
    let base = NaiveDate::from_ymd_opt(1899, 12, 31)?.and_hms_opt(0, 0, 0)?;
    if value < base {
        return None;
    }

    let days = (value.date() - base.date()).num_days();
    let seconds = value.time().num_seconds_from_midnight() as f64
        + value.time().nanosecond() as f64 / 1e9;
    let mut serial = days as f64 + seconds / 86_400.0;

    // Skip the phantom 1900-02-29
    if days > 59 {
        serial += 1.0;
    }
    Some(serial)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_serial_before_leap_bug() {
        assert_eq!(excel_serial_1900(ymd(1900, 1, 1)), Some(1.0));
        assert_eq!(excel_serial_1900(ymd(1900, 2, 28)), Some(59.0));
    }

    #[test]
    fn test_serial_after_leap_bug() {
        assert_eq!(excel_serial_1900(ymd(1900, 3, 1)), Some(61.0));
        assert_eq!(excel_serial_1900(ymd(2020, 1, 2)), Some(43832.0));
        assert_eq!(excel_serial_1900(ymd(2024, 3, 12)), Some(45363.0));
    }

    #[test]
    fn test_serial_with_time() {
        let noon = NaiveDate::from_ymd_opt(2020, 1, 2)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        assert_eq!(excel_serial_1900(noon), Some(43832.5));
    }

    #[test]
    fn test_serial_out_of_range() {
        assert_eq!(excel_serial_1900(ymd(1850, 6, 1)), None);
    }
}
