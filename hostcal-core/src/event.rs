//! Calendar date/time values as they appear in ICS properties.
//!
//! A DTSTART or DTEND is either a bare calendar date or a date-time, and a
//! date-time carries its zone in one of three ways (UTC suffix, TZID
//! parameter, or not at all). [`EventTime`] keeps those cases apart so that
//! normalization can dispatch on them explicitly.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventTime {
    /// All-day value (`VALUE=DATE`).
    Date(NaiveDate),
    /// `20250601T140000Z`
    DateTimeUtc(DateTime<Utc>),
    /// `20250601T140000`, wall-clock time with no zone attached.
    DateTimeFloating(NaiveDateTime),
    /// `DTSTART;TZID=Europe/Paris:20250601T140000`
    DateTimeZoned { datetime: NaiveDateTime, tzid: String },
}

impl EventTime {
    /// Convert to a zone-aware instant.
    ///
    /// Bare dates become midnight UTC and floating date-times get UTC
    /// attached without shifting the wall clock. Values that already carry a
    /// zone keep it. A TZID the time-zone database does not know (or a wall
    /// clock that falls in a DST gap) is treated like a floating value.
    pub fn normalize(&self) -> DateTime<FixedOffset> {
        match self {
            EventTime::Date(date) => date.and_time(NaiveTime::MIN).and_utc().fixed_offset(),
            EventTime::DateTimeUtc(dt) => dt.fixed_offset(),
            EventTime::DateTimeFloating(naive) => naive.and_utc().fixed_offset(),
            EventTime::DateTimeZoned { datetime, tzid } => resolve_zoned(datetime, tzid)
                .unwrap_or_else(|| datetime.and_utc().fixed_offset()),
        }
    }
}

fn resolve_zoned(datetime: &NaiveDateTime, tzid: &str) -> Option<DateTime<FixedOffset>> {
    let tz: Tz = tzid.parse().ok()?;
    tz.from_local_datetime(datetime)
        .earliest()
        .map(|dt| dt.fixed_offset())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn naive(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[test]
    fn test_date_normalizes_to_utc_midnight() {
        let time = EventTime::Date(NaiveDate::from_ymd_opt(2025, 6, 1).unwrap());
        let normalized = time.normalize();

        assert_eq!(normalized.to_rfc3339(), "2025-06-01T00:00:00+00:00");
    }

    #[test]
    fn test_floating_keeps_wall_clock() {
        let time = EventTime::DateTimeFloating(naive(2025, 6, 1, 14, 0));
        let normalized = time.normalize();

        assert_eq!(normalized.to_rfc3339(), "2025-06-01T14:00:00+00:00");
    }

    #[test]
    fn test_utc_passes_through() {
        let dt = Utc.with_ymd_and_hms(2025, 6, 1, 14, 0, 0).unwrap();
        let normalized = EventTime::DateTimeUtc(dt).normalize();

        assert_eq!(normalized, dt.fixed_offset());
    }

    #[test]
    fn test_zoned_keeps_local_offset() {
        let time = EventTime::DateTimeZoned {
            datetime: naive(2025, 6, 1, 14, 0),
            tzid: "Europe/Paris".to_string(),
        };
        let normalized = time.normalize();

        assert_eq!(normalized.to_rfc3339(), "2025-06-01T14:00:00+02:00");
    }

    #[test]
    fn test_unknown_tzid_falls_back_to_utc() {
        let time = EventTime::DateTimeZoned {
            datetime: naive(2025, 6, 1, 14, 0),
            tzid: "Mars/Olympus_Mons".to_string(),
        };

        assert_eq!(time.normalize().to_rfc3339(), "2025-06-01T14:00:00+00:00");
    }
}
