//! ICS parsing using the icalendar crate's parser.

use icalendar::parser::{Component, read_calendar, unfold};
use icalendar::{CalendarDateTime, DatePerhapsTime};

use crate::error::{HostcalError, HostcalResult};
use crate::event::EventTime;

/// The properties of one VEVENT that reservation extraction cares about.
///
/// Every field is optional: remote feeds are not trusted to be complete, and
/// deciding what to do with a partial event is up to the caller. A DTSTART or
/// DTEND whose value cannot be read is reported as absent.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct VEvent {
    pub summary: Option<String>,
    pub start: Option<EventTime>,
    pub end: Option<EventTime>,
    pub uid: Option<String>,
}

/// Parse a VCALENDAR document and return its VEVENTs in document order.
///
/// VEVENTs are collected from any nesting depth; other component kinds are
/// skipped without looking at their properties.
pub fn parse_calendar(content: &str) -> HostcalResult<Vec<VEvent>> {
    let content = content.trim_start_matches('\u{feff}').trim_start();

    let starts_with_vcalendar = content
        .get(..15)
        .is_some_and(|head| head.eq_ignore_ascii_case("BEGIN:VCALENDAR"));
    if !starts_with_vcalendar {
        return Err(HostcalError::IcsParse(
            "document does not start with BEGIN:VCALENDAR".into(),
        ));
    }

    let unfolded = unfold(content);
    let calendar = read_calendar(&unfolded).map_err(|e| HostcalError::IcsParse(e.to_string()))?;

    let mut events = Vec::new();
    for component in &calendar.components {
        collect_vevents(component, &mut events);
    }

    Ok(events)
}

fn collect_vevents(component: &Component, events: &mut Vec<VEvent>) {
    if component.name.as_ref().eq_ignore_ascii_case("VEVENT") {
        events.push(read_vevent(component));
    }

    for child in &component.components {
        collect_vevents(child, events);
    }
}

fn read_vevent(vevent: &Component) -> VEvent {
    VEvent {
        summary: vevent.find_prop("SUMMARY").map(|p| p.val.to_string()),
        start: vevent
            .find_prop("DTSTART")
            .and_then(|p| DatePerhapsTime::try_from(p).ok())
            .map(to_event_time),
        end: vevent
            .find_prop("DTEND")
            .and_then(|p| DatePerhapsTime::try_from(p).ok())
            .map(to_event_time),
        uid: vevent.find_prop("UID").map(|p| p.val.to_string()),
    }
}

/// Convert icalendar's DatePerhapsTime to our EventTime, keeping the TZID
fn to_event_time(dpt: DatePerhapsTime) -> EventTime {
    match dpt {
        DatePerhapsTime::Date(d) => EventTime::Date(d),
        DatePerhapsTime::DateTime(cal_dt) => match cal_dt {
            CalendarDateTime::Utc(dt) => EventTime::DateTimeUtc(dt),
            CalendarDateTime::Floating(naive) => EventTime::DateTimeFloating(naive),
            CalendarDateTime::WithTimezone { date_time, tzid } => EventTime::DateTimeZoned {
                datetime: date_time,
                tzid,
            },
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};

    #[test]
    fn test_parse_airbnb_export() {
        let ics = "BEGIN:VCALENDAR\r\n\
PRODID:-//Airbnb Inc//Hosting Calendar 1.0//EN\r\n\
CALSCALE:GREGORIAN\r\n\
VERSION:2.0\r\n\
BEGIN:VEVENT\r\n\
DTEND;VALUE=DATE:20250604\r\n\
DTSTART;VALUE=DATE:20250601\r\n\
UID:1418fb94e984-51401b505dec1292fa6b395a@airbnb.com\r\n\
SUMMARY:Reserved\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n";

        let events = parse_calendar(ics).expect("Should parse");

        assert_eq!(events.len(), 1);
        let event = &events[0];
        assert_eq!(event.summary.as_deref(), Some("Reserved"));
        assert_eq!(
            event.uid.as_deref(),
            Some("1418fb94e984-51401b505dec1292fa6b395a@airbnb.com")
        );
        assert_eq!(
            event.start,
            Some(EventTime::Date(NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()))
        );
        assert_eq!(
            event.end,
            Some(EventTime::Date(NaiveDate::from_ymd_opt(2025, 6, 4).unwrap()))
        );
    }

    #[test]
    fn test_parse_datetime_variants() {
        let ics = r#"BEGIN:VCALENDAR
VERSION:2.0
PRODID:TEST
BEGIN:VEVENT
UID:zoned
SUMMARY:Reserved
DTSTART;TZID=Europe/Paris:20250601T140000
DTEND:20250603T110000Z
END:VEVENT
BEGIN:VEVENT
UID:floating
SUMMARY:Reserved
DTSTART:20250601T140000
DTEND:20250601
END:VEVENT
END:VCALENDAR"#;

        let events = parse_calendar(ics).expect("Should parse");
        assert_eq!(events.len(), 2);

        match &events[0].start {
            Some(EventTime::DateTimeZoned { tzid, datetime }) => {
                assert_eq!(tzid, "Europe/Paris");
                assert_eq!(datetime.to_string(), "2025-06-01 14:00:00");
            }
            other => panic!("Expected DateTimeZoned, got {:?}", other),
        }
        assert_eq!(
            events[0].end,
            Some(EventTime::DateTimeUtc(
                Utc.with_ymd_and_hms(2025, 6, 3, 11, 0, 0).unwrap()
            ))
        );
        assert!(matches!(events[1].start, Some(EventTime::DateTimeFloating(_))));
        assert!(matches!(events[1].end, Some(EventTime::Date(_))));
    }

    #[test]
    fn test_other_components_are_ignored() {
        let ics = r#"BEGIN:VCALENDAR
VERSION:2.0
PRODID:TEST
BEGIN:VTIMEZONE
TZID:Europe/Paris
BEGIN:STANDARD
DTSTART:19701025T030000
TZOFFSETFROM:+0200
TZOFFSETTO:+0100
END:STANDARD
END:VTIMEZONE
BEGIN:VTODO
UID:todo-1
SUMMARY:Reserved
END:VTODO
BEGIN:VEVENT
UID:event-1
SUMMARY:Reserved
DTSTART:20250601T140000
DTEND:20250603T110000
BEGIN:VALARM
ACTION:DISPLAY
TRIGGER:-PT15M
DESCRIPTION:Reminder
END:VALARM
END:VEVENT
END:VCALENDAR"#;

        let events = parse_calendar(ics).expect("Should parse");

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].uid.as_deref(), Some("event-1"));
    }

    #[test]
    fn test_missing_and_unreadable_properties_are_none() {
        let ics = r#"BEGIN:VCALENDAR
VERSION:2.0
PRODID:TEST
BEGIN:VEVENT
SUMMARY:Reserved
DTSTART:not-a-date
END:VEVENT
END:VCALENDAR"#;

        let events = parse_calendar(ics).expect("Should parse");

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].summary.as_deref(), Some("Reserved"));
        assert_eq!(events[0].start, None);
        assert_eq!(events[0].end, None);
        assert_eq!(events[0].uid, None);
    }

    #[test]
    fn test_folded_lines_are_unfolded() {
        let ics = "BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
PRODID:TEST\r\n\
BEGIN:VEVENT\r\n\
UID:abcdef01-2345-4678-9abc-def012345678-0123456789@air\r\n bnb.com\r\n\
SUMMARY:Reserved\r\n\
DTSTART:20250601T140000\r\n\
DTEND:20250603T110000\r\n\
END:VEVENT\r\n\
END:VCALENDAR";

        let events = parse_calendar(ics).expect("Should parse");

        assert_eq!(
            events[0].uid.as_deref(),
            Some("abcdef01-2345-4678-9abc-def012345678-0123456789@airbnb.com")
        );
    }

    #[test]
    fn test_non_calendar_input_is_rejected() {
        assert!(parse_calendar("<html><body>Not found</body></html>").is_err());
        assert!(parse_calendar("").is_err());
    }

    #[test]
    fn test_text_values_are_unescaped_once() {
        let ics = "BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
PRODID:TEST\r\n\
BEGIN:VEVENT\r\n\
UID:C:\\\\new\\,x\r\n\
SUMMARY:Reserved\\; late\r\n\
DTSTART:20250601T140000\r\n\
DTEND:20250603T110000\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n";

        let events = parse_calendar(ics).expect("Should parse");

        assert_eq!(events[0].uid.as_deref(), Some("C:\\new,x"));
        assert_eq!(events[0].summary.as_deref(), Some("Reserved; late"));
    }
}
