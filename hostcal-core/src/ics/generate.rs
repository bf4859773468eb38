//! ICS generation in Airbnb's hosting-calendar layout.

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::booking::Booking;

/// PRODID Airbnb stamps on its hosting calendar exports.
pub const AIRBNB_PRODID: &str = "-//Airbnb Inc//Hosting Calendar 1.0//EN";

/// Maximum content line length in octets, excluding the CRLF (RFC 5545 3.1).
const MAX_LINE_OCTETS: usize = 75;

/// Generate a VCALENDAR document for the given bookings, in order.
///
/// DTSTAMP is read from the system clock once per event.
pub fn generate_calendar(bookings: &[Booking]) -> String {
    generate_calendar_with_clock(bookings, Utc::now)
}

/// Same as [`generate_calendar`], with the DTSTAMP source supplied by the caller.
pub fn generate_calendar_with_clock<F>(bookings: &[Booking], mut now: F) -> String
where
    F: FnMut() -> DateTime<Utc>,
{
    let mut buf = String::with_capacity(128 + bookings.len() * 256);
    let mut writer = FoldedWriter::new(&mut buf);

    writer.raw_line("BEGIN:VCALENDAR");
    writer.raw_line(&format!("PRODID:{AIRBNB_PRODID}"));
    writer.raw_line("VERSION:2.0");
    writer.raw_line("CALSCALE:GREGORIAN");

    for booking in bookings {
        writer.raw_line("BEGIN:VEVENT");
        writer.text_property("SUMMARY", booking.status().as_summary());
        // Always a date-time: a bare date would turn the stay into an all-day block
        writer.floating_property("DTSTART", &booking.start());
        writer.floating_property("DTEND", &booking.end());
        writer.text_property("UID", booking.identifier());
        writer.utc_property("DTSTAMP", &now());
        writer.raw_line("END:VEVENT");
    }

    writer.raw_line("END:VCALENDAR");

    buf
}

/// Writes content lines, folding anything longer than 75 octets.
struct FoldedWriter<'a> {
    buf: &'a mut String,
    current_line_len: usize,
}

impl<'a> FoldedWriter<'a> {
    fn new(buf: &'a mut String) -> Self {
        Self {
            buf,
            current_line_len: 0,
        }
    }

    fn write_str(&mut self, s: &str) {
        for c in s.chars() {
            self.write_char(c);
        }
    }

    fn write_char(&mut self, c: char) {
        let len = c.len_utf8();
        if self.current_line_len + len > MAX_LINE_OCTETS {
            self.buf.push_str("\r\n ");
            self.current_line_len = 1 + len;
        } else {
            self.current_line_len += len;
        }
        self.buf.push(c);
    }

    fn end_line(&mut self) {
        self.buf.push_str("\r\n");
        self.current_line_len = 0;
    }

    fn raw_line(&mut self, line: &str) {
        self.write_str(line);
        self.end_line();
    }

    fn text_property(&mut self, name: &str, value: &str) {
        self.write_str(name);
        self.write_char(':');
        self.write_str(&escape_text(value));
        self.end_line();
    }

    fn floating_property(&mut self, name: &str, value: &NaiveDateTime) {
        self.raw_line(&format!("{name}:{}", value.format("%Y%m%dT%H%M%S")));
    }

    fn utc_property(&mut self, name: &str, value: &DateTime<Utc>) {
        self.raw_line(&format!("{name}:{}", value.format("%Y%m%dT%H%M%SZ")));
    }
}

/// Escape a TEXT value (RFC 5545 3.3.11).
fn escape_text(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            ';' => escaped.push_str("\\;"),
            ',' => escaped.push_str("\\,"),
            '\n' => escaped.push_str("\\n"),
            '\r' => {}
            _ => escaped.push(c),
        }
    }
    escaped
}
