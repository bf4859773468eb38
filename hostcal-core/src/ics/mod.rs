//! ICS file generation and parsing.
//!
//! This module handles reading and writing .ics files according to RFC 5545.

mod generate;
mod parse;

pub use generate::{AIRBNB_PRODID, generate_calendar, generate_calendar_with_clock};
pub use parse::{VEvent, parse_calendar};
