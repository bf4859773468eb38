//! TUI rendering traits for hostcal types.
//!
//! Extension traits that add colored terminal rendering to hostcal-core
//! types using owo_colors.

use hostcal_core::{Booking, BookingStatus, Diagnostic, ParsedReservation};
use owo_colors::OwoColorize;

/// How many trailing characters of a UID to show.
const UID_TAIL_LEN: usize = 15;

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for BookingStatus {
    fn render(&self) -> String {
        match self {
            BookingStatus::Reserved => self.as_summary().green().bold().to_string(),
            BookingStatus::NotAvailable => self.as_summary().yellow().bold().to_string(),
        }
    }
}

impl Render for Booking {
    fn render(&self) -> String {
        format!(
            "{}\n      {} {}\n      {} {}\n      {}",
            self.status().render(),
            "in ".green(),
            self.start().format("%Y-%m-%d %H:%M"),
            "out".red(),
            self.end().format("%Y-%m-%d %H:%M"),
            format!("UID: ...{}", uid_tail(self.identifier())).dimmed()
        )
    }
}

impl Render for ParsedReservation {
    fn render(&self) -> String {
        format!(
            "{} → {}  {}",
            self.start.format("%Y-%m-%d %H:%M %:z"),
            self.end.format("%Y-%m-%d %H:%M %:z"),
            self.identifier.dimmed()
        )
    }
}

impl Render for Diagnostic {
    fn render(&self) -> String {
        format!("{} {}", "!".yellow(), self.to_string().dimmed())
    }
}

/// Last few characters of a UID, enough to tell bookings apart.
pub fn uid_tail(uid: &str) -> &str {
    let start = uid
        .char_indices()
        .rev()
        .nth(UID_TAIL_LEN - 1)
        .map(|(i, _)| i)
        .unwrap_or(0);
    &uid[start..]
}

pub fn pluralize(word: &str, count: usize) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{}s", word)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uid_tail() {
        assert_eq!(
            uid_tail("4c5e1d2a-9f0b-4a7e-8c3d-2b1a0f9e8d7c-51401b505d@airbnb.com"),
            "505d@airbnb.com"
        );
        assert_eq!(uid_tail("short"), "short");
    }

    #[test]
    fn test_pluralize() {
        assert_eq!(pluralize("booking", 1), "booking");
        assert_eq!(pluralize("booking", 0), "bookings");
    }
}
