//! Host-side booking records that feed the calendar generator.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{HostcalError, HostcalResult};

/// SUMMARY text of a guest booking.
pub const RESERVED_SUMMARY: &str = "Reserved";
/// SUMMARY text of a host-side block.
pub const NOT_AVAILABLE_SUMMARY: &str = "Airbnb (Not available)";

/// Reservation status, written verbatim as the VEVENT SUMMARY.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BookingStatus {
    #[serde(rename = "Reserved")]
    Reserved,
    #[serde(rename = "Airbnb (Not available)")]
    NotAvailable,
}

impl BookingStatus {
    pub fn as_summary(&self) -> &'static str {
        match self {
            BookingStatus::Reserved => RESERVED_SUMMARY,
            BookingStatus::NotAvailable => NOT_AVAILABLE_SUMMARY,
        }
    }

    pub fn from_summary(summary: &str) -> Option<Self> {
        match summary {
            RESERVED_SUMMARY => Some(BookingStatus::Reserved),
            NOT_AVAILABLE_SUMMARY => Some(BookingStatus::NotAvailable),
            _ => None,
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_summary())
    }
}

impl FromStr for BookingStatus {
    type Err = HostcalError;

    /// Accepts the exact summary text or the short names `reserved` / `blocked`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(status) = BookingStatus::from_summary(s) {
            return Ok(status);
        }
        match s.to_ascii_lowercase().as_str() {
            "reserved" => Ok(BookingStatus::Reserved),
            "blocked" | "not-available" => Ok(BookingStatus::NotAvailable),
            _ => Err(HostcalError::InvalidBooking(format!(
                "unknown status '{s}' (expected 'reserved' or 'blocked')"
            ))),
        }
    }
}

/// A single reservation or block on the hosting calendar.
///
/// Bookings are never edited after creation. To change one, remove it and
/// admit a new one, which gets a fresh identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    identifier: String,
    start: NaiveDateTime,
    end: NaiveDateTime,
    status: BookingStatus,
}

impl Booking {
    /// Admit a booking, rejecting empty or inverted intervals.
    pub fn new(start: NaiveDateTime, end: NaiveDateTime, status: BookingStatus) -> HostcalResult<Self> {
        check_interval(start, end)?;

        Ok(Booking {
            identifier: generate_airbnb_uid(),
            start,
            end,
            status,
        })
    }

    /// Re-check the admission rules on a booking that did not come through
    /// [`Booking::new`], such as one read back from disk.
    pub fn validate(&self) -> HostcalResult<()> {
        check_interval(self.start, self.end)?;
        if !is_airbnb_uid(&self.identifier) {
            return Err(HostcalError::InvalidBooking(format!(
                "malformed identifier '{}'",
                self.identifier
            )));
        }
        Ok(())
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    pub fn end(&self) -> NaiveDateTime {
        self.end
    }

    pub fn status(&self) -> BookingStatus {
        self.status
    }
}

fn check_interval(start: NaiveDateTime, end: NaiveDateTime) -> HostcalResult<()> {
    if end <= start {
        return Err(HostcalError::InvalidBooking(
            "check-out must be after check-in".into(),
        ));
    }
    Ok(())
}

/// Generate a UID shaped like Airbnb's: `<uuid4>-<10 hex chars>@airbnb.com`.
pub fn generate_airbnb_uid() -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!("{}-{}@airbnb.com", Uuid::new_v4(), &suffix[..10])
}

/// Whether `uid` has the shape produced by [`generate_airbnb_uid`].
pub fn is_airbnb_uid(uid: &str) -> bool {
    let Some(local) = uid.strip_suffix("@airbnb.com") else {
        return false;
    };
    // 36-char hyphenated uuid, a hyphen, then 10 hex chars
    if local.len() != 36 + 1 + 10 || !local.is_char_boundary(36) {
        return false;
    }
    let (uuid_part, tail) = local.split_at(36);
    Uuid::parse_str(uuid_part).is_ok()
        && tail.starts_with('-')
        && tail[1..].chars().all(|c| c.is_ascii_hexdigit())
}
