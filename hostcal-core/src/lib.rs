//! Airbnb-style hosting calendars.
//!
//! This crate covers both directions of the format:
//! - `ics::generate_calendar` turns bookings into a VCALENDAR document laid
//!   out the way Airbnb's hosting export is
//! - `extract` pulls guest reservations back out of any calendar feed,
//!   tolerating malformed or partial input
//!
//! `remote` downloads feeds, `booking_store` keeps bookings between runs and
//! `config` holds user settings.

pub mod booking;
pub mod booking_store;
pub mod config;
pub mod error;
pub mod event;
pub mod extract;
pub mod ics;
pub mod remote;
pub mod reservation;

pub use booking::{Booking, BookingStatus};
pub use booking_store::BookingStore;
pub use error::{HostcalError, HostcalResult};
pub use event::EventTime;
pub use extract::{Diagnostic, Extraction, extract, extract_reservations};
pub use reservation::ParsedReservation;
