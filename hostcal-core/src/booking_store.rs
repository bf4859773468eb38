//! Ordered collection of bookings persisted as TOML.

use std::path::Path;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::booking::{Booking, BookingStatus};
use crate::error::{HostcalError, HostcalResult};

/// Bookings in the order they were admitted.
///
/// Stored on disk as a list of `[[bookings]]` tables. The store only
/// appends and removes; bookings themselves are never edited.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BookingStore {
    #[serde(default)]
    bookings: Vec<Booking>,
}

impl BookingStore {
    /// Load the store at `path`. A missing file is an empty store.
    ///
    /// Every stored booking must still satisfy the admission rules; a file
    /// edited by hand into an inverted interval or a foreign identifier is
    /// rejected rather than exported.
    pub fn load(path: &Path) -> HostcalResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let store: Self = toml::from_str(&content).map_err(|e| {
            HostcalError::Serialization(format!("Could not read {}: {e}", path.display()))
        })?;

        for (index, booking) in store.bookings.iter().enumerate() {
            if let Err(HostcalError::InvalidBooking(reason)) = booking.validate() {
                return Err(HostcalError::InvalidBooking(format!(
                    "booking {index} in {}: {reason}",
                    path.display()
                )));
            }
        }

        Ok(store)
    }

    pub fn save(&self, path: &Path) -> HostcalResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content =
            toml::to_string_pretty(self).map_err(|e| HostcalError::Serialization(e.to_string()))?;
        std::fs::write(path, content)?;

        Ok(())
    }

    /// Admit a new booking at the end of the list.
    pub fn add(
        &mut self,
        start: NaiveDateTime,
        end: NaiveDateTime,
        status: BookingStatus,
    ) -> HostcalResult<&Booking> {
        let booking = Booking::new(start, end, status)?;
        self.bookings.push(booking);
        Ok(&self.bookings[self.bookings.len() - 1])
    }

    /// Remove the booking at `index`, shifting later bookings down.
    pub fn remove(&mut self, index: usize) -> HostcalResult<Booking> {
        if index >= self.bookings.len() {
            return Err(HostcalError::BookingNotFound(index));
        }
        Ok(self.bookings.remove(index))
    }

    pub fn bookings(&self) -> &[Booking] {
        &self.bookings
    }

    pub fn len(&self) -> usize {
        self.bookings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bookings.is_empty()
    }
}
