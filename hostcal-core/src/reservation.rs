//! Guest reservations read back from a calendar feed.

use chrono::{DateTime, FixedOffset};
use serde::Serialize;

/// A guest stay extracted from a remote calendar.
///
/// Times are always zone-aware. No ordering between `start` and `end` is
/// guaranteed: the feed is passed through as published.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedReservation {
    pub start: DateTime<FixedOffset>,
    pub end: DateTime<FixedOffset>,
    pub identifier: String,
}
