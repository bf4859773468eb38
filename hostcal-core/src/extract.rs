//! Reservation extraction from VCALENDAR documents.
//!
//! Extraction never fails. Anything that goes wrong degrades to an empty or
//! partial result, and the cause is recorded as a [`Diagnostic`] which is both
//! logged and handed back alongside the reservations.

use std::fmt;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::booking::RESERVED_SUMMARY;
use crate::ics::{VEvent, parse_calendar};
use crate::reservation::ParsedReservation;

/// Why part (or all) of a feed was not turned into reservations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// The feed could not be downloaded.
    TransportFailure { url: String, reason: String },
    /// The bytes are not a VCALENDAR document.
    MalformedDocument { reason: String },
    /// A reservation VEVENT lacks DTSTART, DTEND or UID and was dropped.
    IncompleteEvent {
        uid: Option<String>,
        missing: Vec<&'static str>,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::TransportFailure { url, reason } => {
                write!(f, "could not download {url}: {reason}")
            }
            Diagnostic::MalformedDocument { reason } => write!(f, "malformed calendar: {reason}"),
            Diagnostic::IncompleteEvent { uid, missing } => write!(
                f,
                "skipped event {} missing {}",
                uid.as_deref().unwrap_or("<no uid>"),
                missing.join("/")
            ),
        }
    }
}

/// Reservations pulled from one feed, plus whatever was skipped on the way.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Extraction {
    pub reservations: Vec<ParsedReservation>,
    pub diagnostics: Vec<Diagnostic>,
}

impl Extraction {
    /// An empty result caused by a single whole-feed failure.
    pub fn failed(diagnostic: Diagnostic) -> Self {
        Extraction {
            reservations: Vec::new(),
            diagnostics: vec![diagnostic],
        }
    }
}

/// Extract guest reservations from raw calendar bytes.
pub fn extract_reservations(raw: &[u8]) -> Vec<ParsedReservation> {
    extract(raw).reservations
}

/// Extract guest reservations and keep the diagnostics.
///
/// Only VEVENTs whose trimmed SUMMARY is exactly `Reserved` are returned,
/// in document order. Host blocks and any other summaries are filtered out
/// silently.
pub fn extract(raw: &[u8]) -> Extraction {
    let content = String::from_utf8_lossy(raw);

    let events = match parse_calendar(&content) {
        Ok(events) => events,
        Err(e) => {
            warn!(error = %e, "Failed to parse calendar feed");
            return Extraction::failed(Diagnostic::MalformedDocument {
                reason: e.to_string(),
            });
        }
    };

    let mut extraction = Extraction::default();

    for event in events {
        let Some(summary) = event.summary.as_deref() else {
            continue;
        };
        if summary.trim() != RESERVED_SUMMARY {
            debug!(summary, "Ignoring non-reservation event");
            continue;
        }

        match into_reservation(event) {
            Ok(reservation) => extraction.reservations.push(reservation),
            Err(diagnostic) => {
                warn!(%diagnostic, "Skipping VEVENT");
                extraction.diagnostics.push(diagnostic);
            }
        }
    }

    info!(
        reservations = extraction.reservations.len(),
        skipped = extraction.diagnostics.len(),
        "Extracted reservations"
    );

    extraction
}

fn into_reservation(event: VEvent) -> Result<ParsedReservation, Diagnostic> {
    match (event.start, event.end, event.uid) {
        (Some(start), Some(end), Some(uid)) => Ok(ParsedReservation {
            start: start.normalize(),
            end: end.normalize(),
            identifier: uid,
        }),
        (start, end, uid) => {
            let mut missing = Vec::new();
            if start.is_none() {
                missing.push("DTSTART");
            }
            if end.is_none() {
                missing.push("DTEND");
            }
            if uid.is_none() {
                missing.push("UID");
            }
            Err(Diagnostic::IncompleteEvent { uid, missing })
        }
    }
}
