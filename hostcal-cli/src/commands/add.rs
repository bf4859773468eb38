use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use dialoguer::Select;
use hostcal_core::config::HostcalConfig;
use hostcal_core::{BookingStatus, BookingStore};
use owo_colors::OwoColorize;

use crate::render::{Render, uid_tail};

/// Check-in time used when only a date is given.
const DEFAULT_CHECK_IN: (u32, u32) = (14, 0);
/// Check-out time used when only a date is given.
const DEFAULT_CHECK_OUT: (u32, u32) = (11, 0);

pub fn run(config: &HostcalConfig, start: &str, end: &str, status: Option<&str>) -> Result<()> {
    let start = parse_stay_time(start, DEFAULT_CHECK_IN)?;
    let end = parse_stay_time(end, DEFAULT_CHECK_OUT)?;

    let status = match status {
        Some(s) => s.parse::<BookingStatus>()?,
        None => prompt_status()?,
    };

    let path = config.bookings_path();
    let mut store = BookingStore::load(&path)?;

    let booking = store.add(start, end, status)?;
    println!(
        "{} {} (UID: ...{})",
        "  Added:".green(),
        booking.status().render(),
        uid_tail(booking.identifier())
    );

    store.save(&path)?;

    Ok(())
}

fn prompt_status() -> Result<BookingStatus> {
    let options = [BookingStatus::Reserved, BookingStatus::NotAvailable];
    let labels: Vec<&str> = options.iter().map(|s| s.as_summary()).collect();

    let selection = Select::new()
        .with_prompt("  Reservation status")
        .items(&labels)
        .default(0)
        .interact()?;

    Ok(options[selection])
}

/// Parse "YYYY-MM-DDTHH:MM", "YYYY-MM-DD HH:MM" or a bare "YYYY-MM-DD".
///
/// A bare date gets `default_time` so stays always carry a time of day.
fn parse_stay_time(input: &str, default_time: (u32, u32)) -> Result<NaiveDateTime> {
    let input = input.trim();

    for format in ["%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(input, format) {
            return Ok(dt);
        }
    }

    let date = NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .with_context(|| format!("Could not parse date/time: \"{}\"", input))?;
    let (hour, minute) = default_time;
    let time = NaiveTime::from_hms_opt(hour, minute, 0)
        .with_context(|| format!("Invalid default time {hour}:{minute}"))?;

    Ok(date.and_time(time))
}
