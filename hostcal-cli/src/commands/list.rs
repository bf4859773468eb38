use anyhow::Result;
use hostcal_core::BookingStore;
use hostcal_core::config::HostcalConfig;
use owo_colors::OwoColorize;

use crate::render::{Render, pluralize};

pub fn run(config: &HostcalConfig) -> Result<()> {
    let store = BookingStore::load(&config.bookings_path())?;

    println!(
        "{}",
        format!(
            "Current bookings ({} {})",
            store.len(),
            pluralize("booking", store.len())
        )
        .bold()
    );

    if store.is_empty() {
        println!("{}", "  No bookings added yet.".dimmed());
        return Ok(());
    }

    for (index, booking) in store.bookings().iter().enumerate() {
        println!("  {} {}", format!("[{index}]").dimmed(), booking.render());
    }

    Ok(())
}
