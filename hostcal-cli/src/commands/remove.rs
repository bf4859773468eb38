use anyhow::Result;
use hostcal_core::BookingStore;
use hostcal_core::config::HostcalConfig;
use owo_colors::OwoColorize;

use crate::render::uid_tail;

pub fn run(config: &HostcalConfig, index: usize) -> Result<()> {
    let path = config.bookings_path();
    let mut store = BookingStore::load(&path)?;

    let removed = store.remove(index)?;
    store.save(&path)?;

    println!(
        "{} {} (UID: ...{})",
        "  Removed:".red(),
        removed.status(),
        uid_tail(removed.identifier())
    );

    Ok(())
}
