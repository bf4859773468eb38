use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use hostcal_core::BookingStore;
use hostcal_core::config::HostcalConfig;
use hostcal_core::ics::generate_calendar;
use owo_colors::OwoColorize;

use crate::render::pluralize;

pub const DEFAULT_EXPORT_FILE: &str = "airbnb_simulation.ics";

pub fn run(config: &HostcalConfig, output: &str) -> Result<()> {
    let store = BookingStore::load(&config.bookings_path())?;

    if store.is_empty() {
        anyhow::bail!(
            "No bookings to export.\n\n\
            Add one first with:\n  \
            hostcal add --start 2025-11-26 --end 2025-11-28 --status reserved"
        );
    }

    let ics = generate_calendar(store.bookings());

    if output == "-" {
        std::io::stdout().write_all(ics.as_bytes())?;
        return Ok(());
    }

    write_ics(Path::new(output), &ics)?;
    println!(
        "{}",
        format!(
            "  Wrote {} {} to {}",
            store.len(),
            pluralize("booking", store.len()),
            output
        )
        .green()
    );

    Ok(())
}

fn write_ics(path: &Path, ics: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Could not create {}", parent.display()))?;
    }
    std::fs::write(path, ics).with_context(|| format!("Could not write {}", path.display()))
}
