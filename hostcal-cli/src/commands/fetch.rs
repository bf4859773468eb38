use anyhow::{Context, Result};
use hostcal_core::config::HostcalConfig;
use hostcal_core::remote::fetch_reservations;
use owo_colors::OwoColorize;
use url::Url;

use crate::render::{Render, pluralize};
use crate::utils::tui;

pub async fn run(config: &HostcalConfig, url: &str, json: bool) -> Result<()> {
    let url = feed_url(url)?;

    let spinner = tui::create_spinner(format!("Fetching {}", url.host_str().unwrap_or("feed")));
    let extraction = fetch_reservations(url.as_str(), &config.fetch).await;
    spinner.finish_and_clear();

    if json {
        println!("{}", serde_json::to_string_pretty(&extraction)?);
        return Ok(());
    }

    if extraction.reservations.is_empty() {
        println!("{}", "No reservations found".dimmed());
    } else {
        println!(
            "{}",
            format!(
                "{} {}",
                extraction.reservations.len(),
                pluralize("reservation", extraction.reservations.len())
            )
            .bold()
        );
        for reservation in &extraction.reservations {
            println!("  {}", reservation.render());
        }
    }

    for diagnostic in &extraction.diagnostics {
        println!("  {}", diagnostic.render());
    }

    Ok(())
}

/// Parse a feed URL, accepting `webcal://` as an alias for `https://`.
fn feed_url(input: &str) -> Result<Url> {
    let input = input.trim();
    let normalized = match input.strip_prefix("webcal://") {
        Some(rest) => format!("https://{rest}"),
        None => input.to_string(),
    };

    let url = Url::parse(&normalized).with_context(|| format!("Invalid feed URL: {input}"))?;
    if !matches!(url.scheme(), "http" | "https") {
        anyhow::bail!("Unsupported feed URL scheme: {}", url.scheme());
    }

    Ok(url)
}
