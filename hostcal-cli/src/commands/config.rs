use anyhow::Result;
use hostcal_core::config::HostcalConfig;
use owo_colors::OwoColorize;

pub fn run(config: &HostcalConfig) -> Result<()> {
    let config_path = HostcalConfig::config_path()?;

    println!("{}", "Paths".bold());
    println!("  Config:     {}", config_path.display());
    println!("  Bookings:   {}", config.bookings_path().display());
    println!();
    println!("{}", "Settings".bold());
    print!("{}", toml::to_string_pretty(config)?);

    Ok(())
}
