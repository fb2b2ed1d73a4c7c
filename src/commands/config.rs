use anyhow::Result;
use owo_colors::OwoColorize;
use slotbook_core::config::Settings;

pub fn run() -> Result<()> {
    let config_path = Settings::config_path()?;
    let settings = Settings::load()?;

    println!("{}", "Paths".bold());
    println!("  Config:    {}", config_path.display());
    println!("  Endpoint:  {}", settings.meeting_url());
    println!();
    println!("{}", "Settings".bold());
    for line in settings.to_toml()?.lines() {
        println!("  {}", line);
    }

    Ok(())
}
