use anyhow::Result;
use owo_colors::OwoColorize;
use slotbook_core::time_zone::TIME_ZONES;

use crate::render::Render;

pub fn run() -> Result<()> {
    println!("{}", "Time zones".bold());
    for entry in TIME_ZONES.iter() {
        println!("  {}", entry.render());
    }
    Ok(())
}
