use anyhow::Result;
use owo_colors::OwoColorize;
use slotbook_core::booking::MEETING_DURATION;
use slotbook_core::slot::{TimeSlot, SLOTS};

use crate::render::Render;

pub fn run() -> Result<()> {
    println!("{} {}", "Available slots".bold(), format!("({} each)", MEETING_DURATION).dimmed());
    for label in SLOTS {
        let slot = TimeSlot::parse(label)?;
        println!("  {}", slot.render());
    }
    Ok(())
}
