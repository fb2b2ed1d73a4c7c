//! Time zone catalog and picker.
//!
//! The catalog is a fixed, hand-ordered list (roughly west to east). The
//! offset labels are display text only; the actual offset used for a booking
//! always comes from the IANA database through `chrono-tz`, so DST is honored.

use std::str::FromStr;

use chrono_tz::Tz;

use crate::error::{SlotbookError, SlotbookResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeZoneEntry {
    pub region: &'static str,
    pub utc_offset: &'static str,
}

impl TimeZoneEntry {
    const fn new(region: &'static str, utc_offset: &'static str) -> Self {
        Self { region, utc_offset }
    }

    /// "Asia/Kolkata UTC+5:30"
    pub fn label(&self) -> String {
        format!("{} {}", self.region, self.utc_offset)
    }
}

pub static TIME_ZONES: [TimeZoneEntry; 42] = [
    TimeZoneEntry::new("Pacific/Midway", "UTC-11"),
    TimeZoneEntry::new("America/Adak", "UTC-10"),
    TimeZoneEntry::new("Pacific/Honolulu", "UTC-10"),
    TimeZoneEntry::new("America/Anchorage", "UTC-9"),
    TimeZoneEntry::new("America/Los_Angeles", "UTC-8"),
    TimeZoneEntry::new("America/Tijuana", "UTC-8"),
    TimeZoneEntry::new("America/Denver", "UTC-7"),
    TimeZoneEntry::new("America/Phoenix", "UTC-7"),
    TimeZoneEntry::new("America/Chicago", "UTC-6"),
    TimeZoneEntry::new("America/Mexico_City", "UTC-6"),
    TimeZoneEntry::new("America/New_York", "UTC-5"),
    TimeZoneEntry::new("America/Toronto", "UTC-5"),
    TimeZoneEntry::new("America/Caracas", "UTC-4"),
    TimeZoneEntry::new("America/Santiago", "UTC-4"),
    TimeZoneEntry::new("America/Halifax", "UTC-4"),
    TimeZoneEntry::new("Atlantic/Stanley", "UTC-3"),
    TimeZoneEntry::new("America/Sao_Paulo", "UTC-3"),
    TimeZoneEntry::new("Atlantic/South_Georgia", "UTC-2"),
    TimeZoneEntry::new("Atlantic/Azores", "UTC-1"),
    TimeZoneEntry::new("Europe/London", "UTC+0"),
    TimeZoneEntry::new("Europe/Lisbon", "UTC+0"),
    TimeZoneEntry::new("Africa/Casablanca", "UTC+0"),
    TimeZoneEntry::new("Europe/Berlin", "UTC+1"),
    TimeZoneEntry::new("Europe/Paris", "UTC+1"),
    TimeZoneEntry::new("Africa/Lagos", "UTC+1"),
    TimeZoneEntry::new("Africa/Cairo", "UTC+2"),
    TimeZoneEntry::new("Europe/Istanbul", "UTC+3"),
    TimeZoneEntry::new("Asia/Jerusalem", "UTC+3"),
    TimeZoneEntry::new("Europe/Moscow", "UTC+3"),
    TimeZoneEntry::new("Asia/Dubai", "UTC+4"),
    TimeZoneEntry::new("Asia/Karachi", "UTC+5"),
    TimeZoneEntry::new("Asia/Kolkata", "UTC+5:30"),
    TimeZoneEntry::new("Asia/Dhaka", "UTC+6"),
    TimeZoneEntry::new("Asia/Bangkok", "UTC+7"),
    TimeZoneEntry::new("Asia/Singapore", "UTC+8"),
    TimeZoneEntry::new("Asia/Shanghai", "UTC+8"),
    TimeZoneEntry::new("Australia/Perth", "UTC+8"),
    TimeZoneEntry::new("Asia/Tokyo", "UTC+9"),
    TimeZoneEntry::new("Asia/Seoul", "UTC+9"),
    TimeZoneEntry::new("Australia/Sydney", "UTC+10"),
    TimeZoneEntry::new("Pacific/Guam", "UTC+10"),
    TimeZoneEntry::new("Pacific/Auckland", "UTC+12"),
];

/// Look up a catalog entry by region.
pub fn find(region: &str) -> Option<&'static TimeZoneEntry> {
    TIME_ZONES.iter().find(|z| z.region == region)
}

/// Resolve an IANA region name.
pub fn parse_tz(region: &str) -> SlotbookResult<Tz> {
    Tz::from_str(region).map_err(|_| SlotbookError::UnknownTimeZone(region.to_string()))
}

/// Dropdown state: open/closed and the chosen region.
///
/// Starts closed with nothing chosen; there is no locale-derived default.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimeZonePicker {
    open: bool,
    active: Option<String>,
}

impl TimeZonePicker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Select from a displayed label such as "Asia/Kolkata UTC+5:30".
    /// Everything from the first space on is dropped, and the dropdown closes.
    pub fn select(&mut self, label: &str) {
        let region = label.split(' ').next().unwrap_or_default();
        tracing::debug!(region, "time zone selected");
        self.active = Some(region.to_string());
        self.open = false;
    }

    pub fn select_entry(&mut self, entry: &TimeZoneEntry) {
        self.select(&entry.label());
    }

    /// The active region resolved against the tz database.
    pub fn tz(&self) -> SlotbookResult<Tz> {
        let region = self.active().ok_or(SlotbookError::MissingTimeZone)?;
        parse_tz(region)
    }
}
