//! Time slots and the date/slot selection.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};
use chrono_tz::Tz;

use crate::error::{SlotbookError, SlotbookResult};

/// Bookable start times, in display order.
pub const SLOTS: [&str; 6] = [
    "9:00 AM", "9:30 AM", "10:00 AM", "10:30 AM", "11:00 AM", "11:30 AM",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Meridiem {
    Am,
    Pm,
}

/// A parsed 12-hour clock label like "10:30 AM".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeSlot {
    pub hour: u32,
    pub minute: u32,
    pub meridiem: Meridiem,
}

impl TimeSlot {
    pub fn parse(label: &str) -> SlotbookResult<Self> {
        let invalid = || SlotbookError::InvalidSlot(label.to_string());

        let (clock, period) = label.trim().split_once(' ').ok_or_else(invalid)?;
        let (hour, minute) = clock.split_once(':').ok_or_else(invalid)?;
        let hour: u32 = hour.parse().map_err(|_| invalid())?;
        let minute: u32 = minute.parse().map_err(|_| invalid())?;

        let meridiem = match period.trim() {
            p if p.eq_ignore_ascii_case("AM") => Meridiem::Am,
            p if p.eq_ignore_ascii_case("PM") => Meridiem::Pm,
            _ => return Err(invalid()),
        };

        if !(1..=12).contains(&hour) || minute > 59 {
            return Err(invalid());
        }

        Ok(TimeSlot { hour, minute, meridiem })
    }

    /// 24-hour clock hour. 12 PM is noon (12), 12 AM is midnight (0).
    pub fn hour_24(&self) -> u32 {
        match (self.meridiem, self.hour) {
            (Meridiem::Am, 12) => 0,
            (Meridiem::Am, h) => h,
            (Meridiem::Pm, 12) => 12,
            (Meridiem::Pm, h) => h + 12,
        }
    }

    pub fn time(&self) -> NaiveTime {
        // hour_24 < 24 and minute < 60 are guaranteed by parse
        NaiveTime::from_hms_opt(self.hour_24(), self.minute, 0).unwrap_or_default()
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let period = match self.meridiem {
            Meridiem::Am => "AM",
            Meridiem::Pm => "PM",
        };
        write!(f, "{}:{:02} {}", self.hour, self.minute, period)
    }
}

/// Interpret `date` at `slot` as wall-clock time in `tz`.
///
/// The wall clock is kept as-is; only the offset comes from the zone. During
/// a DST fold the earlier instant wins; a time inside a DST gap is an error.
pub fn zoned_start(date: NaiveDate, slot: &TimeSlot, tz: Tz) -> SlotbookResult<DateTime<Tz>> {
    let local: NaiveDateTime = date.and_time(slot.time());
    tz.from_local_datetime(&local)
        .earliest()
        .ok_or_else(|| SlotbookError::NonexistentLocalTime(local, tz.name().to_string()))
}

/// The date and slot picked on the first screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Appointment {
    date: Option<NaiveDate>,
    slot: Option<String>,
}

impl Appointment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commit a date from the calendar. `today` is the calendar's minimum
    /// selectable date.
    pub fn select_date(&mut self, date: NaiveDate, today: NaiveDate) -> SlotbookResult<()> {
        if date < today {
            return Err(SlotbookError::DateInPast(date));
        }
        self.date = Some(date);
        Ok(())
    }

    pub fn select_slot(&mut self, label: &str) -> SlotbookResult<()> {
        let slot = SLOTS
            .iter()
            .find(|s| **s == label)
            .ok_or_else(|| SlotbookError::SlotNotOffered(label.to_string()))?;
        self.slot = Some(slot.to_string());
        Ok(())
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    pub fn slot(&self) -> Option<&str> {
        self.slot.as_deref()
    }

    /// Start of the appointment in `tz`, if both halves are chosen.
    pub fn starts_at(&self, tz: Tz) -> SlotbookResult<Option<DateTime<Tz>>> {
        let (Some(date), Some(slot)) = (self.date, self.slot()) else {
            return Ok(None);
        };
        let slot = TimeSlot::parse(slot)?;
        zoned_start(date, &slot, tz).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parses_every_offered_slot() {
        for label in SLOTS {
            let slot = TimeSlot::parse(label).unwrap();
            assert_eq!(slot.to_string(), label);
            assert_eq!(slot.meridiem, Meridiem::Am);
        }
    }

    #[test]
    fn noon_and_midnight() {
        assert_eq!(TimeSlot::parse("12:00 PM").unwrap().hour_24(), 12);
        assert_eq!(TimeSlot::parse("12:00 AM").unwrap().hour_24(), 0);
        assert_eq!(TimeSlot::parse("12:30 AM").unwrap().time(), NaiveTime::from_hms_opt(0, 30, 0).unwrap());
    }

    #[test]
    fn afternoon_adds_twelve() {
        assert_eq!(TimeSlot::parse("1:15 PM").unwrap().hour_24(), 13);
        assert_eq!(TimeSlot::parse("11:30 PM").unwrap().hour_24(), 23);
        assert_eq!(TimeSlot::parse("10:30 AM").unwrap().hour_24(), 10);
    }

    #[test]
    fn rejects_malformed_labels() {
        for label in ["", "10:30", "10 AM", "13:00 PM", "0:30 AM", "10:60 AM", "ten:30 AM", "10:30 XM"] {
            assert!(
                matches!(TimeSlot::parse(label), Err(SlotbookError::InvalidSlot(_))),
                "{label:?} should not parse"
            );
        }
    }

    #[test]
    fn zoned_start_keeps_wall_clock() {
        let slot = TimeSlot::parse("10:00 AM").unwrap();
        let start = zoned_start(date(2026, 10, 20), &slot, chrono_tz::Asia::Kolkata).unwrap();
        assert_eq!(start.to_rfc3339(), "2026-10-20T10:00:00+05:30");
    }

    #[test]
    fn zoned_start_follows_dst() {
        let slot = TimeSlot::parse("9:00 AM").unwrap();
        let summer = zoned_start(date(2026, 7, 1), &slot, chrono_tz::America::New_York).unwrap();
        let winter = zoned_start(date(2026, 12, 1), &slot, chrono_tz::America::New_York).unwrap();
        assert_eq!(summer.to_rfc3339(), "2026-07-01T09:00:00-04:00");
        assert_eq!(winter.to_rfc3339(), "2026-12-01T09:00:00-05:00");
    }

    #[test]
    fn zoned_start_in_dst_gap_fails() {
        // Clocks in New York jump from 02:00 to 03:00 on 2026-03-08.
        let slot = TimeSlot::parse("2:30 AM").unwrap();
        let result = zoned_start(date(2026, 3, 8), &slot, chrono_tz::America::New_York);
        assert!(matches!(result, Err(SlotbookError::NonexistentLocalTime(..))));
    }

    #[test]
    fn select_date_enforces_minimum() {
        let today = date(2026, 10, 19);
        let mut appt = Appointment::new();
        assert!(matches!(
            appt.select_date(date(2026, 10, 18), today),
            Err(SlotbookError::DateInPast(_))
        ));
        assert_eq!(appt.date(), None);
        appt.select_date(today, today).unwrap();
        assert_eq!(appt.date(), Some(today));
    }

    #[test]
    fn select_slot_overwrites_and_rejects_unknown() {
        let mut appt = Appointment::new();
        appt.select_slot("9:00 AM").unwrap();
        appt.select_slot("11:30 AM").unwrap();
        assert_eq!(appt.slot(), Some("11:30 AM"));
        assert!(matches!(appt.select_slot("4:00 PM"), Err(SlotbookError::SlotNotOffered(_))));
        assert_eq!(appt.slot(), Some("11:30 AM"));
    }

    #[test]
    fn starts_at_needs_both_halves() {
        let mut appt = Appointment::new();
        appt.select_slot("9:30 AM").unwrap();
        assert_eq!(appt.starts_at(chrono_tz::UTC).unwrap(), None);
        appt.select_date(date(2026, 11, 2), date(2026, 10, 19)).unwrap();
        let start = appt.starts_at(chrono_tz::UTC).unwrap().unwrap();
        assert_eq!(start.to_rfc3339(), "2026-11-02T09:30:00+00:00");
    }
}
