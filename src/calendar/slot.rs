use std::fmt;
use std::str::FromStr;

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Minutes after midnight at which the first slot starts (10:30).
const FIRST_SLOT_START: u32 = 10 * 60 + 30;
const SLOT_MINUTES: u32 = 30;

pub const SLOT_COUNT: usize = 10;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("not a bookable time slot: {0:?}")]
pub struct SlotParseError(pub String);

/// One of the ten fixed half-hour intervals between 10:30 and 15:30.
///
/// Stored as its key string, e.g. `"13:00 - 13:30"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeSlot(u8);

impl TimeSlot {
    pub const ALL: [TimeSlot; SLOT_COUNT] = [
        TimeSlot(0),
        TimeSlot(1),
        TimeSlot(2),
        TimeSlot(3),
        TimeSlot(4),
        TimeSlot(5),
        TimeSlot(6),
        TimeSlot(7),
        TimeSlot(8),
        TimeSlot(9),
    ];

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn index(&self) -> usize {
        self.0 as usize
    }

    fn start_minutes(&self) -> u32 {
        FIRST_SLOT_START + SLOT_MINUTES * self.0 as u32
    }

    fn end_minutes(&self) -> u32 {
        self.start_minutes() + SLOT_MINUTES
    }

    pub fn start(&self) -> (u32, u32) {
        let m = self.start_minutes();
        (m / 60, m % 60)
    }

    pub fn end(&self) -> (u32, u32) {
        let m = self.end_minutes();
        (m / 60, m % 60)
    }

    /// Canonical 24-hour key, `"HH:MM - HH:MM"`.
    pub fn key(&self) -> String {
        let (sh, sm) = self.start();
        let (eh, em) = self.end();
        format!("{:02}:{:02} - {:02}:{:02}", sh, sm, eh, em)
    }

    /// Display label: unpadded hours, two-digit minutes and a single
    /// meridiem taken from the end hour, e.g. `"11:30 - 12:00 PM"`.
    pub fn label(&self) -> String {
        let (sh, sm) = self.start();
        let (eh, em) = self.end();
        let meridiem = if eh >= 12 { "PM" } else { "AM" };
        format!("{}:{:02} - {}:{:02} {}", sh, sm, eh, em, meridiem)
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key())
    }
}

impl FromStr for TimeSlot {
    type Err = SlotParseError;

    /// Accepts `"13:00 - 13:30"` as well as the unspaced `"13:00-13:30"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || SlotParseError(s.to_string());

        let (start, end) = s.split_once('-').ok_or_else(err)?;
        let start = NaiveTime::parse_from_str(start.trim(), "%H:%M").map_err(|_| err())?;
        let end = NaiveTime::parse_from_str(end.trim(), "%H:%M").map_err(|_| err())?;

        let start = start.hour() * 60 + start.minute();
        let end = end.hour() * 60 + end.minute();

        Self::ALL
            .into_iter()
            .find(|slot| slot.start_minutes() == start && slot.end_minutes() == end)
            .ok_or_else(err)
    }
}

impl TryFrom<String> for TimeSlot {
    type Error = SlotParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TimeSlot> for String {
    fn from(slot: TimeSlot) -> Self {
        slot.key()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slots_cover_half_hours_from_1030_to_1530() {
        assert_eq!(TimeSlot::ALL[0].key(), "10:30 - 11:00");
        assert_eq!(TimeSlot::ALL[5].key(), "13:00 - 13:30");
        assert_eq!(TimeSlot::ALL[9].key(), "15:00 - 15:30");

        for pair in TimeSlot::ALL.windows(2) {
            assert_eq!(pair[0].end(), pair[1].start());
        }
    }

    #[test]
    fn test_label_meridiem_comes_from_end_hour() {
        assert_eq!(TimeSlot::ALL[0].label(), "10:30 - 11:00 AM");
        assert_eq!(TimeSlot::ALL[2].label(), "11:30 - 12:00 PM");
        assert_eq!(TimeSlot::ALL[5].label(), "13:00 - 13:30 PM");
    }

    #[test]
    fn test_parse_accepts_spaced_and_unspaced_keys() {
        assert_eq!("13:00 - 13:30".parse(), Ok(TimeSlot::ALL[5]));
        assert_eq!("13:00-13:30".parse(), Ok(TimeSlot::ALL[5]));
        assert_eq!(" 10:30 - 11:00 ".parse(), Ok(TimeSlot::ALL[0]));
    }

    #[test]
    fn test_parse_rejects_off_grid_times() {
        assert!("09:00 - 09:30".parse::<TimeSlot>().is_err());
        assert!("10:30 - 11:30".parse::<TimeSlot>().is_err());
        assert!("15:30 - 16:00".parse::<TimeSlot>().is_err());
        assert!("lunch".parse::<TimeSlot>().is_err());
    }

    #[test]
    fn test_serializes_as_key_string() {
        let json = serde_json::to_string(&TimeSlot::ALL[3]).unwrap();
        assert_eq!(json, "\"12:00 - 12:30\"");

        let err = serde_json::from_str::<TimeSlot>("\"12:15 - 12:45\"");
        assert!(err.is_err());
    }
}
