use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::slot::TimeSlot;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Priority {
    TopPriority,
    Urgent,
    CriticalEvent,
    #[default]
    None,
}

impl Priority {
    pub const ALL: [Priority; 4] = [
        Priority::None,
        Priority::TopPriority,
        Priority::Urgent,
        Priority::CriticalEvent,
    ];

    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|p| *p == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Priority::TopPriority => "Top Priority",
            Priority::Urgent => "Urgent",
            Priority::CriticalEvent => "Critical Event",
            Priority::None => "None",
        }
    }
}

/// Alternating card accent. Picked from how many events the owner already
/// has on the day, never by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Accent {
    #[default]
    Blush,
    Periwinkle,
}

/// A (day, month, year) triple with a zero-indexed month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DayKey {
    pub day: u32,
    pub month: u32,
    pub year: i32,
}

impl DayKey {
    pub fn new(day: u32, month: u32, year: i32) -> Self {
        Self { day, month, year }
    }

    pub fn date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month + 1, self.day)
    }
}

impl fmt::Display for DayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month + 1, self.day)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub title: String,
    pub slot: TimeSlot,
    pub day: u32,
    pub month: u32,
    pub year: i32,
    pub owner: String,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub participants: Vec<String>,
    #[serde(default)]
    pub color: Accent,
}

impl Event {
    pub fn key(&self) -> DayKey {
        DayKey::new(self.day, self.month, self.year)
    }

    pub fn is_on(&self, owner: &str, key: DayKey) -> bool {
        self.owner == owner && self.key() == key
    }
}
