//! Slot availability and the owned event collection.

use thiserror::Error;
use tracing::debug;

use super::event::{Accent, DayKey, Event, Priority};
use super::slot::TimeSlot;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailableSlot {
    pub slot: TimeSlot,
    pub label: String,
    pub disabled: bool,
}

/// Every canonical slot in chronological order, disabled where one of
/// `day_events` already sits. Duplicate bookings in the input just leave the
/// slot disabled.
pub fn available_slots<'a, I>(day_events: I) -> Vec<AvailableSlot>
where
    I: IntoIterator<Item = &'a Event>,
{
    let taken: Vec<TimeSlot> = day_events.into_iter().map(|e| e.slot).collect();

    TimeSlot::ALL
        .iter()
        .map(|slot| AvailableSlot {
            slot: *slot,
            label: slot.label(),
            disabled: taken.contains(slot),
        })
        .collect()
}

pub fn color_for_new_event(existing_count: usize) -> Accent {
    if existing_count % 2 == 0 {
        Accent::Blush
    } else {
        Accent::Periwinkle
    }
}

/// Events of `owner` on `key`, paired with their index in `events`.
pub fn events_for_day<'a>(events: &'a [Event], owner: &str, key: DayKey) -> Vec<(usize, &'a Event)> {
    events
        .iter()
        .enumerate()
        .filter(|(_, e)| e.is_on(owner, key))
        .collect()
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("Event title is required")]
    EmptyTitle,

    #[error("Pick a time slot first")]
    NoSlotSelected,

    #[error("{slot} is already booked on {day}")]
    SlotTaken { slot: TimeSlot, day: DayKey },

    #[error("No event at index {0}")]
    NoSuchEvent(usize),

    #[error("Event {0} belongs to another user")]
    NotOwner(usize),
}

/// What the create/edit form submits.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventDraft {
    pub title: String,
    pub slot: Option<TimeSlot>,
    pub priority: Priority,
    pub participants: Vec<String>,
}

/// The long-lived event collection. Indices are stable: events are only
/// appended or replaced in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventBook {
    events: Vec<Event>,
}

impl EventBook {
    pub fn new(events: Vec<Event>) -> Self {
        Self { events }
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn get(&self, index: usize) -> Option<&Event> {
        self.events.get(index)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn day_events(&self, owner: &str, key: DayKey) -> Vec<(usize, &Event)> {
        events_for_day(&self.events, owner, key)
    }

    /// Slot availability for the owner's day, ignoring the event at
    /// `editing` so it can keep its own slot.
    pub fn slots_for(&self, owner: &str, key: DayKey, editing: Option<usize>) -> Vec<AvailableSlot> {
        available_slots(
            self.day_events(owner, key)
                .into_iter()
                .filter(|(idx, _)| Some(*idx) != editing)
                .map(|(_, e)| e),
        )
    }

    pub fn create(&mut self, owner: &str, key: DayKey, draft: EventDraft) -> Result<usize, ScheduleError> {
        let (title, slot) = validate(&draft)?;
        self.ensure_free(owner, key, slot, None)?;

        let existing = self.day_events(owner, key).len();
        self.events.push(Event {
            title,
            slot,
            day: key.day,
            month: key.month,
            year: key.year,
            owner: owner.to_string(),
            priority: draft.priority,
            participants: draft.participants,
            color: color_for_new_event(existing),
        });

        let index = self.events.len() - 1;
        debug!(index, %key, %slot, "created event");
        Ok(index)
    }

    /// Full replacement of the event at `index`. The accent is kept.
    pub fn replace(
        &mut self,
        index: usize,
        owner: &str,
        key: DayKey,
        draft: EventDraft,
    ) -> Result<(), ScheduleError> {
        let current = self.events.get(index).ok_or(ScheduleError::NoSuchEvent(index))?;
        if current.owner != owner {
            return Err(ScheduleError::NotOwner(index));
        }
        let color = current.color;

        let (title, slot) = validate(&draft)?;
        self.ensure_free(owner, key, slot, Some(index))?;

        self.events[index] = Event {
            title,
            slot,
            day: key.day,
            month: key.month,
            year: key.year,
            owner: owner.to_string(),
            priority: draft.priority,
            participants: draft.participants,
            color,
        };

        debug!(index, %key, %slot, "replaced event");
        Ok(())
    }

    fn ensure_free(
        &self,
        owner: &str,
        key: DayKey,
        slot: TimeSlot,
        editing: Option<usize>,
    ) -> Result<(), ScheduleError> {
        let taken = self
            .day_events(owner, key)
            .into_iter()
            .any(|(idx, e)| Some(idx) != editing && e.slot == slot);

        if taken {
            Err(ScheduleError::SlotTaken { slot, day: key })
        } else {
            Ok(())
        }
    }
}

fn validate(draft: &EventDraft) -> Result<(String, TimeSlot), ScheduleError> {
    let title = draft.title.trim();
    if title.is_empty() {
        return Err(ScheduleError::EmptyTitle);
    }
    let slot = draft.slot.ok_or(ScheduleError::NoSlotSelected)?;
    Ok((title.to_string(), slot))
}
