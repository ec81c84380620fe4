pub mod event;
pub mod grid;
pub mod schedule;
pub mod slot;
pub mod store;

pub use event::{Accent, DayKey, Event, Priority};
pub use grid::{days_in_month, first_weekday_offset, DayGrid, MonthCursor};
pub use schedule::{
    available_slots, color_for_new_event, events_for_day, AvailableSlot, EventBook, EventDraft,
    ScheduleError,
};
pub use slot::TimeSlot;
pub use store::Store;
