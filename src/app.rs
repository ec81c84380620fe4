use std::collections::HashSet;

use chrono::{Datelike, Duration, Local, NaiveDate};
use tracing::{info, warn};

use crate::calendar::{
    AvailableSlot, DayKey, Event, EventBook, EventDraft, MonthCursor, Priority, Store, TimeSlot,
};
use crate::components::auth_form::{AuthFormState, AuthMode};
use crate::components::event_form::FormField;
use crate::error::StoreResult;
use crate::session::{self, Profile};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    SignIn,
    SignUp,
    Calendar,
    Profile,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Form,
    Auth,
}

/// Everything the calendar screen and its event form need between frames.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannerState {
    pub current_month: u32,
    pub current_year: i32,
    pub selected_day: u32,
    pub editing_index: Option<usize>,
    pub draft_title: String,
    pub draft_slot: Option<TimeSlot>,
    pub draft_priority: Priority,
    pub draft_participants: String,
}

impl PlannerState {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            current_month: date.month0(),
            current_year: date.year(),
            selected_day: date.day(),
            editing_index: None,
            draft_title: String::new(),
            draft_slot: None,
            draft_priority: Priority::None,
            draft_participants: String::new(),
        }
    }

    pub fn cursor(&self) -> MonthCursor {
        MonthCursor::new(self.current_month, self.current_year)
    }

    pub fn day_key(&self) -> DayKey {
        DayKey::new(self.selected_day, self.current_month, self.current_year)
    }

    pub fn selected_date(&self) -> Option<NaiveDate> {
        self.day_key().date()
    }

    fn set_cursor(&mut self, cursor: MonthCursor) {
        self.current_month = cursor.month;
        self.current_year = cursor.year;
        self.selected_day = self.selected_day.clamp(1, cursor.days());
    }

    pub fn next_month(&mut self) {
        self.set_cursor(self.cursor().next());
    }

    pub fn prev_month(&mut self) {
        self.set_cursor(self.cursor().prev());
    }

    pub fn select_date(&mut self, date: NaiveDate) {
        self.current_month = date.month0();
        self.current_year = date.year();
        self.selected_day = date.day();
    }

    /// Select a day of the current month, clamped to its length.
    pub fn select_day(&mut self, day: u32) {
        self.selected_day = day.clamp(1, self.cursor().days());
    }

    pub fn shift_days(&mut self, days: i64) {
        if let Some(date) = self.selected_date() {
            self.select_date(date + Duration::days(days));
        }
    }

    pub fn clear_draft(&mut self) {
        self.editing_index = None;
        self.draft_title.clear();
        self.draft_slot = None;
        self.draft_priority = Priority::None;
        self.draft_participants.clear();
    }

    pub fn load_draft(&mut self, index: usize, event: &Event) {
        self.editing_index = Some(index);
        self.draft_title = event.title.clone();
        self.draft_slot = Some(event.slot);
        self.draft_priority = event.priority;
        self.draft_participants = event.participants.join(", ");
    }

    pub fn draft(&self) -> EventDraft {
        EventDraft {
            title: self.draft_title.clone(),
            slot: self.draft_slot,
            priority: self.draft_priority,
            participants: parse_participants(&self.draft_participants),
        }
    }
}

/// Comma-separated initials as typed in the form.
pub fn parse_participants(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}

pub struct App {
    pub running: bool,
    pub screen: Screen,
    pub input_mode: InputMode,
    pub today: NaiveDate,
    pub state: PlannerState,
    pub book: EventBook,
    pub profile: Option<Profile>,
    pub auth: AuthFormState,
    pub form_field: Option<FormField>,
    pub day_selection: usize,
    pub show_help: bool,
    pub show_info: bool,
    pub status_message: Option<String>,
    pub goals: Vec<String>,
    store: Store,
}

impl App {
    pub fn new(store: Store, today: NaiveDate) -> StoreResult<Self> {
        let book = EventBook::new(store.load_events()?);
        let profile = session::current_profile(&store);
        info!(events = book.len(), signed_in = profile.is_some(), "loaded planner");

        let (screen, input_mode) = if profile.is_some() {
            (Screen::Calendar, InputMode::Normal)
        } else {
            (Screen::SignIn, InputMode::Auth)
        };

        Ok(Self {
            running: true,
            screen,
            input_mode,
            today,
            state: PlannerState::new(today),
            book,
            profile,
            auth: AuthFormState::new(AuthMode::SignIn),
            form_field: None,
            day_selection: 0,
            show_help: false,
            show_info: false,
            status_message: None,
            goals: Vec::new(),
            store,
        })
    }

    pub fn with_goals(mut self, goals: Vec<String>) -> Self {
        self.goals = goals.into_iter().filter(|g| !g.trim().is_empty()).collect();
        self
    }

    pub fn owner(&self) -> Option<&str> {
        self.profile.as_ref().map(Profile::owner)
    }

    /// The signed-in user's events on the selected day, with their indices.
    pub fn day_events(&self) -> Vec<(usize, &Event)> {
        match self.owner() {
            Some(owner) => self.book.day_events(owner, self.state.day_key()),
            None => Vec::new(),
        }
    }

    pub fn available_slots(&self) -> Vec<AvailableSlot> {
        let owner = self.owner().unwrap_or_default();
        self.book
            .slots_for(owner, self.state.day_key(), self.state.editing_index)
    }

    /// Days of the shown month on which the signed-in user has events.
    pub fn days_with_events(&self) -> HashSet<u32> {
        let Some(owner) = self.owner() else {
            return HashSet::new();
        };
        self.book
            .events()
            .iter()
            .filter(|e| {
                e.owner == owner
                    && e.month == self.state.current_month
                    && e.year == self.state.current_year
            })
            .map(|e| e.day)
            .collect()
    }

    pub fn week(&self) -> Option<[NaiveDate; 7]> {
        self.state.selected_date().map(crate::calendar::grid::week_of)
    }

    // ── Navigation ──

    pub fn next_day(&mut self) {
        self.state.shift_days(1);
        self.on_date_changed();
    }

    pub fn prev_day(&mut self) {
        self.state.shift_days(-1);
        self.on_date_changed();
    }

    pub fn next_week(&mut self) {
        self.state.shift_days(7);
        self.on_date_changed();
    }

    pub fn prev_week(&mut self) {
        self.state.shift_days(-7);
        self.on_date_changed();
    }

    pub fn next_month(&mut self) {
        self.state.next_month();
        self.on_date_changed();
    }

    pub fn prev_month(&mut self) {
        self.state.prev_month();
        self.on_date_changed();
    }

    pub fn go_to_today(&mut self) {
        self.today = Local::now().date_naive();
        self.state.select_date(self.today);
        self.on_date_changed();
    }

    fn on_date_changed(&mut self) {
        self.day_selection = 0;
    }

    pub fn select_next_event(&mut self) {
        let count = self.day_events().len();
        if count > 0 {
            self.day_selection = (self.day_selection + 1).min(count - 1);
        }
    }

    pub fn select_prev_event(&mut self) {
        self.day_selection = self.day_selection.saturating_sub(1);
    }

    pub fn show_screen(&mut self, screen: Screen) {
        if self.profile.is_none() {
            return;
        }
        self.screen = screen;
        self.show_info = false;
    }

    // ── Event form ──

    pub fn open_event_form(&mut self) {
        if self.owner().is_none() {
            return;
        }
        self.state.clear_draft();
        self.form_field = Some(FormField::Title);
        self.input_mode = InputMode::Form;
    }

    /// Open the form pre-filled with the highlighted event of the day.
    pub fn edit_selected_event(&mut self) {
        let Some((index, event)) = self
            .day_events()
            .get(self.day_selection)
            .map(|(i, e)| (*i, (*e).clone()))
        else {
            self.status_message = Some("No event selected".to_string());
            return;
        };

        self.state.load_draft(index, &event);
        self.form_field = Some(FormField::Title);
        self.input_mode = InputMode::Form;
    }

    pub fn close_event_form(&mut self) {
        self.state.clear_draft();
        self.form_field = None;
        self.input_mode = InputMode::Normal;
    }

    pub fn form_tab(&mut self) {
        self.form_field = self.form_field.map(|f| f.next());
    }

    pub fn form_backtab(&mut self) {
        self.form_field = self.form_field.map(|f| f.prev());
    }

    pub fn form_input_char(&mut self, c: char) {
        match self.form_field {
            Some(FormField::Title) => self.state.draft_title.push(c),
            Some(FormField::Participants) => self.state.draft_participants.push(c),
            Some(FormField::Slot) if c == ' ' => self.cycle_draft_slot(true),
            Some(FormField::Priority) if c == ' ' => self.cycle_draft_priority(),
            _ => {}
        }
    }

    pub fn form_backspace(&mut self) {
        match self.form_field {
            Some(FormField::Title) => {
                self.state.draft_title.pop();
            }
            Some(FormField::Participants) => {
                self.state.draft_participants.pop();
            }
            Some(FormField::Slot) => self.state.draft_slot = None,
            _ => {}
        }
    }

    /// Move the draft slot to the next (or previous) free slot, wrapping.
    pub fn cycle_draft_slot(&mut self, forward: bool) {
        let free: Vec<TimeSlot> = self
            .available_slots()
            .into_iter()
            .filter(|s| !s.disabled)
            .map(|s| s.slot)
            .collect();

        if free.is_empty() {
            self.state.draft_slot = None;
            self.status_message = Some("No free slots on this day".to_string());
            return;
        }

        let next = match self.state.draft_slot {
            None if forward => free.first(),
            None => free.last(),
            Some(current) if forward => free.iter().find(|s| **s > current).or(free.first()),
            Some(current) => free.iter().rev().find(|s| **s < current).or(free.last()),
        };
        self.state.draft_slot = next.copied();
    }

    pub fn cycle_draft_priority(&mut self) {
        self.state.draft_priority = self.state.draft_priority.next();
    }

    /// Create or replace the event described by the draft and persist the
    /// collection. Validation failures keep the form open.
    pub async fn submit_event_form(&mut self) -> StoreResult<()> {
        let Some(owner) = self.owner().map(str::to_string) else {
            return Ok(());
        };
        let key = self.state.day_key();
        let draft = self.state.draft();

        let result = match self.state.editing_index {
            Some(index) => self.book.replace(index, &owner, key, draft).map(|_| index),
            None => self.book.create(&owner, key, draft),
        };

        match result {
            Ok(index) => {
                let verb = if self.state.editing_index.is_some() {
                    "Updated"
                } else {
                    "Created"
                };
                self.status_message = Some(format!("{} event for {}", verb, key));
                self.close_event_form();
                self.day_selection = self
                    .day_events()
                    .iter()
                    .position(|(i, _)| *i == index)
                    .unwrap_or(0);
                self.store.save_events(self.book.events()).await
            }
            Err(e) => {
                warn!(error = %e, "rejected event form");
                self.status_message = Some(e.to_string());
                Ok(())
            }
        }
    }

    // ── Sign-in / sign-up ──

    pub fn switch_auth_mode(&mut self) {
        let mode = match self.auth.mode {
            AuthMode::SignIn => AuthMode::SignUp,
            AuthMode::SignUp => AuthMode::SignIn,
        };
        self.auth = AuthFormState::new(mode);
        self.screen = match mode {
            AuthMode::SignIn => Screen::SignIn,
            AuthMode::SignUp => Screen::SignUp,
        };
    }

    pub async fn submit_auth(&mut self) {
        match self.auth.mode {
            AuthMode::SignIn => match session::sign_in(&mut self.store, &self.auth.sign_in).await {
                Ok(profile) => {
                    self.profile = Some(profile);
                    self.auth = AuthFormState::new(AuthMode::SignIn);
                    self.screen = Screen::Calendar;
                    self.input_mode = InputMode::Normal;
                    self.state = PlannerState::new(self.today);
                    self.day_selection = 0;
                }
                Err(e) => self.auth.error = Some(e.to_string()),
            },
            AuthMode::SignUp => match session::register(&mut self.store, &self.auth.sign_up).await {
                Ok(account) => {
                    let mut auth = AuthFormState::new(AuthMode::SignIn);
                    auth.sign_in.email = account.email;
                    self.auth = auth;
                    self.screen = Screen::SignIn;
                    self.status_message = Some("Account created, please sign in".to_string());
                }
                Err(e) => self.auth.error = Some(e.to_string()),
            },
        }
    }

    pub async fn sign_out(&mut self) {
        if let Err(e) = session::sign_out(&mut self.store).await {
            warn!(error = %e, "sign out could not be persisted");
        }
        self.profile = None;
        self.show_info = false;
        self.screen = Screen::SignIn;
        self.input_mode = InputMode::Auth;
        self.auth = AuthFormState::new(AuthMode::SignIn);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_month_change_clamps_selected_day() {
        let mut state = PlannerState::new(date(2024, 1, 31));
        state.next_month();
        assert_eq!((state.current_month, state.current_year, state.selected_day), (1, 2024, 29));

        let mut state = PlannerState::new(date(2024, 1, 15));
        state.prev_month();
        assert_eq!((state.current_month, state.current_year, state.selected_day), (11, 2023, 15));
    }

    #[test]
    fn test_shift_days_crosses_month_and_year() {
        let mut state = PlannerState::new(date(2024, 12, 31));
        state.shift_days(1);
        assert_eq!(state.day_key(), DayKey::new(1, 0, 2025));

        state.shift_days(-1);
        assert_eq!(state.day_key(), DayKey::new(31, 11, 2024));
    }

    #[test]
    fn test_select_day_is_clamped() {
        let mut state = PlannerState::new(date(2023, 2, 10));
        state.select_day(31);
        assert_eq!(state.selected_day, 28);
        state.select_day(0);
        assert_eq!(state.selected_day, 1);
    }

    #[test]
    fn test_draft_round_trip_through_event() {
        let mut state = PlannerState::new(date(2024, 8, 15));
        let event = Event {
            title: "Review".to_string(),
            slot: TimeSlot::ALL[2],
            day: 15,
            month: 7,
            year: 2024,
            owner: "alice@example.com".to_string(),
            priority: Priority::Urgent,
            participants: vec!["A".to_string(), "B".to_string()],
            color: crate::calendar::Accent::Blush,
        };

        state.load_draft(3, &event);
        assert_eq!(state.editing_index, Some(3));
        assert_eq!(state.draft_participants, "A, B");

        let draft = state.draft();
        assert_eq!(draft.slot, Some(TimeSlot::ALL[2]));
        assert_eq!(draft.participants, event.participants);

        state.clear_draft();
        assert_eq!(state, PlannerState { selected_day: 15, ..PlannerState::new(date(2024, 8, 1)) });
    }

    #[test]
    fn test_parse_participants() {
        assert_eq!(parse_participants(" A, ,B ,C"), vec!["A", "B", "C"]);
        assert!(parse_participants("").is_empty());
    }

    #[tokio::test]
    async fn test_blank_goals_are_dropped() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open(dir.path().join("storage.json")).await.unwrap();
        let app = App::new(store, date(2024, 8, 15))
            .unwrap()
            .with_goals(vec!["Travel Dhaka".to_string(), "  ".to_string(), "Shopping".to_string()]);
        assert_eq!(app.goals, vec!["Travel Dhaka", "Shopping"]);
    }
}
