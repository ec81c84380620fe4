use chrono::NaiveDate;

use planner_tui::app::{App, PlannerState, Screen};
use planner_tui::calendar::{available_slots, events_for_day, DayKey, Store, TimeSlot};

fn aug_15() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 8, 15).unwrap()
}

async fn sign_in(app: &mut App, email: &str) {
    app.auth.sign_in.email = email.to_string();
    app.auth.sign_in.password = "password".to_string();
    app.submit_auth().await;
    assert!(app.auth.error.is_none(), "sign in failed: {:?}", app.auth.error);
}

#[tokio::test]
async fn booked_slot_is_only_disabled_for_its_owner() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storage.json");

    let store = Store::open(&path).await.unwrap();
    let mut app = App::new(store, aug_15()).unwrap();
    assert_eq!(app.screen, Screen::SignIn);

    sign_in(&mut app, "alice@example.com").await;
    assert_eq!(app.screen, Screen::Calendar);
    assert_eq!(app.state.day_key(), DayKey::new(15, 7, 2024));

    app.open_event_form();
    for c in "Design Meeting".chars() {
        app.form_input_char(c);
    }
    app.cycle_draft_slot(true);
    assert_eq!(app.state.draft_slot, Some(TimeSlot::ALL[0]));
    app.submit_event_form().await.unwrap();
    assert!(app.form_field.is_none());

    let slots = app.available_slots();
    assert_eq!(slots.len(), 10);
    assert!(slots[0].disabled);
    assert_eq!(slots.iter().filter(|s| !s.disabled).count(), 9);
    assert!(app.days_with_events().contains(&15));

    app.sign_out().await;
    sign_in(&mut app, "bob@example.com").await;
    app.state = PlannerState::new(aug_15());

    assert!(app.day_events().is_empty());
    assert!(app.available_slots().iter().all(|s| !s.disabled));

    // The booking survived on disk and is scoped the same way
    let reopened = Store::open(&path).await.unwrap();
    let events = reopened.load_events().unwrap();
    let key = DayKey::new(15, 7, 2024);
    let alice = events_for_day(&events, "alice@example.com", key);
    assert_eq!(alice.len(), 1);
    assert_eq!(alice[0].1.slot.key(), "10:30 - 11:00");
    assert!(available_slots(alice.iter().map(|(_, e)| *e))[0].disabled);
    assert!(events_for_day(&events, "bob@example.com", key).is_empty());
}

#[tokio::test]
async fn double_booking_keeps_the_form_open() {
    let dir = tempfile::tempdir().unwrap();
    let store = Store::open(dir.path().join("storage.json")).await.unwrap();
    let mut app = App::new(store, aug_15()).unwrap();
    sign_in(&mut app, "alice@example.com").await;

    app.open_event_form();
    app.state.draft_title = "First".to_string();
    app.state.draft_slot = Some(TimeSlot::ALL[5]);
    app.submit_event_form().await.unwrap();

    app.open_event_form();
    app.state.draft_title = "Second".to_string();
    app.state.draft_slot = Some(TimeSlot::ALL[5]);
    app.submit_event_form().await.unwrap();

    assert!(app.form_field.is_some());
    assert_eq!(app.book.len(), 1);
    assert!(app.status_message.as_deref().unwrap_or("").contains("already booked"));

    // Cycling skips the taken slot
    app.state.draft_slot = Some(TimeSlot::ALL[4]);
    app.cycle_draft_slot(true);
    assert_eq!(app.state.draft_slot, Some(TimeSlot::ALL[6]));
}

#[tokio::test]
async fn edit_replaces_event_and_restarts_signed_in() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storage.json");
    let store = Store::open(&path).await.unwrap();
    let mut app = App::new(store, aug_15()).unwrap();
    sign_in(&mut app, "alice@example.com").await;

    app.open_event_form();
    app.state.draft_title = "Standup".to_string();
    app.state.draft_slot = Some(TimeSlot::ALL[1]);
    app.submit_event_form().await.unwrap();

    app.edit_selected_event();
    assert_eq!(app.state.editing_index, Some(0));
    // Its own slot stays selectable while editing
    assert!(!app.available_slots()[1].disabled);

    app.state.draft_title = "Standup (moved)".to_string();
    app.state.draft_slot = Some(TimeSlot::ALL[3]);
    app.submit_event_form().await.unwrap();
    assert_eq!(app.book.len(), 1);
    assert_eq!(app.book.get(0).unwrap().title, "Standup (moved)");

    let store = Store::open(&path).await.unwrap();
    let restarted = App::new(store, aug_15()).unwrap();
    assert_eq!(restarted.screen, Screen::Calendar);
    assert_eq!(restarted.day_events().len(), 1);
    assert!(restarted.available_slots()[3].disabled);
}

#[tokio::test]
async fn email_case_does_not_change_the_owner() {
    let dir = tempfile::tempdir().unwrap();
    let store = Store::open(dir.path().join("storage.json")).await.unwrap();
    let mut app = App::new(store, aug_15()).unwrap();
    sign_in(&mut app, "alice@example.com").await;

    app.open_event_form();
    app.state.draft_title = "Standup".to_string();
    app.state.draft_slot = Some(TimeSlot::ALL[0]);
    app.submit_event_form().await.unwrap();

    app.sign_out().await;
    sign_in(&mut app, "  Alice@Example.com ").await;

    assert_eq!(app.owner(), Some("alice@example.com"));
    assert_eq!(app.day_events().len(), 1);
    assert!(app.available_slots()[0].disabled);
}
