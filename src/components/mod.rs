pub mod auth_form;
pub mod day_view;
pub mod event_form;
pub mod goals_view;
pub mod month_view;
pub mod profile_view;
pub mod status_bar;

pub use auth_form::AuthForm;
pub use day_view::DayView;
pub use event_form::EventForm;
pub use goals_view::GoalsView;
pub use month_view::MonthView;
pub use profile_view::ProfileView;
pub use status_bar::StatusBar;
