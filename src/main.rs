use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;

use chrono::{Local, Timelike};
use clap::Parser;
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::Frame;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use planner_tui::app::{App, InputMode, Screen};
use planner_tui::calendar::Store;
use planner_tui::components::{self, event_form::FormField};
use planner_tui::config::Config;
use planner_tui::{event, session, theme, tui};

/// Terminal day planner with half-hour slot booking
#[derive(Parser, Debug)]
#[command(name = "planner-tui", version)]
struct Cli {
    /// Config file (default: <config dir>/planner-tui/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Storage file, overriding the config
    #[arg(long)]
    store: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    let config = Config::load(cli.config.as_deref())?;
    init_logging(&config)?;
    theme::init(&config.theme);

    let store_path = cli.store.unwrap_or_else(|| config.store_path());
    let store = Store::open(&store_path)
        .await
        .wrap_err_with(|| format!("Failed to open storage at {}", store_path.display()))?;
    let mut app = App::new(store, Local::now().date_naive())?.with_goals(config.goals.clone());

    info!("starting planner v{}", env!("CARGO_PKG_VERSION"));

    tui::install_panic_hook();
    let mut terminal = tui::init()?;
    let result = run(&mut terminal, &mut app).await;
    tui::restore()?;
    result
}

/// The terminal belongs to the UI, so logs go to a file.
fn init_logging(config: &Config) -> Result<()> {
    let path = config.log_path();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .wrap_err_with(|| format!("Failed to open log file {}", path.display()))?;

    let filter = EnvFilter::try_from_env("PLANNER_LOG")
        .unwrap_or_else(|_| EnvFilter::new(&config.log.level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

async fn run(terminal: &mut tui::Tui, app: &mut App) -> Result<()> {
    while app.running {
        terminal.draw(|frame| draw(frame, app))?;

        let Some(key) = event::next_key_press(Duration::from_millis(100))? else {
            continue;
        };

        // Clear status message on any key
        app.status_message = None;

        if app.show_help {
            if key.code == KeyCode::Esc || key.code == KeyCode::Char('?') {
                app.show_help = false;
            }
            continue;
        }

        if app.show_info {
            if key.code == KeyCode::Esc {
                app.show_info = false;
            }
            continue;
        }

        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            app.running = false;
            continue;
        }

        match app.input_mode {
            InputMode::Auth => handle_auth_input(app, key.code).await,
            InputMode::Form => handle_form_input(app, key.code).await,
            InputMode::Normal => handle_normal_input(app, key.code).await,
        }
    }

    Ok(())
}

async fn handle_normal_input(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Char('q') => app.running = false,
        KeyCode::Char('1') => app.show_screen(Screen::Calendar),
        KeyCode::Char('2') => app.show_screen(Screen::Profile),
        KeyCode::Char('?') => app.show_help = true,
        _ if app.screen == Screen::Profile => match code {
            KeyCode::Char('i') => app.show_info = true,
            KeyCode::Char('o') => app.sign_out().await,
            _ => {}
        },
        KeyCode::Left | KeyCode::Char('h') => app.prev_day(),
        KeyCode::Right | KeyCode::Char('l') => app.next_day(),
        KeyCode::Up => app.prev_week(),
        KeyCode::Down => app.next_week(),
        KeyCode::Char('j') => app.select_next_event(),
        KeyCode::Char('k') => app.select_prev_event(),
        KeyCode::Char('[') => app.prev_month(),
        KeyCode::Char(']') => app.next_month(),
        KeyCode::Char('t') => app.go_to_today(),
        KeyCode::Char('n') => app.open_event_form(),
        KeyCode::Char('e') | KeyCode::Enter => app.edit_selected_event(),
        _ => {}
    }
}

async fn handle_form_input(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Esc => app.close_event_form(),
        KeyCode::Enter => {
            if let Err(e) = app.submit_event_form().await {
                error!(error = %e, "failed to save events");
                app.status_message = Some(format!("Could not save: {}", e));
            }
        }
        KeyCode::Tab => app.form_tab(),
        KeyCode::BackTab => app.form_backtab(),
        KeyCode::Backspace => app.form_backspace(),
        KeyCode::Left | KeyCode::Right => match app.form_field {
            Some(FormField::Slot) => app.cycle_draft_slot(code == KeyCode::Right),
            Some(FormField::Priority) => app.cycle_draft_priority(),
            _ => {}
        },
        KeyCode::Char(c) => app.form_input_char(c),
        _ => {}
    }
}

async fn handle_auth_input(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Esc => app.running = false,
        KeyCode::Enter => app.submit_auth().await,
        KeyCode::F(2) => app.switch_auth_mode(),
        KeyCode::Tab | KeyCode::Down => app.auth.next_field(),
        KeyCode::BackTab | KeyCode::Up => app.auth.prev_field(),
        KeyCode::Backspace => app.auth.backspace(),
        KeyCode::Char(c) => app.auth.input_char(c),
        _ => {}
    }
}

fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // Main layout: content + status bar
    let layout = Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).split(area);
    let content_area = layout[0];

    match app.screen {
        Screen::SignIn | Screen::SignUp => {
            components::AuthForm::render(frame, content_area, &app.auth);
        }
        Screen::Calendar => render_calendar(frame, content_area, app),
        Screen::Profile => {
            if let Some(ref profile) = app.profile {
                let booked = app
                    .book
                    .events()
                    .iter()
                    .filter(|e| e.owner == profile.owner())
                    .count();
                components::ProfileView::render(
                    frame,
                    content_area,
                    profile,
                    session::greeting(Local::now().hour()),
                    booked,
                );
            }
        }
    }

    if let Some(field) = app.form_field {
        components::EventForm::render(frame, area, &app.state, field, &app.available_slots());
    }

    if app.show_info {
        if let Some(ref profile) = app.profile {
            components::ProfileView::render_info_popup(frame, area, profile);
        }
    }

    if app.show_help {
        render_help(frame, area);
    }

    components::StatusBar::render(frame, layout[1], app);
}

fn render_calendar(frame: &mut Frame, area: Rect, app: &App) {
    let Some(date) = app.state.selected_date() else {
        return;
    };

    let [header, area] = Layout::vertical([Constraint::Length(1), Constraint::Min(1)]).areas(area);
    if let Some(ref profile) = app.profile {
        let salutation = profile.salutation(Local::now().hour());
        frame.render_widget(
            ratatui::widgets::Paragraph::new(format!(" {}", salutation)).style(theme::current().header),
            header,
        );
    }

    // Seven 5-column day cells plus borders
    let (month_area, day_area, goals_area) = if area.width < 70 {
        let rows = Layout::vertical([Constraint::Length(9), Constraint::Min(3)]).split(area);
        (rows[0], rows[1], None)
    } else {
        let cols = Layout::horizontal([Constraint::Length(37), Constraint::Min(20)]).split(area);
        let left = Layout::vertical([Constraint::Length(9), Constraint::Min(0)]).split(cols[0]);
        let goals = (left[1].height >= 3).then_some(left[1]);
        (left[0], cols[1], goals)
    };

    components::MonthView::render(
        frame,
        month_area,
        app.state.cursor(),
        app.state.selected_day,
        app.today,
        &app.days_with_events(),
    );

    if let Some(goals_area) = goals_area {
        components::GoalsView::render(frame, goals_area, app.state.cursor(), &app.goals);
    }

    components::DayView::render(
        frame,
        day_area,
        date,
        app.week(),
        &app.day_events(),
        app.day_selection,
    );
}

fn render_help(frame: &mut Frame, area: Rect) {
    use ratatui::style::{Color, Modifier, Style};
    use ratatui::text::{Line, Span};
    use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

    let t = theme::current();

    let popup_w = area.width.clamp(30, 52).min(area.width);
    let popup_h = area.height.clamp(12, 22).min(area.height);
    let x = area.x + (area.width.saturating_sub(popup_w)) / 2;
    let y = area.y + (area.height.saturating_sub(popup_h)) / 2;
    let popup_area = Rect::new(x, y, popup_w, popup_h);

    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(" Keybindings ")
        .title_style(Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green));

    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let key_style = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
    let section_style = Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED);

    let binding = |keys: &'static str, desc: &'static str| {
        Line::from(vec![
            Span::styled(format!("  {:<10}", keys), key_style),
            Span::raw(desc),
        ])
    };

    let lines = vec![
        Line::from(Span::styled("Navigation", section_style)),
        binding("h/l", "Previous/next day"),
        binding("\u{2191}/\u{2193}", "Previous/next week"),
        binding("[/]", "Previous/next month"),
        binding("t", "Jump to today"),
        binding("j/k", "Highlight event of the day"),
        Line::from(""),
        Line::from(Span::styled("Events", section_style)),
        binding("n", "Book a new slot"),
        binding("e/Enter", "Edit highlighted event"),
        binding("\u{2190}/\u{2192}", "Change slot or priority in form"),
        Line::from(""),
        Line::from(Span::styled("Screens", section_style)),
        binding("1/2", "Calendar / Profile"),
        Line::from(""),
        Line::from(vec![
            Span::styled("  q", key_style),
            Span::styled(" / ", t.dim),
            Span::styled("Esc       ", key_style),
            Span::raw("Quit / close popup"),
        ]),
    ];

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}
