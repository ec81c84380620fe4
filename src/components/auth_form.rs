use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::event_form::render_field;
use crate::session::{SignInForm, SignUpForm};
use crate::theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    SignIn,
    SignUp,
}

/// Text fields of the sign-in and sign-up screens.
#[derive(Debug, Clone)]
pub struct AuthFormState {
    pub mode: AuthMode,
    pub sign_in: SignInForm,
    pub sign_up: SignUpForm,
    pub active: usize,
    pub error: Option<String>,
}

impl AuthFormState {
    pub fn new(mode: AuthMode) -> Self {
        Self {
            mode,
            sign_in: SignInForm::default(),
            sign_up: SignUpForm::default(),
            active: 0,
            error: None,
        }
    }

    pub fn field_count(&self) -> usize {
        match self.mode {
            AuthMode::SignIn => 2,
            AuthMode::SignUp => 4,
        }
    }

    pub fn next_field(&mut self) {
        self.active = (self.active + 1) % self.field_count();
    }

    pub fn prev_field(&mut self) {
        self.active = (self.active + self.field_count() - 1) % self.field_count();
    }

    fn active_value(&mut self) -> &mut String {
        match (self.mode, self.active) {
            (AuthMode::SignIn, 0) => &mut self.sign_in.email,
            (AuthMode::SignIn, _) => &mut self.sign_in.password,
            (AuthMode::SignUp, 0) => &mut self.sign_up.name,
            (AuthMode::SignUp, 1) => &mut self.sign_up.email,
            (AuthMode::SignUp, 2) => &mut self.sign_up.password,
            (AuthMode::SignUp, _) => &mut self.sign_up.confirm,
        }
    }

    pub fn input_char(&mut self, c: char) {
        self.error = None;
        self.active_value().push(c);
    }

    pub fn backspace(&mut self) {
        self.active_value().pop();
    }

    /// Labels and display values; passwords are masked.
    fn rows(&self) -> Vec<(&'static str, String)> {
        let mask = |s: &str| "*".repeat(s.chars().count());
        match self.mode {
            AuthMode::SignIn => vec![
                ("Email:", self.sign_in.email.clone()),
                ("Pass:", mask(&self.sign_in.password)),
            ],
            AuthMode::SignUp => vec![
                ("Name:", self.sign_up.name.clone()),
                ("Email:", self.sign_up.email.clone()),
                ("Pass:", mask(&self.sign_up.password)),
                ("Again:", mask(&self.sign_up.confirm)),
            ],
        }
    }
}

pub struct AuthForm;

impl AuthForm {
    pub fn render(frame: &mut Frame, area: Rect, state: &AuthFormState) {
        let t = theme::current();

        let w = area.width.clamp(30, 48);
        let h = (state.field_count() as u16 + 6).min(area.height);
        let x = area.x + (area.width.saturating_sub(w)) / 2;
        let y = area.y + (area.height.saturating_sub(h)) / 2;
        let form_area = Rect::new(x, y, w, h).intersection(area);

        let title = match state.mode {
            AuthMode::SignIn => " Login ",
            AuthMode::SignUp => " Create Account ",
        };
        let block = Block::default()
            .title(title)
            .title_style(t.header)
            .borders(Borders::ALL)
            .border_style(t.border);

        let inner = block.inner(form_area);
        frame.render_widget(block, form_area);

        let fields = state.rows();
        let mut constraints: Vec<Constraint> = fields.iter().map(|_| Constraint::Length(1)).collect();
        constraints.push(Constraint::Length(1)); // spacer
        constraints.push(Constraint::Length(1)); // error
        constraints.push(Constraint::Length(1)); // help
        constraints.push(Constraint::Min(0));
        let rows = Layout::vertical(constraints).split(inner);

        for (i, (label, value)) in fields.iter().enumerate() {
            render_field(frame, rows[i], label, value, state.active == i);
        }

        let n = fields.len();
        if let Some(ref err) = state.error {
            frame.render_widget(Paragraph::new(Span::styled(err.clone(), t.error)), rows[n + 1]);
        }

        let switch_hint = match state.mode {
            AuthMode::SignIn => ":Register ",
            AuthMode::SignUp => ":Back to login ",
        };
        let help = Line::from(vec![
            Span::styled("Enter", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(":Submit ", t.dim),
            Span::styled("F2", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(switch_hint, t.dim),
            Span::styled("Esc", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(":Quit", t.dim),
        ]);
        frame.render_widget(Paragraph::new(help), rows[n + 2]);
    }
}
