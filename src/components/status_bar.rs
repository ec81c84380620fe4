use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::{App, InputMode, Screen};
use crate::theme;

pub struct StatusBar;

impl StatusBar {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let t = theme::current();
        let w = area.width as usize;

        let screen_str = match app.screen {
            Screen::SignIn => "Sign In",
            Screen::SignUp => "Sign Up",
            Screen::Calendar => "[1]Calendar",
            Screen::Profile => "[2]Profile",
        };

        let mode_str = match app.input_mode {
            InputMode::Form if app.state.editing_index.is_some() => " [Edit Event]",
            InputMode::Form => " [New Event]",
            InputMode::Normal | InputMode::Auth => "",
        };

        let right_text = if let Some(ref msg) = app.status_message {
            format!(" {} ", msg)
        } else {
            match app.screen {
                Screen::Calendar if w >= 80 => {
                    " hl:Day \u{2191}\u{2193}:Week jk:Pick [/]:Mon n:New e:Edit ?:Help q:Quit".to_string()
                }
                Screen::Calendar if w >= 50 => " n:New e:Edit ?:Help q:Quit".to_string(),
                Screen::Profile => " i:Info o:Sign out 1:Calendar q:Quit".to_string(),
                _ => " ?:Help".to_string(),
            }
        };

        let left = format!(" {}{} ", screen_str, mode_str);
        let padding = " ".repeat(w.saturating_sub(left.len() + right_text.len()));

        let line = Line::from(vec![
            Span::styled(left, t.status),
            Span::styled(padding, t.status),
            Span::styled(right_text, t.status),
        ]);

        frame.render_widget(Paragraph::new(line).style(t.status), area);
    }
}
