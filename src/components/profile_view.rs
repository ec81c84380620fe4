use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::session::Profile;
use crate::theme;

pub struct ProfileView;

impl ProfileView {
    pub fn render(frame: &mut Frame, area: Rect, profile: &Profile, greeting: &str, event_count: usize) {
        let t = theme::current();

        let block = Block::default()
            .title(" Profile ")
            .title_style(t.header)
            .borders(Borders::ALL)
            .border_style(t.border);

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let key_style = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);

        let lines = vec![
            Line::from(Span::styled(greeting.to_string(), t.header)),
            Line::from(""),
            Line::from(vec![
                Span::styled(
                    format!(" {} ", profile.initials()),
                    Style::default()
                        .fg(Color::White)
                        .bg(Color::Blue)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw("  "),
                Span::styled(profile.display_name().to_string(), t.header),
            ]),
            Line::from(Span::styled(profile.email.clone(), t.dim)),
            Line::from(""),
            Line::from(vec![
                Span::styled("Events booked: ", t.dim),
                Span::raw(event_count.to_string()),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("  i ", key_style),
                Span::raw("Info"),
            ]),
            Line::from(vec![
                Span::styled("  o ", key_style),
                Span::raw("Sign Out"),
            ]),
        ];

        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
    }

    pub fn render_info_popup(frame: &mut Frame, area: Rect, profile: &Profile) {
        let popup_w = area.width.clamp(30, 50).min(area.width);
        let popup_h = area.height.clamp(8, 9).min(area.height);
        let x = area.x + (area.width.saturating_sub(popup_w)) / 2;
        let y = area.y + (area.height.saturating_sub(popup_h)) / 2;
        let popup_area = Rect::new(x, y, popup_w, popup_h);

        frame.render_widget(Clear, popup_area);

        let t = theme::current();
        let block = Block::default()
            .title(" Your Info ")
            .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));

        let inner = block.inner(popup_area);
        frame.render_widget(block, popup_area);

        let lines = vec![
            Line::from(vec![
                Span::styled("Name:  ", t.dim),
                Span::raw(profile.display_name().to_string()),
            ]),
            Line::from(vec![
                Span::styled("Email: ", t.dim),
                Span::raw(profile.email.clone()),
            ]),
            Line::from(""),
            Line::from(Span::styled("Press Esc to close", t.dim)),
        ];

        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
    }
}
