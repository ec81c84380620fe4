use chrono::{Datelike, NaiveDate};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::calendar::grid::DAY_NAMES;
use crate::calendar::{Event, Priority};
use crate::theme;

pub struct DayView;

impl DayView {
    /// Week strip on top, then the owner's events for `date`.
    pub fn render(
        frame: &mut Frame,
        area: Rect,
        date: NaiveDate,
        week: Option<[NaiveDate; 7]>,
        events: &[(usize, &Event)],
        selected: usize,
    ) {
        let t = theme::current();
        let w = area.width as usize;

        let title = if w >= 30 {
            format!(" {} ", date.format("%A, %B %d, %Y"))
        } else {
            format!(" {} ", date.format("%b %d, %Y"))
        };

        let count_str = match events.len() {
            0 => String::new(),
            1 => " 1 event ".to_string(),
            n => format!(" {} events ", n),
        };

        let block = Block::default()
            .title(title)
            .title_style(t.header)
            .title_bottom(Line::from(Span::styled(count_str, t.dim)))
            .borders(Borders::ALL)
            .border_style(t.border);

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let rows = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(inner);

        if let Some(week) = week {
            frame.render_widget(Paragraph::new(week_strip(&week, date)), rows[0]);
        }

        if events.is_empty() {
            let msg = Paragraph::new("No events. Press n to book a slot.").style(t.dim);
            frame.render_widget(msg, rows[2]);
            return;
        }

        let items: Vec<ListItem> = events
            .iter()
            .enumerate()
            .map(|(i, (_, ev))| format_event(ev, i == selected))
            .collect();

        frame.render_widget(List::new(items), rows[2]);
    }
}

fn week_strip(week: &[NaiveDate; 7], selected: NaiveDate) -> Line<'static> {
    let t = theme::current();
    let spans: Vec<Span> = week
        .iter()
        .map(|d| {
            let label = format!(
                " {} {:>2} ",
                DAY_NAMES[d.weekday().num_days_from_sunday() as usize],
                d.day()
            );
            let style = if *d == selected { t.selected } else { t.dim };
            Span::styled(label, style)
        })
        .collect();
    Line::from(spans)
}

fn priority_style(priority: Priority) -> Option<Style> {
    match priority {
        Priority::CriticalEvent => Some(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
        Priority::Urgent => Some(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
        Priority::TopPriority => Some(Style::default().fg(Color::Magenta)),
        Priority::None => None,
    }
}

fn format_event(ev: &Event, highlighted: bool) -> ListItem<'static> {
    let t = theme::current();
    let accent = Span::styled("  ", Style::default().bg(t.accent(ev.color)));

    let time_span = Span::styled(
        format!(" {} ", ev.slot.label()),
        Style::default().add_modifier(Modifier::DIM),
    );

    let title_style = if highlighted {
        t.highlight
    } else {
        Style::default()
    };
    let mut spans = vec![accent, time_span, Span::styled(ev.title.clone(), title_style)];

    if let Some(style) = priority_style(ev.priority) {
        spans.push(Span::styled(format!(" [{}]", ev.priority.label()), style));
    }

    if !ev.participants.is_empty() {
        spans.push(Span::styled(format!(" ({})", ev.participants.join(" ")), t.dim));
    }

    ListItem::new(Line::from(spans))
}
