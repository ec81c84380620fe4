use std::collections::HashSet;

use chrono::NaiveDate;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::calendar::grid::DAY_NAMES;
use crate::calendar::{DayGrid, MonthCursor};
use crate::theme;

pub struct MonthView;

impl MonthView {
    pub fn render(
        frame: &mut Frame,
        area: Rect,
        cursor: MonthCursor,
        selected_day: u32,
        today: NaiveDate,
        days_with_events: &HashSet<u32>,
    ) {
        let t = theme::current();

        let block = Block::default()
            .title(format!(" \u{2039} {} {} \u{203a} ", cursor.name(), cursor.year))
            .title_style(t.header)
            .borders(Borders::ALL)
            .border_style(t.border);

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let header = Line::from(
            DAY_NAMES
                .iter()
                .map(|d| Span::styled(format!("{:^5}", d), t.header))
                .collect::<Vec<_>>(),
        );

        let grid = DayGrid::new(cursor);
        let weeks: Vec<Line> = grid
            .weeks()
            .map(|week| {
                let cells: Vec<Span> = week
                    .iter()
                    .map(|cell| match cell {
                        None => Span::raw("     "),
                        Some(day) => {
                            let marker = if days_with_events.contains(day) { '*' } else { ' ' };
                            let is_today = cursor.date(*day) == Some(today);
                            let style = match (*day == selected_day, is_today) {
                                (true, true) => t.today.add_modifier(Modifier::BOLD),
                                (true, false) => t.selected,
                                (false, true) => t.today,
                                _ => Style::default(),
                            };
                            Span::styled(format!(" {:>2}{} ", day, marker), style)
                        }
                    })
                    .collect();
                Line::from(cells)
            })
            .collect();

        let mut constraints = vec![Constraint::Length(1)];
        constraints.extend(weeks.iter().map(|_| Constraint::Length(1)));
        constraints.push(Constraint::Min(0));

        let rows = Layout::vertical(constraints).split(inner);

        frame.render_widget(Paragraph::new(header), rows[0]);
        for (i, week) in weeks.into_iter().enumerate() {
            frame.render_widget(Paragraph::new(week), rows[i + 1]);
        }
    }
}
