use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::calendar::{color_for_new_event, MonthCursor};
use crate::theme;

pub struct GoalsView;

impl GoalsView {
    pub fn render(frame: &mut Frame, area: Rect, cursor: MonthCursor, goals: &[String]) {
        let t = theme::current();

        let block = Block::default()
            .title(format!(" {} Goals ", cursor.name()))
            .title_style(t.header)
            .borders(Borders::ALL)
            .border_style(t.border);

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let lines: Vec<Line> = if goals.is_empty() {
            vec![Line::from(Span::styled("No goals in config.toml", t.dim))]
        } else {
            goals
                .iter()
                .enumerate()
                .map(|(i, goal)| {
                    let accent = t.accent(color_for_new_event(i));
                    Line::from(vec![
                        Span::styled("\u{258c} ", Style::default().fg(accent)),
                        Span::raw(goal.clone()),
                    ])
                })
                .collect()
        };

        frame.render_widget(Paragraph::new(lines), inner);
    }
}
