use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::PlannerState;
use crate::calendar::AvailableSlot;
use crate::theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Title,
    Slot,
    Priority,
    Participants,
}

impl FormField {
    pub fn next(&self) -> Self {
        match self {
            FormField::Title => FormField::Slot,
            FormField::Slot => FormField::Priority,
            FormField::Priority => FormField::Participants,
            FormField::Participants => FormField::Title,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            FormField::Title => FormField::Participants,
            FormField::Slot => FormField::Title,
            FormField::Priority => FormField::Slot,
            FormField::Participants => FormField::Priority,
        }
    }
}

pub struct EventForm;

impl EventForm {
    pub fn render(
        frame: &mut Frame,
        area: Rect,
        state: &PlannerState,
        active: FormField,
        slots: &[AvailableSlot],
    ) {
        let t = theme::current();

        let form_w = area.width.clamp(34, 52);
        let form_h = area.height.clamp(12, 20);
        let x = area.x + (area.width.saturating_sub(form_w)) / 2;
        let y = area.y + (area.height.saturating_sub(form_h)) / 2;
        let form_area = Rect::new(x, y, form_w, form_h).intersection(area);

        frame.render_widget(Clear, form_area);

        let title = if state.editing_index.is_some() {
            " Edit Event "
        } else {
            " Create Event "
        };
        let block = Block::default()
            .title(title)
            .title_style(Style::default().fg(ratatui::style::Color::Green).add_modifier(Modifier::BOLD))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(ratatui::style::Color::Green));

        let inner = block.inner(form_area);
        frame.render_widget(block, form_area);

        let rows = Layout::vertical([
            Constraint::Length(1), // title
            Constraint::Length(1), // slot
            Constraint::Length(1), // priority
            Constraint::Length(1), // participants
            Constraint::Length(1), // spacer
            Constraint::Min(1),    // slot list
            Constraint::Length(1), // help
        ])
        .split(inner);

        let slot_label = state
            .draft_slot
            .map(|s| s.label())
            .unwrap_or_else(|| "Select a slot".to_string());

        render_field(frame, rows[0], "Title:", &state.draft_title, active == FormField::Title);
        render_field(frame, rows[1], "Time:", &slot_label, active == FormField::Slot);
        render_field(
            frame,
            rows[2],
            "Prio:",
            state.draft_priority.label(),
            active == FormField::Priority,
        );
        render_field(
            frame,
            rows[3],
            "With:",
            &state.draft_participants,
            active == FormField::Participants,
        );

        let list_h = rows[5].height as usize;
        let offset = scroll_offset(state.draft_slot.map(|s| s.index()), slots.len(), list_h);
        let lines: Vec<Line> = slots
            .iter()
            .skip(offset)
            .take(list_h)
            .map(|s| {
                let chosen = state.draft_slot == Some(s.slot);
                let (marker, style) = if chosen {
                    ("> ", t.selected)
                } else if s.disabled {
                    ("x ", t.dim.add_modifier(Modifier::CROSSED_OUT))
                } else {
                    ("  ", Style::default())
                };
                Line::from(vec![
                    Span::styled(marker, style),
                    Span::styled(s.label.clone(), style),
                ])
            })
            .collect();
        frame.render_widget(Paragraph::new(lines), rows[5]);

        let help = Line::from(vec![
            Span::styled("Tab", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(":Next ", t.dim),
            Span::styled("\u{2190}/\u{2192}", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(":Slot ", t.dim),
            Span::styled("Enter", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(":Save ", t.dim),
            Span::styled("Esc", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(":Cancel", t.dim),
        ]);
        frame.render_widget(Paragraph::new(help), rows[6]);
    }
}

/// First visible row of a `len`-row list shown `height` rows at a time,
/// keeping `selected` on screen.
fn scroll_offset(selected: Option<usize>, len: usize, height: usize) -> usize {
    if height == 0 || len <= height {
        return 0;
    }
    match selected {
        Some(i) if i >= height => (i + 1 - height).min(len - height),
        _ => 0,
    }
}

pub(crate) fn render_field(frame: &mut Frame, area: Rect, label: &str, value: &str, active: bool) {
    let label_w = if label.is_empty() { 0 } else { 7 };
    let cursor = if active { "_" } else { "" };

    let style = if active {
        Style::default().fg(ratatui::style::Color::Cyan)
    } else {
        Style::default()
    };

    let mut spans = Vec::new();
    if !label.is_empty() {
        spans.push(Span::styled(
            format!("{:<width$}", label, width = label_w),
            theme::current().dim,
        ));
    }
    spans.push(Span::styled(format!("{}{}", value, cursor), style));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_order_wraps_both_ways() {
        let mut field = FormField::Title;
        for _ in 0..4 {
            field = field.next();
        }
        assert_eq!(field, FormField::Title);
        assert_eq!(FormField::Title.prev(), FormField::Participants);
        assert_eq!(FormField::Slot.next().prev(), FormField::Slot);
    }

    #[test]
    fn test_slot_list_scrolls_to_the_chosen_slot() {
        // Everything fits
        assert_eq!(scroll_offset(Some(9), 10, 10), 0);
        // Chosen slot already visible
        assert_eq!(scroll_offset(None, 10, 4), 0);
        assert_eq!(scroll_offset(Some(3), 10, 4), 0);
        // Chosen slot pulled up to the last visible row
        assert_eq!(scroll_offset(Some(4), 10, 4), 1);
        assert_eq!(scroll_offset(Some(9), 10, 4), 6);
        assert_eq!(scroll_offset(Some(9), 10, 0), 0);
    }
}
