use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::alarm::Alarm;
use crate::theme;

use super::truncate;

pub struct AlarmList;

impl AlarmList {
    pub fn render(frame: &mut Frame, area: Rect, alarms: &[Alarm], cursor: usize, loading: bool) {
        let t = theme::current();
        let w = area.width as usize;

        let title = if w >= 25 && !loading {
            format!(" Alarms ({}) ", alarms.len())
        } else {
            " Alarms ".to_string()
        };

        let block = Block::default()
            .title(title)
            .title_style(t.header)
            .borders(Borders::ALL)
            .border_style(t.border);

        if loading {
            let inner = block.inner(area);
            frame.render_widget(block, area);
            frame.render_widget(Paragraph::new("Loading alarms...").style(t.dim), inner);
            return;
        }

        if alarms.is_empty() {
            let inner = block.inner(area);
            frame.render_widget(block, area);
            let msg = Paragraph::new(vec![
                Line::from(Span::styled("No alarms set", t.header)),
                Line::from(Span::styled("Add alarms from your calendar events (a)", t.dim)),
            ]);
            frame.render_widget(msg, inner);
            return;
        }

        let inner_w = area.width.saturating_sub(2) as usize;

        let items: Vec<ListItem> = alarms
            .iter()
            .map(|alarm| {
                let mut lines = vec![
                    Line::from(Span::styled(format!(" {}", alarm.time), t.time)),
                    Line::from(Span::styled(
                        format!(" {}", truncate(&alarm.title, inner_w.saturating_sub(1))),
                        Style::default(),
                    )),
                ];

                if !alarm.days.is_empty() {
                    let mut pills = vec![Span::raw(" ")];
                    for day in alarm.days.labels() {
                        pills.push(Span::styled(format!(" {} ", day), t.pill));
                        pills.push(Span::raw(" "));
                    }
                    lines.push(Line::from(pills));
                }
                lines.push(Line::from(""));

                ListItem::new(lines)
            })
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_style(t.selected)
            .highlight_symbol("\u{25b8}");

        let mut state = ListState::default().with_selected(Some(cursor.min(alarms.len() - 1)));
        frame.render_stateful_widget(list, area, &mut state);
    }
}
