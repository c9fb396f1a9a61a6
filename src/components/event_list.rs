use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use crate::calendar::{Access, CalendarInfo, EventSelection};
use crate::theme;

use super::truncate;

pub struct EventList;

impl EventList {
    pub fn render(
        frame: &mut Frame,
        area: Rect,
        access: Access,
        calendar: Option<&CalendarInfo>,
        selection: &EventSelection,
        window_days: u32,
    ) {
        let t = theme::current();
        let events = selection.events();

        let selected = selection.selected_count();
        let count_str = if selected > 0 {
            format!(
                " Create {} Alarm{} (c) ",
                selected,
                if selected == 1 { "" } else { "s" }
            )
        } else {
            String::new()
        };

        let mut title = vec![Span::styled(" Calendar Events", t.header)];
        if let Some(cal) = calendar {
            title.push(Span::styled(": ", t.header));
            title.push(Span::styled("\u{25cf} ", Style::default().fg(cal.color)));
            title.push(Span::styled(cal.title.clone(), t.header));
        }
        title.push(Span::styled(format!(", next {} days ", window_days), t.header));

        let block = Block::default()
            .title(Line::from(title))
            .title_style(t.header)
            .title_bottom(Line::from(Span::styled(count_str, t.marked)))
            .borders(Borders::ALL)
            .border_style(t.border);

        let notice = match access {
            Access::Unsupported => {
                Some("Calendar functionality is not available on this platform.")
            }
            Access::Denied => Some(
                "Please grant calendar permissions to use this feature.\n\n\
                 System Settings > Privacy & Security > Calendars",
            ),
            Access::Granted if events.is_empty() => Some("No upcoming events"),
            Access::Granted => None,
        };

        if let Some(msg) = notice {
            let inner = block.inner(area);
            frame.render_widget(block, area);
            let para = Paragraph::new(msg).style(t.dim).wrap(Wrap { trim: false });
            frame.render_widget(para, inner);
            return;
        }

        let inner_w = area.width.saturating_sub(2) as usize;

        let items: Vec<ListItem> = events
            .iter()
            .map(|ev| {
                let marker = if ev.selected { "[x]" } else { "[ ]" };
                let title_style = if ev.selected { t.marked } else { Style::default() };
                ListItem::new(vec![
                    Line::from(vec![
                        Span::styled(format!(" {} ", marker), title_style),
                        Span::styled("\u{25cf} ", Style::default().fg(ev.calendar_color)),
                        Span::styled(
                            truncate(&ev.title, inner_w.saturating_sub(8)),
                            title_style,
                        ),
                    ]),
                    Line::from(Span::styled(format!("       {}", ev.duration_display()), t.dim)),
                ])
            })
            .collect();

        let list = List::new(items).block(block).highlight_style(t.selected);

        let mut state = ListState::default().with_selected(Some(selection.cursor()));
        frame.render_stateful_widget(list, area, &mut state);
    }
}
