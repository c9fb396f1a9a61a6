use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::settings::{Setting, Settings};
use crate::theme;

use super::padding;

pub struct SettingsView;

impl SettingsView {
    pub fn render(frame: &mut Frame, area: Rect, settings: &Settings, platform_notice: bool) {
        let t = theme::current();

        let layout = Layout::vertical([Constraint::Min(3), Constraint::Length(1)]).split(area);

        let block = Block::default()
            .title(" Settings ")
            .title_style(t.header)
            .borders(Borders::ALL)
            .border_style(t.border);

        let inner_w = area.width.saturating_sub(2) as usize;

        let items: Vec<ListItem> = Setting::ALL
            .iter()
            .map(|&setting| {
                let on = settings.get(setting);
                let switch = if on { "[ on]" } else { "[off]" };
                let switch_style = if on {
                    t.success.add_modifier(Modifier::BOLD)
                } else {
                    t.dim
                };
                let label = format!(" {}", setting.label());
                let gap = padding(inner_w.saturating_sub(2), &[label.as_str(), switch]);
                ListItem::new(Line::from(vec![
                    Span::styled(label, Style::default()),
                    Span::raw(gap),
                    Span::styled(switch, switch_style),
                ]))
            })
            .collect();

        let list = List::new(items).block(block).highlight_style(t.selected);
        let mut state = ListState::default().with_selected(Some(settings.cursor));
        frame.render_stateful_widget(list, layout[0], &mut state);

        if platform_notice {
            let notice = Paragraph::new(Span::styled(
                " Note: Some features may not be available on this platform.",
                t.dim.add_modifier(Modifier::ITALIC),
            ));
            frame.render_widget(notice, layout[1]);
        }
    }
}
