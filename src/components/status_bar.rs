use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::{App, Tab};
use crate::theme;

use super::padding;

pub struct TabBar;

impl TabBar {
    pub fn render(frame: &mut Frame, area: Rect, active: Tab) {
        let t = theme::current();
        let tabs = [
            (Tab::Events, "[1]Events"),
            (Tab::Alarms, "[2]Alarms"),
            (Tab::Settings, "[3]Settings"),
        ];

        let mut spans = Vec::new();
        for (tab, label) in tabs {
            let style = if tab == active { t.tab_active } else { t.status };
            spans.push(Span::styled(format!(" {} ", label), style));
            spans.push(Span::styled(" ", t.status));
        }

        frame.render_widget(Paragraph::new(Line::from(spans)).style(t.status), area);
    }
}

pub struct StatusBar;

impl StatusBar {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let t = theme::current();
        let w = area.width as usize;

        // Status message wins over hints
        let right_text = if let Some(ref msg) = app.status_message {
            format!(" {} ", msg)
        } else {
            match app.tab {
                Tab::Events if w >= 70 => " jk:Move Sp:Select c:Create r:Reload ?:Help q:Quit",
                Tab::Events if w >= 45 => " Sp:Select c:Create q:Quit",
                Tab::Alarms if w >= 70 => " jk:Move a:Add d:Delete r:Reload ?:Help q:Quit",
                Tab::Alarms if w >= 45 => " a:Add d:Delete q:Quit",
                Tab::Settings if w >= 50 => " jk:Move Sp:Toggle ?:Help q:Quit",
                _ => " ?:Help q:Quit",
            }
            .to_string()
        };

        let left = format!(" {} alarms ", app.alarms().len());
        let gap = padding(w, &[left.as_str(), right_text.as_str()]);

        let line = Line::from(vec![
            Span::styled(left, t.status),
            Span::styled(gap, t.status),
            Span::styled(right_text, t.status),
        ]);

        frame.render_widget(Paragraph::new(line).style(t.status), area);
    }
}
