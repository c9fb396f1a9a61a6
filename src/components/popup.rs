use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::app::{Notice, NoticeKind};
use crate::theme;

fn centered(area: Rect, max_w: u16, max_h: u16) -> Rect {
    let w = area.width.min(max_w);
    let h = area.height.min(max_h);
    let x = area.x + area.width.saturating_sub(w) / 2;
    let y = area.y + area.height.saturating_sub(h) / 2;
    Rect::new(x, y, w, h)
}

fn framed(frame: &mut Frame, area: Rect, title: &str, style: Style) -> Rect {
    frame.render_widget(Clear, area);
    let block = Block::default()
        .title(format!(" {} ", title))
        .title_style(style.add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(style);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    inner
}

pub fn render_notice(frame: &mut Frame, area: Rect, notice: &Notice) {
    let t = theme::current();
    let style = match notice.kind {
        NoticeKind::Success => t.success,
        NoticeKind::Error => t.danger,
    };
    let popup = centered(area, 54, 9);
    let inner = framed(frame, popup, notice.title(), style);

    let mut lines = vec![Line::from(notice.message.clone())];
    if let Some(ref detail) = notice.detail {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(detail.clone(), t.dim)));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("Press Enter to close", t.dim)));

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}

pub fn render_confirm_delete(frame: &mut Frame, area: Rect, title: &str) {
    let t = theme::current();
    let popup = centered(area, 50, 8);
    let inner = framed(frame, popup, "Delete Alarm", t.danger);

    let lines = vec![
        Line::from("Are you sure you want to delete this alarm?"),
        Line::from(Span::styled(title.to_string(), t.header)),
        Line::from(""),
        Line::from(vec![
            Span::styled("y", theme::KEY_STYLE),
            Span::styled(":Delete  ", t.danger),
            Span::styled("n", theme::KEY_STYLE),
            Span::styled(":Cancel", t.dim),
        ]),
    ];

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}

pub fn render_help(frame: &mut Frame, area: Rect) {
    let t = theme::current();
    let popup = centered(area, 52, 22);
    let inner = framed(frame, popup, "Keybindings", t.success);

    let key = |k: &'static str, desc: &'static str| {
        Line::from(vec![
            Span::styled(format!("  {:<10}", k), theme::KEY_STYLE),
            Span::raw(desc),
        ])
    };

    let lines = vec![
        Line::from(Span::styled("Tabs", theme::SECTION_STYLE)),
        key("1/2/3", "Events / Alarms / Settings"),
        key("j/k", "Move down/up"),
        Line::from(""),
        Line::from(Span::styled("Events", theme::SECTION_STYLE)),
        key("Space", "Select event"),
        key("c/Enter", "Create alarms from selection"),
        key("r", "Reload events"),
        Line::from(""),
        Line::from(Span::styled("Alarms", theme::SECTION_STYLE)),
        key("a", "Add alarm from events"),
        key("d", "Delete alarm"),
        key("r", "Reload alarms"),
        Line::from(""),
        Line::from(Span::styled("Settings", theme::SECTION_STYLE)),
        key("Space", "Toggle setting"),
        Line::from(""),
        Line::from(vec![
            Span::styled("  q", theme::KEY_STYLE),
            Span::styled(" / ", t.dim),
            Span::styled("Esc     ", theme::KEY_STYLE),
            Span::raw("Quit / close popup"),
        ]),
    ];

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}
