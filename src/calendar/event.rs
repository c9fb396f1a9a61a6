use chrono::{DateTime, Local};
use ratatui::style::Color;

#[derive(Debug, Clone)]
pub struct CalendarEvent {
    pub id: String,
    pub title: String,
    pub start: DateTime<Local>,
    pub end: DateTime<Local>,
    pub is_all_day: bool,
    pub calendar_color: Color,
    /// Transient selection state, never persisted.
    pub selected: bool,
}

impl CalendarEvent {
    /// "Mar 4, 9:30 AM - 10:00 AM", or "Mar 4, All day".
    pub fn duration_display(&self) -> String {
        let day = self.start.format("%b %-d");
        if self.is_all_day {
            format!("{}, All day", day)
        } else {
            let start = self.start.format("%-I:%M %p");
            let end = self.end.format("%-I:%M %p");
            format!("{}, {} - {}", day, start, end)
        }
    }

    /// Display time used for alarms created from this event.
    pub fn alarm_time(&self) -> String {
        self.start.format("%-I:%M %p").to_string()
    }

    /// Alarm id for this occurrence. Recurring events share `id`, so the start is appended.
    pub fn alarm_id(&self) -> String {
        format!("{}@{}", self.id, self.start.timestamp())
    }
}
