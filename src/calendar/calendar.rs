use ratatui::style::Color;

#[derive(Debug, Clone)]
pub struct CalendarInfo {
    pub id: String,
    pub title: String,
    pub color: Color,
}
