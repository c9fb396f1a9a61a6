use log::info;

use crate::alarm::{Alarm, AlarmStore, Days, StoreResult};

use super::event::CalendarEvent;

/// Upcoming events plus the user's per-event selection. Nothing here is persisted.
#[derive(Debug, Default)]
pub struct EventSelection {
    events: Vec<CalendarEvent>,
    cursor: usize,
}

impl EventSelection {
    pub fn new(events: Vec<CalendarEvent>) -> Self {
        Self { events, cursor: 0 }
    }

    pub fn events(&self) -> &[CalendarEvent] {
        &self.events
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn move_down(&mut self) {
        if self.cursor + 1 < self.events.len() {
            self.cursor += 1;
        }
    }

    pub fn move_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Flips `selected` on every event with `id`.
    pub fn toggle(&mut self, id: &str) {
        for ev in self.events.iter_mut().filter(|ev| ev.id == id) {
            ev.selected = !ev.selected;
        }
    }

    /// Flips the event under the cursor only, so recurring occurrences stay independent.
    pub fn toggle_current(&mut self) {
        if let Some(ev) = self.events.get_mut(self.cursor) {
            ev.selected = !ev.selected;
        }
    }

    pub fn selected_count(&self) -> usize {
        self.events.iter().filter(|ev| ev.selected).count()
    }

    pub fn clear(&mut self) {
        for ev in &mut self.events {
            ev.selected = false;
        }
    }

    /// One alarm per selected event, in event order.
    pub fn to_alarms(&self, days: &Days) -> Vec<Alarm> {
        self.events
            .iter()
            .filter(|ev| ev.selected)
            .map(|ev| Alarm::new(ev.alarm_id(), ev.title.clone(), ev.alarm_time(), days.clone()))
            .collect()
    }

    /// Appends alarms for the selected events. The selection is cleared only on success.
    pub async fn commit(&mut self, store: &mut AlarmStore, days: &Days) -> StoreResult<usize> {
        let alarms = self.to_alarms(days);
        let count = alarms.len();
        if count == 0 {
            return Ok(0);
        }

        store.append(alarms).await?;
        info!("event=selection_committed module=selection count={}", count);
        self.clear();
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Local, TimeZone, Weekday};
    use ratatui::style::Color;

    fn ev(id: &str, hour: u32) -> CalendarEvent {
        let start = Local.with_ymd_and_hms(2026, 6, 2, hour, 0, 0).unwrap();
        CalendarEvent {
            id: id.to_string(),
            title: format!("Event {id}"),
            start,
            end: start + Duration::minutes(30),
            is_all_day: false,
            calendar_color: Color::White,
            selected: false,
        }
    }

    #[test]
    fn toggle_flips_by_id() {
        let mut sel = EventSelection::new(vec![ev("a", 9), ev("b", 10)]);
        sel.toggle("b");
        assert_eq!(sel.selected_count(), 1);
        sel.toggle("b");
        assert_eq!(sel.selected_count(), 0);
        sel.toggle("missing");
        assert_eq!(sel.selected_count(), 0);
    }

    #[test]
    fn cursor_stays_in_bounds() {
        let mut sel = EventSelection::new(vec![ev("a", 9), ev("b", 10)]);
        sel.move_up();
        assert_eq!(sel.cursor(), 0);
        sel.move_down();
        sel.move_down();
        assert_eq!(sel.cursor(), 1);
        sel.toggle_current();
        assert!(sel.events()[1].selected);
    }

    #[test]
    fn to_alarms_maps_selected_events_in_order() {
        let mut sel = EventSelection::new(vec![ev("a", 9), ev("b", 14), ev("c", 16)]);
        sel.toggle("c");
        sel.toggle("a");

        let days = Days::from([Weekday::Tue]);
        let alarms = sel.to_alarms(&days);

        assert_eq!(alarms.len(), 2);
        assert_eq!(alarms[0].title, "Event a");
        assert_eq!(alarms[0].time, "9:00 AM");
        assert_eq!(alarms[1].time, "4:00 PM");
        assert_eq!(alarms[1].days, days);
        assert!(alarms[0].id.starts_with("a@"));
    }

    #[test]
    fn empty_selection_yields_no_alarms() {
        let sel = EventSelection::new(vec![ev("a", 9)]);
        assert!(sel.to_alarms(&Days::new()).is_empty());
    }
}
