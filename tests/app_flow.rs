use std::sync::Arc;

use calendar_alarms::alarm::{schema, seed_alarms, AlarmStore, MemoryStorage, STORAGE_KEY};
use calendar_alarms::app::{App, NoticeKind, Tab};
use calendar_alarms::calendar::{
    Access, CalendarEvent, CalendarInfo, EventSource, UnavailableSource,
};
use chrono::{DateTime, Duration, Local};
use color_eyre::Result;
use ratatui::style::Color;

struct StubSource {
    events: Vec<CalendarEvent>,
}

impl StubSource {
    fn with_titles(titles: &[&str]) -> Self {
        let base = Local::now() + Duration::hours(2);
        let events = titles
            .iter()
            .enumerate()
            .map(|(i, title)| {
                let start = base + Duration::hours(i as i64);
                CalendarEvent {
                    id: format!("ev{i}"),
                    title: title.to_string(),
                    start,
                    end: start + Duration::minutes(30),
                    is_all_day: false,
                    calendar_color: Color::Blue,
                    selected: false,
                }
            })
            .collect();
        Self { events }
    }
}

impl EventSource for StubSource {
    fn request_access(&self) -> Result<Access> {
        Ok(Access::Granted)
    }

    fn calendars(&self) -> Vec<CalendarInfo> {
        vec![CalendarInfo {
            id: "home".to_string(),
            title: "Home".to_string(),
            color: Color::Blue,
        }]
    }

    fn events_in_range(
        &self,
        _calendar_id: &str,
        _start: DateTime<Local>,
        _end: DateTime<Local>,
    ) -> Vec<CalendarEvent> {
        self.events.clone()
    }
}

fn app_with(storage: Arc<MemoryStorage>, source: StubSource) -> App {
    App::new(AlarmStore::new(storage), Box::new(source), 7).unwrap()
}

#[tokio::test]
async fn load_failure_shows_exactly_one_notice() {
    let storage = Arc::new(MemoryStorage::new());
    storage.fail_reads(true);
    let mut app = app_with(storage, StubSource::with_titles(&[]));

    app.load_alarms().await;

    assert!(app.alarms().is_empty());
    assert!(!app.alarms_loading);
    assert_eq!(app.notices.len(), 1);
    let notice = app.current_notice().unwrap();
    assert_eq!(notice.kind, NoticeKind::Error);
    assert_eq!(notice.message, "Failed to load alarms");

    app.dismiss_notice();
    assert!(app.current_notice().is_none());
}

#[tokio::test]
async fn selected_events_become_alarms() {
    let storage = Arc::new(MemoryStorage::new());
    let mut app = app_with(storage.clone(), StubSource::with_titles(&["Dentist", "Lunch", "Gym"]));
    app.load_alarms().await;
    app.tab = Tab::Events;

    app.selection.toggle_current();
    app.selection.move_down();
    app.selection.move_down();
    app.selection.toggle_current();
    app.create_alarms_from_selection().await;

    let titles: Vec<&str> = app.alarms().iter().map(|a| a.title.as_str()).collect();
    assert_eq!(titles, vec!["Team Meeting", "Daily Standup", "Dentist", "Gym"]);
    assert_eq!(app.calendar.as_ref().unwrap().title, "Home");
    assert_eq!(app.tab, Tab::Alarms);
    assert_eq!(app.alarm_cursor, 3);
    assert_eq!(app.selection.selected_count(), 0);
    assert_eq!(app.current_notice().unwrap().kind, NoticeKind::Success);

    let persisted = schema::decode(&storage.raw(STORAGE_KEY).unwrap()).unwrap();
    assert_eq!(persisted.alarms.len(), 4);
    assert!(persisted.alarms[2].days.is_empty());
}

#[tokio::test]
async fn failed_commit_keeps_selection() {
    let storage = Arc::new(MemoryStorage::new());
    let mut app = app_with(storage.clone(), StubSource::with_titles(&["Dentist"]));
    app.load_alarms().await;
    storage.fail_writes(true);

    app.selection.toggle_current();
    app.create_alarms_from_selection().await;

    assert_eq!(app.alarms(), seed_alarms().as_slice());
    assert_eq!(app.selection.selected_count(), 1);
    assert_eq!(app.current_notice().unwrap().message, "Failed to add new alarms");
}

#[tokio::test]
async fn empty_selection_only_sets_status() {
    let storage = Arc::new(MemoryStorage::new());
    let mut app = app_with(storage, StubSource::with_titles(&["Dentist"]));
    app.load_alarms().await;

    app.create_alarms_from_selection().await;

    assert!(app.notices.is_empty());
    assert_eq!(app.status_message.as_deref(), Some("No events selected"));
    assert_eq!(app.alarms().len(), 2);
}

#[tokio::test]
async fn delete_waits_for_confirmation() {
    let storage = Arc::new(MemoryStorage::new());
    let mut app = app_with(storage, StubSource::with_titles(&[]));
    app.load_alarms().await;

    app.next_alarm();
    app.request_delete();
    assert_eq!(app.pending_delete_title(), Some("Daily Standup"));
    assert_eq!(app.alarms().len(), 2);

    app.cancel_delete();
    assert!(app.pending_delete.is_none());
    assert_eq!(app.alarms().len(), 2);

    app.request_delete();
    app.confirm_delete().await;
    let ids: Vec<&str> = app.alarms().iter().map(|a| a.id.as_str()).collect();
    assert_eq!(ids, vec!["1"]);
    assert_eq!(app.alarm_cursor, 0);
}

#[tokio::test]
async fn unsupported_platform_has_no_events() {
    let storage = Arc::new(MemoryStorage::new());
    let mut app = App::new(AlarmStore::new(storage), Box::new(UnavailableSource), 7).unwrap();
    app.load_alarms().await;

    assert_eq!(app.access, Access::Unsupported);
    assert!(app.calendar.is_none());
    assert!(app.selection.events().is_empty());
    assert_eq!(app.alarms().len(), 2);
}
