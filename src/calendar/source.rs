use chrono::{DateTime, Duration, Local};
use color_eyre::Result;

use super::calendar::CalendarInfo;
use super::event::CalendarEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Granted,
    Denied,
    /// No calendar backend on this platform.
    Unsupported,
}

/// Read-only access to the device calendar.
pub trait EventSource {
    fn request_access(&self) -> Result<Access>;
    fn calendars(&self) -> Vec<CalendarInfo>;
    fn events_in_range(
        &self,
        calendar_id: &str,
        start: DateTime<Local>,
        end: DateTime<Local>,
    ) -> Vec<CalendarEvent>;
}

/// The first calendar and its events in `[now, now + days)`, sorted by start.
pub fn upcoming_events(
    source: &dyn EventSource,
    now: DateTime<Local>,
    days: u32,
) -> (Option<CalendarInfo>, Vec<CalendarEvent>) {
    let Some(calendar) = source.calendars().into_iter().next() else {
        return (None, Vec::new());
    };
    let end = now + Duration::days(i64::from(days));

    let mut events: Vec<CalendarEvent> = source
        .events_in_range(&calendar.id, now, end)
        .into_iter()
        .filter(|ev| ev.start < end && ev.end >= now)
        .map(|mut ev| {
            ev.selected = false;
            ev
        })
        .collect();
    events.sort_by_key(|e| e.start);
    (Some(calendar), events)
}

/// Backend for platforms without calendar access.
pub struct UnavailableSource;

impl EventSource for UnavailableSource {
    fn request_access(&self) -> Result<Access> {
        Ok(Access::Unsupported)
    }

    fn calendars(&self) -> Vec<CalendarInfo> {
        Vec::new()
    }

    fn events_in_range(
        &self,
        _calendar_id: &str,
        _start: DateTime<Local>,
        _end: DateTime<Local>,
    ) -> Vec<CalendarEvent> {
        Vec::new()
    }
}

/// The calendar backend for the current platform.
pub fn platform_source() -> Result<Box<dyn EventSource>> {
    #[cfg(target_os = "macos")]
    {
        Ok(Box::new(super::eventkit::EventKitSource::new()?))
    }
    #[cfg(not(target_os = "macos"))]
    {
        Ok(Box::new(UnavailableSource))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use ratatui::style::Color;

    struct FixedSource {
        calendars: Vec<CalendarInfo>,
        events: Vec<CalendarEvent>,
    }

    impl EventSource for FixedSource {
        fn request_access(&self) -> Result<Access> {
            Ok(Access::Granted)
        }

        fn calendars(&self) -> Vec<CalendarInfo> {
            self.calendars.clone()
        }

        fn events_in_range(
            &self,
            calendar_id: &str,
            _start: DateTime<Local>,
            _end: DateTime<Local>,
        ) -> Vec<CalendarEvent> {
            assert_eq!(calendar_id, "first");
            self.events.clone()
        }
    }

    fn cal(id: &str) -> CalendarInfo {
        CalendarInfo {
            id: id.to_string(),
            title: format!("Calendar {id}"),
            color: Color::White,
        }
    }

    fn ev(id: &str, start: DateTime<Local>) -> CalendarEvent {
        CalendarEvent {
            id: id.to_string(),
            title: id.to_string(),
            start,
            end: start + Duration::hours(1),
            is_all_day: false,
            calendar_color: Color::White,
            selected: true,
        }
    }

    #[test]
    fn uses_first_calendar_and_window() {
        let now = Local.with_ymd_and_hms(2026, 5, 1, 12, 0, 0).unwrap();
        let source = FixedSource {
            calendars: vec![cal("first"), cal("second")],
            events: vec![
                ev("late", now + Duration::days(3)),
                ev("early", now + Duration::hours(1)),
                ev("past", now - Duration::days(1)),
                ev("beyond", now + Duration::days(7)),
            ],
        };

        let (calendar, events) = upcoming_events(&source, now, 7);
        assert_eq!(calendar.unwrap().title, "Calendar first");
        let ids: Vec<&str> = events.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["early", "late"]);
        assert!(events.iter().all(|e| !e.selected));
    }

    #[test]
    fn no_calendars_means_no_events() {
        let now = Local::now();
        let (calendar, events) = upcoming_events(&UnavailableSource, now, 7);
        assert!(calendar.is_none());
        assert!(events.is_empty());
    }
}
