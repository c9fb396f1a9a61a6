use std::sync::mpsc;

use block2::RcBlock;
use chrono::{DateTime, Local, TimeZone};
use color_eyre::eyre::{eyre, Result};
use objc2::rc::Retained;
use objc2::runtime::Bool;
use objc2_event_kit::{EKAuthorizationStatus, EKCalendar, EKEntityType, EKEvent, EKEventStore};
use objc2_foundation::{NSArray, NSDate, NSError, NSString};
use ratatui::style::Color;

use super::calendar::CalendarInfo;
use super::event::CalendarEvent;
use super::source::{Access, EventSource};

/// Seconds between Unix epoch (1970-01-01) and NSDate reference date (2001-01-01)
const NSDATE_UNIX_OFFSET: f64 = 978307200.0;

pub struct EventKitSource {
    store: Retained<EKEventStore>,
}

impl EventKitSource {
    pub fn new() -> Result<Self> {
        let store = unsafe { EKEventStore::new() };
        Ok(Self { store })
    }

    fn authorization_status() -> EKAuthorizationStatus {
        unsafe { EKEventStore::authorizationStatusForEntityType(EKEntityType::Event) }
    }
}

impl EventSource for EventKitSource {
    fn request_access(&self) -> Result<Access> {
        match Self::authorization_status() {
            EKAuthorizationStatus::FullAccess => return Ok(Access::Granted),
            EKAuthorizationStatus::Denied | EKAuthorizationStatus::Restricted => {
                return Ok(Access::Denied);
            }
            _ => {}
        }

        let (tx, rx) = mpsc::channel();
        let block = RcBlock::new(move |granted: Bool, _error: *mut NSError| {
            let _ = tx.send(granted.as_bool());
        });

        unsafe {
            self.store
                .requestFullAccessToEventsWithCompletion(&*block as *const _ as *mut _);
        }

        let granted = rx
            .recv()
            .map_err(|_| eyre!("Failed to receive calendar access response"))?;
        Ok(if granted { Access::Granted } else { Access::Denied })
    }

    fn calendars(&self) -> Vec<CalendarInfo> {
        let ek_calendars = unsafe { self.store.calendarsForEntityType(EKEntityType::Event) };

        (0..ek_calendars.len())
            .map(|i| {
                let cal = ek_calendars.objectAtIndex(i);
                CalendarInfo {
                    id: unsafe { cal.calendarIdentifier().to_string() },
                    title: unsafe { cal.title().to_string() },
                    color: calendar_color(&cal),
                }
            })
            .collect()
    }

    fn events_in_range(
        &self,
        calendar_id: &str,
        start: DateTime<Local>,
        end: DateTime<Local>,
    ) -> Vec<CalendarEvent> {
        let identifier = NSString::from_str(calendar_id);
        let Some(calendar) = (unsafe { self.store.calendarWithIdentifier(&identifier) }) else {
            return Vec::new();
        };
        let calendars = NSArray::from_retained_slice(&[calendar]);

        let ns_start = datetime_to_nsdate(&start);
        let ns_end = datetime_to_nsdate(&end);

        let predicate = unsafe {
            self.store.predicateForEventsWithStartDate_endDate_calendars(
                &ns_start,
                &ns_end,
                Some(&calendars),
            )
        };

        let ek_events = unsafe { self.store.eventsMatchingPredicate(&predicate) };

        (0..ek_events.len())
            .map(|i| convert_event(&ek_events.objectAtIndex(i)))
            .collect()
    }
}

fn convert_event(ev: &EKEvent) -> CalendarEvent {
    let id = unsafe {
        ev.eventIdentifier()
            .map(|s| s.to_string())
            .unwrap_or_default()
    };
    let title = unsafe { ev.title().to_string() };
    let start = unsafe { nsdate_to_datetime(&ev.startDate()) };
    let end = unsafe { nsdate_to_datetime(&ev.endDate()) };
    let is_all_day = unsafe { ev.isAllDay() };
    let calendar_color = unsafe {
        ev.calendar()
            .map(|cal| calendar_color(&cal))
            .unwrap_or(Color::White)
    };

    CalendarEvent {
        id,
        title,
        start,
        end,
        is_all_day,
        calendar_color,
        selected: false,
    }
}

fn calendar_color(cal: &EKCalendar) -> Color {
    unsafe {
        if let Some(cg_color) = cal.CGColor() {
            use objc2::msg_send;
            let num_components: usize = msg_send![&*cg_color, numberOfComponents];
            if num_components >= 3 {
                let components: *const f64 = msg_send![&*cg_color, components];
                let r = *components;
                let g = *components.add(1);
                let b = *components.add(2);
                return Color::Rgb((r * 255.0) as u8, (g * 255.0) as u8, (b * 255.0) as u8);
            }
        }
    }
    Color::White
}

fn datetime_to_nsdate(dt: &DateTime<Local>) -> Retained<NSDate> {
    let unix_ts = dt.timestamp() as f64;
    NSDate::dateWithTimeIntervalSinceReferenceDate(unix_ts - NSDATE_UNIX_OFFSET)
}

fn nsdate_to_datetime(date: &NSDate) -> DateTime<Local> {
    let unix_ts = (date.timeIntervalSinceReferenceDate() + NSDATE_UNIX_OFFSET) as i64;
    Local
        .timestamp_opt(unix_ts, 0)
        .single()
        .unwrap_or_else(Local::now)
}
