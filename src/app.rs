use std::collections::VecDeque;

use chrono::Local;
use color_eyre::Result;
use log::{error, info};

use crate::alarm::{Alarm, AlarmStore, Days, StoreError};
use crate::calendar::{upcoming_events, Access, CalendarInfo, EventSelection, EventSource};
use crate::settings::Settings;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Tab {
    Events,
    Alarms,
    Settings,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// Blocking popup shown until the user dismisses it.
#[derive(Debug, Clone)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
    pub detail: Option<String>,
}

impl Notice {
    pub fn title(&self) -> &'static str {
        match self.kind {
            NoticeKind::Success => "Success",
            NoticeKind::Error => "Error",
        }
    }
}

pub struct App {
    pub running: bool,
    pub tab: Tab,
    pub access: Access,
    /// Calendar the events are read from.
    pub calendar: Option<CalendarInfo>,
    pub selection: EventSelection,
    pub store: AlarmStore,
    pub alarm_cursor: usize,
    pub alarms_loading: bool,
    /// Alarm id awaiting delete confirmation.
    pub pending_delete: Option<String>,
    pub notices: VecDeque<Notice>,
    pub settings: Settings,
    pub show_help: bool,
    pub status_message: Option<String>,
    window_days: u32,
    source: Box<dyn EventSource>,
}

impl App {
    pub fn new(store: AlarmStore, source: Box<dyn EventSource>, window_days: u32) -> Result<Self> {
        let mut app = Self {
            running: true,
            tab: Tab::Alarms,
            access: Access::Denied,
            calendar: None,
            selection: EventSelection::default(),
            store,
            alarm_cursor: 0,
            alarms_loading: true,
            pending_delete: None,
            notices: VecDeque::new(),
            settings: Settings::default(),
            show_help: false,
            status_message: None,
            window_days,
            source,
        };

        app.access = app.source.request_access()?;
        info!("event=calendar_access module=app access={:?}", app.access);
        app.refresh_events();

        Ok(app)
    }

    pub fn alarms(&self) -> &[Alarm] {
        self.store.alarms()
    }

    pub fn current_notice(&self) -> Option<&Notice> {
        self.notices.front()
    }

    pub fn dismiss_notice(&mut self) {
        self.notices.pop_front();
    }

    pub fn refresh_events(&mut self) {
        if self.access != Access::Granted {
            self.calendar = None;
            self.selection = EventSelection::default();
            return;
        }
        let (calendar, events) =
            upcoming_events(self.source.as_ref(), Local::now(), self.window_days);
        info!(
            "event=events_loaded module=app calendar={} count={}",
            calendar.as_ref().map_or("none", |c| c.title.as_str()),
            events.len()
        );
        self.calendar = calendar;
        self.selection = EventSelection::new(events);
    }

    pub async fn load_alarms(&mut self) {
        self.alarms_loading = true;
        let result = self.store.load().await.map(|alarms| alarms.len());
        self.alarms_loading = false;

        if let Err(err) = result {
            self.report("Failed to load alarms", &err);
        }
        self.clamp_alarm_cursor();
    }

    /// Turns the selected events into alarms and shows them on the Alarms tab.
    pub async fn create_alarms_from_selection(&mut self) {
        match self.selection.commit(&mut self.store, &Days::new()).await {
            Ok(0) => self.status_message = Some("No events selected".to_string()),
            Ok(_) => {
                self.notify(NoticeKind::Success, "Alarms have been created successfully", None);
                self.tab = Tab::Alarms;
                self.alarm_cursor = self.store.alarms().len().saturating_sub(1);
            }
            Err(err) => self.report("Failed to add new alarms", &err),
        }
    }

    /// Asks for confirmation before deleting the alarm under the cursor.
    pub fn request_delete(&mut self) {
        if let Some(alarm) = self.store.alarms().get(self.alarm_cursor) {
            self.pending_delete = Some(alarm.id.clone());
        }
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    pub async fn confirm_delete(&mut self) {
        let Some(id) = self.pending_delete.take() else {
            return;
        };
        if let Err(err) = self.store.remove(&id).await {
            self.report("Failed to delete alarm", &err);
        }
        self.clamp_alarm_cursor();
    }

    pub fn pending_delete_title(&self) -> Option<&str> {
        let id = self.pending_delete.as_deref()?;
        self.store
            .alarms()
            .iter()
            .find(|a| a.id == id)
            .map(|a| a.title.as_str())
    }

    pub fn next_alarm(&mut self) {
        if self.alarm_cursor + 1 < self.store.alarms().len() {
            self.alarm_cursor += 1;
        }
    }

    pub fn prev_alarm(&mut self) {
        self.alarm_cursor = self.alarm_cursor.saturating_sub(1);
    }

    fn clamp_alarm_cursor(&mut self) {
        let len = self.store.alarms().len();
        self.alarm_cursor = self.alarm_cursor.min(len.saturating_sub(1));
    }

    fn report(&mut self, message: &str, err: &StoreError) {
        error!("event=store_failure module=app message=\"{}\" error=\"{}\"", message, err);
        self.notify(NoticeKind::Error, message, Some(err.to_string()));
    }

    fn notify(&mut self, kind: NoticeKind, message: &str, detail: Option<String>) {
        self.notices.push_back(Notice {
            kind,
            message: message.to_string(),
            detail,
        });
    }
}
