pub mod calendar;
pub mod event;
#[cfg(target_os = "macos")]
pub mod eventkit;
pub mod selection;
pub mod source;

pub use calendar::CalendarInfo;
pub use event::CalendarEvent;
pub use selection::EventSelection;
pub use source::{platform_source, upcoming_events, Access, EventSource, UnavailableSource};
