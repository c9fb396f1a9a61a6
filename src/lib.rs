pub mod alarm;
pub mod app;
pub mod calendar;
pub mod components;
pub mod config;
pub mod event;
pub mod logging;
pub mod settings;
pub mod theme;
pub mod tui;
