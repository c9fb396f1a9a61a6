use std::sync::Arc;
use std::time::Duration;

use calendar_alarms::alarm::{AlarmStore, FileStorage};
use calendar_alarms::app::{App, Tab};
use calendar_alarms::calendar::{self, Access};
use calendar_alarms::components::{self, popup};
use calendar_alarms::config::Config;
use calendar_alarms::{event, logging, tui};
use color_eyre::Result;
use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::layout::{Constraint, Layout};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let config = Config::load()?;
    let data_dir = config.data_dir()?;
    let level = config
        .log_level
        .clone()
        .unwrap_or_else(|| logging::default_log_level().to_string());
    let _logger = logging::init_logging(&level, &config.log_dir()?)?;

    eprintln!("Connecting to calendar...");
    let source = calendar::platform_source()?;
    let storage = FileStorage::new(&data_dir);
    log::info!(
        "event=storage_ready module=main dir={} policy={:?}",
        storage.dir().display(),
        config.duplicate_policy
    );
    let store = AlarmStore::new(Arc::new(storage)).with_policy(config.duplicate_policy);

    let mut app = App::new(store, source, config.window_days)?;
    app.load_alarms().await;
    eprintln!("Alarms ready. Launching TUI...");

    tui::install_panic_hook();
    let mut terminal = tui::init()?;
    let result = run(&mut terminal, &mut app, config.window_days).await;
    tui::restore()?;
    result
}

async fn run(terminal: &mut tui::Tui, app: &mut App, window_days: u32) -> Result<()> {
    while app.running {
        terminal.draw(|frame| {
            let area = frame.area();

            let layout = Layout::vertical([
                Constraint::Length(1),
                Constraint::Min(1),
                Constraint::Length(1),
            ])
            .split(area);

            components::TabBar::render(frame, layout[0], app.tab);

            match app.tab {
                Tab::Events => components::EventList::render(
                    frame,
                    layout[1],
                    app.access,
                    app.calendar.as_ref(),
                    &app.selection,
                    window_days,
                ),
                Tab::Alarms => components::AlarmList::render(
                    frame,
                    layout[1],
                    app.alarms(),
                    app.alarm_cursor,
                    app.alarms_loading,
                ),
                Tab::Settings => components::SettingsView::render(
                    frame,
                    layout[1],
                    &app.settings,
                    app.access == Access::Unsupported,
                ),
            }

            components::StatusBar::render(frame, layout[2], app);

            if let Some(title) = app.pending_delete_title() {
                popup::render_confirm_delete(frame, area, title);
            }

            if app.show_help {
                popup::render_help(frame, area);
            }

            // Notices block everything else
            if let Some(notice) = app.current_notice() {
                popup::render_notice(frame, area, notice);
            }
        })?;

        if let Some(key) = event::next_key_press(Duration::from_millis(100))? {
            app.status_message = None;
            handle_key(app, key.code, key.modifiers).await;
        }
    }

    Ok(())
}

async fn handle_key(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
    if code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
        app.running = false;
        return;
    }

    if app.current_notice().is_some() {
        if matches!(code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
            app.dismiss_notice();
        }
        return;
    }

    if app.show_help {
        if matches!(code, KeyCode::Esc | KeyCode::Char('?')) {
            app.show_help = false;
        }
        return;
    }

    if app.pending_delete.is_some() {
        match code {
            KeyCode::Char('y') | KeyCode::Enter => app.confirm_delete().await,
            KeyCode::Char('n') | KeyCode::Esc => app.cancel_delete(),
            _ => {}
        }
        return;
    }

    match code {
        KeyCode::Char('q') | KeyCode::Esc => app.running = false,
        KeyCode::Char('1') => app.tab = Tab::Events,
        KeyCode::Char('2') => app.tab = Tab::Alarms,
        KeyCode::Char('3') => app.tab = Tab::Settings,
        KeyCode::Char('?') => app.show_help = true,
        _ => match app.tab {
            Tab::Events => handle_events_key(app, code).await,
            Tab::Alarms => handle_alarms_key(app, code).await,
            Tab::Settings => handle_settings_key(app, code),
        },
    }
}

async fn handle_events_key(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Down | KeyCode::Char('j') => app.selection.move_down(),
        KeyCode::Up | KeyCode::Char('k') => app.selection.move_up(),
        KeyCode::Char(' ') => app.selection.toggle_current(),
        KeyCode::Char('c') | KeyCode::Enter => app.create_alarms_from_selection().await,
        KeyCode::Char('r') => {
            app.refresh_events();
            app.status_message = Some("Events refreshed".to_string());
        }
        _ => {}
    }
}

async fn handle_alarms_key(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Down | KeyCode::Char('j') => app.next_alarm(),
        KeyCode::Up | KeyCode::Char('k') => app.prev_alarm(),
        KeyCode::Char('a') => app.tab = Tab::Events,
        KeyCode::Char('d') | KeyCode::Delete => app.request_delete(),
        KeyCode::Char('r') => {
            app.load_alarms().await;
            if app.current_notice().is_none() {
                app.status_message = Some("Alarms reloaded".to_string());
            }
        }
        _ => {}
    }
}

fn handle_settings_key(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Down | KeyCode::Char('j') => app.settings.move_down(),
        KeyCode::Up | KeyCode::Char('k') => app.settings.move_up(),
        KeyCode::Char(' ') | KeyCode::Enter => app.settings.toggle_current(),
        _ => {}
    }
}
