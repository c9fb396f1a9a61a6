/// Notification preferences. Held for the session only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Setting {
    Notifications,
    Sound,
    Vibration,
}

impl Setting {
    pub const ALL: [Setting; 3] = [Setting::Notifications, Setting::Sound, Setting::Vibration];

    pub fn label(self) -> &'static str {
        match self {
            Setting::Notifications => "Enable Notifications",
            Setting::Sound => "Sound",
            Setting::Vibration => "Vibration",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub notifications: bool,
    pub sound: bool,
    pub vibration: bool,
    pub cursor: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            notifications: true,
            sound: true,
            vibration: true,
            cursor: 0,
        }
    }
}

impl Settings {
    pub fn get(&self, setting: Setting) -> bool {
        match setting {
            Setting::Notifications => self.notifications,
            Setting::Sound => self.sound,
            Setting::Vibration => self.vibration,
        }
    }

    pub fn toggle(&mut self, setting: Setting) {
        let flag = match setting {
            Setting::Notifications => &mut self.notifications,
            Setting::Sound => &mut self.sound,
            Setting::Vibration => &mut self.vibration,
        };
        *flag = !*flag;
    }

    pub fn current(&self) -> Setting {
        Setting::ALL[self.cursor.min(Setting::ALL.len() - 1)]
    }

    pub fn toggle_current(&mut self) {
        self.toggle(self.current());
    }

    pub fn move_down(&mut self) {
        if self.cursor + 1 < Setting::ALL.len() {
            self.cursor += 1;
        }
    }

    pub fn move_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn everything_starts_enabled() {
        let s = Settings::default();
        assert!(Setting::ALL.iter().all(|&k| s.get(k)));
    }

    #[test]
    fn toggle_current_follows_cursor() {
        let mut s = Settings::default();
        s.move_down();
        s.toggle_current();
        assert!(s.notifications);
        assert!(!s.sound);
        s.move_down();
        s.move_down();
        assert_eq!(s.current(), Setting::Vibration);
    }
}
