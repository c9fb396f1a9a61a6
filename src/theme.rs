use std::path::PathBuf;
use std::sync::OnceLock;

use ratatui::style::{Color, Modifier, Style};
use serde::Deserialize;

use crate::config::APP_DIR;

static THEME: OnceLock<Theme> = OnceLock::new();

/// Get the active theme (loaded once on first call).
pub fn current() -> &'static Theme {
    THEME.get_or_init(|| Theme::load().unwrap_or_default())
}

pub const KEY_STYLE: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);
pub const SECTION_STYLE: Style = Style::new().add_modifier(Modifier::BOLD.union(Modifier::UNDERLINED));

#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,
    pub header: Style,
    pub selected: Style,
    pub marked: Style,
    pub dim: Style,
    pub border: Style,
    pub status: Style,
    pub tab_active: Style,
    pub time: Style,
    pub pill: Style,
    pub danger: Style,
    pub success: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            name: "default".to_string(),
            header: Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            selected: Style::default().fg(Color::Black).bg(Color::Cyan),
            marked: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            dim: Style::default().fg(Color::DarkGray),
            border: Style::default().fg(Color::Gray),
            status: Style::default().fg(Color::White).bg(Color::DarkGray),
            tab_active: Style::default().fg(Color::Black).bg(Color::Yellow),
            time: Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            pill: Style::default().fg(Color::Gray).bg(Color::Rgb(48, 48, 48)),
            danger: Style::default().fg(Color::Rgb(255, 59, 48)),
            success: Style::default().fg(Color::Green),
        }
    }
}

impl Theme {
    pub fn load() -> Option<Self> {
        let path = config_path()?;
        if !path.exists() {
            return None;
        }
        let content = std::fs::read_to_string(&path).ok()?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Option<Self> {
        let config: ThemeConfig = toml::from_str(content).ok()?;
        Some(config.into_theme())
    }

    /// Get a built-in preset by name.
    pub fn preset(name: &str) -> Self {
        match name {
            "dracula" => Self::dracula(),
            "gruvbox" => Self::gruvbox(),
            "nord" => Self::nord(),
            _ => Self::default(),
        }
    }

    fn dracula() -> Self {
        let fg = Color::Rgb(248, 248, 242);
        let bg = Color::Rgb(68, 71, 90);
        Self {
            name: "dracula".to_string(),
            header: Style::default().fg(fg).add_modifier(Modifier::BOLD),
            selected: Style::default().fg(Color::Black).bg(Color::Rgb(139, 233, 253)), // cyan
            marked: Style::default().fg(Color::Rgb(189, 147, 249)).add_modifier(Modifier::BOLD), // purple
            dim: Style::default().fg(Color::Rgb(98, 114, 164)),
            border: Style::default().fg(bg),
            status: Style::default().fg(fg).bg(bg),
            tab_active: Style::default().fg(Color::Black).bg(Color::Rgb(189, 147, 249)),
            time: Style::default().fg(fg).add_modifier(Modifier::BOLD),
            pill: Style::default().fg(fg).bg(bg),
            danger: Style::default().fg(Color::Rgb(255, 85, 85)),
            success: Style::default().fg(Color::Rgb(80, 250, 123)),
        }
    }

    fn gruvbox() -> Self {
        let fg = Color::Rgb(235, 219, 178);
        let bg = Color::Rgb(80, 73, 69);
        Self {
            name: "gruvbox".to_string(),
            header: Style::default().fg(fg).add_modifier(Modifier::BOLD),
            selected: Style::default().fg(Color::Black).bg(Color::Rgb(131, 165, 152)), // aqua
            marked: Style::default().fg(Color::Rgb(250, 189, 47)).add_modifier(Modifier::BOLD), // yellow
            dim: Style::default().fg(Color::Rgb(146, 131, 116)),
            border: Style::default().fg(Color::Rgb(102, 92, 84)),
            status: Style::default().fg(fg).bg(bg),
            tab_active: Style::default().fg(Color::Black).bg(Color::Rgb(250, 189, 47)),
            time: Style::default().fg(fg).add_modifier(Modifier::BOLD),
            pill: Style::default().fg(fg).bg(bg),
            danger: Style::default().fg(Color::Rgb(251, 73, 52)),
            success: Style::default().fg(Color::Rgb(184, 187, 38)),
        }
    }

    fn nord() -> Self {
        let fg = Color::Rgb(229, 233, 240);
        let bg = Color::Rgb(67, 76, 94);
        Self {
            name: "nord".to_string(),
            header: Style::default().fg(fg).add_modifier(Modifier::BOLD),
            selected: Style::default().fg(Color::Black).bg(Color::Rgb(136, 192, 208)), // frost
            marked: Style::default().fg(Color::Rgb(235, 203, 139)).add_modifier(Modifier::BOLD), // yellow
            dim: Style::default().fg(Color::Rgb(76, 86, 106)),
            border: Style::default().fg(bg),
            status: Style::default().fg(fg).bg(bg),
            tab_active: Style::default().fg(Color::Black).bg(Color::Rgb(235, 203, 139)),
            time: Style::default().fg(fg).add_modifier(Modifier::BOLD),
            pill: Style::default().fg(fg).bg(bg),
            danger: Style::default().fg(Color::Rgb(191, 97, 106)),
            success: Style::default().fg(Color::Rgb(163, 190, 140)),
        }
    }
}

fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_DIR).join("theme.toml"))
}

// ── TOML config types ──

#[derive(Debug, Deserialize, Default)]
struct ThemeConfig {
    preset: Option<String>,
    header_fg: Option<String>,
    selected_fg: Option<String>,
    selected_bg: Option<String>,
    marked_fg: Option<String>,
    dim_fg: Option<String>,
    border_fg: Option<String>,
    status_fg: Option<String>,
    status_bg: Option<String>,
    tab_fg: Option<String>,
    tab_bg: Option<String>,
    pill_fg: Option<String>,
    pill_bg: Option<String>,
    danger_fg: Option<String>,
}

impl ThemeConfig {
    fn into_theme(self) -> Theme {
        let mut theme = self
            .preset
            .as_deref()
            .map(Theme::preset)
            .unwrap_or_default();

        let overrides: [(&Option<String>, fn(&mut Theme, Color)); 13] = [
            (&self.header_fg, |t, c| t.header = t.header.fg(c)),
            (&self.selected_fg, |t, c| t.selected = t.selected.fg(c)),
            (&self.selected_bg, |t, c| t.selected = t.selected.bg(c)),
            (&self.marked_fg, |t, c| t.marked = t.marked.fg(c)),
            (&self.dim_fg, |t, c| t.dim = t.dim.fg(c)),
            (&self.border_fg, |t, c| t.border = t.border.fg(c)),
            (&self.status_fg, |t, c| t.status = t.status.fg(c)),
            (&self.status_bg, |t, c| t.status = t.status.bg(c)),
            (&self.tab_fg, |t, c| t.tab_active = t.tab_active.fg(c)),
            (&self.tab_bg, |t, c| t.tab_active = t.tab_active.bg(c)),
            (&self.pill_fg, |t, c| t.pill = t.pill.fg(c)),
            (&self.pill_bg, |t, c| t.pill = t.pill.bg(c)),
            (&self.danger_fg, |t, c| t.danger = t.danger.fg(c)),
        ];

        for (value, apply) in overrides {
            if let Some(c) = value.as_deref().and_then(parse_color) {
                apply(&mut theme, c);
            }
        }

        theme
    }
}

/// Parse a color string: hex "#rrggbb", or named colors.
fn parse_color(s: &str) -> Option<Color> {
    let s = s.trim();
    if let Some(hex) = s.strip_prefix('#') {
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        return Some(Color::Rgb(r, g, b));
    }
    match s.to_lowercase().as_str() {
        "black" => Some(Color::Black),
        "red" => Some(Color::Red),
        "green" => Some(Color::Green),
        "yellow" => Some(Color::Yellow),
        "blue" => Some(Color::Blue),
        "magenta" => Some(Color::Magenta),
        "cyan" => Some(Color::Cyan),
        "white" => Some(Color::White),
        "gray" | "grey" => Some(Color::Gray),
        "darkgray" | "darkgrey" => Some(Color::DarkGray),
        "lightred" => Some(Color::LightRed),
        "lightgreen" => Some(Color::LightGreen),
        "lightblue" => Some(Color::LightBlue),
        "lightcyan" => Some(Color::LightCyan),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_and_names() {
        assert_eq!(parse_color("#ff3b30"), Some(Color::Rgb(255, 59, 48)));
        assert_eq!(parse_color(" Grey "), Some(Color::Gray));
        assert_eq!(parse_color("#ff3b3"), None);
        assert_eq!(parse_color("chartreuse"), None);
    }

    #[test]
    fn preset_then_overrides() {
        let theme = Theme::from_toml(
            r##"
            preset = "nord"
            danger_fg = "#010203"
            tab_bg = "nonsense"
            "##,
        )
        .unwrap();
        assert_eq!(theme.name, "nord");
        assert_eq!(theme.danger.fg, Some(Color::Rgb(1, 2, 3)));
        assert_eq!(theme.tab_active, Theme::preset("nord").tab_active);
    }

    #[test]
    fn non_ascii_hex_is_rejected() {
        assert_eq!(parse_color("#a\u{e9}abc"), None);
        assert_eq!(parse_color("#12345g"), None);
        let theme = Theme::from_toml("danger_fg = \"#a\u{e9}abc\"").unwrap();
        assert_eq!(theme.danger, Theme::default().danger);
    }

    #[test]
    fn unknown_preset_falls_back_to_default() {
        assert_eq!(Theme::preset("solarized").name, "default");
    }
}
