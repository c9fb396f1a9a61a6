pub mod alarm_list;
pub mod event_list;
pub mod popup;
pub mod settings_view;
pub mod status_bar;

pub use alarm_list::AlarmList;
pub use event_list::EventList;
pub use settings_view::SettingsView;
pub use status_bar::{StatusBar, TabBar};

/// Width of `s` in characters.
pub(crate) fn text_width(s: &str) -> usize {
    s.chars().count()
}

/// Blank cells left on a row of `total` once `used` texts are placed.
pub(crate) fn padding(total: usize, used: &[&str]) -> String {
    let taken: usize = used.iter().map(|s| text_width(s)).sum();
    " ".repeat(total.saturating_sub(taken))
}

/// Cut `s` to at most `max` characters, ending in "..." when shortened.
pub(crate) fn truncate(s: &str, max: usize) -> String {
    let len = text_width(s);
    if len <= max {
        s.to_string()
    } else if max > 3 {
        let head: String = s.chars().take(max - 3).collect();
        format!("{}...", head)
    } else {
        s.chars().take(max).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::{padding, truncate};

    #[test]
    fn padding_counts_chars_not_bytes() {
        assert_eq!(padding(10, &["caf\u{e9}", "ab"]), "    ");
        assert_eq!(padding(3, &["toolong"]), "");
    }

    #[test]
    fn truncate_counts_chars() {
        assert_eq!(truncate("Standup", 10), "Standup");
        assert_eq!(truncate("Quarterly review", 10), "Quarter...");
        assert_eq!(truncate("Café au lait", 7), "Café...");
        assert_eq!(truncate("abcdef", 2), "ab");
    }
}
