use chrono::Weekday;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

/// A persisted alarm record. `time` is display text ("10:00 AM"), not a clock value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alarm {
    pub id: String,
    pub title: String,
    pub time: String,
    #[serde(default)]
    pub days: Days,
}

impl Alarm {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        time: impl Into<String>,
        days: Days,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            time: time.into(),
            days,
        }
    }
}

/// Ordered set of weekdays. Keeps insertion order and drops repeats.
///
/// Serialized as the three-letter abbreviations (`"Mon"`, `"Tue"`, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Days(Vec<Weekday>);

impl Days {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `day` at the end unless it is already present.
    pub fn insert(&mut self, day: Weekday) -> bool {
        if self.0.contains(&day) {
            return false;
        }
        self.0.push(day);
        true
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = Weekday> + '_ {
        self.0.iter().copied()
    }

    /// Abbreviations in stored order, e.g. `["Mon", "Wed"]`.
    pub fn labels(&self) -> Vec<String> {
        self.iter().map(|d| d.to_string()).collect()
    }
}

impl FromIterator<Weekday> for Days {
    fn from_iter<I: IntoIterator<Item = Weekday>>(iter: I) -> Self {
        let mut days = Days::new();
        for day in iter {
            days.insert(day);
        }
        days
    }
}

impl<const N: usize> From<[Weekday; N]> for Days {
    fn from(days: [Weekday; N]) -> Self {
        days.into_iter().collect()
    }
}

impl Serialize for Days {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.labels())
    }
}

impl<'de> Deserialize<'de> for Days {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Vec::<String>::deserialize(deserializer)?;
        raw.iter()
            .map(|s| {
                s.parse::<Weekday>()
                    .map_err(|_| de::Error::custom(format!("invalid weekday `{s}`")))
            })
            .collect()
    }
}

/// Alarms written on first launch when nothing is stored yet.
pub fn seed_alarms() -> Vec<Alarm> {
    use Weekday::*;

    vec![
        Alarm::new("1", "Team Meeting", "10:00 AM", Days::from([Mon, Wed, Fri])),
        Alarm::new(
            "2",
            "Daily Standup",
            "9:30 AM",
            Days::from([Mon, Tue, Wed, Thu, Fri]),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday::*;

    #[test]
    fn days_keep_order_and_drop_repeats() {
        let days: Days = [Fri, Mon, Fri, Wed].into_iter().collect();
        assert_eq!(days.labels(), vec!["Fri", "Mon", "Wed"]);
        assert_eq!(days.iter().collect::<Vec<_>>(), vec![Fri, Mon, Wed]);
    }

    #[test]
    fn days_serialize_as_abbreviations() {
        let alarm = Alarm::new("a", "Gym", "6:00 AM", Days::from([Tue, Thu]));
        let json = serde_json::to_value(&alarm).unwrap();
        assert_eq!(json["days"], serde_json::json!(["Tue", "Thu"]));
    }

    #[test]
    fn days_reject_unknown_names() {
        let err = serde_json::from_str::<Days>(r#"["Mon", "Funday"]"#).unwrap_err();
        assert!(err.to_string().contains("Funday"));
    }

    #[test]
    fn missing_days_default_to_empty() {
        let alarm: Alarm =
            serde_json::from_str(r#"{"id":"x","title":"t","time":"7:00 AM"}"#).unwrap();
        assert!(alarm.days.is_empty());
    }

    #[test]
    fn seed_has_two_alarms() {
        let seed = seed_alarms();
        assert_eq!(seed.len(), 2);
        assert_eq!(seed[0].title, "Team Meeting");
        assert_eq!(seed[1].days.len(), 5);
    }
}
