use chrono::{NaiveTime, Timelike};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Day of the week. The editing grid speaks in three-letter codes
/// (`SUN..SAT`), the persistence layer in integers with Sunday = 0; both
/// encodings map onto this one type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum WeekDay {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl WeekDay {
    pub const ALL: [WeekDay; 7] = [
        WeekDay::Sunday,
        WeekDay::Monday,
        WeekDay::Tuesday,
        WeekDay::Wednesday,
        WeekDay::Thursday,
        WeekDay::Friday,
        WeekDay::Saturday,
    ];

    /// Persistence encoding: 0..6, Sunday = 0.
    pub fn index(self) -> u8 {
        self as u8
    }

    /// Grid encoding: three-letter code.
    pub fn code(self) -> &'static str {
        match self {
            WeekDay::Sunday => "SUN",
            WeekDay::Monday => "MON",
            WeekDay::Tuesday => "TUE",
            WeekDay::Wednesday => "WED",
            WeekDay::Thursday => "THU",
            WeekDay::Friday => "FRI",
            WeekDay::Saturday => "SAT",
        }
    }

    /// Display name used on the read path.
    pub fn name(self) -> &'static str {
        match self {
            WeekDay::Sunday => "Sunday",
            WeekDay::Monday => "Monday",
            WeekDay::Tuesday => "Tuesday",
            WeekDay::Wednesday => "Wednesday",
            WeekDay::Thursday => "Thursday",
            WeekDay::Friday => "Friday",
            WeekDay::Saturday => "Saturday",
        }
    }

    pub fn from_index(index: i64) -> Option<Self> {
        match index {
            0..=6 => Some(WeekDay::ALL[index as usize]),
            _ => None,
        }
    }

    /// Accepts both string encodings found in row data: three-letter codes
    /// and full day names, case-insensitive.
    pub fn from_code(code: &str) -> Option<Self> {
        let code = code.trim();
        WeekDay::ALL.iter().copied().find(|day| {
            day.code().eq_ignore_ascii_case(code) || day.name().eq_ignore_ascii_case(code)
        })
    }
}

impl fmt::Display for WeekDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One fixed one-hour interval of the day schedule. Only the twelve
/// bookable hours exist; the gaps (12-13, 17-18, 22-08) are not
/// representable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeBucket {
    start_hour: u8,
}

impl TimeBucket {
    pub const COUNT: usize = 12;

    pub const MORNING: [TimeBucket; 4] = [
        TimeBucket { start_hour: 8 },
        TimeBucket { start_hour: 9 },
        TimeBucket { start_hour: 10 },
        TimeBucket { start_hour: 11 },
    ];
    pub const AFTERNOON: [TimeBucket; 4] = [
        TimeBucket { start_hour: 13 },
        TimeBucket { start_hour: 14 },
        TimeBucket { start_hour: 15 },
        TimeBucket { start_hour: 16 },
    ];
    pub const EVENING: [TimeBucket; 4] = [
        TimeBucket { start_hour: 18 },
        TimeBucket { start_hour: 19 },
        TimeBucket { start_hour: 20 },
        TimeBucket { start_hour: 21 },
    ];

    pub const ALL: [TimeBucket; TimeBucket::COUNT] = [
        TimeBucket { start_hour: 8 },
        TimeBucket { start_hour: 9 },
        TimeBucket { start_hour: 10 },
        TimeBucket { start_hour: 11 },
        TimeBucket { start_hour: 13 },
        TimeBucket { start_hour: 14 },
        TimeBucket { start_hour: 15 },
        TimeBucket { start_hour: 16 },
        TimeBucket { start_hour: 18 },
        TimeBucket { start_hour: 19 },
        TimeBucket { start_hour: 20 },
        TimeBucket { start_hour: 21 },
    ];

    pub fn start_hour(self) -> u8 {
        self.start_hour
    }

    pub fn end_hour(self) -> u8 {
        self.start_hour + 1
    }

    /// Grid label, e.g. `"8-9"`.
    pub fn label(self) -> String {
        format!("{}-{}", self.start_hour, self.end_hour())
    }

    /// Wire time of the bucket start, e.g. `"08:00"`.
    pub fn start_time(self) -> String {
        format!("{:02}:00", self.start_hour)
    }

    /// Wire time of the bucket end, e.g. `"09:00"`.
    pub fn end_time(self) -> String {
        format!("{:02}:00", self.end_hour())
    }

    /// Position within [`TimeBucket::ALL`], used for grid storage.
    pub fn position(self) -> usize {
        match self.start_hour {
            8..=11 => (self.start_hour - 8) as usize,
            13..=16 => (self.start_hour - 13) as usize + 4,
            _ => (self.start_hour - 18) as usize + 8,
        }
    }

    pub fn from_start_hour(hour: u32) -> Option<Self> {
        match hour {
            8..=11 | 13..=16 | 18..=21 => Some(TimeBucket {
                start_hour: hour as u8,
            }),
            _ => None,
        }
    }

    /// Parses a grid label such as `"8-9"`.
    pub fn from_label(label: &str) -> Option<Self> {
        let (start, end) = label.trim().split_once('-')?;
        let start: u32 = start.trim().parse().ok()?;
        let end: u32 = end.trim().parse().ok()?;
        let bucket = TimeBucket::from_start_hour(start)?;
        (u32::from(bucket.end_hour()) == end).then_some(bucket)
    }
}

impl fmt::Display for TimeBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start_hour, self.end_hour())
    }
}

/// One persisted availability interval: a `(day, start, end)` triple.
/// Depending on [`RangeMode`] a record covers a single bucket or a
/// contiguous run of buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AvailabilityRange {
    pub day: WeekDay,
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl AvailabilityRange {
    /// Whole hours covered by this range, with a nonzero-minute end time
    /// rounded up to the next hour.
    pub fn covered_hours(&self) -> std::ops::Range<u32> {
        let start = self.start.hour();
        let mut end = self.end.hour();
        if self.end.minute() > 0 || self.end.second() > 0 {
            end += 1;
        }
        start..end
    }

    /// Wire form of the start time, `"HH:MM"`.
    pub fn start_hhmm(&self) -> String {
        self.start.format("%H:%M").to_string()
    }

    /// Wire form of the end time, `"HH:MM"`.
    pub fn end_hhmm(&self) -> String {
        self.end.format("%H:%M").to_string()
    }
}

/// Conversion strategy from grid to range records. Both behaviors exist
/// among the backend's consumers, so the caller picks explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RangeMode {
    /// Collapse adjacent selected buckets into one record per contiguous run.
    #[default]
    Merged,
    /// One record per selected bucket, irrespective of adjacency.
    PerBucket,
}

impl FromStr for RangeMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "merged" => Ok(RangeMode::Merged),
            "per-bucket" | "per_bucket" => Ok(RangeMode::PerBucket),
            other => Err(format!(
                "unknown range mode '{}' (expected 'merged' or 'per-bucket')",
                other
            )),
        }
    }
}

impl fmt::Display for RangeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RangeMode::Merged => f.write_str("merged"),
            RangeMode::PerBucket => f.write_str("per-bucket"),
        }
    }
}

/// Field naming convention for emitted range rows. The storage layer is
/// snake_case, the application API camelCase; both are supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NamingStyle {
    #[default]
    Snake,
    Camel,
}

impl FromStr for NamingStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "snake" | "snake_case" => Ok(NamingStyle::Snake),
            "camel" | "camelcase" => Ok(NamingStyle::Camel),
            other => Err(format!(
                "unknown naming style '{}' (expected 'snake' or 'camel')",
                other
            )),
        }
    }
}

impl fmt::Display for NamingStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NamingStyle::Snake => f.write_str("snake"),
            NamingStyle::Camel => f.write_str("camel"),
        }
    }
}

/// Read-path shape: bucket labels grouped per day, for rendering a weekly
/// table. All seven days are always present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayAvailability {
    by_day: BTreeMap<WeekDay, Vec<String>>,
}

impl DisplayAvailability {
    pub fn new() -> Self {
        let by_day = WeekDay::ALL.iter().map(|day| (*day, Vec::new())).collect();
        Self { by_day }
    }

    /// Appends a label to the day's list unless it is already there.
    pub fn push_label(&mut self, day: WeekDay, label: String) {
        let labels = self.by_day.entry(day).or_default();
        if !labels.contains(&label) {
            labels.push(label);
        }
    }

    pub fn labels(&self, day: WeekDay) -> &[String] {
        self.by_day.get(&day).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_available(&self, day: WeekDay, bucket: TimeBucket) -> bool {
        self.labels(day).iter().any(|label| *label == bucket.label())
    }

    /// Total number of distinct (day, label) entries.
    pub fn slot_count(&self) -> usize {
        self.by_day.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_day.values().all(Vec::is_empty)
    }

    /// JSON object keyed by day name, e.g. `{"Monday": ["8-9", "9-10"]}`.
    pub fn to_value(&self) -> serde_json::Value {
        let mut map = serde_json::Map::new();
        for (day, labels) in &self.by_day {
            map.insert(
                day.name().to_string(),
                serde_json::Value::Array(
                    labels
                        .iter()
                        .map(|label| serde_json::Value::String(label.clone()))
                        .collect(),
                ),
            );
        }
        serde_json::Value::Object(map)
    }
}

impl Default for DisplayAvailability {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weekday_index_mapping_is_bidirectional() {
        for day in WeekDay::ALL {
            assert_eq!(WeekDay::from_index(i64::from(day.index())), Some(day));
        }
        assert_eq!(WeekDay::Sunday.index(), 0);
        assert_eq!(WeekDay::Saturday.index(), 6);
        assert_eq!(WeekDay::from_index(7), None);
        assert_eq!(WeekDay::from_index(-1), None);
    }

    #[test]
    fn test_weekday_from_code_accepts_codes_and_names() {
        assert_eq!(WeekDay::from_code("MON"), Some(WeekDay::Monday));
        assert_eq!(WeekDay::from_code("mon"), Some(WeekDay::Monday));
        assert_eq!(WeekDay::from_code("sunday"), Some(WeekDay::Sunday));
        assert_eq!(WeekDay::from_code("Wednesday"), Some(WeekDay::Wednesday));
        assert_eq!(WeekDay::from_code("FOO"), None);
    }

    #[test]
    fn test_bucket_set_covers_exactly_the_bookable_hours() {
        assert_eq!(TimeBucket::ALL.len(), TimeBucket::COUNT);
        for (position, bucket) in TimeBucket::ALL.iter().enumerate() {
            assert_eq!(bucket.position(), position);
            assert_eq!(bucket.end_hour(), bucket.start_hour() + 1);
        }
        // Section gaps are not representable.
        assert_eq!(TimeBucket::from_start_hour(12), None);
        assert_eq!(TimeBucket::from_start_hour(17), None);
        assert_eq!(TimeBucket::from_start_hour(22), None);
        assert_eq!(TimeBucket::from_start_hour(7), None);
    }

    #[test]
    fn test_bucket_label_round_trip() {
        for bucket in TimeBucket::ALL {
            assert_eq!(TimeBucket::from_label(&bucket.label()), Some(bucket));
        }
        assert_eq!(TimeBucket::from_label("8-10"), None);
        assert_eq!(TimeBucket::from_label("12-13"), None);
        assert_eq!(TimeBucket::from_label("garbage"), None);
    }

    #[test]
    fn test_bucket_wire_times_are_zero_padded() {
        let bucket = TimeBucket::from_start_hour(8).unwrap();
        assert_eq!(bucket.start_time(), "08:00");
        assert_eq!(bucket.end_time(), "09:00");
        let evening = TimeBucket::from_start_hour(21).unwrap();
        assert_eq!(evening.end_time(), "22:00");
    }

    #[test]
    fn test_covered_hours_rounds_partial_end_up() {
        let range = AvailabilityRange {
            day: WeekDay::Monday,
            start: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            end: NaiveTime::from_hms_opt(9, 30, 0).unwrap(),
        };
        assert_eq!(range.covered_hours().collect::<Vec<_>>(), vec![8, 9]);

        let exact = AvailabilityRange {
            day: WeekDay::Monday,
            start: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            end: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
        };
        assert_eq!(exact.covered_hours().collect::<Vec<_>>(), vec![8, 9]);
    }

    #[test]
    fn test_display_availability_dedupes_labels() {
        let mut display = DisplayAvailability::new();
        display.push_label(WeekDay::Monday, "8-9".to_string());
        display.push_label(WeekDay::Monday, "8-9".to_string());
        assert_eq!(display.labels(WeekDay::Monday), ["8-9"]);
        assert_eq!(display.slot_count(), 1);
    }

    #[test]
    fn test_display_availability_always_has_all_days() {
        let display = DisplayAvailability::new();
        assert!(display.is_empty());
        let value = display.to_value();
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), 7);
        assert!(object.contains_key("Sunday"));
        assert!(object.contains_key("Saturday"));
    }

    #[test]
    fn test_mode_and_naming_parse() {
        assert_eq!("merged".parse::<RangeMode>().unwrap(), RangeMode::Merged);
        assert_eq!(
            "per-bucket".parse::<RangeMode>().unwrap(),
            RangeMode::PerBucket
        );
        assert!("weekly".parse::<RangeMode>().is_err());
        assert_eq!("snake".parse::<NamingStyle>().unwrap(), NamingStyle::Snake);
        assert_eq!(
            "camelCase".parse::<NamingStyle>().unwrap(),
            NamingStyle::Camel
        );
        assert!("kebab".parse::<NamingStyle>().is_err());
    }
}
