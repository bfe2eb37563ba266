//! Normalization between raw JSON rows and typed [`AvailabilityRange`]s.
//!
//! The originating system mixes two naming conventions (a snake_case
//! storage layer and a camelCase application API) and two row shapes
//! (flat `{day_of_week, start_time, end_time}` rows and day-grouped
//! `{dayOfWeek, availableHours: [{start, end}]}` objects). Rather than
//! scattering literal-field fallbacks, every accepted spelling lives in
//! one alias table applied before the typed conversion.

use crate::domain::model::{AvailabilityRange, NamingStyle, WeekDay};
use crate::utils::error::{Result, ScheduleError};
use chrono::NaiveTime;
use serde_json::{Map, Value};

/// One canonical field name plus every alias accepted on input.
pub struct FieldAliases {
    pub canonical: &'static str,
    pub camel: &'static str,
    aliases: &'static [&'static str],
}

impl FieldAliases {
    fn get<'a>(&self, row: &'a Map<String, Value>) -> Option<&'a Value> {
        row.get(self.canonical)
            .or_else(|| row.get(self.camel))
            .or_else(|| self.aliases.iter().find_map(|alias| row.get(*alias)))
    }

    pub fn name(&self, style: NamingStyle) -> &'static str {
        match style {
            NamingStyle::Snake => self.canonical,
            NamingStyle::Camel => self.camel,
        }
    }
}

pub const DAY_OF_WEEK: FieldAliases = FieldAliases {
    canonical: "day_of_week",
    camel: "dayOfWeek",
    aliases: &["day"],
};

pub const START_TIME: FieldAliases = FieldAliases {
    canonical: "start_time",
    camel: "startTime",
    aliases: &["start"],
};

pub const END_TIME: FieldAliases = FieldAliases {
    canonical: "end_time",
    camel: "endTime",
    aliases: &["end"],
};

pub const AVAILABLE_HOURS: FieldAliases = FieldAliases {
    canonical: "available_hours",
    camel: "availableHours",
    aliases: &[],
};

fn malformed(reason: impl Into<String>) -> ScheduleError {
    ScheduleError::MalformedAvailabilityRow {
        reason: reason.into(),
    }
}

fn parse_day(value: &Value) -> Result<WeekDay> {
    match value {
        Value::Number(n) => {
            let index = n
                .as_i64()
                .ok_or_else(|| malformed(format!("day index '{}' is not an integer", n)))?;
            WeekDay::from_index(index)
                .ok_or_else(|| malformed(format!("day index {} outside 0-6", index)))
        }
        Value::String(s) => {
            if let Ok(index) = s.trim().parse::<i64>() {
                return WeekDay::from_index(index)
                    .ok_or_else(|| malformed(format!("day index {} outside 0-6", index)));
            }
            WeekDay::from_code(s).ok_or_else(|| malformed(format!("unknown day '{}'", s)))
        }
        other => Err(malformed(format!("day value '{}' has unsupported type", other))),
    }
}

fn parse_time(field: &str, value: &Value) -> Result<NaiveTime> {
    let text = value
        .as_str()
        .ok_or_else(|| malformed(format!("{} '{}' is not a string", field, value)))?;
    let text = text.trim();
    NaiveTime::parse_from_str(text, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(text, "%H:%M"))
        .map_err(|_| malformed(format!("{} '{}' is not a valid time", field, text)))
}

fn parse_hour_entry(day: WeekDay, entry: &Value) -> Result<AvailabilityRange> {
    let object = entry
        .as_object()
        .ok_or_else(|| malformed("hour entry is not an object"))?;
    let start = START_TIME
        .get(object)
        .ok_or_else(|| malformed("hour entry missing start time"))?;
    let end = END_TIME
        .get(object)
        .ok_or_else(|| malformed("hour entry missing end time"))?;
    Ok(AvailabilityRange {
        day,
        start: parse_time("start time", start)?,
        end: parse_time("end time", end)?,
    })
}

/// Parses one raw row into range records. A flat row produces exactly one
/// record; a day-grouped row produces one per hour entry.
pub fn ranges_from_row(row: &Value) -> Result<Vec<AvailabilityRange>> {
    let object = row
        .as_object()
        .ok_or_else(|| malformed("row is not a JSON object"))?;

    let day = parse_day(
        DAY_OF_WEEK
            .get(object)
            .ok_or_else(|| malformed("row missing day of week"))?,
    )?;

    if let Some(hours) = AVAILABLE_HOURS.get(object) {
        let entries = hours
            .as_array()
            .ok_or_else(|| malformed("available hours is not an array"))?;
        return entries
            .iter()
            .map(|entry| parse_hour_entry(day, entry))
            .collect();
    }

    Ok(vec![parse_hour_entry(day, row)?])
}

/// Parses a batch of raw rows, dropping malformed ones with a diagnostic
/// instead of failing the whole conversion.
pub fn parse_rows(rows: &[Value]) -> Vec<AvailabilityRange> {
    let mut ranges = Vec::new();
    for row in rows {
        match ranges_from_row(row) {
            Ok(parsed) => ranges.extend(parsed),
            Err(e) => {
                tracing::warn!("Skipping availability row: {}", e);
            }
        }
    }
    ranges
}

/// Emits one range record as a JSON object in the requested naming style.
pub fn range_to_value(range: &AvailabilityRange, style: NamingStyle) -> Value {
    let mut object = Map::new();
    object.insert(
        DAY_OF_WEEK.name(style).to_string(),
        Value::Number(range.day.index().into()),
    );
    object.insert(
        START_TIME.name(style).to_string(),
        Value::String(range.start_hhmm()),
    );
    object.insert(
        END_TIME.name(style).to_string(),
        Value::String(range.end_hhmm()),
    );
    Value::Object(object)
}

pub fn ranges_to_value(ranges: &[AvailabilityRange], style: NamingStyle) -> Value {
    Value::Array(
        ranges
            .iter()
            .map(|range| range_to_value(range, style))
            .collect(),
    )
}
