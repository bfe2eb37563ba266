use crate::domain::model::{DisplayAvailability, TimeBucket, WeekDay};

/// Renders the weekly table shown on the tutoring detail page: day columns
/// against hour-bucket rows, with a blank line between the morning,
/// afternoon and evening sections.
pub fn render_week_table(display: &DisplayAvailability) -> String {
    let mut lines = Vec::new();

    let mut header = format!("{:>7}", "");
    for day in WeekDay::ALL {
        header.push_str(&format!("{:>5}", day.code()));
    }
    lines.push(header);

    let sections = [TimeBucket::MORNING, TimeBucket::AFTERNOON, TimeBucket::EVENING];
    for (section_index, section) in sections.iter().enumerate() {
        if section_index > 0 {
            lines.push(String::new());
        }
        for bucket in section {
            let mut line = format!("{:>7}", bucket.label());
            for day in WeekDay::ALL {
                let mark = if display.is_available(day, *bucket) {
                    "✓"
                } else {
                    "·"
                };
                line.push_str(&format!("{:>5}", mark));
            }
            lines.push(line);
        }
    }

    lines.join("\n")
}
