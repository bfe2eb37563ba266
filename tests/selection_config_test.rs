use std::io::Write;
use tempfile::NamedTempFile;
use tutor_slots::utils::validation::Validate;
use tutor_slots::{
    to_availability_ranges, ConfigProvider, NamingStyle, RangeMode, SelectionConfig,
};

#[test]
fn test_selection_file_to_range_records() {
    let mut temp_file = NamedTempFile::new().unwrap();

    let toml_content = r#"
[schedule]
name = "math-mornings"
description = "Calculus help before class"
tutoring_id = "42"

[api]
endpoint = "https://api.example.com"
naming = "snake"

[submit]
mode = "merged"

[selection]
MON = ["8-9", "9-10", "11-12"]
WED = ["18-19"]
"#;
    temp_file.write_all(toml_content.as_bytes()).unwrap();

    let config = SelectionConfig::from_file(temp_file.path()).unwrap();
    config.validate().unwrap();

    assert_eq!(config.schedule.name, "math-mornings");
    assert_eq!(config.naming_style(), NamingStyle::Snake);
    assert_eq!(config.range_mode(), RangeMode::Merged);

    let grid = config.build_grid().unwrap();
    assert!(grid.has_any_selected());

    let ranges = to_availability_ranges(&grid, config.range_mode());
    // Monday's 8-10 run merges, 11-12 stays separate, Wednesday is its own record.
    assert_eq!(ranges.len(), 3);
    assert_eq!(ranges[0].end_hhmm(), "10:00");
    assert_eq!(ranges[1].start_hhmm(), "11:00");
    assert_eq!(ranges[2].day.code(), "WED");
}

#[test]
fn test_empty_selection_builds_an_unsubmittable_grid() {
    let toml_content = r#"
[schedule]
name = "empty"
tutoring_id = "1"

[api]
endpoint = "https://api.example.com"

[selection]
"#;
    let config = SelectionConfig::from_toml_str(toml_content).unwrap();
    config.validate().unwrap();

    let grid = config.build_grid().unwrap();
    assert!(!grid.has_any_selected());
    assert!(to_availability_ranges(&grid, config.range_mode()).is_empty());
}

#[test]
fn test_unknown_bucket_label_fails_validation() {
    let toml_content = r#"
[schedule]
name = "bad"
tutoring_id = "1"

[api]
endpoint = "https://api.example.com"

[selection]
MON = ["7-8"]
"#;
    let config = SelectionConfig::from_toml_str(toml_content).unwrap();
    assert!(config.validate().is_err());
}
