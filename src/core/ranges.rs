use crate::core::grid::AvailabilityGrid;
use crate::domain::model::{
    AvailabilityRange, DisplayAvailability, RangeMode, TimeBucket, WeekDay,
};
use chrono::NaiveTime;

// Bucket hours are < 24 by construction.
fn on_the_hour(hour: u8) -> NaiveTime {
    NaiveTime::from_hms_opt(u32::from(hour), 0, 0).unwrap_or(NaiveTime::MIN)
}

/// Converts an editing grid into the persistence representation. Output is
/// ordered by day-of-week ascending, then start hour ascending; days with
/// no selection emit nothing. An all-false grid yields an empty vector,
/// which is not the same thing as "form invalid" — validity is gated by
/// [`AvailabilityGrid::has_any_selected`].
pub fn to_availability_ranges(grid: &AvailabilityGrid, mode: RangeMode) -> Vec<AvailabilityRange> {
    let mut ranges = Vec::new();

    for day in WeekDay::ALL {
        let buckets = grid.selected_buckets(day);
        match mode {
            RangeMode::PerBucket => {
                for bucket in buckets {
                    ranges.push(AvailabilityRange {
                        day,
                        start: on_the_hour(bucket.start_hour()),
                        end: on_the_hour(bucket.end_hour()),
                    });
                }
            }
            RangeMode::Merged => {
                let mut run: Option<(TimeBucket, TimeBucket)> = None;
                for bucket in buckets {
                    run = match run {
                        Some((first, last)) if last.end_hour() == bucket.start_hour() => {
                            Some((first, bucket))
                        }
                        Some((first, last)) => {
                            ranges.push(AvailabilityRange {
                                day,
                                start: on_the_hour(first.start_hour()),
                                end: on_the_hour(last.end_hour()),
                            });
                            Some((bucket, bucket))
                        }
                        None => Some((bucket, bucket)),
                    };
                }
                if let Some((first, last)) = run {
                    ranges.push(AvailabilityRange {
                        day,
                        start: on_the_hour(first.start_hour()),
                        end: on_the_hour(last.end_hour()),
                    });
                }
            }
        }
    }

    ranges
}

/// Read-path conversion: expands each range into one bucket label per whole
/// hour covered and groups the labels by day. Tolerates zero ranges and
/// ranges in any order; hours that fall outside the bookable buckets are
/// ignored.
pub fn from_availability_ranges(ranges: &[AvailabilityRange]) -> DisplayAvailability {
    let mut display = DisplayAvailability::new();

    for range in ranges {
        for hour in range.covered_hours() {
            match TimeBucket::from_start_hour(hour) {
                Some(bucket) => display.push_label(range.day, bucket.label()),
                None => {
                    tracing::debug!(
                        "Hour {} of range {} {}-{} has no bucket, skipping",
                        hour,
                        range.day,
                        range.start_hhmm(),
                        range.end_hhmm()
                    );
                }
            }
        }
    }

    display
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_with(day: WeekDay, hours: &[u32]) -> AvailabilityGrid {
        let mut grid = AvailabilityGrid::new();
        for hour in hours {
            grid.toggle(day, TimeBucket::from_start_hour(*hour).unwrap());
        }
        grid
    }

    #[test]
    fn test_merged_mode_groups_contiguous_runs() {
        let grid = grid_with(WeekDay::Monday, &[8, 9, 11]);
        let ranges = to_availability_ranges(&grid, RangeMode::Merged);

        assert_eq!(ranges.len(), 2);
        assert_eq!(ranges[0].day, WeekDay::Monday);
        assert_eq!(ranges[0].start_hhmm(), "08:00");
        assert_eq!(ranges[0].end_hhmm(), "10:00");
        assert_eq!(ranges[1].start_hhmm(), "11:00");
        assert_eq!(ranges[1].end_hhmm(), "12:00");
    }

    #[test]
    fn test_merged_mode_breaks_runs_at_section_gaps() {
        // 11-12 and 13-14 are selected but 12-13 does not exist, so the
        // run must break between them.
        let grid = grid_with(WeekDay::Thursday, &[11, 13]);
        let ranges = to_availability_ranges(&grid, RangeMode::Merged);

        assert_eq!(ranges.len(), 2);
        assert_eq!(ranges[0].start_hhmm(), "11:00");
        assert_eq!(ranges[0].end_hhmm(), "12:00");
        assert_eq!(ranges[1].start_hhmm(), "13:00");
        assert_eq!(ranges[1].end_hhmm(), "14:00");
    }

    #[test]
    fn test_per_bucket_mode_never_merges() {
        let grid = grid_with(WeekDay::Monday, &[8, 9, 11]);
        let ranges = to_availability_ranges(&grid, RangeMode::PerBucket);

        assert_eq!(ranges.len(), 3);
        let pairs: Vec<(String, String)> = ranges
            .iter()
            .map(|r| (r.start_hhmm(), r.end_hhmm()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("08:00".to_string(), "09:00".to_string()),
                ("09:00".to_string(), "10:00".to_string()),
                ("11:00".to_string(), "12:00".to_string()),
            ]
        );
    }

    #[test]
    fn test_output_is_sorted_by_day_then_start() {
        let mut grid = AvailabilityGrid::new();
        // Select in deliberately scrambled order.
        grid.toggle(WeekDay::Friday, TimeBucket::from_start_hour(9).unwrap());
        grid.toggle(WeekDay::Sunday, TimeBucket::from_start_hour(21).unwrap());
        grid.toggle(WeekDay::Friday, TimeBucket::from_start_hour(8).unwrap());
        grid.toggle(WeekDay::Sunday, TimeBucket::from_start_hour(13).unwrap());

        let ranges = to_availability_ranges(&grid, RangeMode::PerBucket);
        let keys: Vec<(u8, String)> = ranges
            .iter()
            .map(|r| (r.day.index(), r.start_hhmm()))
            .collect();
        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted);
        assert_eq!(keys[0], (0, "13:00".to_string()));
    }

    #[test]
    fn test_empty_grid_yields_empty_ranges_in_both_modes() {
        let grid = AvailabilityGrid::new();
        assert!(to_availability_ranges(&grid, RangeMode::Merged).is_empty());
        assert!(to_availability_ranges(&grid, RangeMode::PerBucket).is_empty());
    }

    #[test]
    fn test_from_ranges_expands_multi_hour_span() {
        let ranges = vec![AvailabilityRange {
            day: WeekDay::Monday,
            start: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            end: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
        }];
        let display = from_availability_ranges(&ranges);
        assert_eq!(display.labels(WeekDay::Monday), ["8-9", "9-10"]);
        assert!(display.labels(WeekDay::Tuesday).is_empty());
    }

    #[test]
    fn test_from_ranges_rounds_partial_end_hour_up() {
        let ranges = vec![AvailabilityRange {
            day: WeekDay::Wednesday,
            start: NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
            end: NaiveTime::from_hms_opt(19, 30, 0).unwrap(),
        }];
        let display = from_availability_ranges(&ranges);
        assert_eq!(display.labels(WeekDay::Wednesday), ["18-19", "19-20"]);
    }

    #[test]
    fn test_from_ranges_accepts_empty_and_unordered_input() {
        assert!(from_availability_ranges(&[]).is_empty());

        let ranges = vec![
            AvailabilityRange {
                day: WeekDay::Saturday,
                start: NaiveTime::from_hms_opt(20, 0, 0).unwrap(),
                end: NaiveTime::from_hms_opt(21, 0, 0).unwrap(),
            },
            AvailabilityRange {
                day: WeekDay::Monday,
                start: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
                end: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            },
        ];
        let display = from_availability_ranges(&ranges);
        assert_eq!(display.labels(WeekDay::Monday), ["8-9"]);
        assert_eq!(display.labels(WeekDay::Saturday), ["20-21"]);
    }

    #[test]
    fn test_per_bucket_round_trip_restores_the_grid() {
        let mut grid = AvailabilityGrid::new();
        grid.toggle(WeekDay::Monday, TimeBucket::from_start_hour(8).unwrap());
        grid.toggle(WeekDay::Monday, TimeBucket::from_start_hour(11).unwrap());
        grid.toggle(WeekDay::Friday, TimeBucket::from_start_hour(16).unwrap());
        grid.toggle(WeekDay::Sunday, TimeBucket::from_start_hour(21).unwrap());

        let ranges = to_availability_ranges(&grid, RangeMode::PerBucket);
        let rebuilt = AvailabilityGrid::from_ranges(&ranges);
        assert_eq!(rebuilt, grid);
    }

    #[test]
    fn test_merged_round_trip_restores_the_grid_too() {
        // Merged records lose per-bucket boundaries but cover the same
        // hours, so reconstruction still matches.
        let mut grid = AvailabilityGrid::new();
        grid.toggle(WeekDay::Tuesday, TimeBucket::from_start_hour(9).unwrap());
        grid.toggle(WeekDay::Tuesday, TimeBucket::from_start_hour(10).unwrap());
        grid.toggle(WeekDay::Tuesday, TimeBucket::from_start_hour(11).unwrap());

        let ranges = to_availability_ranges(&grid, RangeMode::Merged);
        assert_eq!(ranges.len(), 1);
        let rebuilt = AvailabilityGrid::from_ranges(&ranges);
        assert_eq!(rebuilt, grid);
    }
}
