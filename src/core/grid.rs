use crate::domain::model::{AvailabilityRange, TimeBucket, WeekDay};

/// Editing-time representation of weekly availability: one boolean per
/// (day, bucket) cell. Created empty when a form opens, mutated by clicks,
/// and discarded after conversion to range records. Each grid owns its
/// cells outright, so fresh grids never alias a previous one.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AvailabilityGrid {
    cells: [[bool; TimeBucket::COUNT]; 7],
}

impl AvailabilityGrid {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds the editing grid from persisted range records, marking
    /// every bucket a record covers. Used to prefill the editor when an
    /// existing schedule is reopened.
    pub fn from_ranges(ranges: &[AvailabilityRange]) -> Self {
        let mut grid = Self::new();
        for range in ranges {
            for hour in range.covered_hours() {
                if let Some(bucket) = TimeBucket::from_start_hour(hour) {
                    grid.set(range.day, bucket, true);
                }
            }
        }
        grid
    }

    pub fn is_selected(&self, day: WeekDay, bucket: TimeBucket) -> bool {
        self.cells[day.index() as usize][bucket.position()]
    }

    pub fn set(&mut self, day: WeekDay, bucket: TimeBucket, selected: bool) {
        self.cells[day.index() as usize][bucket.position()] = selected;
    }

    /// Flips exactly one cell.
    pub fn toggle(&mut self, day: WeekDay, bucket: TimeBucket) {
        let cell = &mut self.cells[day.index() as usize][bucket.position()];
        *cell = !*cell;
    }

    /// Form-validity gate: true iff at least one cell is selected.
    pub fn has_any_selected(&self) -> bool {
        self.cells.iter().flatten().any(|selected| *selected)
    }

    /// Selected buckets of a day, ascending by start hour.
    pub fn selected_buckets(&self, day: WeekDay) -> Vec<TimeBucket> {
        TimeBucket::ALL
            .into_iter()
            .filter(|bucket| self.is_selected(day, *bucket))
            .collect()
    }

    pub fn selected_count(&self) -> usize {
        self.cells.iter().flatten().filter(|s| **s).count()
    }

    pub fn clear(&mut self) {
        self.cells = [[false; TimeBucket::COUNT]; 7];
    }
}
