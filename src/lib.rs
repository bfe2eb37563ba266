pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::SelectionConfig;

pub use adapters::RestScheduleBackend;
pub use crate::core::{
    from_availability_ranges, to_availability_ranges, AvailabilityGrid, AvailabilityRange,
    DisplayAvailability, NamingStyle, RangeMode, TimeBucket, WeekDay,
};
pub use domain::ports::{ConfigProvider, ScheduleBackend};
pub use utils::error::{Result, ScheduleError};
