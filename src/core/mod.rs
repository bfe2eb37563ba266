pub mod grid;
pub mod normalize;
pub mod ranges;
pub mod render;

pub use crate::domain::model::{
    AvailabilityRange, DisplayAvailability, NamingStyle, RangeMode, TimeBucket, WeekDay,
};
pub use crate::domain::ports::{ConfigProvider, ScheduleBackend};
pub use crate::utils::error::Result;
pub use self::grid::AvailabilityGrid;
pub use self::ranges::{from_availability_ranges, to_availability_ranges};
