use crate::domain::model::{AvailabilityRange, NamingStyle, RangeMode};
use crate::utils::error::Result;
use async_trait::async_trait;

/// The tutoring backend as seen from this tool: read back a session's
/// persisted availability rows, or submit a new set of range records.
#[async_trait]
pub trait ScheduleBackend: Send + Sync {
    async fn fetch_availability(&self, tutoring_id: &str) -> Result<Vec<AvailabilityRange>>;

    async fn submit_availability(
        &self,
        tutoring_id: &str,
        ranges: &[AvailabilityRange],
    ) -> Result<()>;
}

pub trait ConfigProvider: Send + Sync {
    fn api_endpoint(&self) -> &str;
    fn naming_style(&self) -> NamingStyle;
    fn range_mode(&self) -> RangeMode;
}
