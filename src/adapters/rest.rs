use crate::core::normalize;
use crate::domain::model::{AvailabilityRange, NamingStyle};
use crate::domain::ports::ScheduleBackend;
use crate::utils::error::{Result, ScheduleError};
use reqwest::Client;
use serde_json::{Map, Value};

/// `reqwest`-backed implementation of [`ScheduleBackend`] against the
/// tutoring REST API. Read responses are normalized leniently (either
/// naming convention, flat or day-grouped rows, malformed rows skipped);
/// submissions are emitted in the configured naming style.
pub struct RestScheduleBackend {
    client: Client,
    base_url: String,
    naming: NamingStyle,
}

impl RestScheduleBackend {
    pub fn new(base_url: impl Into<String>, naming: NamingStyle) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            naming,
        }
    }

    fn availability_url(&self, tutoring_id: &str) -> String {
        format!("{}/tutorings/{}/available-times", self.base_url, tutoring_id)
    }

    /// The rows may arrive as a bare array or wrapped in an
    /// `available_times`/`availableTimes` envelope.
    fn unwrap_rows(body: Value) -> Vec<Value> {
        match body {
            Value::Array(rows) => rows,
            Value::Object(ref object) => object
                .get("available_times")
                .or_else(|| object.get("availableTimes"))
                .and_then(Value::as_array)
                .cloned()
                .unwrap_or_else(|| vec![body.clone()]),
            other => vec![other],
        }
    }
}

#[async_trait::async_trait]
impl ScheduleBackend for RestScheduleBackend {
    async fn fetch_availability(&self, tutoring_id: &str) -> Result<Vec<AvailabilityRange>> {
        let url = self.availability_url(tutoring_id);
        tracing::debug!("Fetching availability from: {}", url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ScheduleError::ApiStatusError {
                status: status.as_u16(),
                body: response.text().await.unwrap_or_default(),
            });
        }

        let body: Value = response.json().await?;
        let rows = Self::unwrap_rows(body);
        tracing::debug!("Received {} raw rows", rows.len());

        Ok(normalize::parse_rows(&rows))
    }

    async fn submit_availability(
        &self,
        tutoring_id: &str,
        ranges: &[AvailabilityRange],
    ) -> Result<()> {
        let url = self.availability_url(tutoring_id);
        let key = match self.naming {
            NamingStyle::Snake => "available_times",
            NamingStyle::Camel => "availableTimes",
        };
        let mut envelope = Map::new();
        envelope.insert(
            key.to_string(),
            normalize::ranges_to_value(ranges, self.naming),
        );
        let payload = Value::Object(envelope);

        tracing::debug!("Submitting {} ranges to: {}", ranges.len(), url);
        let response = self.client.post(&url).json(&payload).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ScheduleError::ApiStatusError {
                status: status.as_u16(),
                body: response.text().await.unwrap_or_default(),
            });
        }

        tracing::debug!("Submission accepted with status {}", status);
        Ok(())
    }
}
