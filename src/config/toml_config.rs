use crate::core::grid::AvailabilityGrid;
use crate::domain::model::{NamingStyle, RangeMode, TimeBucket, WeekDay};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{Result, ScheduleError};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// TOML-declared availability selection: which buckets a tutor offers per
/// day, plus where and how to submit them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectionConfig {
    pub schedule: ScheduleInfo,
    pub api: ApiConfig,
    pub submit: Option<SubmitConfig>,
    /// Day code (`MON`) to bucket labels (`"8-9"`).
    pub selection: HashMap<String, Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleInfo {
    pub name: String,
    pub description: Option<String>,
    pub tutoring_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub endpoint: String,
    pub naming: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitConfig {
    pub mode: Option<String>,
}

impl SelectionConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ScheduleError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| ScheduleError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR_NAME}` placeholders with environment values; unset
    /// variables are left as-is so validation reports them.
    fn substitute_env_vars(content: &str) -> String {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").unwrap();

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .to_string()
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_url("api.endpoint", &self.api.endpoint)?;
        validation::validate_non_empty_string("schedule.tutoring_id", &self.schedule.tutoring_id)?;

        if let Some(naming) = &self.api.naming {
            naming
                .parse::<NamingStyle>()
                .map_err(|reason| ScheduleError::InvalidConfigValueError {
                    field: "api.naming".to_string(),
                    value: naming.clone(),
                    reason,
                })?;
        }
        if let Some(mode) = self.submit.as_ref().and_then(|s| s.mode.as_ref()) {
            mode.parse::<RangeMode>()
                .map_err(|reason| ScheduleError::InvalidConfigValueError {
                    field: "submit.mode".to_string(),
                    value: mode.clone(),
                    reason,
                })?;
        }

        // Selection entries must name real days and real buckets.
        for (day_code, labels) in &self.selection {
            if WeekDay::from_code(day_code).is_none() {
                return Err(ScheduleError::InvalidConfigValueError {
                    field: "selection".to_string(),
                    value: day_code.clone(),
                    reason: "Unknown day code (expected SUN..SAT)".to_string(),
                });
            }
            for label in labels {
                if TimeBucket::from_label(label).is_none() {
                    return Err(ScheduleError::InvalidConfigValueError {
                        field: format!("selection.{}", day_code),
                        value: label.clone(),
                        reason: "Not a bookable one-hour bucket".to_string(),
                    });
                }
            }
        }

        Ok(())
    }

    /// Builds the editing grid from the declared selection. Assumes the
    /// config validated; unknown entries are reported, not skipped.
    pub fn build_grid(&self) -> Result<AvailabilityGrid> {
        let mut grid = AvailabilityGrid::new();
        for (day_code, labels) in &self.selection {
            let day = WeekDay::from_code(day_code).ok_or_else(|| {
                ScheduleError::InvalidConfigValueError {
                    field: "selection".to_string(),
                    value: day_code.clone(),
                    reason: "Unknown day code (expected SUN..SAT)".to_string(),
                }
            })?;
            for label in labels {
                let bucket = TimeBucket::from_label(label).ok_or_else(|| {
                    ScheduleError::InvalidConfigValueError {
                        field: format!("selection.{}", day_code),
                        value: label.clone(),
                        reason: "Not a bookable one-hour bucket".to_string(),
                    }
                })?;
                grid.set(day, bucket, true);
            }
        }
        Ok(grid)
    }
}

impl ConfigProvider for SelectionConfig {
    fn api_endpoint(&self) -> &str {
        &self.api.endpoint
    }

    fn naming_style(&self) -> NamingStyle {
        self.api
            .naming
            .as_deref()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default()
    }

    fn range_mode(&self) -> RangeMode {
        self.submit
            .as_ref()
            .and_then(|s| s.mode.as_deref())
            .and_then(|s| s.parse().ok())
            .unwrap_or_default()
    }
}

impl Validate for SelectionConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
