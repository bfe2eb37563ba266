use crate::domain::model::{NamingStyle, RangeMode};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{Result, ScheduleError};
use crate::utils::validation::{self, Validate};
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "tutor-slots")]
#[command(about = "Fetch and render a tutoring session's weekly availability")]
pub struct CliConfig {
    /// Tutoring session to look up
    #[arg(long)]
    pub tutoring_id: String,

    #[arg(long, default_value = "http://localhost:8080/api")]
    pub api_endpoint: String,

    /// Field naming of the backend: 'snake' or 'camel'
    #[arg(long, default_value = "snake")]
    pub naming: String,

    /// Range emission mode: 'merged' or 'per-bucket'
    #[arg(long, default_value = "merged")]
    pub mode: String,

    /// Print the grouped availability as JSON instead of a table
    #[arg(long)]
    pub json: bool,

    /// Enable verbose output
    #[arg(long)]
    pub verbose: bool,
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("api_endpoint", &self.api_endpoint)?;
        validation::validate_non_empty_string("tutoring_id", &self.tutoring_id)?;

        self.naming
            .parse::<NamingStyle>()
            .map_err(|reason| ScheduleError::InvalidConfigValueError {
                field: "naming".to_string(),
                value: self.naming.clone(),
                reason,
            })?;
        self.mode
            .parse::<RangeMode>()
            .map_err(|reason| ScheduleError::InvalidConfigValueError {
                field: "mode".to_string(),
                value: self.mode.clone(),
                reason,
            })?;

        Ok(())
    }
}

impl ConfigProvider for CliConfig {
    fn api_endpoint(&self) -> &str {
        &self.api_endpoint
    }

    // Validated before use; fall back to the defaults on the error path.
    fn naming_style(&self) -> NamingStyle {
        self.naming.parse().unwrap_or_default()
    }

    fn range_mode(&self) -> RangeMode {
        self.mode.parse().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> CliConfig {
        CliConfig {
            tutoring_id: "42".to_string(),
            api_endpoint: "https://api.example.com".to_string(),
            naming: "camel".to_string(),
            mode: "per-bucket".to_string(),
            json: false,
            verbose: false,
        }
    }

    #[test]
    fn test_valid_config_passes() {
        let config = config();
        assert!(config.validate().is_ok());
        assert_eq!(config.naming_style(), NamingStyle::Camel);
        assert_eq!(config.range_mode(), RangeMode::PerBucket);
    }

    #[test]
    fn test_invalid_fields_are_rejected() {
        let mut bad_url = config();
        bad_url.api_endpoint = "not-a-url".to_string();
        assert!(bad_url.validate().is_err());

        let mut bad_mode = config();
        bad_mode.mode = "weekly".to_string();
        assert!(bad_mode.validate().is_err());

        let mut empty_id = config();
        empty_id.tutoring_id = "  ".to_string();
        assert!(empty_id.validate().is_err());
    }
}
