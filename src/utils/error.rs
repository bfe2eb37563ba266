use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScheduleError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("API returned status {status}: {body}")]
    ApiStatusError { status: u16, body: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Malformed availability row: {reason}")]
    MalformedAvailabilityRow { reason: String },

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration field: {field}")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Data,
    Config,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ScheduleError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ScheduleError::ApiError(_) | ScheduleError::ApiStatusError { .. } => {
                ErrorCategory::Network
            }
            ScheduleError::SerializationError(_)
            | ScheduleError::MalformedAvailabilityRow { .. } => ErrorCategory::Data,
            ScheduleError::ConfigValidationError { .. }
            | ScheduleError::InvalidConfigValueError { .. }
            | ScheduleError::MissingConfigError { .. } => ErrorCategory::Config,
            ScheduleError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // A single bad row is recoverable; callers skip it and continue.
            ScheduleError::MalformedAvailabilityRow { .. } => ErrorSeverity::Low,
            ScheduleError::ApiError(_) | ScheduleError::ApiStatusError { .. } => {
                ErrorSeverity::Medium
            }
            ScheduleError::SerializationError(_) => ErrorSeverity::High,
            ScheduleError::ConfigValidationError { .. }
            | ScheduleError::InvalidConfigValueError { .. }
            | ScheduleError::MissingConfigError { .. } => ErrorSeverity::High,
            ScheduleError::IoError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            ScheduleError::ApiError(_) | ScheduleError::ApiStatusError { .. } => {
                "Could not reach the tutoring API.".to_string()
            }
            ScheduleError::SerializationError(_) => {
                "The API returned data in an unexpected format.".to_string()
            }
            ScheduleError::MalformedAvailabilityRow { reason } => {
                format!("An availability row was malformed: {}", reason)
            }
            ScheduleError::ConfigValidationError { field, .. }
            | ScheduleError::InvalidConfigValueError { field, .. }
            | ScheduleError::MissingConfigError { field } => {
                format!("Configuration problem in '{}'.", field)
            }
            ScheduleError::IoError(_) => "A file operation failed.".to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            ScheduleError::ApiError(_) | ScheduleError::ApiStatusError { .. } => {
                "Check the endpoint URL and that the backend is running.".to_string()
            }
            ScheduleError::SerializationError(_) => {
                "Verify the endpoint returns availability rows as JSON.".to_string()
            }
            ScheduleError::MalformedAvailabilityRow { .. } => {
                "The row is skipped automatically; fix the source data to include it.".to_string()
            }
            ScheduleError::ConfigValidationError { .. }
            | ScheduleError::InvalidConfigValueError { .. } => {
                "Fix the reported field in the config file or CLI flags.".to_string()
            }
            ScheduleError::MissingConfigError { field } => {
                format!("Provide a value for '{}'.", field)
            }
            ScheduleError::IoError(_) => {
                "Check file paths and permissions.".to_string()
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, ScheduleError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_row_is_low_severity_data_error() {
        let err = ScheduleError::MalformedAvailabilityRow {
            reason: "day index 9 out of range".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Data);
        assert_eq!(err.severity(), ErrorSeverity::Low);
        assert!(err.to_string().contains("day index 9"));
    }

    #[test]
    fn test_config_errors_are_high_severity() {
        let err = ScheduleError::InvalidConfigValueError {
            field: "submit.mode".to_string(),
            value: "weekly".to_string(),
            reason: "unknown mode".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Config);
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert!(err.user_friendly_message().contains("submit.mode"));
    }
}
