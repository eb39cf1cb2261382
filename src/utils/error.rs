use crate::core::schema::ValidationError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatRosterError {
    #[error("{0}")]
    ApiError(#[from] reqwest::Error),

    #[error("{message}")]
    TransportError { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Parsing Error: {0}")]
    ValidationError(#[from] ValidationError),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Data,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl CatRosterError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            CatRosterError::ApiError(_) | CatRosterError::TransportError { .. } => {
                ErrorCategory::Network
            }
            CatRosterError::SerializationError(_) | CatRosterError::ValidationError(_) => {
                ErrorCategory::Data
            }
            CatRosterError::ConfigError { .. }
            | CatRosterError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            CatRosterError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // the feed may come back; nothing local is wrong
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Data | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            CatRosterError::ApiError(e) if e.is_timeout() => {
                "The request timed out; raise --timeout-seconds or try again later"
            }
            CatRosterError::ApiError(e) if e.is_status() => {
                "The server rejected the request; check the endpoint URL"
            }
            CatRosterError::ApiError(_) | CatRosterError::TransportError { .. } => {
                "Check your network connection and that the endpoint is reachable"
            }
            CatRosterError::SerializationError(_) => {
                "The roster could not be serialized for output"
            }
            CatRosterError::ValidationError(_) => {
                "The feed does not match the expected list of people; check the data source"
            }
            CatRosterError::ConfigError { .. }
            | CatRosterError::InvalidConfigValueError { .. } => {
                "Review the command line flags and the TOML configuration file"
            }
            CatRosterError::IoError(_) => "Check file paths and permissions",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Network => format!("Could not reach the people feed: {}", self),
            ErrorCategory::Data => format!("The people feed could not be used: {}", self),
            ErrorCategory::Configuration => format!("Invalid configuration: {}", self),
            ErrorCategory::System => format!("System error: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, CatRosterError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::schema::ValidationIssue;

    #[test]
    fn test_validation_error_carries_parsing_prefix() {
        let err = CatRosterError::from(ValidationError::new(vec![ValidationIssue::new(
            "[0].gender",
            "required field is missing",
        )]));

        assert_eq!(
            err.to_string(),
            "Parsing Error: [0].gender: required field is missing"
        );
        assert_eq!(err.category(), ErrorCategory::Data);
        assert_eq!(err.severity(), ErrorSeverity::High);
    }

    #[test]
    fn test_transport_error_is_verbatim() {
        let err = CatRosterError::TransportError {
            message: "connection refused".to_string(),
        };

        assert_eq!(err.to_string(), "connection refused");
        assert_eq!(err.severity(), ErrorSeverity::Medium);
        assert!(err.user_friendly_message().contains("connection refused"));
    }

    #[test]
    fn test_serialization_error_is_data_category() {
        let err = CatRosterError::from(serde_json::from_str::<u8>("x").unwrap_err());

        assert_eq!(err.category(), ErrorCategory::Data);
        assert!(err.to_string().starts_with("Serialization error: "));
    }

    #[test]
    fn test_config_errors_are_configuration_category() {
        let err = CatRosterError::InvalidConfigValueError {
            field: "source.endpoint".to_string(),
            value: "ftp://x".to_string(),
            reason: "Unsupported URL scheme: ftp".to_string(),
        };

        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert!(err.to_string().contains("source.endpoint"));
    }
}
