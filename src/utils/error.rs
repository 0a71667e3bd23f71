use crate::domain::hex::HexCoord;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LayoutError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Input error: {message}")]
    InputError { message: String },

    #[error("Hex ({}, {}) claimed by both '{first}' and '{second}'", .hex.q, .hex.r)]
    PartitionViolation {
        hex: HexCoord,
        first: String,
        second: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Io,
    Input,
    Configuration,
    Layout,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl LayoutError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            LayoutError::IoError(_) | LayoutError::SerializationError(_) => ErrorCategory::Io,
            LayoutError::CsvError(_) | LayoutError::InputError { .. } => ErrorCategory::Input,
            LayoutError::ConfigValidationError { .. }
            | LayoutError::InvalidConfigValueError { .. }
            | LayoutError::MissingConfigError { .. } => ErrorCategory::Configuration,
            LayoutError::PartitionViolation { .. } => ErrorCategory::Layout,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Io => ErrorSeverity::Medium,
            ErrorCategory::Input | ErrorCategory::Configuration => ErrorSeverity::High,
            // 分區不變量被破壞代表演算法本身有問題
            ErrorCategory::Layout => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            LayoutError::IoError(_) => {
                "Check that the input file exists and the output directory is writable"
            }
            LayoutError::CsvError(_) => {
                "Make sure the CSV has the headers app_name,business and is UTF-8 encoded"
            }
            LayoutError::SerializationError(_) => {
                "Check that the positions file is a layout JSON written by a previous run"
            }
            LayoutError::ConfigValidationError { .. } => {
                "Fix the configuration file syntax and field types"
            }
            LayoutError::InvalidConfigValueError { .. } => {
                "Adjust the value to the documented range"
            }
            LayoutError::MissingConfigError { .. } => {
                "Provide the missing option on the command line or in the config file"
            }
            LayoutError::InputError { .. } => {
                "Provide an input CSV file or enable synthetic data generation"
            }
            LayoutError::PartitionViolation { .. } => {
                "Report this layout input; territories must never overlap"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Io => format!("Could not read or write a file: {}", self),
            ErrorCategory::Input => format!("Input data problem: {}", self),
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::Layout => {
                format!("Layout failed an internal consistency check: {}", self)
            }
        }
    }

    /// Process exit code for the binaries.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

pub type Result<T> = std::result::Result<T, LayoutError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partition_violation_is_critical() {
        let err = LayoutError::PartitionViolation {
            hex: HexCoord::new(2, -1),
            first: "continent_0".to_string(),
            second: "continent_1".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Layout);
        assert_eq!(err.severity(), ErrorSeverity::Critical);
        assert_eq!(err.exit_code(), 3);
        assert!(err.to_string().contains("(2, -1)"));
    }

    #[test]
    fn test_config_errors_map_to_high_severity() {
        let err = LayoutError::InvalidConfigValueError {
            field: "layout.water_gap".to_string(),
            value: "0".to_string(),
            reason: "too small".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert_eq!(err.exit_code(), 1);
        assert!(err.user_friendly_message().starts_with("Configuration problem"));
    }

    #[test]
    fn test_io_errors_exit_with_medium_code() {
        let err = LayoutError::from(std::io::Error::new(std::io::ErrorKind::NotFound, "apps.csv"));
        assert_eq!(err.severity(), ErrorSeverity::Medium);
        assert_eq!(err.exit_code(), 2);
    }
}
