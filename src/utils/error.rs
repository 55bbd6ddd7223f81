use crate::core::validator::ValidationFailure;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Source error: {message}")]
    SourceError { message: String },

    #[error("Schema validation failed: {0}")]
    SchemaError(#[from] ValidationFailure),
}

/// 錯誤分類，供 CLI 顯示與記錄
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Source,
    Schema,
    Output,
    Configuration,
}

impl EtlError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            EtlError::HttpError(_) | EtlError::CsvError(_) | EtlError::SourceError { .. } => {
                ErrorCategory::Source
            }
            EtlError::SchemaError(_) => ErrorCategory::Schema,
            EtlError::IoError(_) | EtlError::SerializationError(_) => ErrorCategory::Output,
            EtlError::ConfigError { .. } | EtlError::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Source => {
                "Make sure the CSV file exists, or that the Google Sheet is published to the web and publicly readable"
            }
            ErrorCategory::Schema => {
                "Fix the missing columns or blank required fields listed above and run again"
            }
            ErrorCategory::Output => "Check that the output directory exists and is writable",
            ErrorCategory::Configuration => "Check the command line flags and the TOML config file",
        }
    }
}

pub type Result<T> = std::result::Result<T, EtlError>;
