use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("SPARQL query to {endpoint} failed: {source}")]
    QueryError {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Malformed SPARQL results from {endpoint}: {message}")]
    MalformedResultsError { endpoint: String, message: String },

    #[error("HTTP client error: {0}")]
    HttpClientError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

/// Coarse error taxonomy used for logging and exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Network, endpoint or result-decoding failure on either SPARQL query.
    Query,
    /// The output file could not be created or written.
    Io,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl EtlError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            EtlError::QueryError { .. } | EtlError::MalformedResultsError { .. } => {
                ErrorCategory::Query
            }
            EtlError::IoError(_) | EtlError::CsvError(_) => ErrorCategory::Io,
            EtlError::HttpClientError(_)
            | EtlError::ConfigValidationError { .. }
            | EtlError::InvalidConfigValueError { .. }
            | EtlError::MissingConfigError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Query => ErrorSeverity::Medium,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Io => ErrorSeverity::Critical,
        }
    }

    /// 程序結束碼：設定錯誤 1、查詢失敗 2、輸出失敗 3
    pub fn exit_code(&self) -> i32 {
        match self.category() {
            ErrorCategory::Configuration => 1,
            ErrorCategory::Query => 2,
            ErrorCategory::Io => 3,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            EtlError::QueryError { endpoint, source } if source.is_timeout() => format!(
                "The endpoint {} did not answer in time; raise --timeout-seconds or try again later",
                endpoint
            ),
            EtlError::QueryError { endpoint, source } if source.is_status() => format!(
                "The endpoint {} rejected the query; check that the address points to a SPARQL endpoint",
                endpoint
            ),
            EtlError::QueryError { endpoint, .. } => format!(
                "Check network connectivity and that {} is reachable",
                endpoint
            ),
            EtlError::MalformedResultsError { .. } => {
                "The endpoint schema may have changed; run the query manually and inspect the result variables".to_string()
            }
            EtlError::HttpClientError(_) => {
                "Check the user agent and timeout settings".to_string()
            }
            EtlError::IoError(_) | EtlError::CsvError(_) => {
                "Check that the output directory exists, is writable and has free space".to_string()
            }
            EtlError::ConfigValidationError { field, .. }
            | EtlError::InvalidConfigValueError { field, .. } => {
                format!("Fix the value of '{}' in the configuration", field)
            }
            EtlError::MissingConfigError { field } => {
                format!("Add '{}' to the configuration", field)
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Query => format!("Could not fetch data: {}", self),
            ErrorCategory::Io => format!("Could not write the output file: {}", self),
            ErrorCategory::Configuration => format!("Invalid configuration: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, EtlError>;
