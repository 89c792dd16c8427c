use thiserror::Error;

#[derive(Error, Debug)]
pub enum AdminError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("Record store returned {status}: {message}")]
    StoreError { status: u16, message: String },

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Experience application not found: {id}")]
    NotFound { id: String },

    #[error("{action} is not available for {id}")]
    ActionNotAvailable { id: String, action: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Store,
    Data,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    /// 根據錯誤嚴重程度決定退出碼；錯誤一律非零
    pub fn exit_code(&self) -> i32 {
        match self {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

impl AdminError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            AdminError::ApiError(_) => ErrorCategory::Network,
            AdminError::StoreError { .. }
            | AdminError::NotFound { .. }
            | AdminError::ActionNotAvailable { .. } => ErrorCategory::Store,
            AdminError::SerializationError(_) | AdminError::CsvError(_) | AdminError::IoError(_) => {
                ErrorCategory::Data
            }
            AdminError::ConfigValidationError { .. }
            | AdminError::InvalidConfigValueError { .. }
            | AdminError::MissingConfigError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            AdminError::ApiError(_) => ErrorSeverity::Medium,
            AdminError::StoreError { status, .. } if *status >= 500 => ErrorSeverity::Medium,
            AdminError::StoreError { .. }
            | AdminError::NotFound { .. }
            | AdminError::ActionNotAvailable { .. }
            | AdminError::SerializationError(_)
            | AdminError::CsvError(_) => ErrorSeverity::High,
            AdminError::IoError(_)
            | AdminError::ConfigValidationError { .. }
            | AdminError::InvalidConfigValueError { .. }
            | AdminError::MissingConfigError { .. } => ErrorSeverity::Critical,
        }
    }

    /// 給使用者看的簡短訊息
    pub fn user_friendly_message(&self) -> String {
        match self {
            AdminError::ApiError(_) => "Could not reach the record store".to_string(),
            AdminError::StoreError { status, .. } => {
                format!("The record store rejected the request (HTTP {})", status)
            }
            AdminError::SerializationError(_) => {
                "The record store returned data in an unexpected shape".to_string()
            }
            AdminError::CsvError(_) => "Failed to write CSV output".to_string(),
            AdminError::IoError(e) => format!("File system error: {}", e),
            AdminError::ConfigValidationError { field, .. }
            | AdminError::InvalidConfigValueError { field, .. }
            | AdminError::MissingConfigError { field } => {
                format!("Configuration problem with '{}'", field)
            }
            AdminError::NotFound { id } => format!("No experience application with id '{}'", id),
            AdminError::ActionNotAvailable { id, action } => {
                format!("'{}' is already approved; {} is not offered", id, action)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        if matches!(
            self,
            AdminError::NotFound { .. } | AdminError::ActionNotAvailable { .. }
        ) {
            return "Run `experience-admin list` to see current ids and statuses";
        }

        match self.category() {
            ErrorCategory::Network => "Check the base URL and your network connection, then try again",
            ErrorCategory::Store => "Verify the API key has access to the experiences table",
            ErrorCategory::Data => "Re-run with --verbose to inspect the raw response",
            ErrorCategory::Configuration => "Fix the configuration file or command-line flags",
        }
    }
}

pub type Result<T> = std::result::Result<T, AdminError>;
