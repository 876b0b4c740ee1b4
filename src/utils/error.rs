use thiserror::Error;

#[derive(Error, Debug)]
pub enum DrawError {
    #[error("Need at least 2 participants to create assignments, got {count}")]
    InsufficientParticipants { count: usize },

    #[error("Duplicate name detected: \"{name}\"")]
    DuplicateName { name: String },

    #[error("Duplicate participant identifier: {id}")]
    DuplicateIdentifier { id: String },

    #[error("Failed to create valid assignments: {message}")]
    AssignmentFailure { message: String },

    #[error("Participant not found: {id}")]
    ParticipantNotFound { id: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

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

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Assignment,
    Config,
    Storage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl DrawError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            DrawError::InsufficientParticipants { .. }
            | DrawError::DuplicateName { .. }
            | DrawError::DuplicateIdentifier { .. }
            | DrawError::ParticipantNotFound { .. }
            | DrawError::ValidationError { .. } => ErrorCategory::Input,
            DrawError::AssignmentFailure { .. } => ErrorCategory::Assignment,
            DrawError::ConfigError { .. }
            | DrawError::ConfigValidationError { .. }
            | DrawError::InvalidConfigValueError { .. }
            | DrawError::MissingConfigError { .. } => ErrorCategory::Config,
            DrawError::IoError(_) | DrawError::SerializationError(_) | DrawError::CsvError(_) => {
                ErrorCategory::Storage
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input | ErrorCategory::Config => ErrorSeverity::High,
            ErrorCategory::Storage => ErrorSeverity::Medium,
            // 演算法保證不應發生，出現即代表程式缺陷
            ErrorCategory::Assignment => ErrorSeverity::Critical,
        }
    }

    /// 只有儲存層的 IO 錯誤值得重試；抽籤本身的錯誤一律不重試
    pub fn is_retryable(&self) -> bool {
        matches!(self, DrawError::IoError(_))
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            DrawError::InsufficientParticipants { .. } => {
                "Add more participants (at least 2 eligible people are required)"
            }
            DrawError::DuplicateName { .. } => {
                "Remove duplicate names (comparison ignores case) before drawing"
            }
            DrawError::DuplicateIdentifier { .. } => {
                "Make sure every participant has a unique identifier"
            }
            DrawError::AssignmentFailure { .. } => {
                "The stored draw is corrupted or the draw algorithm is defective; re-run the draw and report it if it recurs"
            }
            DrawError::ParticipantNotFound { .. } => "Check the participant id and try again",
            DrawError::IoError(_) => "Check that the output path exists and is writable",
            DrawError::SerializationError(_) => {
                "The stored assignment file may be corrupted; re-run the draw for that year"
            }
            DrawError::CsvError(_) => "Try a different output format",
            DrawError::ConfigError { .. }
            | DrawError::ConfigValidationError { .. }
            | DrawError::InvalidConfigValueError { .. }
            | DrawError::MissingConfigError { .. } => {
                "Review the configuration file or command line flags"
            }
            DrawError::ValidationError { .. } => "Fix the input and try again",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            DrawError::InsufficientParticipants { count } => format!(
                "Not enough participants to draw: {} eligible, at least 2 needed",
                count
            ),
            DrawError::DuplicateName { name } => format!(
                "Duplicate name \"{}\". Please remove duplicates before randomizing.",
                name
            ),
            DrawError::AssignmentFailure { .. } => {
                "Failed to create valid assignments. Please try again.".to_string()
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, DrawError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_errors_are_not_retryable() {
        let errors = [
            DrawError::InsufficientParticipants { count: 1 },
            DrawError::DuplicateName {
                name: "Alice".to_string(),
            },
            DrawError::AssignmentFailure {
                message: "x".to_string(),
            },
        ];
        for e in &errors {
            assert!(!e.is_retryable(), "{:?} should not be retryable", e);
        }
    }

    #[test]
    fn test_assignment_failure_is_critical() {
        let e = DrawError::AssignmentFailure {
            message: "giver count mismatch".to_string(),
        };
        assert_eq!(e.category(), ErrorCategory::Assignment);
        assert_eq!(e.severity(), ErrorSeverity::Critical);
    }

    #[test]
    fn test_storage_and_config_severities() {
        let io = DrawError::IoError(std::io::Error::other("disk full"));
        assert_eq!(io.severity(), ErrorSeverity::Medium);
        assert!(io.is_retryable());

        let config = DrawError::MissingConfigError {
            field: "names".to_string(),
        };
        assert_eq!(config.severity(), ErrorSeverity::High);
        assert!(ErrorSeverity::Medium < ErrorSeverity::Critical);
    }

    #[test]
    fn test_user_friendly_message() {
        let e = DrawError::InsufficientParticipants { count: 1 };
        assert!(e.user_friendly_message().contains("at least 2"));
        assert_eq!(e.severity(), ErrorSeverity::High);
    }
}
