use thiserror::Error;

#[derive(Error, Debug)]
pub enum LbasiError {
    #[error("No product text was submitted")]
    EmptyInput,

    #[error("Invalid product '{value}': {reason}")]
    InvalidProductError { value: String, reason: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV rendering error: {0}")]
    CsvError(#[from] csv::Error),

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

    #[error("Text extraction failed: {message}")]
    ExtractionError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Configuration,
    Extraction,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl LbasiError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            LbasiError::EmptyInput | LbasiError::InvalidProductError { .. } => {
                ErrorCategory::Input
            }
            LbasiError::ConfigValidationError { .. }
            | LbasiError::InvalidConfigValueError { .. }
            | LbasiError::MissingConfigError { .. } => ErrorCategory::Configuration,
            LbasiError::ExtractionError { .. } => ErrorCategory::Extraction,
            LbasiError::IoError(_)
            | LbasiError::SerializationError(_)
            | LbasiError::CsvError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // 사용자가 다시 입력하면 해결되는 오류
            ErrorCategory::Input => ErrorSeverity::Low,
            ErrorCategory::Extraction => ErrorSeverity::Medium,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            LbasiError::EmptyInput => {
                "Enter at least one product name, one per line (--product or --products-file)"
            }
            LbasiError::InvalidProductError { .. } => {
                "Add one product per entry, or use a products file with one product per line"
            }
            LbasiError::ConfigValidationError { .. } => {
                "Check the rules file syntax against the documented TOML layout"
            }
            LbasiError::InvalidConfigValueError { .. } => {
                "Correct the reported value and run again"
            }
            LbasiError::MissingConfigError { .. } => "Provide the missing setting",
            LbasiError::ExtractionError { .. } => {
                "Type the product names manually or check the --ocr-command setting"
            }
            LbasiError::IoError(_) => "Make sure the file exists and is readable",
            LbasiError::SerializationError(_) | LbasiError::CsvError(_) => {
                "Try a different --format"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            LbasiError::EmptyInput => "화장품 목록을 입력해주세요!".to_string(),
            LbasiError::ExtractionError { .. } => {
                "이미지에서 글자를 읽지 못했습니다. 제품명을 직접 입력해주세요.".to_string()
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, LbasiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_is_low_severity() {
        let err = LbasiError::EmptyInput;
        assert_eq!(err.category(), ErrorCategory::Input);
        assert_eq!(err.severity(), ErrorSeverity::Low);
        assert!(err.user_friendly_message().contains("화장품"));
    }

    #[test]
    fn test_config_errors_are_high_severity() {
        let err = LbasiError::MissingConfigError {
            field: "rules.strategy".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert!(err.to_string().contains("rules.strategy"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: LbasiError = io.into();
        assert_eq!(err.severity(), ErrorSeverity::Critical);
    }
}
