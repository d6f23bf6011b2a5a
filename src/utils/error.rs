use thiserror::Error;

#[derive(Error, Debug)]
pub enum CswError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Malformed XML response: {0}")]
    XmlError(#[from] serde_xml_rs::Error),

    #[error("Malformed XML response: {0}")]
    XmlSyntaxError(#[from] xml::reader::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Adapter error: {message}")]
    AdapterError { message: String },

    #[error(
        "Service exception report [{code}]{}: {}",
        locator_suffix(.locator),
        join_texts(.texts)
    )]
    ExceptionReport {
        code: String,
        locator: Option<String>,
        texts: Vec<String>,
    },

    #[error("numberOfRecordsMatched '{value}' does not fit into a 64-bit unsigned integer")]
    CountOverflow { value: String },

    #[error("numberOfRecordsMatched '{value}' is not a non-negative integer")]
    InvalidCount { value: String },

    #[error("Illegal state: {message}")]
    IllegalState { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Protocol,
    Transport,
    Parsing,
    State,
}

impl CswError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            CswError::InvalidConfigValueError { .. }
            | CswError::MissingConfigError { .. }
            | CswError::TomlError(_)
            | CswError::AdapterError { .. } => ErrorCategory::Configuration,
            CswError::ExceptionReport { .. } => ErrorCategory::Protocol,
            CswError::HttpError(_) | CswError::IoError(_) => ErrorCategory::Transport,
            CswError::XmlError(_)
            | CswError::XmlSyntaxError(_)
            | CswError::CountOverflow { .. }
            | CswError::InvalidCount { .. } => ErrorCategory::Parsing,
            CswError::IllegalState { .. } => ErrorCategory::State,
        }
    }

    /// Process exit code used by the CLI.
    pub fn exit_code(&self) -> i32 {
        match self.category() {
            ErrorCategory::Configuration => 2,
            ErrorCategory::Protocol => 3,
            ErrorCategory::Transport => 4,
            ErrorCategory::Parsing => 5,
            ErrorCategory::State => 1,
        }
    }
}

fn locator_suffix(locator: &Option<String>) -> String {
    locator
        .as_deref()
        .map(|l| format!(" at '{}'", l))
        .unwrap_or_default()
}

fn join_texts(texts: &[String]) -> String {
    texts.join("; ")
}

pub type Result<T> = std::result::Result<T, CswError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exception_report_display() {
        let err = CswError::ExceptionReport {
            code: "InvalidParameterValue".to_string(),
            locator: Some("outputSchema".to_string()),
            texts: vec!["Unknown schema".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "Service exception report [InvalidParameterValue] at 'outputSchema': Unknown schema"
        );
        assert_eq!(err.category(), ErrorCategory::Protocol);
    }

    #[test]
    fn test_count_errors_are_parsing_errors() {
        let overflow = CswError::CountOverflow {
            value: "99999999999999999999999".to_string(),
        };
        assert_eq!(overflow.category(), ErrorCategory::Parsing);
        assert_eq!(overflow.exit_code(), 5);
    }
}
