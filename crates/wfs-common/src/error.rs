//! Error types for the WFS service.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::params;

/// Result type alias using WfsError.
pub type WfsResult<T> = Result<T, WfsError>;

/// Boxed cause carried by processing failures.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// OGC Web Services exception codes reported by this deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExceptionCode {
    MissingParameterValue,
    InvalidParameterValue,
    MissingServiceParameter,
    InvalidServiceParameter,
    OperationNotSupported,
    OperationProcessingFailed,
    NoApplicableCode,
}

impl ExceptionCode {
    /// The code as it appears in an exception report.
    pub fn as_str(&self) -> &'static str {
        match self {
            ExceptionCode::MissingParameterValue => "MissingParameterValue",
            ExceptionCode::InvalidParameterValue => "InvalidParameterValue",
            ExceptionCode::MissingServiceParameter => "MissingServiceParameter",
            ExceptionCode::InvalidServiceParameter => "InvalidServiceParameter",
            ExceptionCode::OperationNotSupported => "OperationNotSupported",
            ExceptionCode::OperationProcessingFailed => "OperationProcessingFailed",
            ExceptionCode::NoApplicableCode => "NoApplicableCode",
        }
    }
}

impl fmt::Display for ExceptionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Primary error type for WFS operations.
#[derive(Debug, Error)]
pub enum WfsError {
    // === Parameter validation ===
    #[error("Missing required parameter: {0}")]
    MissingParameter(String),

    #[error("Missing type name in query {query}")]
    MissingTypeName { query: usize },

    #[error("Invalid parameter value for '{param}': {message}")]
    InvalidParameter { param: String, message: String },

    #[error("Missing service parameter")]
    MissingService,

    #[error("Invalid service parameter '{value}', expected '{expected}'")]
    InvalidService { value: String, expected: String },

    /// Several independent validation failures reported together.
    #[error("{0}")]
    Composite(ErrorSet),

    // === Operation availability ===
    #[error("Operation not supported: {0}")]
    OperationNotSupported(String),

    // === Backend ===
    #[error("Operation '{operation}' failed: {message}")]
    ProcessingFailed {
        operation: String,
        message: String,
        #[source]
        source: Option<BoxError>,
    },

    // === Cache state ===
    #[error("Capabilities document has not been computed yet")]
    CapabilitiesNotComputed,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl WfsError {
    /// Shorthand for an `InvalidParameterValue` failure.
    pub fn invalid_parameter(param: impl Into<String>, message: impl Into<String>) -> Self {
        WfsError::InvalidParameter {
            param: param.into(),
            message: message.into(),
        }
    }

    /// Wrap a backend failure, keeping the original cause.
    pub fn processing_failed<E>(operation: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        WfsError::ProcessingFailed {
            operation: operation.into(),
            message: source.to_string(),
            source: Some(Box::new(source)),
        }
    }

    /// Get the OGC exception code for this error.
    ///
    /// A composite error reports the code of its first member.
    pub fn code(&self) -> ExceptionCode {
        match self {
            WfsError::MissingParameter(_) | WfsError::MissingTypeName { .. } => {
                ExceptionCode::MissingParameterValue
            }
            WfsError::InvalidParameter { .. } => ExceptionCode::InvalidParameterValue,
            WfsError::MissingService => ExceptionCode::MissingServiceParameter,
            WfsError::InvalidService { .. } => ExceptionCode::InvalidServiceParameter,
            WfsError::Composite(set) => set
                .iter()
                .next()
                .map(WfsError::code)
                .unwrap_or(ExceptionCode::NoApplicableCode),
            WfsError::OperationNotSupported(_) => ExceptionCode::OperationNotSupported,
            WfsError::ProcessingFailed { .. } => ExceptionCode::OperationProcessingFailed,
            WfsError::CapabilitiesNotComputed | WfsError::Internal(_) => {
                ExceptionCode::NoApplicableCode
            }
        }
    }

    /// Name of the offending parameter (or operation), when there is one.
    pub fn locator(&self) -> Option<&str> {
        match self {
            WfsError::MissingParameter(param) => Some(param),
            WfsError::MissingTypeName { .. } => Some(params::TYPE_NAMES),
            WfsError::InvalidParameter { param, .. } => Some(param),
            WfsError::MissingService | WfsError::InvalidService { .. } => Some(params::SERVICE),
            WfsError::OperationNotSupported(operation) => Some(operation),
            WfsError::ProcessingFailed { operation, .. } => Some(operation),
            _ => None,
        }
    }

    /// Get the HTTP status code for this error.
    pub fn http_status_code(&self) -> u16 {
        match self {
            WfsError::MissingParameter(_)
            | WfsError::MissingTypeName { .. }
            | WfsError::InvalidParameter { .. }
            | WfsError::MissingService
            | WfsError::InvalidService { .. }
            | WfsError::Composite(_) => 400,

            WfsError::OperationNotSupported(_) => 501,
            WfsError::CapabilitiesNotComputed => 503,

            WfsError::ProcessingFailed { .. } | WfsError::Internal(_) => 500,
        }
    }

    /// Flatten into the individual failures this error reports.
    pub fn exceptions(&self) -> Vec<&WfsError> {
        match self {
            WfsError::Composite(set) => set.iter().flat_map(WfsError::exceptions).collect(),
            other => vec![other],
        }
    }

    /// Whether this error came out of parameter validation.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            WfsError::MissingParameter(_)
                | WfsError::MissingTypeName { .. }
                | WfsError::InvalidParameter { .. }
                | WfsError::MissingService
                | WfsError::InvalidService { .. }
                | WfsError::Composite(_)
        )
    }
}

/// Accumulator for validation failures.
///
/// Checks push into the set instead of returning early so that every
/// problem with a request is reported in one response. Insertion order is
/// preserved.
#[derive(Debug, Default)]
pub struct ErrorSet {
    errors: Vec<WfsError>,
}

impl ErrorSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, error: WfsError) {
        self.errors.push(error);
    }

    /// Record the error of a failed check, if any.
    pub fn check(&mut self, result: WfsResult<()>) {
        if let Err(error) = result {
            self.push(error);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, WfsError> {
        self.errors.iter()
    }

    /// `Ok` when nothing was recorded, otherwise a composite error.
    pub fn into_result(self) -> WfsResult<()> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(WfsError::Composite(self))
        }
    }
}

impl fmt::Display for ErrorSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} validation error(s)", self.errors.len())?;
        for (i, error) in self.errors.iter().enumerate() {
            let sep = if i == 0 { ": " } else { "; " };
            write!(f, "{}{}", sep, error)?;
        }
        Ok(())
    }
}

impl IntoIterator for ErrorSet {
    type Item = WfsError;
    type IntoIter = std::vec::IntoIter<WfsError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl From<serde_json::Error> for WfsError {
    fn from(err: serde_json::Error) -> Self {
        WfsError::Internal(format!("JSON error: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exception_codes() {
        assert_eq!(
            WfsError::MissingService.code(),
            ExceptionCode::MissingServiceParameter
        );
        assert_eq!(
            WfsError::MissingTypeName { query: 0 }.code(),
            ExceptionCode::MissingParameterValue
        );
        assert_eq!(
            WfsError::CapabilitiesNotComputed.code(),
            ExceptionCode::NoApplicableCode
        );
        assert_eq!(
            WfsError::OperationNotSupported("GetPropertyValue".into()).code(),
            ExceptionCode::OperationNotSupported
        );
    }

    #[test]
    fn test_locators() {
        let err = WfsError::invalid_parameter("storedQueryId", "unknown");
        assert_eq!(err.locator(), Some("storedQueryId"));
        assert_eq!(WfsError::MissingService.locator(), Some("service"));
        assert_eq!(WfsError::MissingTypeName { query: 2 }.locator(), Some("typeNames"));
        assert_eq!(WfsError::Internal("x".into()).locator(), None);
    }

    #[test]
    fn test_empty_error_set_is_ok() {
        assert!(ErrorSet::new().into_result().is_ok());
    }

    #[test]
    fn test_error_set_preserves_order() {
        let mut errors = ErrorSet::new();
        errors.push(WfsError::MissingService);
        errors.check(Ok(()));
        errors.check(Err(WfsError::invalid_parameter("typeNames", "unknown type")));

        let err = errors.into_result().unwrap_err();
        let codes: Vec<_> = err.exceptions().iter().map(|e| e.code()).collect();
        assert_eq!(
            codes,
            vec![
                ExceptionCode::MissingServiceParameter,
                ExceptionCode::InvalidParameterValue
            ]
        );
        assert_eq!(err.code(), ExceptionCode::MissingServiceParameter);
        assert_eq!(err.http_status_code(), 400);
    }

    #[test]
    fn test_composite_display_lists_members() {
        let mut errors = ErrorSet::new();
        errors.push(WfsError::MissingService);
        errors.push(WfsError::MissingParameter("version".into()));
        let display = errors.to_string();
        assert!(display.starts_with("2 validation error(s)"));
        assert!(display.contains("Missing service parameter"));
        assert!(display.contains("version"));
    }

    #[test]
    fn test_processing_failed_keeps_source() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "archive offline");
        let err = WfsError::processing_failed("GetFeature", io);

        assert_eq!(err.code(), ExceptionCode::OperationProcessingFailed);
        assert_eq!(err.http_status_code(), 500);
        assert!(err.to_string().contains("archive offline"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
