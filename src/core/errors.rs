//! Error types for the semtrace library.
//!
//! Every fallible operation in the crate returns [`Result`], whose error side is
//! the structured [`SemtraceError`]. Rule failures found in a design model are
//! *not* errors: they are reported as violations. Errors are reserved for
//! conditions that stop a run (unreadable input, invalid configuration).

use std::io;

use thiserror::Error;

/// Main result type for semtrace operations.
pub type Result<T> = std::result::Result<T, SemtraceError>;

/// Error type for all semtrace operations.
#[derive(Error, Debug)]
pub enum SemtraceError {
    /// I/O related errors (model files, config files, report output)
    #[error("I/O error: {message}")]
    Io {
        /// Human-readable error message
        message: String,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config {
        /// Error description
        message: String,
        /// Configuration field that caused the error
        field: Option<String>,
    },

    /// Model interchange parsing errors
    #[error("Parse error in {format}: {message}")]
    Parse {
        /// Interchange format being parsed (json, yaml, xmi)
        format: String,
        /// Error description
        message: String,
        /// Byte offset or element path where the error occurred
        location: Option<String>,
    },

    /// Linguistic service failures
    #[error("Linguistic analysis failed for '{text}': {message}")]
    Linguistic {
        /// Text that was being analyzed
        text: String,
        /// Error description
        message: String,
    },

    /// Graph construction and clustering errors
    #[error("Graph analysis error: {message}")]
    Graph {
        /// Error description
        message: String,
        /// Graph node that caused the error
        element: Option<String>,
    },

    /// Serialization/deserialization errors
    #[error("Serialization error: {message}")]
    Serialization {
        /// Error description
        message: String,
        /// Data type being serialized
        data_type: Option<String>,
        /// Underlying serialization error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Validation errors for input data
    #[error("Validation error: {message}")]
    Validation {
        /// Error description
        message: String,
        /// Field or input that failed validation
        field: Option<String>,
    },

    /// Generic internal errors
    #[error("Internal error: {message}")]
    Internal {
        /// Error description
        message: String,
        /// Additional context
        context: Option<String>,
    },
}

impl SemtraceError {
    /// Create a new I/O error with context
    pub fn io(message: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a new configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            field: None,
        }
    }

    /// Create a new configuration error with field context
    pub fn config_field(message: impl Into<String>, field: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            field: Some(field.into()),
        }
    }

    /// Create a new parse error
    pub fn parse(format: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Parse {
            format: format.into(),
            message: message.into(),
            location: None,
        }
    }

    /// Create a new parse error with a location hint
    pub fn parse_at(
        format: impl Into<String>,
        message: impl Into<String>,
        location: impl Into<String>,
    ) -> Self {
        Self::Parse {
            format: format.into(),
            message: message.into(),
            location: Some(location.into()),
        }
    }

    /// Create a new linguistic service error
    pub fn linguistic(text: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Linguistic {
            text: text.into(),
            message: message.into(),
        }
    }

    /// Create a new graph analysis error
    pub fn graph(message: impl Into<String>) -> Self {
        Self::Graph {
            message: message.into(),
            element: None,
        }
    }

    /// Create a new validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            field: None,
        }
    }

    /// Create a new validation error naming the offending field
    pub fn validation_field(message: impl Into<String>, field: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            field: Some(field.into()),
        }
    }

    /// Create a new internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
            context: None,
        }
    }

    /// Add context to an existing error
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        match &mut self {
            Self::Internal { context: ctx, .. } => {
                *ctx = Some(context.into());
            }
            Self::Parse { location, .. } if location.is_none() => {
                *location = Some(context.into());
            }
            _ => {}
        }
        self
    }
}

impl From<io::Error> for SemtraceError {
    fn from(err: io::Error) -> Self {
        Self::io("I/O operation failed", err)
    }
}

impl From<serde_json::Error> for SemtraceError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            message: format!("JSON serialization failed: {err}"),
            data_type: Some("JSON".to_string()),
            source: Some(Box::new(err)),
        }
    }
}

impl From<serde_yaml::Error> for SemtraceError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Serialization {
            message: format!("YAML serialization failed: {err}"),
            data_type: Some("YAML".to_string()),
            source: Some(Box::new(err)),
        }
    }
}

impl From<quick_xml::Error> for SemtraceError {
    fn from(err: quick_xml::Error) -> Self {
        Self::parse("xmi", err.to_string())
    }
}

/// Result extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error result
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;

    /// Add static context to an error result
    fn context(self, msg: &'static str) -> Result<T>;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<SemtraceError>,
{
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| e.into().with_context(f()))
    }

    fn context(self, msg: &'static str) -> Result<T> {
        self.map_err(|e| e.into().with_context(msg))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = SemtraceError::config("Invalid configuration");
        assert!(matches!(err, SemtraceError::Config { .. }));

        let err = SemtraceError::parse("xmi", "Unexpected end of document");
        assert!(matches!(err, SemtraceError::Parse { .. }));
    }

    #[test]
    fn test_error_with_context() {
        let err = SemtraceError::internal("Matrix shape mismatch").with_context("coverage analysis");

        if let SemtraceError::Internal { context, .. } = err {
            assert_eq!(context, Some("coverage analysis".to_string()));
        } else {
            panic!("Expected Internal error");
        }
    }

    #[test]
    fn test_parse_context_fills_missing_location() {
        let err = SemtraceError::parse("json", "missing field `id`").with_context("elements[3]");

        if let SemtraceError::Parse { location, .. } = err {
            assert_eq!(location.as_deref(), Some("elements[3]"));
        } else {
            panic!("Expected Parse error");
        }
    }

    #[test]
    fn test_result_extension() {
        let result: std::result::Result<i32, std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "File not found",
        ));

        let converted = result.context("Failed to read model file");
        assert!(matches!(converted, Err(SemtraceError::Io { .. })));
    }

    #[test]
    fn test_malformed_threshold_surfaces_as_serialization_error() {
        let yaml: std::result::Result<f64, _> = serde_yaml::from_str("not-a-number");
        let err: SemtraceError = yaml.unwrap_err().into();
        assert!(matches!(
            err,
            SemtraceError::Serialization { ref data_type, .. } if data_type.as_deref() == Some("YAML")
        ));

        let json: std::result::Result<f64, _> = serde_json::from_str("\"0.5x\"");
        let err: SemtraceError = json.unwrap_err().into();
        assert!(matches!(
            err,
            SemtraceError::Serialization { ref data_type, .. } if data_type.as_deref() == Some("JSON")
        ));
    }

    #[test]
    fn test_config_field_error() {
        let err = SemtraceError::config_field("must be within [0, 1]", "similarity.clustering_threshold");

        if let SemtraceError::Config { message, field } = err {
            assert_eq!(message, "must be within [0, 1]");
            assert_eq!(field.as_deref(), Some("similarity.clustering_threshold"));
        } else {
            panic!("Expected Config error");
        }
    }

    #[test]
    fn test_display_messages() {
        let err = SemtraceError::linguistic("Login", "service unavailable");
        assert_eq!(
            err.to_string(),
            "Linguistic analysis failed for 'Login': service unavailable"
        );
    }
}
