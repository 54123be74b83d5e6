//! Error types for extraction and export

/// Error types that can occur while extracting or exporting a schema
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// Configuration file could not be loaded or parsed
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// File could not be read or written
    #[error("IO error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// The input document is not well-formed XML
    #[error("XML error: {message}")]
    Xml { message: String },

    /// A required structure is absent from the document
    #[error("{structure} not found: {name}")]
    NotFound { structure: Structure, name: String },

    /// CSV encoding failed
    #[error("CSV error: {source}")]
    Csv {
        #[from]
        source: csv::Error,
    },

    /// JSON encoding failed
    #[error("Serialization error: {message}")]
    Serialization { message: String },

    /// A generated artifact failed validation
    #[error("Validation error: {message}")]
    Validation { message: String },
}

/// Top-level structures whose absence aborts an export
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Structure {
    FeatureClass,
    FieldArray,
    DomainCollection,
}

impl Structure {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FeatureClass => "Feature class",
            Self::FieldArray => "Field array",
            Self::DomainCollection => "Domain collection",
        }
    }
}

impl std::fmt::Display for Structure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ExportError {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create an XML error
    pub fn xml(message: impl Into<String>) -> Self {
        Self::Xml {
            message: message.into(),
        }
    }

    /// Create a structural not-found error
    pub fn not_found(structure: Structure, name: impl Into<String>) -> Self {
        Self::NotFound {
            structure,
            name: name.into(),
        }
    }

    /// Create a serialization error
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Whether this error means the requested structure is missing from the input
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl From<serde_json::Error> for ExportError {
    fn from(e: serde_json::Error) -> Self {
        Self::serialization(format!("JSON serialization failed: {e}"))
    }
}

/// Result type for export operations
pub type ExportResult<T> = Result<T, ExportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message() {
        let err = ExportError::not_found(Structure::FeatureClass, "Building_A");
        assert_eq!(err.to_string(), "Feature class not found: Building_A");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: ExportError = io.into();
        assert!(matches!(err, ExportError::Io { .. }));
        assert!(!err.is_not_found());
    }
}
