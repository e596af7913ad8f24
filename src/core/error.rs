//! Typed error handling for roster views
//!
//! The filter/sort/paginate pipeline itself never fails: malformed inputs fall
//! back to defaults. Errors only come from the surfaces around it.
//!
//! # Error Categories
//!
//! - [`ConfigError`]: Errors related to loading and resolving view configuration
//! - [`ExportError`]: Errors related to exporting records
//! - `Source`: Errors reported by a record source (opaque `anyhow::Error`)
//!
//! # Example
//!
//! ```rust,ignore
//! use roster_view::prelude::*;
//!
//! match ViewsConfig::from_yaml_file("views.yaml") {
//!     Ok(config) => { /* ... */ }
//!     Err(ConfigError::Io { path, .. }) => eprintln!("cannot read {path}"),
//!     Err(e) => eprintln!("{} ({})", e, e.error_code()),
//! }
//! ```

use std::fmt;

/// The main error type for roster views
///
/// Each variant contains a more specific error type for that category.
#[derive(Debug)]
pub enum RosterError {
    /// Configuration errors
    Config(ConfigError),

    /// Export errors
    Export(ExportError),

    /// Record source errors
    Source(anyhow::Error),
}

impl fmt::Display for RosterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RosterError::Config(e) => write!(f, "{}", e),
            RosterError::Export(e) => write!(f, "{}", e),
            RosterError::Source(e) => write!(f, "Record source error: {}", e),
        }
    }
}

impl std::error::Error for RosterError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RosterError::Config(e) => Some(e),
            RosterError::Export(e) => Some(e),
            RosterError::Source(e) => Some(&**e),
        }
    }
}

impl RosterError {
    /// Stable error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            RosterError::Config(e) => e.error_code(),
            RosterError::Export(e) => e.error_code(),
            RosterError::Source(_) => "RECORD_SOURCE_FAILED",
        }
    }
}

impl From<ConfigError> for RosterError {
    fn from(err: ConfigError) -> Self {
        RosterError::Config(err)
    }
}

impl From<ExportError> for RosterError {
    fn from(err: ExportError) -> Self {
        RosterError::Export(err)
    }
}

impl From<anyhow::Error> for RosterError {
    fn from(err: anyhow::Error) -> Self {
        RosterError::Source(err)
    }
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors related to view configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Configuration file could not be read
    #[error("Failed to read config file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration is not valid YAML for the expected shape
    #[error("Invalid view configuration: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// No view with this name is configured
    #[error("Unknown view: {view}")]
    UnknownView { view: String },

    /// A field name does not exist on the record type
    #[error("Unknown field '{field}' for {resource} in {context}")]
    UnknownField {
        resource: String,
        field: String,
        context: String,
    },

    /// A quick filter declares no conditions
    #[error("Quick filter '{id}' has no conditions")]
    EmptyQuickFilter { id: String },

    /// Two quick filters of a view share an id
    #[error("Quick filter '{id}' is declared more than once")]
    DuplicateQuickFilter { id: String },

    /// A range condition has min greater than max
    #[error("Quick filter '{id}' has an empty range ({min} > {max})")]
    InvalidRange { id: String, min: f64, max: f64 },

    /// A `within_days` condition is negative or reaches past the representable time range
    #[error("Quick filter '{id}' has an invalid day window ({days})")]
    InvalidDays { id: String, days: i64 },
}

impl ConfigError {
    pub fn error_code(&self) -> &'static str {
        match self {
            ConfigError::Io { .. } => "CONFIG_IO",
            ConfigError::Parse(_) => "CONFIG_PARSE",
            ConfigError::UnknownView { .. } => "CONFIG_UNKNOWN_VIEW",
            ConfigError::UnknownField { .. } => "CONFIG_UNKNOWN_FIELD",
            ConfigError::EmptyQuickFilter { .. } => "CONFIG_EMPTY_QUICK_FILTER",
            ConfigError::DuplicateQuickFilter { .. } => "CONFIG_DUPLICATE_QUICK_FILTER",
            ConfigError::InvalidRange { .. } => "CONFIG_INVALID_RANGE",
            ConfigError::InvalidDays { .. } => "CONFIG_INVALID_DAYS",
        }
    }
}

// =============================================================================
// Export Errors
// =============================================================================

/// Errors related to exporting records
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// Requested format is not supported
    #[error("Unsupported export format: {format}")]
    UnknownFormat { format: String },

    #[error("Failed to encode records as JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to encode records as YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl ExportError {
    pub fn error_code(&self) -> &'static str {
        match self {
            ExportError::UnknownFormat { .. } => "EXPORT_UNKNOWN_FORMAT",
            ExportError::Json(_) => "EXPORT_JSON",
            ExportError::Yaml(_) => "EXPORT_YAML",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = RosterError::from(ConfigError::UnknownView {
            view: "courses".to_string(),
        });
        assert_eq!(err.error_code(), "CONFIG_UNKNOWN_VIEW");
        assert_eq!(err.to_string(), "Unknown view: courses");

        let err = RosterError::from(anyhow::anyhow!("backend offline"));
        assert_eq!(err.error_code(), "RECORD_SOURCE_FAILED");
        assert_eq!(err.to_string(), "Record source error: backend offline");
    }

    #[test]
    fn test_error_source_chain() {
        use std::error::Error;

        let err = RosterError::from(ExportError::UnknownFormat {
            format: "xlsx".to_string(),
        });
        assert!(err.source().is_some());
    }
}
