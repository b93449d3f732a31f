//! Error types for query-lattice.
//!
//! All fallible operations return [`Result`], whose error side is
//! [`LatticeError`]. Only two variants describe bad analyzer input:
//!
//! - [`LatticeError::Parse`] for a response that is not JSON, or a token object
//!   missing one of its required fields
//! - [`LatticeError::Construction`] for an edge that violates its invariants
//!
//! A response that simply carries no `detail`, no `tokenfilters`, no matching
//! stage or no `tokens` is **not** an error. The parser returns an empty
//! lattice for those.
//!
//! # Examples
//!
//! ```
//! use query_lattice::error::{LatticeError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(LatticeError::construction("position length must be at least 1"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for query-lattice operations.
#[derive(Error, Debug)]
pub enum LatticeError {
    /// The analyzer response is not valid JSON, or a token is missing a
    /// required field.
    #[error("Parse error: {message}")]
    Parse {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// An edge would break a lattice invariant (e.g. zero position length).
    #[error("Construction error: {0}")]
    Construction(String),

    /// Invalid configuration values
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O errors (reading responses and configuration files)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization errors when writing reports
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for operations that may fail with LatticeError.
pub type Result<T> = std::result::Result<T, LatticeError>;

impl LatticeError {
    /// Create a new parse error wrapping the underlying decode error.
    pub fn parse<S: Into<String>>(msg: S, source: serde_json::Error) -> Self {
        LatticeError::Parse {
            message: msg.into(),
            source,
        }
    }

    /// Create a new construction error.
    pub fn construction<S: Into<String>>(msg: S) -> Self {
        LatticeError::Construction(msg.into())
    }

    /// Create a new configuration error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        LatticeError::Config(msg.into())
    }

    /// Whether this error came from malformed analyzer input.
    pub fn is_parse_error(&self) -> bool {
        matches!(self, LatticeError::Parse { .. })
    }

    /// Whether this error came from an edge invariant violation.
    pub fn is_construction_error(&self) -> bool {
        matches!(self, LatticeError::Construction(_))
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::*;

    #[test]
    fn test_error_construction() {
        let error = LatticeError::construction("length 0");
        assert_eq!(error.to_string(), "Construction error: length 0");
        assert!(error.is_construction_error());

        let error = LatticeError::config("empty stage name");
        assert_eq!(error.to_string(), "Configuration error: empty stage name");
    }

    #[test]
    fn test_parse_error_keeps_source() {
        let cause = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error = LatticeError::parse("invalid analyzer response", cause);

        assert!(error.is_parse_error());
        assert!(error.to_string().starts_with("Parse error: invalid analyzer response"));
        assert!(error.source().is_some());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let lattice_error = LatticeError::from(io_error);

        match lattice_error {
            LatticeError::Io(_) => {}
            _ => panic!("Expected IO error variant"),
        }
    }
}
