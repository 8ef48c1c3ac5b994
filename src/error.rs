//! Error types for the AFD crate.
//!
//! The rendering engine itself has no error surface: a suffix whose value
//! fails its type guard silently degrades to "no match" so malformed data
//! never aborts output production. Errors exist only at the crate's edges:
//! converting Rust types into a [`crate::Value`] through serde, and parsing
//! CLI flag values.

use std::fmt;
use thiserror::Error;

/// Errors produced at the serde and CLI boundaries.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// A type that cannot be represented as an AFD value.
    #[error("unsupported type: {0}")]
    UnsupportedType(String),

    /// An unrecognized `--output` flag value.
    #[error("invalid --output format {0:?}: expected json, yaml, or plain")]
    InvalidOutputFormat(String),

    /// Catch-all carrying a display message (serde custom errors land here).
    #[error("{0}")]
    Custom(String),
}

impl Error {
    /// Creates an unsupported type error for types that cannot become values.
    pub fn unsupported_type(msg: &str) -> Self {
        Error::UnsupportedType(msg.to_string())
    }

    /// Creates a custom error with a display message.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_afd::Error;
    ///
    /// let err = Error::custom("something went wrong");
    /// assert!(err.to_string().contains("something went wrong"));
    /// ```
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
