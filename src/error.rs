//! Error types for loading, converting, and dumping TOML documents.
//!
//! Every failure in this crate is reported through [`Error`]. The variants
//! keep the failure classes apart so callers can tell a malformed document
//! from a structurally wrong one, a missing key, a host value with no TOML
//! shape, or a calendar field combination that cannot exist.
//!
//! ## Error Categories
//!
//! - **Parse**: the text does not follow the TOML grammar
//! - **Structural**: the top-level value is not a table where one is required
//! - **MissingKey**: lookup of a key the root table does not contain
//! - **TypeConversion**: a host value has no mapping to the value model
//! - **TemporalConstruction**: date/time fields rejected by calendar arithmetic
//! - **Io / Serialize**: file access and rendering failures
//!
//! ## Examples
//!
//! ```rust
//! use toml_bridge::{parse, Error};
//!
//! let err = parse("a = ").unwrap_err();
//! assert!(matches!(err, Error::Parse(_)));
//! assert!(err.to_string().starts_with("TOML parse error:"));
//! ```

use crate::codec::Provenance;
use std::fmt;
use std::path::Path;
use thiserror::Error;

/// Represents all possible errors raised by this crate.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum Error {
    /// A file could not be opened, read, or written.
    #[error("IO error: {0}")]
    Io(String),

    /// The text does not conform to the TOML grammar.
    #[error("TOML parse error: {0}")]
    Parse(String),

    /// A table was required at the top level.
    #[error("TOML root must be a table, found {found}")]
    Structural { found: String },

    /// Lookup of an absent table key.
    #[error("missing TOML key: {0}")]
    MissingKey(String),

    /// A host value with no defined TOML shape.
    #[error("cannot convert {type_name} to TOML")]
    TypeConversion { type_name: String },

    /// Calendar composition rejected a field combination.
    #[error("cannot construct {kind} from fields {fields}")]
    TemporalConstruction { kind: Provenance, fields: String },

    /// The TOML serializer rejected the value.
    #[error("TOML serialization error: {0}")]
    Serialize(String),

    /// Custom error
    #[error("Error: {0}")]
    Custom(String),
}

impl Error {
    /// Wraps a diagnostic from the TOML parser.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use toml_bridge::Error;
    ///
    /// let err = Error::parse("expected `=`");
    /// assert_eq!(err.to_string(), "TOML parse error: expected `=`");
    /// ```
    pub fn parse<T: fmt::Display>(diagnostic: T) -> Self {
        Error::Parse(diagnostic.to_string())
    }

    /// Creates a structural error for a non-table root of the given type.
    pub fn structural(found: &str) -> Self {
        Error::Structural {
            found: found.to_string(),
        }
    }

    /// Creates a missing-key error naming `key`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use toml_bridge::Error;
    ///
    /// let err = Error::missing_key("port");
    /// assert_eq!(err.to_string(), "missing TOML key: port");
    /// ```
    pub fn missing_key(key: &str) -> Self {
        Error::MissingKey(key.to_string())
    }

    /// Creates a conversion error naming the unsupported host type.
    pub fn type_conversion(type_name: &str) -> Self {
        Error::TypeConversion {
            type_name: type_name.to_string(),
        }
    }

    /// Creates a calendar composition error.
    pub fn temporal<T: fmt::Display>(kind: Provenance, fields: T) -> Self {
        Error::TemporalConstruction {
            kind,
            fields: fields.to_string(),
        }
    }

    /// Creates an I/O error for `path` from the underlying failure.
    pub fn io(action: &str, path: &Path, err: &std::io::Error) -> Self {
        Error::Io(format!("failed to {} {}: {}", action, path.display(), err))
    }

    /// Creates a serialization error.
    pub fn serialize<T: fmt::Display>(msg: T) -> Self {
        Error::Serialize(msg.to_string())
    }

    /// Creates a custom error with a display message.
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
