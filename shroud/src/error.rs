//! Error type shared by the capture and rebuild stages.
//!
//! Traversal itself never fails. Errors only come from the serde boundary:
//! capturing a value whose `Serialize` impl reports an error, or rebuilding
//! the caller's type from a redacted tree it refuses to accept.

use std::fmt::Display;

use thiserror::Error;

/// Result alias for redaction operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by a redaction call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The value could not be captured into the redaction model.
    ///
    /// Raised when the value's `Serialize` implementation fails, for example
    /// a type that refuses to expose its contents.
    #[error("cannot introspect value: {0}")]
    Introspect(String),

    /// The redacted model could not be turned back into the requested type.
    ///
    /// Common causes are string-encoded types (timestamps, addresses) that
    /// reject the placeholder, and fields skipped during serialization that
    /// have no default to fall back on.
    #[error("cannot rebuild redacted value: {0}")]
    Rebuild(String),
}

impl serde::ser::Error for Error {
    fn custom<T: Display>(msg: T) -> Self {
        Self::Introspect(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: Display>(msg: T) -> Self {
        Self::Rebuild(msg.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::Error;

    #[test]
    fn serde_errors_map_to_their_stage() {
        let capture = <Error as serde::ser::Error>::custom("mutex poisoned");
        assert_eq!(capture, Error::Introspect("mutex poisoned".into()));

        let rebuild = <Error as serde::de::Error>::missing_field("token");
        assert!(matches!(rebuild, Error::Rebuild(ref msg) if msg.contains("token")));
    }

    #[test]
    fn display_names_the_stage() {
        let err = Error::Rebuild("invalid length".into());
        assert_eq!(err.to_string(), "cannot rebuild redacted value: invalid length");
    }
}
