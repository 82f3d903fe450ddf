//! Adapters for emitting redacted values through `slog`.
//!
//! This module connects [`Redactor`] with `slog` by providing a
//! `slog::Value` that serializes the redacted copy as structured JSON via
//! `slog`'s nested-value support.
//!
//! It is responsible for:
//! - Ensuring the logged representation is the redacted copy, never the
//!   original value.
//! - Avoiding fallible logging APIs: capture failures are represented as a
//!   placeholder string rather than propagated as errors.
//!
//! It does not configure `slog` or choose which names are sensitive.

use serde::Serialize;
use serde_json::Value as JsonValue;
use slog::{Key, Record, Result as SlogResult, Serializer, Value as SlogValue};

use crate::redaction::Redactor;

/// Logged in place of a value that could not be captured.
const CAPTURE_FAILED: &str = "Failed to redact value";

/// A `slog::Value` that emits an owned redacted payload as structured JSON.
///
/// The payload is computed eagerly, so the logged value reflects the input at
/// the time the adapter was created.
#[derive(Clone, Debug, PartialEq)]
pub struct RedactedJson {
    value: JsonValue,
}

impl RedactedJson {
    fn new(value: JsonValue) -> Self {
        Self { value }
    }

    /// The redacted JSON payload.
    pub fn as_json(&self) -> &JsonValue {
        &self.value
    }
}

impl SlogValue for RedactedJson {
    fn serialize(
        &self,
        record: &Record<'_>,
        key: Key,
        serializer: &mut dyn Serializer,
    ) -> SlogResult {
        let nested = slog::Serde(self.value.clone());
        SlogValue::serialize(&nested, record, key, serializer)
    }
}

/// Converts values into a `slog::Value` that logs their redacted form as JSON.
///
/// ## Example
/// ```ignore
/// use shroud::slog::IntoRedactedJson;
///
/// info!(logger, "login"; "request" => request.allow_listed(&["username"]));
/// ```
pub trait IntoRedactedJson: Serialize {
    /// Redacts with `redactor` and wraps the JSON result.
    ///
    /// If the value cannot be captured, the returned value stores the JSON
    /// string `"Failed to redact value"`.
    fn redacted_with(&self, redactor: &Redactor) -> RedactedJson {
        let value = redactor
            .redact_to_json(self)
            .unwrap_or_else(|_| JsonValue::String(CAPTURE_FAILED.to_string()));
        RedactedJson::new(value)
    }

    /// Redacts everything except leaves under `allow_list`.
    fn allow_listed<S: AsRef<str>>(&self, allow_list: &[S]) -> RedactedJson {
        self.redacted_with(&Redactor::allow_list(allow_list))
    }

    /// Redacts only leaves under `deny_list`.
    fn deny_listed<S: AsRef<str>>(&self, deny_list: &[S]) -> RedactedJson {
        self.redacted_with(&Redactor::deny_list(deny_list))
    }
}

impl<T> IntoRedactedJson for T where T: Serialize + ?Sized {}
