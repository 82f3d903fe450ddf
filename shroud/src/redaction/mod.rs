//! Redaction policy and traversal.
//!
//! - **`policy`**: which locations are redacted (`ListMode`, `NameList`, `should_redact`)
//! - **`traverse`**: the engine walking a captured tree (`Redactor`, entrypoints)
//!
//! Shape classification lives in `crate::classification`; the captured tree in
//! `crate::value`.

mod policy;
mod traverse;

pub use policy::{
    should_redact, ListMode, Location, NameList, REDACTED_BYTES, REDACTED_PLACEHOLDER,
};
pub use traverse::{redact_with_allow_list, redact_with_deny_list, Redactor};
