//! Allow-list and deny-list redaction for values you do not control.
//!
//! Given any value that implements `Serialize` and `Deserialize`, this crate
//! returns a deep copy in which string and byte leaves are replaced with
//! `"REDACTED"`, decided by the name of the struct field or map key holding
//! each leaf. Names match case-insensitively.
//!
//! - **Allow list**: everything is redacted except leaves under listed names.
//! - **Deny list**: nothing is redacted except leaves under listed names.
//!
//! Prefer the allow list. When a type grows a new sensitive field, an allow
//! list redacts it automatically, while a deny list leaks it until updated.
//!
//! ```rust
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, PartialEq, Serialize, Deserialize)]
//! struct User {
//!     username: String,
//!     password: String,
//!     key: Vec<u8>,
//!     is_admin: bool,
//! }
//!
//! let user = User {
//!     username: "dustin".into(),
//!     password: "super secret".into(),
//!     key: b"another secret".to_vec(),
//!     is_admin: true,
//! };
//!
//! let redacted = shroud::redact_with_allow_list(&user, &["Username"])?;
//! assert_eq!(
//!     redacted,
//!     User {
//!         username: "dustin".into(),
//!         password: "REDACTED".into(),
//!         key: b"REDACTED".to_vec(),
//!         is_admin: true,
//!     }
//! );
//! // The original is untouched.
//! assert_eq!(user.password, "super secret");
//! # Ok::<(), shroud::Error>(())
//! ```
//!
//! Rules applied at every node:
//! - `Option`, newtypes and enum payloads are looked through; the leaf inside
//!   keeps the name of the field that holds it.
//! - Elements of sequences, tuples and sets have no name: allow lists always
//!   redact them, deny lists never do.
//! - Empty strings and byte sequences are never redacted.
//! - Any non-empty sequence or tuple made only of `u8` is a byte sequence.
//!   serde reports `(u8, u8)` like `[u8; 2]` and a `BTreeSet<u8>` like a
//!   `Vec<u8>`, so those are overwritten with placeholder bytes too.
//! - Numbers, booleans, chars and unit variants are never redacted.
//! - Map keys are never rewritten.
//!
//! What this crate does not do:
//! - perform I/O or logging (see the `slog` feature for a logging adapter)
//! - reach fields serde does not see (`#[serde(skip)]`); those are rebuilt
//!   from the type's defaults
//! - tell the tag of an internally tagged enum (`#[serde(tag = "...")]`)
//!   from an ordinary string field; unless the tag name is allowed,
//!   [`Redactor::redact`] fails with [`Error::Rebuild`]. Use
//!   `Redactor::redact_to_json` for such types

// <https://doc.rust-lang.org/rustc/lints/listing/allowed-by-default.html>
#![warn(
    anonymous_parameters,
    bare_trait_objects,
    elided_lifetimes_in_paths,
    missing_copy_implementations,
    rust_2018_idioms,
    trivial_casts,
    trivial_numeric_casts,
    unreachable_pub,
    unsafe_code,
    unused_extern_crates,
    unused_import_braces
)]
// <https://rust-lang.github.io/rust-clippy/stable>
#![warn(
    clippy::all,
    clippy::cargo,
    clippy::dbg_macro,
    clippy::float_cmp_const,
    clippy::get_unwrap,
    clippy::mem_forget,
    clippy::nursery,
    clippy::pedantic,
    clippy::todo,
    clippy::unwrap_used,
    clippy::uninlined_format_args
)]
// Allow some clippy lints
#![allow(
    clippy::doc_markdown,
    clippy::module_name_repetitions,
    clippy::multiple_crate_versions,
    clippy::must_use_candidate,
    clippy::needless_pass_by_value,
    clippy::use_self,
    clippy::cargo_common_metadata,
    clippy::missing_errors_doc,
    clippy::missing_const_for_fn,
    clippy::redundant_pub_crate,
    clippy::option_if_let_else
)]
// Allow some lints while testing
#![cfg_attr(test, allow(clippy::non_ascii_literal, clippy::unwrap_used))]

mod classification;
mod error;
mod redaction;
#[cfg(feature = "slog")]
pub mod slog;
pub mod value;

pub use error::{Error, Result};
pub use redaction::{
    redact_with_allow_list, redact_with_deny_list, should_redact, ListMode, Location, NameList,
    Redactor, REDACTED_BYTES, REDACTED_PLACEHOLDER,
};
pub use value::Value;
