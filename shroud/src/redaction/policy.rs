//! Allow/deny decisions for named locations.
//!
//! Policies are pure predicates. They do not traverse structures or touch
//! values; the traversal engine asks them one question per leaf: given where
//! this leaf was reached, should it be redacted?

use std::collections::HashSet;

/// Placeholder substituted for redacted text.
pub const REDACTED_PLACEHOLDER: &str = "REDACTED";

/// Placeholder substituted for redacted byte sequences.
pub const REDACTED_BYTES: &[u8] = REDACTED_PLACEHOLDER.as_bytes();

/// How a [`NameList`] is interpreted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ListMode {
    /// Redact by default; listed names are exempt.
    Allow,
    /// Keep by default; only listed names are redacted.
    Deny,
}

/// Where a node was reached from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Location<'a> {
    /// Top level, or an element of a positional container.
    Unnamed,
    /// A struct field or textual map key.
    Named(&'a str),
}

/// A set of field/key names compared case-insensitively.
///
/// Names are lower-cased once on construction so membership checks during
/// traversal only normalize the probed name.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NameList {
    names: HashSet<String>,
}

impl NameList {
    /// Builds a list from any iterator of names. Duplicates collapse.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            names: names
                .into_iter()
                .map(|name| name.as_ref().to_lowercase())
                .collect(),
        }
    }

    /// Returns `true` if `name` matches an entry, ignoring case.
    pub fn contains(&self, name: &str) -> bool {
        if self.names.is_empty() {
            return false;
        }
        self.names.contains(&name.to_lowercase())
    }

    /// Number of distinct normalized names.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns `true` if no names were given.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl<S> FromIterator<S> for NameList
where
    S: AsRef<str>,
{
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}

/// Decides whether leaf content reached through `location` is redacted.
///
/// Without a location name nothing was ever listed, so allow mode redacts and
/// deny mode keeps.
pub fn should_redact(mode: ListMode, names: &NameList, location: Location<'_>) -> bool {
    match (mode, location) {
        (ListMode::Allow, Location::Unnamed) => true,
        (ListMode::Deny, Location::Unnamed) => false,
        (ListMode::Allow, Location::Named(name)) => !names.contains(name),
        (ListMode::Deny, Location::Named(name)) => names.contains(name),
    }
}
