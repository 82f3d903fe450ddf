//! Application layer: capture, traverse, rebuild.
//!
//! A [`Redactor`] holds the mode and the normalized name list. Each call
//! captures the input into a fresh [`Value`] tree, rewrites qualifying leaves
//! in place, and hands the tree (or the rebuilt value) to the caller. Nothing
//! is shared between calls, so one redactor can serve many threads.

use serde::{de::DeserializeOwned, Serialize};

use super::policy::{
    should_redact, ListMode, Location, NameList, REDACTED_BYTES, REDACTED_PLACEHOLDER,
};
use crate::{
    classification::ShapeMut,
    error::Result,
    value::{from_value, to_value, Value},
};

/// Reusable allow-list or deny-list redactor.
///
/// ```rust
/// use shroud::Redactor;
///
/// let redactor = Redactor::deny_list(["password"]);
/// let mut config = std::collections::BTreeMap::new();
/// config.insert("user".to_string(), "dustin".to_string());
/// config.insert("Password".to_string(), "hunter2".to_string());
///
/// let redacted = redactor.redact(&config).unwrap();
/// assert_eq!(redacted["user"], "dustin");
/// assert_eq!(redacted["Password"], "REDACTED");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Redactor {
    mode: ListMode,
    names: NameList,
}

impl Redactor {
    /// Builds a redactor from an explicit mode and name list.
    pub fn new(mode: ListMode, names: NameList) -> Self {
        Self { mode, names }
    }

    /// Redacts every string and byte leaf except those under `names`.
    pub fn allow_list<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::new(ListMode::Allow, NameList::new(names))
    }

    /// Redacts only string and byte leaves under `names`.
    ///
    /// Prefer [`Redactor::allow_list`]: a field added later is leaked by a
    /// deny list until someone remembers to list it.
    pub fn deny_list<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::new(ListMode::Deny, NameList::new(names))
    }

    /// How the name list is interpreted.
    pub fn mode(&self) -> ListMode {
        self.mode
    }

    /// The normalized names this redactor matches against.
    pub fn names(&self) -> &NameList {
        &self.names
    }

    /// Returns a redacted deep copy of `value`. `value` itself is untouched.
    ///
    /// # Errors
    ///
    /// [`Error::Introspect`](crate::Error::Introspect) if `value` cannot be
    /// serialized, [`Error::Rebuild`](crate::Error::Rebuild) if `T` rejects
    /// the redacted content.
    pub fn redact<T>(&self, value: &T) -> Result<T>
    where
        T: Serialize + DeserializeOwned,
    {
        let mut copy = to_value(value)?;
        self.redact_value(&mut copy);
        from_value(copy)
    }

    /// Returns a redacted copy of `value` as JSON, without rebuilding `T`.
    ///
    /// Types that store structured data as strings (timestamps, addresses,
    /// UUIDs) cannot always rebuild from the placeholder; this path never
    /// needs to.
    #[cfg(feature = "json")]
    pub fn redact_to_json<T>(&self, value: &T) -> Result<serde_json::Value>
    where
        T: Serialize + ?Sized,
    {
        let mut copy = to_value(value)?;
        self.redact_value(&mut copy);
        serde_json::to_value(&copy).map_err(|err| crate::Error::Rebuild(err.to_string()))
    }

    /// Redacts an already captured tree in place.
    pub fn redact_value(&self, value: &mut Value) {
        self.visit(value, Location::Unnamed);
    }

    fn visit(&self, node: &mut Value, location: Location<'_>) {
        match node.shape_mut() {
            ShapeMut::Indirection(None) | ShapeMut::Opaque => {}
            ShapeMut::Indirection(Some(inner)) | ShapeMut::Polymorphic(inner) => {
                self.visit(inner, location);
            }
            ShapeMut::ByteSequence(bytes) => {
                if !bytes.is_empty() && should_redact(self.mode, &self.names, location) {
                    bytes.overwrite(REDACTED_BYTES);
                }
            }
            ShapeMut::Sequence(items) => {
                for item in items {
                    self.visit(item, Location::Unnamed);
                }
            }
            ShapeMut::Map(entries) => {
                for (key, value) in entries.iter_mut() {
                    let name = key.key_name();
                    let location = name.as_deref().map_or(Location::Unnamed, Location::Named);
                    self.visit(value, location);
                }
            }
            ShapeMut::Record(fields) => {
                for (field, value) in fields.iter_mut() {
                    self.visit(value, Location::Named(*field));
                }
            }
            ShapeMut::Text(text) => {
                if !text.is_empty() && should_redact(self.mode, &self.names, location) {
                    REDACTED_PLACEHOLDER.clone_into(text);
                }
            }
        }
    }
}

/// Redacts every string and byte leaf in a deep copy of `value`, except
/// leaves directly under a field or key named in `allow_list`.
///
/// Names match case-insensitively. Empty strings and byte sequences are kept
/// so a missing value stays recognizable. Bare strings, and elements of
/// sequences, have no name and are always redacted.
///
/// # Errors
///
/// See [`Redactor::redact`].
pub fn redact_with_allow_list<T, S>(value: &T, allow_list: &[S]) -> Result<T>
where
    T: Serialize + DeserializeOwned,
    S: AsRef<str>,
{
    Redactor::allow_list(allow_list).redact(value)
}

/// Redacts only the string and byte leaves in a deep copy of `value` that sit
/// directly under a field or key named in `deny_list`.
///
/// Names match case-insensitively. Bare strings, and elements of sequences,
/// have no name and are never redacted.
///
/// # Errors
///
/// See [`Redactor::redact`].
pub fn redact_with_deny_list<T, S>(value: &T, deny_list: &[S]) -> Result<T>
where
    T: Serialize + DeserializeOwned,
    S: AsRef<str>,
{
    Redactor::deny_list(deny_list).redact(value)
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};

    use super::{redact_with_allow_list, redact_with_deny_list, Redactor};
    use crate::value::{to_value, Value};

    const NO_NAMES: &[&str] = &[];

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    struct Login {
        username: String,
        password: String,
        attempts: u32,
    }

    #[test]
    fn allow_list_keeps_only_listed_fields() {
        let login = Login {
            username: "alice".into(),
            password: "hunter2".into(),
            attempts: 3,
        };
        let redacted = redact_with_allow_list(&login, &["USERNAME"]).unwrap();
        assert_eq!(redacted.username, "alice");
        assert_eq!(redacted.password, "REDACTED");
        assert_eq!(redacted.attempts, 3);
    }

    #[test]
    fn deny_list_redacts_only_listed_fields() {
        let login = Login {
            username: "alice".into(),
            password: "hunter2".into(),
            attempts: 3,
        };
        let redacted = redact_with_deny_list(&login, &["Password"]).unwrap();
        assert_eq!(redacted.username, "alice");
        assert_eq!(redacted.password, "REDACTED");
    }

    #[test]
    fn option_fields_inherit_the_field_name() {
        #[derive(Debug, PartialEq, Serialize, Deserialize)]
        struct Profile {
            nickname: Option<String>,
            token: Option<Option<String>>,
            email: Option<String>,
        }

        let profile = Profile {
            nickname: Some("ally".into()),
            token: Some(Some("tok_123".into())),
            email: None,
        };
        let redacted = redact_with_allow_list(&profile, &["nickname"]).unwrap();
        assert_eq!(redacted.nickname.as_deref(), Some("ally"));
        assert_eq!(redacted.token, Some(Some("REDACTED".into())));
        assert_eq!(redacted.email, None);
    }

    #[test]
    fn newtype_variant_payload_keeps_location() {
        #[derive(Debug, PartialEq, Serialize, Deserialize)]
        enum Secret {
            Text(String),
            Raw(Vec<u8>),
        }

        #[derive(Debug, PartialEq, Serialize, Deserialize)]
        struct Vault {
            label: Secret,
            payload: Secret,
        }

        let vault = Vault {
            label: Secret::Text("prod".into()),
            payload: Secret::Raw(b"private".to_vec()),
        };
        let redacted = redact_with_deny_list(&vault, &["payload"]).unwrap();
        assert_eq!(redacted.label, Secret::Text("prod".into()));
        assert_eq!(redacted.payload, Secret::Raw(b"REDACTED".to_vec()));
    }

    #[test]
    fn tuple_elements_are_unnamed() {
        #[derive(Debug, PartialEq, Serialize, Deserialize)]
        struct Pair(String, u8);

        let redacted = redact_with_allow_list(&Pair("left".into(), 1), &["0"]).unwrap();
        assert_eq!(redacted, Pair("REDACTED".into(), 1));
    }

    #[test]
    fn integer_map_keys_have_no_name() {
        let mut codes = std::collections::BTreeMap::new();
        codes.insert(401_u16, "unauthorized".to_string());

        let kept = redact_with_deny_list(&codes, &["401"]).unwrap();
        assert_eq!(kept[&401], "unauthorized");

        let redacted = redact_with_allow_list(&codes, &["401"]).unwrap();
        assert_eq!(redacted[&401], "REDACTED");
    }

    #[test]
    fn redact_value_rewrites_captured_tree() {
        let mut tree = to_value(&vec!["a".to_string(), String::new()]).unwrap();
        Redactor::allow_list(NO_NAMES).redact_value(&mut tree);
        assert_eq!(
            tree,
            Value::Seq(vec![Value::String("REDACTED".into()), Value::String(String::new())])
        );
    }

    #[test]
    fn redactor_reports_its_configuration() {
        let redactor = Redactor::deny_list(["Password", "password"]);
        assert_eq!(redactor.mode(), crate::ListMode::Deny);
        assert_eq!(redactor.names().len(), 1);

        let explicit = Redactor::new(crate::ListMode::Allow, crate::NameList::default());
        assert_eq!(explicit, Redactor::allow_list(NO_NAMES));
        assert!(explicit.names().is_empty());
    }

    #[cfg(feature = "json")]
    #[test]
    fn json_output_skips_the_rebuild() {
        #[derive(Serialize)]
        struct Connection {
            host: std::net::IpAddr,
            user: String,
        }

        let connection = Connection {
            host: std::net::IpAddr::from([10, 0, 0, 1]),
            user: "svc".into(),
        };
        let json = Redactor::allow_list(["user"])
            .redact_to_json(&connection)
            .unwrap();
        assert_eq!(json, serde_json::json!({ "host": "REDACTED", "user": "svc" }));
    }
}
