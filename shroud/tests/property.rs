//! Property-based tests for redaction
//!
//! Uses proptest to verify invariants across many random inputs.

use std::collections::BTreeMap;

use proptest::prelude::*;
use serde::{Deserialize, Serialize};
use shroud::{redact_with_allow_list, redact_with_deny_list, NameList};

const REDACTED: &str = "REDACTED";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
struct Profile {
    name: String,
    email: String,
    token: Vec<u8>,
    age: u32,
    notes: Vec<String>,
    extra: BTreeMap<String, String>,
}

fn profile() -> impl Strategy<Value = Profile> {
    (
        ".{0,16}",
        ".{0,16}",
        prop::collection::vec(any::<u8>(), 0..32),
        any::<u32>(),
        prop::collection::vec(".{0,8}", 0..4),
        prop::collection::btree_map("[a-z]{1,6}", ".{0,8}", 0..4),
    )
        .prop_map(|(name, email, token, age, notes, extra)| Profile {
            name,
            email,
            token,
            age,
            notes,
            extra,
        })
}

const FIELDS: &[&str] = &["name", "email", "token", "age", "notes", "extra"];

fn names() -> impl Strategy<Value = Vec<&'static str>> {
    prop::sample::subsequence(FIELDS, 0..=FIELDS.len())
}

fn is_kept_or_redacted(redacted: &str, original: &str) -> bool {
    redacted == original || redacted == REDACTED
}

// ============================================================================
// INPUT INVARIANTS
// ============================================================================

proptest! {
    /// Redaction never changes the caller's value
    #[test]
    fn input_is_never_modified(input in profile(), listed in names()) {
        let snapshot = input.clone();
        let _ = redact_with_allow_list(&input, &listed).unwrap();
        let _ = redact_with_deny_list(&input, &listed).unwrap();
        prop_assert_eq!(input, snapshot);
    }

    /// Non-text leaves survive either mode unchanged
    #[test]
    fn numbers_are_never_redacted(input in profile(), listed in names()) {
        let allowed = redact_with_allow_list(&input, &listed).unwrap();
        let denied = redact_with_deny_list(&input, &listed).unwrap();
        prop_assert_eq!(allowed.age, input.age);
        prop_assert_eq!(denied.age, input.age);
    }

    /// Every text leaf is either kept verbatim or replaced whole
    #[test]
    fn leaves_are_kept_or_replaced_whole(input in profile(), listed in names()) {
        let redacted = redact_with_allow_list(&input, &listed).unwrap();
        prop_assert!(is_kept_or_redacted(&redacted.name, &input.name));
        prop_assert!(is_kept_or_redacted(&redacted.email, &input.email));
        prop_assert!(redacted.token == input.token || redacted.token == REDACTED.as_bytes());
        prop_assert_eq!(redacted.notes.len(), input.notes.len());
        prop_assert_eq!(
            redacted.extra.keys().collect::<Vec<_>>(),
            input.extra.keys().collect::<Vec<_>>()
        );
    }
}

// ============================================================================
// MODE INVARIANTS
// ============================================================================

proptest! {
    /// Running the same redaction twice changes nothing more
    #[test]
    fn redaction_is_idempotent(input in profile(), listed in names()) {
        let once = redact_with_allow_list(&input, &listed).unwrap();
        let twice = redact_with_allow_list(&once, &listed).unwrap();
        prop_assert_eq!(&once, &twice);

        let once = redact_with_deny_list(&input, &listed).unwrap();
        let twice = redact_with_deny_list(&once, &listed).unwrap();
        prop_assert_eq!(once, twice);
    }

    /// Allowing a set of fields matches denying its complement
    #[test]
    fn allow_list_equals_deny_list_of_complement(input in profile(), listed in names()) {
        let complement: Vec<&str> = FIELDS
            .iter()
            .copied()
            .filter(|field| !listed.contains(field))
            .collect();

        // Sequence elements and map values sit below the field name, so only
        // compare the top-level leaves.
        let allowed = redact_with_allow_list(&input, &listed).unwrap();
        let denied = redact_with_deny_list(&input, &complement).unwrap();
        prop_assert_eq!(allowed.name, denied.name);
        prop_assert_eq!(allowed.email, denied.email);
        prop_assert_eq!(allowed.token, denied.token);
    }

    /// Empty strings are never replaced
    #[test]
    fn empty_strings_survive(input in profile()) {
        let cleared = Profile {
            name: String::new(),
            email: String::new(),
            token: Vec::new(),
            ..input
        };
        let redacted = redact_with_allow_list(&cleared, &[] as &[&str]).unwrap();
        prop_assert_eq!(redacted.name, "");
        prop_assert_eq!(redacted.email, "");
        prop_assert!(redacted.token.is_empty());
    }
}

// ============================================================================
// NAME MATCHING
// ============================================================================

proptest! {
    /// Name matching ignores ASCII case
    #[test]
    fn matching_ignores_case(input in profile(), upper in prop::collection::vec(any::<bool>(), 6)) {
        let shouted: Vec<String> = FIELDS
            .iter()
            .zip(&upper)
            .map(|(field, up)| if *up { field.to_ascii_uppercase() } else { (*field).to_string() })
            .collect();

        let lower = redact_with_deny_list(&input, FIELDS).unwrap();
        let mixed = redact_with_deny_list(&input, &shouted).unwrap();
        prop_assert_eq!(lower, mixed);
    }

    /// A name list contains exactly the lower-cased distinct names
    #[test]
    fn name_list_normalizes(raw in prop::collection::vec("[a-zA-Z]{1,8}", 0..8)) {
        let list: NameList = raw.iter().collect();
        for name in &raw {
            prop_assert!(list.contains(&name.to_uppercase()));
            prop_assert!(list.contains(&name.to_lowercase()));
        }
        let mut distinct: Vec<String> = raw.iter().map(|name| name.to_lowercase()).collect();
        distinct.sort();
        distinct.dedup();
        prop_assert_eq!(list.len(), distinct.len());
    }
}
