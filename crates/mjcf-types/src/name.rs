//! Validated element/asset identifiers.

use crate::error::ValueError;
use serde::{Deserialize, Serialize};

/// An identifier usable as an MJCF `name`-style attribute value.
///
/// Must be non-empty, start with a letter or underscore, and contain
/// only alphanumerics, `_`, `-` and `.` — compatible with XML name
/// rules so the emitted document never needs escaping here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Name(String);

impl Name {
    /// Validate `raw` as an identifier for the given field.
    pub fn new(field: &'static str, raw: impl Into<String>) -> Result<Self, ValueError> {
        let raw = raw.into();
        match Self::check(&raw) {
            None => Ok(Name(raw)),
            Some(reason) => Err(ValueError::InvalidIdentifier {
                field,
                value: raw,
                reason,
            }),
        }
    }

    fn check(raw: &str) -> Option<&'static str> {
        let mut chars = raw.chars();
        let first = match chars.next() {
            Some(c) => c,
            None => return Some("must not be empty"),
        };
        if !(first.is_alphabetic() || first == '_') {
            return Some("must start with a letter or underscore");
        }
        if !chars.all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.')) {
            return Some("contains a character outside [A-Za-z0-9_.-]");
        }
        None
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Name {
    type Error = ValueError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        Name::new("name", raw)
    }
}

impl From<Name> for String {
    fn from(name: Name) -> String {
        name.0
    }
}

impl std::fmt::Display for Name {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_names() {
        for ok in ["steel", "left_leg", "cam-1", "a.b.c", "_private"] {
            assert!(Name::new("name", ok).is_ok(), "{ok} should be valid");
        }
    }

    #[test]
    fn test_invalid_names() {
        for bad in ["", "1st", "-lead", "has space", "semi;colon"] {
            let err = Name::new("name", bad).unwrap_err();
            assert!(
                matches!(err, ValueError::InvalidIdentifier { field: "name", .. }),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn test_json_round_trip_revalidates() {
        let name = Name::new("name", "steel").unwrap();
        let json = serde_json::to_string(&name).unwrap();
        assert_eq!(json, "\"steel\"");
        let back: Name = serde_json::from_str(&json).unwrap();
        assert_eq!(back, name);
        assert!(serde_json::from_str::<Name>("\"9lives\"").is_err());
    }
}
