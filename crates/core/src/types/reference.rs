//! Relationship fields that may or may not have been joined.
//!
//! The CMS returns relationship fields either as a bare record id (when the
//! query depth stopped short of the relation) or as the fully populated
//! record. Rather than probing with runtime type checks, every consumer
//! pattern-matches on [`Reference`].

use serde::{Deserialize, Serialize};

/// A relationship field: either an unresolved record id or the joined record.
///
/// Deserialization tries the resolved record first, then falls back to a
/// bare string id, matching the two shapes the CMS can emit for the same
/// field depending on query depth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Reference<T> {
    /// The relation was joined; the full record is present.
    Resolved(Box<T>),
    /// Only the record id is present; a deeper join is required to use it.
    Unresolved(String),
}

impl<T> Reference<T> {
    /// Get the resolved record, if the relation was joined.
    #[must_use]
    pub fn resolved(&self) -> Option<&T> {
        match self {
            Self::Resolved(record) => Some(record),
            Self::Unresolved(_) => None,
        }
    }

    /// Whether the relation was joined.
    #[must_use]
    pub const fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved(_))
    }

    /// Map a resolved record to another type, preserving unresolved ids.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Reference<U> {
        match self {
            Self::Resolved(record) => Reference::Resolved(Box::new(f(*record))),
            Self::Unresolved(id) => Reference::Unresolved(id),
        }
    }
}

impl<T> From<T> for Reference<T> {
    fn from(record: T) -> Self {
        Self::Resolved(Box::new(record))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Deserialize)]
    struct Record {
        id: String,
        name: String,
    }

    #[test]
    fn deserializes_bare_id_as_unresolved() {
        let reference: Reference<Record> =
            serde_json::from_str("\"abc123\"").expect("deserialize");
        assert_eq!(reference, Reference::Unresolved("abc123".to_string()));
        assert!(!reference.is_resolved());
    }

    #[test]
    fn deserializes_object_as_resolved() {
        let reference: Reference<Record> =
            serde_json::from_str(r#"{"id":"abc123","name":"Clocks"}"#).expect("deserialize");
        let record = reference.resolved().expect("resolved");
        assert_eq!(record.name, "Clocks");
    }
}
