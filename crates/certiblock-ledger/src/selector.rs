//! Selector evaluation shared by the bundled ledgers.
//!
//! Only the subset CertiBlock emits is understood: a top-level `selector`
//! object whose members are string equalities on top-level fields of the
//! stored JSON value. Every member must match. Operators (`$gt`, `$or`, ...),
//! nested paths, `sort`, `limit` and `fields` are rejected rather than
//! silently ignored.
//!
//! A stored object that repeats a member is matched on the member's first
//! occurrence, the way SQLite's JSON functions read it.

use std::collections::HashMap;
use std::fmt;

use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
use serde_json::Value;

use crate::error::{LedgerError, Result};

/// A parsed selector: a conjunction of field equalities.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectorQuery {
    raw: String,
    clauses: Vec<(String, String)>,
}

impl SelectorQuery {
    /// Parse a selector expression.
    pub fn parse(raw: &str) -> Result<Self> {
        let invalid = |reason: &str| LedgerError::InvalidSelector {
            selector: raw.to_string(),
            reason: reason.to_string(),
        };

        let root: Value = serde_json::from_str(raw).map_err(|e| invalid(&e.to_string()))?;
        let root = root
            .as_object()
            .ok_or_else(|| invalid("expected a JSON object"))?;

        if let Some(other) = root.keys().find(|k| k.as_str() != "selector") {
            return Err(invalid(&format!("unsupported member {other:?}")));
        }

        let selector = root
            .get("selector")
            .and_then(Value::as_object)
            .ok_or_else(|| invalid("missing selector object"))?;

        let mut clauses = Vec::with_capacity(selector.len());
        for (field, operand) in selector {
            if field.is_empty() || field.starts_with('$') {
                return Err(invalid(&format!("unsupported field {field:?}")));
            }
            if field.contains(['"', '\\', '.']) {
                return Err(invalid(&format!("nested or quoted field {field:?}")));
            }
            let value = operand
                .as_str()
                .ok_or_else(|| invalid(&format!("operand for {field:?} must be a string")))?;
            clauses.push((field.clone(), value.to_string()));
        }
        clauses.sort();

        Ok(Self {
            raw: raw.to_string(),
            clauses,
        })
    }

    /// The selector as given.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// The `(field, value)` equalities, all of which must hold, sorted by field.
    pub fn clauses(&self) -> &[(String, String)] {
        &self.clauses
    }

    /// Whether a stored value satisfies every clause.
    ///
    /// Values that are not JSON objects never match.
    pub fn matches(&self, stored: &[u8]) -> bool {
        let Ok(Members(doc)) = serde_json::from_slice::<Members>(stored) else {
            return false;
        };
        self.clauses
            .iter()
            .all(|(field, value)| doc.get(field).and_then(Value::as_str) == Some(value.as_str()))
    }
}

/// Top-level members of a stored JSON object, first occurrence wins.
struct Members(HashMap<String, Value>);

impl<'de> Deserialize<'de> for Members {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct MembersVisitor;

        impl<'de> Visitor<'de> for MembersVisitor {
            type Value = Members;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a JSON object")
            }

            fn visit_map<A>(self, mut map: A) -> std::result::Result<Members, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut members = HashMap::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((key, value)) = map.next_entry::<String, Value>()? {
                    members.entry(key).or_insert(value);
                }
                Ok(Members(members))
            }
        }

        deserializer.deserialize_map(MembersVisitor)
    }
}
