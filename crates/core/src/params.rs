//! Dynamic parameters.
//!
//! The shape of a verb's named inputs is only known at runtime (it depends
//! on a table's live columns). Nodes describe it as a list of
//! [`ParamSpec`]s; callers supply values in a [`Parameters`] bag.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::{NavError, NavResult, Value};

/// Value type advertised for a parameter.
///
/// Describes inputs only. Stored values are never coerced to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueKind {
    /// Text
    String,
    /// Nullable integer
    Integer,
    /// Nullable float
    Float,
    /// Raw bytes
    Bytes,
    /// List of strings (flag-style table definitions)
    StringList,
    /// Anything
    Dynamic,
}

impl ValueKind {
    /// Map a declared SQLite column type. Unknown types are `Dynamic`.
    pub fn from_declared_type(declared: &str) -> Self {
        match declared.trim().to_ascii_lowercase().as_str() {
            "text" => ValueKind::String,
            "integer" => ValueKind::Integer,
            "float" => ValueKind::Float,
            "blob" => ValueKind::Bytes,
            _ => ValueKind::Dynamic,
        }
    }
}

/// Descriptor of one named input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamSpec {
    /// Parameter name
    pub name: String,
    /// Advertised value type
    pub kind: ValueKind,
    /// Whether the caller must supply it
    pub required: bool,
}

impl ParamSpec {
    /// An optional parameter.
    pub fn optional(name: impl Into<String>, kind: ValueKind) -> Self {
        ParamSpec {
            name: name.into(),
            kind,
            required: false,
        }
    }

    /// A mandatory parameter.
    pub fn required(name: impl Into<String>, kind: ValueKind) -> Self {
        ParamSpec {
            name: name.into(),
            kind,
            required: true,
        }
    }
}

/// Named inputs supplied by the caller.
///
/// A parameter counts as set when its name is present, even if the value
/// is `Null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Parameters {
    values: BTreeMap<String, Value>,
}

impl Parameters {
    /// Empty bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(name, value);
        self
    }

    /// Insert or replace a value.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(name.into(), value.into());
    }

    /// Look up by name: exact first, then ASCII case-insensitive.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name).or_else(|| {
            self.values
                .iter()
                .find(|(k, _)| k.eq_ignore_ascii_case(name))
                .map(|(_, v)| v)
        })
    }

    /// True if the named parameter was supplied.
    pub fn is_set(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Supplied names.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// True if nothing was supplied.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Check the bag against a schema.
    ///
    /// Unknown names are rejected. A required parameter may also be
    /// satisfied by a same-named property of `payload`.
    pub fn validate(&self, schema: &[ParamSpec], payload: Option<&Value>) -> NavResult<()> {
        for name in self.names() {
            if !schema.iter().any(|s| s.name.eq_ignore_ascii_case(name)) {
                return Err(NavError::usage(format!(
                    "parameter '{}' is not accepted here",
                    name
                )));
            }
        }
        for spec in schema.iter().filter(|s| s.required) {
            let supplied = self.is_set(&spec.name)
                || payload.and_then(|p| p.property(&spec.name)).is_some();
            if !supplied {
                return Err(NavError::usage(format!(
                    "missing required parameter '{}'",
                    spec.name
                )));
            }
        }
        Ok(())
    }
}

impl FromIterator<(String, Value)> for Parameters {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Parameters {
            values: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declared_type_mapping() {
        assert_eq!(ValueKind::from_declared_type("TEXT"), ValueKind::String);
        assert_eq!(ValueKind::from_declared_type("integer"), ValueKind::Integer);
        assert_eq!(ValueKind::from_declared_type("Float"), ValueKind::Float);
        assert_eq!(ValueKind::from_declared_type("blob"), ValueKind::Bytes);
        assert_eq!(ValueKind::from_declared_type("VARCHAR(20)"), ValueKind::Dynamic);
        assert_eq!(ValueKind::from_declared_type(""), ValueKind::Dynamic);
    }

    #[test]
    fn test_null_counts_as_set() {
        let p = Parameters::new().with("name", Value::Null);
        assert!(p.is_set("name"));
        assert!(p.is_set("NAME"));
        assert!(!p.is_set("age"));
    }

    #[test]
    fn test_validate_rejects_unknown_names() {
        let schema = vec![ParamSpec::optional("name", ValueKind::String)];
        let p = Parameters::new().with("nmae", "Ada");
        assert!(matches!(p.validate(&schema, None), Err(NavError::Usage { .. })));
    }

    #[test]
    fn test_validate_required_from_payload() {
        let schema = vec![ParamSpec::required("name", ValueKind::String)];
        let empty = Parameters::new();
        assert!(empty.validate(&schema, None).is_err());

        let payload = Value::Object([("name".to_string(), Value::from("Ada"))].into_iter().collect());
        assert!(empty.validate(&schema, Some(&payload)).is_ok());
        assert!(Parameters::new().with("name", "Ada").validate(&schema, None).is_ok());
    }
}
