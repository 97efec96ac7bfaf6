use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Host-language type a column resolves to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "name", rename_all = "snake_case")]
pub enum HostType {
    Int64,
    Int32,
    Bool,
    Float64,
    String,
    Bytes,
    Timestamp,
    /// Placeholder for tokens no rule recognizes.
    Any,
    /// Type name taken verbatim from a user mapping.
    Mapped(String),
}

impl HostType {
    /// Rust spelling of the type in generated code.
    pub fn rust_type(&self) -> &str {
        match self {
            HostType::Int64 => "i64",
            HostType::Int32 => "i32",
            HostType::Bool => "bool",
            HostType::Float64 => "f64",
            HostType::String => "String",
            HostType::Bytes => "Vec<u8>",
            HostType::Timestamp => "NaiveDateTime",
            HostType::Any => "Value",
            HostType::Mapped(name) => name.as_str(),
        }
    }

    /// Import the generated file needs for this type, if any.
    pub fn import_path(&self) -> Option<&'static str> {
        match self {
            HostType::Timestamp => Some("chrono::NaiveDateTime"),
            HostType::Any => Some("serde_json::Value"),
            _ => None,
        }
    }
}

impl fmt::Display for HostType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.rust_type())
    }
}

/// One heuristic: when `matches` accepts the raw type token, the column
/// resolves to `host`.
#[derive(Debug, Clone, Copy)]
pub struct TypeRule {
    pub name: &'static str,
    pub matches: fn(&str) -> bool,
    pub host: fn() -> HostType,
}

/// Heuristic rules, evaluated top to bottom; the first match wins.
/// Matching is case-sensitive on the raw token.
pub static TYPE_RULES: &[TypeRule] = &[
    TypeRule {
        name: "bigint",
        matches: |token| token == "bigint",
        host: || HostType::Int64,
    },
    TypeRule {
        name: "int",
        matches: |token| token.contains("int") || token.contains("year"),
        host: || HostType::Int32,
    },
    TypeRule {
        name: "bool",
        matches: |token| token.contains("bool"),
        host: || HostType::Bool,
    },
    TypeRule {
        name: "float",
        matches: |token| token.contains("decimal") || token.contains("float"),
        host: || HostType::Float64,
    },
    TypeRule {
        name: "string",
        matches: |token| token.contains("text") || token.contains("char") || token.contains("json"),
        host: || HostType::String,
    },
    TypeRule {
        name: "bytes",
        matches: |token| token.contains("blob"),
        host: || HostType::Bytes,
    },
    TypeRule {
        name: "timestamp",
        matches: |token| token.contains("time") || token.contains("date"),
        host: || HostType::Timestamp,
    },
];

/// Apply the heuristic rule table; unmatched tokens resolve to [`HostType::Any`].
pub fn infer_host_type(token: &str) -> HostType {
    TYPE_RULES
        .iter()
        .find(|rule| (rule.matches)(token))
        .map(|rule| (rule.host)())
        .unwrap_or(HostType::Any)
}

/// User-supplied overrides from raw type token to host type name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeMap {
    entries: BTreeMap<String, String>,
}

impl TypeMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a comma-separated `schema_type=host_type` list. Entries that do
    /// not split into exactly two non-empty parts are returned as rejected.
    pub fn parse_list(list: &str) -> (Self, Vec<String>) {
        let mut map = Self::new();
        let mut rejected = Vec::new();

        for entry in list.split(',') {
            let entry = entry.trim();
            if entry.is_empty() {
                continue;
            }
            let parts: Vec<&str> = entry.split('=').map(str::trim).collect();
            match parts.as_slice() {
                [schema_type, host_type] if !schema_type.is_empty() && !host_type.is_empty() => {
                    map.insert(*schema_type, *host_type);
                }
                _ => rejected.push(entry.to_string()),
            }
        }

        (map, rejected)
    }

    pub fn insert(&mut self, schema_type: impl Into<String>, host_type: impl Into<String>) {
        self.entries.insert(schema_type.into(), host_type.into());
    }

    pub fn get(&self, schema_type: &str) -> Option<&str> {
        self.entries.get(schema_type).map(String::as_str)
    }

    pub fn extend(&mut self, other: &TypeMap) {
        for (key, value) in &other.entries {
            self.entries.insert(key.clone(), value.clone());
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for TypeMap {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = TypeMap::new();
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(name: &str) -> &'static TypeRule {
        TYPE_RULES
            .iter()
            .find(|rule| rule.name == name)
            .expect("rule exists")
    }

    #[test]
    fn bigint_rule_is_exact() {
        let bigint = rule("bigint");
        assert!((bigint.matches)("bigint"));
        assert!(!(bigint.matches)("bigint(20)"));
        assert!(!(bigint.matches)("BIGINT"));
    }

    #[test]
    fn rules_resolve_in_order() {
        assert_eq!(infer_host_type("bigint"), HostType::Int64);
        assert_eq!(infer_host_type("bigint(20)"), HostType::Int32);
        assert_eq!(infer_host_type("tinyint"), HostType::Int32);
        assert_eq!(infer_host_type("year"), HostType::Int32);
        assert_eq!(infer_host_type("boolean"), HostType::Bool);
        assert_eq!(infer_host_type("decimal(10,2)"), HostType::Float64);
        assert_eq!(infer_host_type("float"), HostType::Float64);
        assert_eq!(infer_host_type("varchar(255)"), HostType::String);
        assert_eq!(infer_host_type("jsonb"), HostType::String);
        assert_eq!(infer_host_type("longblob"), HostType::Bytes);
        assert_eq!(infer_host_type("datetime"), HostType::Timestamp);
        assert_eq!(infer_host_type("date"), HostType::Timestamp);
    }

    #[test]
    fn earlier_rules_shadow_later_ones() {
        // `interval` contains `int` before any time rule is consulted.
        assert_eq!(infer_host_type("interval"), HostType::Int32);
        // `point` contains `int` as well.
        assert_eq!(infer_host_type("point"), HostType::Int32);
    }

    #[test]
    fn unknown_tokens_fall_back_to_any() {
        assert_eq!(infer_host_type("uuid"), HostType::Any);
        assert_eq!(infer_host_type("VARCHAR"), HostType::Any);
        assert_eq!(infer_host_type(""), HostType::Any);
    }

    #[test]
    fn parse_list_keeps_pairs_and_reports_rejects() {
        let (map, rejected) = TypeMap::parse_list("datetime=String, uuid = uuid::Uuid,bad,a=b=c,");
        assert_eq!(map.get("datetime"), Some("String"));
        assert_eq!(map.get("uuid"), Some("uuid::Uuid"));
        assert_eq!(map.len(), 2);
        assert_eq!(rejected, vec!["bad".to_string(), "a=b=c".to_string()]);
    }

    #[test]
    fn blank_list_yields_empty_map() {
        let (map, rejected) = TypeMap::parse_list(" , ,");
        assert!(map.is_empty());
        assert!(rejected.is_empty());
    }

    #[test]
    fn host_types_render_as_rust() {
        assert_eq!(HostType::Bytes.rust_type(), "Vec<u8>");
        assert_eq!(HostType::Mapped("uuid::Uuid".to_string()).to_string(), "uuid::Uuid");
        assert_eq!(HostType::Timestamp.import_path(), Some("chrono::NaiveDateTime"));
        assert_eq!(HostType::Int64.import_path(), None);
    }
}
