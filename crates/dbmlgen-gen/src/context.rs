use std::collections::BTreeSet;

use dbmlgen_core::{DbmlDocument, Enum};

use crate::types::{HostType, TypeMap, infer_host_type};

/// Lookup tables for one generation run: user type overrides and the names
/// of enums declared by the document. Built once, then shared by reference
/// with every descriptor.
#[derive(Debug, Clone, Default)]
pub struct TypeContext {
    types: TypeMap,
    enums: BTreeSet<String>,
}

impl TypeContext {
    pub fn new(types: TypeMap) -> Self {
        Self {
            types,
            enums: BTreeSet::new(),
        }
    }

    /// Context seeded with the document's enums.
    pub fn for_document(types: TypeMap, document: &DbmlDocument) -> Self {
        Self::new(types).with_enums(&document.enums)
    }

    /// Add a single override, replacing any existing entry.
    pub fn with_type(mut self, schema_type: &str, host_type: &str) -> Self {
        self.types.insert(schema_type, host_type);
        self
    }

    pub fn with_enums<'a>(mut self, enums: impl IntoIterator<Item = &'a Enum>) -> Self {
        for item in enums {
            self.enums.insert(item.name.clone());
            if let Some(schema) = &item.schema {
                self.enums.insert(format!("{schema}.{}", item.name));
            }
        }
        self
    }

    pub fn is_enum(&self, type_token: &str) -> bool {
        self.enums.contains(type_token)
    }

    /// Resolve a raw column type. Enum names win over user overrides, which
    /// win over the heuristic rules.
    pub fn resolve(&self, type_token: &str) -> HostType {
        if self.is_enum(type_token) {
            return HostType::String;
        }
        if let Some(host) = self.types.get(type_token).filter(|host| !host.is_empty()) {
            return HostType::Mapped(host.to_string());
        }
        infer_host_type(type_token)
    }
}
