//! Index field definitions

use serde::{Deserialize, Serialize};

/// The type of an index field
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// Free text, tokenized for full-text search
    Text,

    /// An untokenized literal value
    Literal,

    /// An unsigned integer
    Uint,
}

/// A single index field of a domain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexField {
    pub name: String,

    #[serde(rename = "type")]
    pub field_type: FieldType,

    /// Whether the field participates in match expressions
    pub search_enabled: bool,

    /// Whether the field can be faceted on
    pub facet_enabled: bool,

    /// Whether the field may be returned via `return-fields`
    pub result_enabled: bool,
}

impl IndexField {
    /// Create a field with the per-type default options: text and literal
    /// fields are searchable, facetable and returnable; uint fields are
    /// searchable and returnable but not facetable.
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        let facet_enabled = !matches!(field_type, FieldType::Uint);
        Self {
            name: name.into(),
            field_type,
            search_enabled: true,
            facet_enabled,
            result_enabled: true,
        }
    }

    pub fn with_search_enabled(mut self, enabled: bool) -> Self {
        self.search_enabled = enabled;
        self
    }

    pub fn with_facet_enabled(mut self, enabled: bool) -> Self {
        self.facet_enabled = enabled;
        self
    }

    pub fn with_result_enabled(mut self, enabled: bool) -> Self {
        self.result_enabled = enabled;
        self
    }
}
