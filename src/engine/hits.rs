//! Search results

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// A single hit: the document id, plus field data when the request asked
/// for `return-fields`. Field values are always arrays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hit {
    pub id: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<BTreeMap<String, Vec<Value>>>,
}

/// One facet value and how many matched documents carry it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetConstraint {
    pub value: String,
    pub count: u64,
}

/// Facet results for one field. A facet-disabled field yields an empty
/// object rather than being omitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FacetResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub constraints: Option<Vec<FacetConstraint>>,
}

/// The engine's answer to one `execute` call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHits {
    /// Total number of matching documents, before `start`/`size`
    pub found: u64,

    /// The `start` offset the hits were selected at
    pub start: usize,

    pub hit: Vec<Hit>,

    /// Facet results keyed by field name; empty when no facets were asked
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub facets: BTreeMap<String, FacetResult>,
}
