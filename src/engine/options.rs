//! Search execution options

use serde::{Deserialize, Serialize};

pub const DEFAULT_SIZE: usize = 10;

/// The `rank` parameter: a field to order hits by, ascending by default,
/// descending with a `-` prefix. `-text_relevance` is the engine's default
/// relevance order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rank {
    TextRelevance { descending: bool },
    Field { name: String, descending: bool },
}

impl Rank {
    pub fn parse(raw: &str) -> Self {
        let (name, descending) = match raw.strip_prefix('-') {
            Some(name) => (name, true),
            None => (raw, false),
        };
        if name == "text_relevance" {
            Rank::TextRelevance { descending }
        } else {
            Rank::Field {
                name: name.to_string(),
                descending,
            }
        }
    }

    /// The parameter form, as echoed back in the response's `rank` key.
    pub fn label(&self) -> String {
        let (name, descending) = match self {
            Rank::TextRelevance { descending } => ("text_relevance", *descending),
            Rank::Field { name, descending } => (name.as_str(), *descending),
        };
        if descending {
            format!("-{name}")
        } else {
            name.to_string()
        }
    }
}

impl Default for Rank {
    fn default() -> Self {
        Rank::TextRelevance { descending: true }
    }
}

/// Options accompanying one `execute` call
#[derive(Debug, Clone)]
pub struct SearchOptions {
    /// Maximum number of hits to return
    pub size: usize,

    /// Offset of the first hit to return
    pub start: usize,

    pub rank: Rank,

    /// Fields to include per hit as `data`; `None` returns ids only
    pub return_fields: Option<Vec<String>>,

    /// Fields to compute facet constraints for
    pub facets: Vec<String>,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            start: 0,
            rank: Rank::default(),
            return_fields: None,
            facets: Vec::new(),
        }
    }
}
