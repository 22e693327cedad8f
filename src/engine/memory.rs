//! In-memory engine implementation
//!
//! A collaborator double for the real engine: documents live in a per-domain
//! `Vec` guarded by an `RwLock`, and match expressions are evaluated as a
//! conjunction of parsed fragments. There is no scoring — the default
//! relevance rank preserves load order — and no persistence.

use crate::domain::{Domain, FieldType, IndexField};
use crate::engine::document::Document;
use crate::engine::error::EngineResult;
use crate::engine::hits::{FacetConstraint, FacetResult, Hit, SearchHits};
use crate::engine::options::{Rank, SearchOptions};
use crate::engine::SearchEngine;
use crate::query::MatchExpression;
use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Default)]
pub struct MemoryEngine {
    domains: RwLock<HashMap<String, Vec<Document>>>,
}

impl MemoryEngine {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SearchEngine for MemoryEngine {
    async fn load(&self, domain: &Domain, document: Document) -> EngineResult<()> {
        let mut store = self.domains.write();
        let documents = store.entry(domain.name().to_string()).or_default();
        match documents.iter_mut().find(|d| d.id == document.id) {
            Some(existing) => *existing = document,
            None => documents.push(document),
        }
        Ok(())
    }

    async fn delete(&self, domain: &Domain, id: &str) -> EngineResult<()> {
        let mut store = self.domains.write();
        if let Some(documents) = store.get_mut(domain.name()) {
            documents.retain(|d| d.id != id);
        }
        Ok(())
    }

    async fn execute(
        &self,
        domain: &Domain,
        expression: &MatchExpression,
        options: &SearchOptions,
    ) -> EngineResult<SearchHits> {
        let fragments = parse_fragments(expression.as_str());
        let store = self.domains.read();
        let documents = store
            .get(domain.name())
            .map(Vec::as_slice)
            .unwrap_or_default();

        let mut matched: Vec<&Document> = documents
            .iter()
            .filter(|document| {
                fragments
                    .iter()
                    .all(|fragment| fragment.matches(domain, document))
            })
            .collect();

        if let Rank::Field { name, descending } = &options.rank {
            sort_by_field(&mut matched, domain, name);
            if *descending {
                matched.reverse();
            }
        }

        let facets = collect_facets(domain, &matched, &options.facets);
        let hit = matched
            .iter()
            .skip(options.start)
            .take(options.size)
            .map(|document| Hit {
                id: document.id.clone(),
                data: hit_data(domain, document, options.return_fields.as_deref()),
            })
            .collect();

        Ok(SearchHits {
            found: matched.len() as u64,
            start: options.start,
            hit,
            facets,
        })
    }

    async fn document_count(&self, domain: &Domain) -> EngineResult<u64> {
        let store = self.domains.read();
        Ok(store.get(domain.name()).map(|d| d.len() as u64).unwrap_or(0))
    }
}

/// One `field:'value'` or `'value'` unit of a match expression.
#[derive(Debug, PartialEq, Eq)]
struct Fragment {
    field: Option<String>,
    value: String,
}

impl Fragment {
    /// The phrase payload if the value is a double-quoted phrase.
    fn phrase(&self) -> Option<&str> {
        self.value
            .strip_prefix('"')
            .and_then(|rest| rest.strip_suffix('"'))
    }

    fn matches(&self, domain: &Domain, document: &Document) -> bool {
        match &self.field {
            Some(name) => match domain.field(name) {
                Some(field) if field.search_enabled => self.matches_field(field, document),
                // Defined but search-disabled fields match nothing.
                Some(_) => false,
                // An undefined field only reaches the engine as the
                // default-field marker of a translated simple query: match
                // against every searchable text field.
                None => self.matches_any_text_field(domain, document),
            },
            None => self.matches_any_text_field(domain, document),
        }
    }

    fn matches_field(&self, field: &IndexField, document: &Document) -> bool {
        let values = string_values(document.field(&field.name));
        match field.field_type {
            FieldType::Text => self.text_match(&values),
            FieldType::Literal => values.iter().any(|v| v == &self.value),
            FieldType::Uint => match self.value.parse::<u64>() {
                Ok(needle) => values.iter().any(|v| v.parse::<u64>() == Ok(needle)),
                Err(_) => false,
            },
        }
    }

    fn matches_any_text_field(&self, domain: &Domain, document: &Document) -> bool {
        domain.searchable_text_fields().iter().any(|name| {
            let values = string_values(document.field(name));
            self.text_match(&values)
        })
    }

    fn text_match(&self, values: &[String]) -> bool {
        match self.phrase() {
            Some(phrase) => {
                let needle = phrase.to_lowercase();
                values.iter().any(|v| v.to_lowercase().contains(&needle))
            }
            None => values.iter().any(|v| {
                v.split(|c: char| !c.is_alphanumeric())
                    .any(|token| token.eq_ignore_ascii_case(&self.value))
            }),
        }
    }
}

/// Parse an expression into its fragments. Grouping parentheses and tokens
/// outside the two fragment forms are skipped: the engine double only has to
/// understand what the translator emits and plain `bq` conjunctions.
fn parse_fragments(expression: &str) -> Vec<Fragment> {
    let chars: Vec<char> = expression.chars().collect();
    let mut fragments = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        if c.is_whitespace() || c == '(' || c == ')' {
            i += 1;
            continue;
        }
        if c == '\'' {
            if let Some((value, next)) = read_quoted(&chars, i) {
                fragments.push(Fragment { field: None, value });
                i = next;
                continue;
            }
            i += 1;
            continue;
        }
        let start = i;
        while i < chars.len() && (chars[i].is_alphanumeric() || chars[i] == '_') {
            i += 1;
        }
        if i > start && i + 1 < chars.len() && chars[i] == ':' && chars[i + 1] == '\'' {
            if let Some((value, next)) = read_quoted(&chars, i + 1) {
                fragments.push(Fragment {
                    field: Some(chars[start..i].iter().collect()),
                    value,
                });
                i = next;
                continue;
            }
        }
        // Not a fragment: skip the rest of the token.
        while i < chars.len() && !chars[i].is_whitespace() {
            i += 1;
        }
    }
    fragments
}

/// Read a single-quoted value starting at `open`, unescaping `\'`.
fn read_quoted(chars: &[char], open: usize) -> Option<(String, usize)> {
    let mut value = String::new();
    let mut i = open + 1;
    while i < chars.len() {
        match chars[i] {
            '\\' if chars.get(i + 1) == Some(&'\'') => {
                value.push('\'');
                i += 2;
            }
            '\'' => return Some((value, i + 1)),
            c => {
                value.push(c);
                i += 1;
            }
        }
    }
    None
}

fn sort_by_field(matched: &mut [&Document], domain: &Domain, name: &str) {
    let numeric = domain
        .field(name)
        .map(|field| field.field_type == FieldType::Uint)
        .unwrap_or(false);
    if numeric {
        matched.sort_by_key(|document| {
            string_values(document.field(name))
                .first()
                .and_then(|v| v.parse::<u64>().ok())
                .unwrap_or(0)
        });
    } else {
        matched.sort_by_key(|document| {
            string_values(document.field(name))
                .first()
                .cloned()
                .unwrap_or_default()
        });
    }
}

fn collect_facets(
    domain: &Domain,
    matched: &[&Document],
    facet_fields: &[String],
) -> BTreeMap<String, FacetResult> {
    let mut facets = BTreeMap::new();
    for name in facet_fields {
        let field = match domain.field(name) {
            Some(field) => field,
            // Unknown facet fields are simply ignored.
            None => continue,
        };
        if !field.facet_enabled {
            facets.insert(name.clone(), FacetResult::default());
            continue;
        }
        let mut counts: BTreeMap<String, u64> = BTreeMap::new();
        for document in matched {
            for value in string_values(document.field(name)) {
                *counts.entry(value).or_default() += 1;
            }
        }
        let mut constraints: Vec<FacetConstraint> = counts
            .into_iter()
            .map(|(value, count)| FacetConstraint { value, count })
            .collect();
        // Count descending; the BTreeMap already yields values ascending,
        // and the sort is stable, so ties stay value-ordered.
        constraints.sort_by(|a, b| b.count.cmp(&a.count));
        facets.insert(
            name.clone(),
            FacetResult {
                constraints: Some(constraints),
            },
        );
    }
    facets
}

fn hit_data(
    domain: &Domain,
    document: &Document,
    return_fields: Option<&[String]>,
) -> Option<BTreeMap<String, Vec<Value>>> {
    let requested = return_fields?;
    let mut data = BTreeMap::new();
    for name in requested {
        let field = match domain.field(name) {
            Some(field) => field,
            // Unknown requested fields are simply ignored.
            None => continue,
        };
        if !field.result_enabled {
            data.insert(name.clone(), Vec::new());
            continue;
        }
        let values = match document.field(name) {
            Some(Value::Array(items)) => items.clone(),
            Some(value) => vec![value.clone()],
            None => vec![empty_value(field.field_type)],
        };
        data.insert(name.clone(), values);
    }
    Some(data)
}

fn empty_value(field_type: FieldType) -> Value {
    match field_type {
        FieldType::Uint => Value::from(0u64),
        _ => Value::String(String::new()),
    }
}

fn string_values(value: Option<&Value>) -> Vec<String> {
    match value {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::String(s)) => vec![s.clone()],
        Some(Value::Number(n)) => vec![n.to_string()],
        Some(Value::Bool(b)) => vec![b.to_string()],
        Some(Value::Array(items)) => items
            .iter()
            .flat_map(|item| string_values(Some(item)))
            .collect(),
        Some(Value::Object(_)) => Vec::new(),
    }
}
