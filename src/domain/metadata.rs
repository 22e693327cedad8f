//! The domain model: validated names, fields, endpoint host parsing

use crate::domain::error::DomainError;
use crate::domain::field::{FieldType, IndexField};
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

const MIN_NAME_LENGTH: usize = 3;
const MAX_NAME_LENGTH: usize = 28;
const ID_LENGTH: usize = 26;

/// Endpoint hosts look like `search-<name>-<id>.<basedomain>` (or `doc-` for
/// the document service). The name may contain hyphens; the id may not, so
/// the last hyphen-free run before the first dot is the id.
static ENDPOINT_HOST: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:search|doc)-([a-z0-9-]+)-([a-z0-9]+)\.").unwrap());

/// A search domain: a named collection with typed index fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Domain {
    name: String,
    id: String,
    fields: BTreeMap<String, IndexField>,
    default_search_field: Option<String>,
    created_at: DateTime<Utc>,
}

impl Domain {
    /// Create a domain, validating its name: 3 to 28 characters, lowercase
    /// letters and digits only.
    pub fn new(name: impl Into<String>) -> Result<Self, DomainError> {
        let name = name.into();
        validate_name(&name)?;
        Ok(Self {
            name,
            id: generate_id(),
            fields: BTreeMap::new(),
            default_search_field: None,
            created_at: Utc::now(),
        })
    }

    /// Replace the generated id, for fixtures and seeded configuration.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_default_search_field(mut self, field: impl Into<String>) -> Self {
        self.default_search_field = Some(field.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// The field unqualified simple-query terms are matched against, if the
    /// domain configures one.
    pub fn default_search_field(&self) -> Option<&str> {
        self.default_search_field.as_deref()
    }

    /// Define a new index field. Redefining an existing one is an error.
    pub fn define_field(&mut self, field: IndexField) -> Result<(), DomainError> {
        if self.fields.contains_key(&field.name) {
            return Err(DomainError::FieldAlreadyExists(field.name));
        }
        self.fields.insert(field.name.clone(), field);
        Ok(())
    }

    /// Replace an existing field definition, e.g. to toggle option flags.
    pub fn update_field(&mut self, field: IndexField) -> Result<(), DomainError> {
        if !self.fields.contains_key(&field.name) {
            return Err(DomainError::UnknownField(field.name));
        }
        self.fields.insert(field.name.clone(), field);
        Ok(())
    }

    pub fn remove_field(&mut self, name: &str) -> Result<(), DomainError> {
        self.fields
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| DomainError::UnknownField(name.to_string()))
    }

    pub fn field(&self, name: &str) -> Option<&IndexField> {
        self.fields.get(name)
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// All field names, sorted.
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.keys().map(String::as_str).collect()
    }

    /// Names of the search-enabled text fields, the set an unqualified
    /// default-field term is matched against when no default search field is
    /// configured.
    pub fn searchable_text_fields(&self) -> Vec<&str> {
        self.fields
            .values()
            .filter(|f| f.search_enabled && f.field_type == FieldType::Text)
            .map(|f| f.name.as_str())
            .collect()
    }
}

/// Extract `(name, id)` from an endpoint host name, tolerating hyphenated
/// names and deep subdomains (`search-a-b-id.us-east-1.example.com`).
pub fn name_and_id_from_host(host: &str) -> Option<(String, String)> {
    ENDPOINT_HOST
        .captures(host)
        .map(|captures| (captures[1].to_string(), captures[2].to_string()))
}

fn validate_name(name: &str) -> Result<(), DomainError> {
    if name.len() < MIN_NAME_LENGTH {
        return Err(DomainError::TooShortName(name.to_string()));
    }
    if name.len() > MAX_NAME_LENGTH {
        return Err(DomainError::TooLongName(name.to_string()));
    }
    let mut offending = Vec::new();
    for c in name.chars() {
        if !c.is_ascii_lowercase() && !c.is_ascii_digit() && !offending.contains(&c) {
            offending.push(c);
        }
    }
    if !offending.is_empty() {
        let list = offending
            .iter()
            .map(|c| format!("\"{c}\""))
            .collect::<Vec<_>>()
            .join(", ");
        return Err(DomainError::InvalidNameCharacters(list));
    }
    Ok(())
}

fn generate_id() -> String {
    let mut id = Uuid::new_v4().simple().to_string();
    id.truncate(ID_LENGTH);
    id
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_lowercase_and_digits() {
        let domain = Domain::new("valid123").unwrap();
        assert_eq!(domain.name(), "valid123");
        assert_eq!(domain.id().len(), ID_LENGTH);
    }

    #[test]
    fn rejects_short_and_long_names() {
        assert_eq!(
            Domain::new("va").unwrap_err(),
            DomainError::TooShortName("va".to_string())
        );
        let long = "abcdefghijklmnopqrstuvwxyz0123456789";
        assert_eq!(
            Domain::new(long).unwrap_err(),
            DomainError::TooLongName(long.to_string())
        );
    }

    #[test]
    fn rejects_offending_characters_with_a_listing() {
        assert_eq!(
            Domain::new("domain-name").unwrap_err().to_string(),
            "\"-\" cannot appear in a domain name"
        );
        assert_eq!(
            Domain::new("domain_name").unwrap_err().to_string(),
            "\"_\" cannot appear in a domain name"
        );
        assert_eq!(
            Domain::new("DomainName").unwrap_err().to_string(),
            "\"D\", \"N\" cannot appear in a domain name"
        );
    }

    #[test]
    fn fields_are_defined_once() {
        let mut domain = Domain::new("people").unwrap();
        domain
            .define_field(IndexField::new("realname", FieldType::Text))
            .unwrap();
        let err = domain
            .define_field(IndexField::new("realname", FieldType::Text))
            .unwrap_err();
        assert_eq!(err, DomainError::FieldAlreadyExists("realname".to_string()));
    }

    #[test]
    fn removing_a_field_requires_it_to_exist() {
        let mut domain = Domain::new("people").unwrap();
        domain
            .define_field(IndexField::new("realname", FieldType::Text))
            .unwrap();
        domain.remove_field("realname").unwrap();
        assert!(!domain.has_field("realname"));
        assert_eq!(
            domain.remove_field("realname").unwrap_err(),
            DomainError::UnknownField("realname".to_string())
        );
    }

    #[test]
    fn field_names_are_sorted() {
        let mut domain = Domain::new("companies").unwrap();
        for name in ["name", "address", "product"] {
            domain
                .define_field(IndexField::new(name, FieldType::Text))
                .unwrap();
        }
        assert_eq!(domain.field_names(), vec!["address", "name", "product"]);
    }

    #[test]
    fn host_extraction() {
        assert_eq!(
            name_and_id_from_host("search-test0123-id0123.example.com"),
            Some(("test0123".to_string(), "id0123".to_string()))
        );
        assert_eq!(
            name_and_id_from_host("doc-test0123-id0123.example.com"),
            Some(("test0123".to_string(), "id0123".to_string()))
        );
        assert_eq!(
            name_and_id_from_host("search-test-0123-id0123.us-east-1.example.com"),
            Some(("test-0123".to_string(), "id0123".to_string()))
        );
        assert_eq!(name_and_id_from_host("cloudsearch.example.com"), None);
    }
}
