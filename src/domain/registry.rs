//! Shared registry of configured domains

use crate::domain::metadata::{name_and_id_from_host, Domain};
use dashmap::DashMap;

/// Concurrent name-keyed map of the domains this gateway serves.
///
/// Handlers resolve the request's `Host` header against it; clones are cheap
/// enough for the handful of fields a domain carries, and handing out owned
/// domains keeps map shards unlocked across await points.
#[derive(Debug, Default)]
pub struct DomainRegistry {
    domains: DashMap<String, Domain>,
}

impl DomainRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a domain.
    pub fn insert(&self, domain: Domain) {
        self.domains.insert(domain.name().to_string(), domain);
    }

    pub fn get(&self, name: &str) -> Option<Domain> {
        self.domains.get(name).map(|entry| entry.value().clone())
    }

    /// Resolve the domain an endpoint host name addresses. The id embedded in
    /// the host must match the registered domain's id.
    pub fn resolve_host(&self, host: &str) -> Option<Domain> {
        let (name, id) = name_and_id_from_host(host)?;
        self.get(&name).filter(|domain| domain.id() == id)
    }

    pub fn len(&self) -> usize {
        self.domains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }
}
