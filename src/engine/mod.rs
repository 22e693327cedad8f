//! The downstream search engine seam
//!
//! The gateway never executes match expressions itself: translated queries
//! and raw `bq` expressions are handed to a [`SearchEngine`] implementation
//! together with the domain metadata. [`MemoryEngine`] is the in-process
//! implementation used by the default binary and the test suite; it does
//! naive conjunction matching with no scoring and no persistence, just
//! enough to exercise the HTTP contract end to end.

mod document;
mod error;
mod hits;
mod memory;
mod options;

pub use document::Document;
pub use error::{EngineError, EngineResult};
pub use hits::{FacetConstraint, FacetResult, Hit, SearchHits};
pub use memory::MemoryEngine;
pub use options::{Rank, SearchOptions};

use crate::domain::Domain;
use crate::query::MatchExpression;
use async_trait::async_trait;

/// A search engine that stores documents and executes boolean match
/// expressions over them.
#[async_trait]
pub trait SearchEngine: Send + Sync {
    /// Store a document, replacing any existing document with the same id.
    async fn load(&self, domain: &Domain, document: Document) -> EngineResult<()>;

    /// Remove a document by id. Removing an absent id is not an error.
    async fn delete(&self, domain: &Domain, id: &str) -> EngineResult<()>;

    /// Execute a match expression and return the selected hits.
    async fn execute(
        &self,
        domain: &Domain,
        expression: &MatchExpression,
        options: &SearchOptions,
    ) -> EngineResult<SearchHits>;

    /// Number of searchable documents in the domain.
    async fn document_count(&self, domain: &Domain) -> EngineResult<u64>;
}
