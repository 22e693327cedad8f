//! Domain and index-field metadata
//!
//! A domain is a named search collection with a set of typed index fields.
//! The search and batch handlers consume this metadata as the source of
//! truth for which fields exist, which are searchable, which may appear in
//! results, and which field unqualified simple-query terms fall back to.

mod error;
mod field;
mod metadata;
mod registry;

pub use error::DomainError;
pub use field::{FieldType, IndexField};
pub use metadata::{name_and_id_from_host, Domain};
pub use registry::DomainRegistry;
