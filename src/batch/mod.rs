//! Document batch processing
//!
//! The document service accepts SDF (search data format) batches: a JSON
//! array of `add` and `delete` operations. A batch is validated as a whole
//! against the domain's index fields before anything is applied; a single
//! invalid document fails the entire batch with per-document error messages
//! and leaves the engine untouched.

mod processor;
mod sdf;

pub use processor::BatchProcessor;
pub use sdf::{BatchErrorDetail, BatchOperation, BatchResult, BatchStatus};
