//! Batch validation and application

use crate::batch::sdf::{BatchErrorDetail, BatchOperation, BatchResult};
use crate::domain::Domain;
use crate::engine::{Document, EngineResult, SearchEngine};

/// Validates SDF batches against a domain's schema and applies them to the
/// engine. Validation runs over the whole batch first; nothing is applied
/// unless every document passes.
pub struct BatchProcessor<'a> {
    domain: &'a Domain,
}

impl<'a> BatchProcessor<'a> {
    pub fn new(domain: &'a Domain) -> Self {
        Self { domain }
    }

    /// Validate every operation, returning all failures in batch order.
    pub fn validate(&self, batch: &[BatchOperation]) -> Vec<BatchErrorDetail> {
        let mut errors = Vec::new();
        for operation in batch {
            if let BatchOperation::Add { id, fields, .. } = operation {
                self.validate_add(id, fields.as_ref(), &mut errors);
            }
        }
        errors
    }

    fn validate_add(
        &self,
        id: &str,
        fields: Option<&serde_json::Map<String, serde_json::Value>>,
        errors: &mut Vec<BatchErrorDetail>,
    ) {
        let fields = match fields {
            None => {
                errors.push(BatchErrorDetail::new(id, "You must specify \"fields\"."));
                return;
            }
            Some(fields) if fields.is_empty() => {
                errors.push(BatchErrorDetail::new(
                    id,
                    "You must specify one or more fields to \"fields\".",
                ));
                return;
            }
            Some(fields) => fields,
        };

        for (name, value) in fields {
            if !self.domain.has_field(name) {
                errors.push(BatchErrorDetail::new(
                    id,
                    format!(
                        "The field \"{}\" is unknown. (available: {})",
                        name,
                        self.domain.field_names().join(",")
                    ),
                ));
            } else if value.is_null() {
                errors.push(BatchErrorDetail::new(
                    id,
                    format!("The field \"{name}\" is null."),
                ));
            }
        }
    }

    /// Validate, then apply the batch through the engine. Any validation
    /// failure rejects the whole batch without touching the engine.
    pub async fn process(
        &self,
        engine: &dyn SearchEngine,
        batch: Vec<BatchOperation>,
    ) -> EngineResult<BatchResult> {
        let errors = self.validate(&batch);
        if !errors.is_empty() {
            return Ok(BatchResult::error(errors));
        }

        let mut adds = 0;
        let mut deletes = 0;
        for operation in batch {
            match operation {
                BatchOperation::Add { id, fields, .. } => {
                    let document = Document::new(id, fields.unwrap_or_default());
                    engine.load(self.domain, document).await?;
                    adds += 1;
                }
                BatchOperation::Delete { id, .. } => {
                    engine.delete(self.domain, &id).await?;
                    deletes += 1;
                }
            }
        }
        Ok(BatchResult::success(adds, deletes))
    }
}
