//! The search data format (SDF) wire model

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One operation of an SDF batch
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum BatchOperation {
    Add {
        id: String,
        version: u64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        lang: Option<String>,
        /// Absent and empty are distinct validation failures, so the field
        /// stays an `Option`.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        fields: Option<Map<String, Value>>,
    },
    Delete {
        id: String,
        version: u64,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BatchStatus {
    Success,
    Error,
}

/// A single validation failure, already formatted as
/// `<document id>: <reason>`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchErrorDetail {
    pub message: String,
}

impl BatchErrorDetail {
    pub fn new(document_id: &str, reason: impl AsRef<str>) -> Self {
        Self {
            message: format!("{}: {}", document_id, reason.as_ref()),
        }
    }
}

/// The outcome of a batch submission
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchResult {
    pub status: BatchStatus,
    pub adds: u64,
    pub deletes: u64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<BatchErrorDetail>,
}

impl BatchResult {
    pub fn success(adds: u64, deletes: u64) -> Self {
        Self {
            status: BatchStatus::Success,
            adds,
            deletes,
            errors: Vec::new(),
        }
    }

    pub fn error(errors: Vec<BatchErrorDetail>) -> Self {
        Self {
            status: BatchStatus::Error,
            adds: 0,
            deletes: 0,
            errors,
        }
    }

    /// An error result from messages not tied to any document, e.g. header
    /// validation at the HTTP boundary.
    pub fn rejected(messages: Vec<String>) -> Self {
        Self::error(
            messages
                .into_iter()
                .map(|message| BatchErrorDetail { message })
                .collect(),
        )
    }
}
