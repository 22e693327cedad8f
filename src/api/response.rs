//! CloudSearch response bodies
//!
//! The 2011-02-01 dialect uses hyphenated keys (`match-expr`, `time-ms`) and
//! reports errors as an `info` document with a list of fatal messages.

use crate::engine::{FacetResult, Hit};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;
use uuid::Uuid;

const RID_LENGTH: usize = 63;

/// A successful search response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchBody {
    pub rank: String,

    #[serde(rename = "match-expr")]
    pub match_expr: String,

    pub hits: HitsBody,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub facets: BTreeMap<String, FacetResult>,

    pub info: Info,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HitsBody {
    pub found: u64,
    pub start: usize,
    pub hit: Vec<Hit>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Info {
    pub rid: String,

    #[serde(rename = "time-ms")]
    pub time_ms: u64,

    #[serde(rename = "cpu-time-ms")]
    pub cpu_time_ms: u64,
}

impl Info {
    pub fn new(rid: String, elapsed: Duration) -> Self {
        Self {
            rid,
            time_ms: elapsed.as_millis() as u64,
            cpu_time_ms: 0,
        }
    }
}

/// A search failure reported in the CloudSearch error shape
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchErrorBody {
    /// Always the literal `info`
    pub error: String,

    pub rid: String,

    #[serde(rename = "time-ms")]
    pub time_ms: u64,

    #[serde(rename = "cpu-time-ms")]
    pub cpu_time_ms: u64,

    pub messages: Vec<ErrorMessage>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorMessage {
    pub severity: String,
    pub code: String,
    pub message: String,
}

/// Build the 400-class response for a failed search request.
pub fn search_error(rid: String, code: &str, message: impl Into<String>) -> Response {
    let body = SearchErrorBody {
        error: "info".to_string(),
        rid,
        time_ms: 0,
        cpu_time_ms: 0,
        messages: vec![ErrorMessage {
            severity: "fatal".to_string(),
            code: code.to_string(),
            message: message.into(),
        }],
    };
    (StatusCode::BAD_REQUEST, Json(body)).into_response()
}

/// A fresh 63-character hexadecimal request id.
pub fn generate_rid() -> String {
    let mut rid = format!("{}{}", Uuid::new_v4().simple(), Uuid::new_v4().simple());
    rid.truncate(RID_LENGTH);
    rid
}
