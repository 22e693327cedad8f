use crate::api::response::{
    generate_rid, search_error, HitsBody, Info, SearchBody,
};
use crate::api::AppState;
use crate::batch::{BatchOperation, BatchProcessor, BatchResult};
use crate::domain::Domain;
use crate::error::{AppError, Result};
use crate::engine::{Rank, SearchOptions};
use crate::query::{MatchExpression, QueryTranslator};
use axum::body::Bytes;
use axum::extract::{Host, Query, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Result<Json<HealthResponse>> {
    Ok(Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        domains: state.registry.len(),
    }))
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub domains: usize,
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
    pub bq: Option<String>,
    pub size: Option<usize>,
    pub start: Option<usize>,
    pub rank: Option<String>,
    #[serde(rename = "return-fields")]
    pub return_fields: Option<String>,
    pub facet: Option<String>,
}

/// Execute a search request
///
/// `GET /2011-02-01/search` with either a simple query (`q`, run through the
/// translator against the domain's default search field) or a raw boolean
/// query (`bq`, passed to the engine verbatim after its field references are
/// checked against the domain's schema).
pub async fn search(
    State(state): State<AppState>,
    Host(host): Host,
    Query(params): Query<SearchParams>,
) -> Result<Response> {
    let started = Instant::now();
    let rid = generate_rid();

    let domain = resolve_domain(&state, &host)?;

    let expression = match (&params.q, &params.bq) {
        (None, None) => {
            return Ok(search_error(
                rid,
                "CS-InvalidParameter",
                "Either \"q\" or \"bq\" must be specified.",
            ));
        }
        (_, Some(bq)) => {
            let expression = MatchExpression::raw(bq.clone());
            for name in expression.field_references() {
                if !domain.has_field(&name) {
                    return Ok(search_error(
                        rid,
                        "CS-UnknownFieldInMatchExpression",
                        format!(
                            "Field '{name}' is not defined in the metadata for this \
                             collection. All fields used in the match expression must \
                             be defined in the metadata."
                        ),
                    ));
                }
            }
            expression
        }
        (Some(q), None) => {
            let default_field = domain
                .default_search_field()
                .unwrap_or(&state.search.fallback_search_field);
            match QueryTranslator::new(q, default_field).translate() {
                Ok(Some(expression)) => expression,
                // An empty simple query selects everything.
                Ok(None) => MatchExpression::raw(""),
                Err(err) => {
                    return Ok(search_error(
                        rid,
                        "CS-InvalidMatchExpression",
                        err.to_string(),
                    ));
                }
            }
        }
    };

    let options = SearchOptions {
        size: params.size.unwrap_or(state.search.default_size),
        start: params.start.unwrap_or(0),
        rank: params.rank.as_deref().map(Rank::parse).unwrap_or_default(),
        return_fields: params.return_fields.as_deref().map(split_list),
        facets: params.facet.as_deref().map(split_list).unwrap_or_default(),
    };

    tracing::debug!(
        domain = %domain.name(),
        expression = %expression,
        "executing match expression"
    );

    let hits = state.engine.execute(&domain, &expression, &options).await?;

    let body = SearchBody {
        rank: options.rank.label(),
        match_expr: expression.to_string(),
        hits: HitsBody {
            found: hits.found,
            start: hits.start,
            hit: hits.hit,
        },
        facets: hits.facets,
        info: Info::new(rid, started.elapsed()),
    };
    Ok(Json(body).into_response())
}

/// Submit a document batch
///
/// `POST /2011-02-01/documents/batch` with an SDF JSON array. Header
/// validation answers in the batch-result shape before the body is touched;
/// validation failures inside the batch come back with status 200 and
/// `status: "error"`, as the 2011-02-01 API does.
pub async fn batch(
    State(state): State<AppState>,
    Host(host): Host,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response> {
    match content_type(&headers) {
        Some(ct) if ct == "application/json" => {}
        Some(ct) if ct == "text/xml" || ct == "application/xml" => {
            return Ok(batch_rejection(
                StatusCode::BAD_REQUEST,
                "XML batches are not supported; submit the batch as application/json.",
            ));
        }
        Some(ct) => {
            return Ok(batch_rejection(
                StatusCode::BAD_REQUEST,
                format!("Invalid Content-Type header: \"{ct}\""),
            ));
        }
        None => {
            return Ok(batch_rejection(
                StatusCode::BAD_REQUEST,
                "The Content-Type header is missing.",
            ));
        }
    }
    if !headers.contains_key(header::CONTENT_LENGTH) {
        return Ok(batch_rejection(
            StatusCode::UNAUTHORIZED,
            "The Content-Length header is missing.",
        ));
    }

    let domain = resolve_domain(&state, &host)?;

    let operations: Vec<BatchOperation> = match serde_json::from_slice(&body) {
        Ok(operations) => operations,
        Err(err) => {
            return Ok(batch_rejection(
                StatusCode::BAD_REQUEST,
                format!("Invalid batch: {err}"),
            ));
        }
    };

    tracing::debug!(
        domain = %domain.name(),
        operations = operations.len(),
        "processing document batch"
    );

    let result = BatchProcessor::new(&domain)
        .process(state.engine.as_ref(), operations)
        .await?;
    Ok(Json(result).into_response())
}

fn resolve_domain(state: &AppState, host: &str) -> Result<Domain> {
    state
        .registry
        .resolve_host(host)
        .ok_or_else(|| AppError::NotFound(format!("no domain for host \"{host}\"")))
}

fn content_type(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::CONTENT_TYPE)?
        .to_str()
        .ok()
        .map(|value| value.split(';').next().unwrap_or(value).trim())
}

fn batch_rejection(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(BatchResult::rejected(vec![message.into()]))).into_response()
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(String::from)
        .collect()
}
