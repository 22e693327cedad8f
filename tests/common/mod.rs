//! Shared fixtures for the integration tests
//!
//! Mirrors the two canonical domains the API tests exercise: a `companies`
//! catalog and a `people` directory with per-field option toggles.

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use cloudsearch_gateway::api::{build_router, AppState};
use cloudsearch_gateway::config::SearchConfig;
use cloudsearch_gateway::domain::{Domain, DomainRegistry, FieldType, IndexField};
use cloudsearch_gateway::engine::{Document, MemoryEngine, SearchEngine};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

pub const DEFAULT_ID: &str = "00000000000000000000000000";
pub const COMPANIES_HOST: &str = "search-companies-00000000000000000000000000.localhost";
pub const PEOPLE_HOST: &str = "search-people-00000000000000000000000000.localhost";
pub const COMPANIES_DOC_HOST: &str = "doc-companies-00000000000000000000000000.localhost";

pub struct TestApp {
    pub router: Router,
    pub registry: Arc<DomainRegistry>,
    pub engine: Arc<MemoryEngine>,
}

impl TestApp {
    pub fn new() -> Self {
        let registry = Arc::new(DomainRegistry::new());
        let engine = Arc::new(MemoryEngine::new());
        let state = AppState::new(
            registry.clone(),
            engine.clone() as Arc<dyn SearchEngine>,
            SearchConfig {
                fallback_search_field: "label".to_string(),
                default_size: 10,
            },
        );
        Self {
            router: build_router(state),
            registry,
            engine,
        }
    }

    pub async fn get(&self, host: &str, path_and_query: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .uri(path_and_query)
            .header("host", host)
            .body(Body::empty())
            .unwrap();
        self.send(request).await
    }

    pub async fn post_batch(&self, host: &str, body: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri("/2011-02-01/documents/batch")
            .header("host", host)
            .header("content-type", "application/json")
            .header("content-length", body.len().to_string())
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }
}

/// The `companies` fixture: a catalog domain with no default search field,
/// so unqualified terms match every searchable text field.
pub async fn companies_app() -> TestApp {
    let app = TestApp::new();

    let mut domain = Domain::new("companies").unwrap().with_id(DEFAULT_ID);
    for (name, field_type) in [
        ("address", FieldType::Text),
        ("age", FieldType::Uint),
        ("description", FieldType::Text),
        ("email_address", FieldType::Text),
        ("name", FieldType::Text),
        ("product", FieldType::Literal),
    ] {
        domain
            .define_field(IndexField::new(name, field_type))
            .unwrap();
    }
    app.registry.insert(domain.clone());

    let documents = [
        (
            "id1",
            json!({ "name": "Brazil", "address": "Shibuya, Tokyo, Japan",
                    "age": 1, "description": "",
                    "email_address": "info@razil.jp", "product": "groonga" }),
        ),
        (
            "id2",
            json!({ "name": "Enishi Tech Inc.", "address": "Sapporo, Hokkaido, Japan",
                    "age": 2, "description": "",
                    "email_address": "info@enishi-tech.com", "product": "groonga" }),
        ),
        (
            "id3",
            json!({ "name": "ClearCode Inc.", "address": "Hongo, Tokyo, Japan",
                    "age": 3, "description": "",
                    "email_address": "info@clear-code.com", "product": "groonga" }),
        ),
        (
            "id9",
            json!({ "name": "Nergal Heavy Industries", "address": "Ueno, Tokyo, Japan",
                    "age": 9, "description": "",
                    "email_address": "info@nergal.example", "product": "tyrant" }),
        ),
    ];
    for (id, fields) in documents {
        load(&app, &domain, id, fields).await;
    }
    app
}

/// The `people` fixture with per-field option toggles applied by the tests.
pub async fn people_app() -> TestApp {
    let app = TestApp::new();
    app.registry.insert(people_domain());

    let domain = app.registry.get("people").unwrap();
    load(
        &app,
        &domain,
        "id1",
        json!({ "realname": "Jack Sparrow", "nickname": "Captain",
                "type": "human", "job": "pirate",
                "age": 40, "followers": 100 }),
    )
    .await;
    load(
        &app,
        &domain,
        "id2",
        json!({ "realname": "Pumpkin Man", "nickname": "Jack-o'-Lantern",
                "type": "ghost", "job": "nothing",
                "age": 9999, "followers": 0 }),
    )
    .await;
    app
}

pub fn people_domain() -> Domain {
    let mut domain = Domain::new("people").unwrap().with_id(DEFAULT_ID);
    for (name, field_type) in [
        ("realname", FieldType::Text),
        ("nickname", FieldType::Text),
        ("type", FieldType::Literal),
        ("job", FieldType::Literal),
        ("age", FieldType::Uint),
        ("followers", FieldType::Uint),
    ] {
        domain
            .define_field(IndexField::new(name, field_type))
            .unwrap();
    }
    domain
}

async fn load(app: &TestApp, domain: &Domain, id: &str, fields: Value) {
    let fields = match fields {
        Value::Object(map) => map,
        _ => unreachable!("fixture documents are objects"),
    };
    app.engine
        .load(domain, Document::new(id, fields))
        .await
        .unwrap();
}

/// Zero out the request id and timing so bodies compare deterministically.
pub fn normalized(mut body: Value) -> Value {
    zero_volatile(&mut body);
    if let Some(info) = body.get_mut("info") {
        zero_volatile(info);
    }
    body
}

fn zero_volatile(value: &mut Value) {
    if let Value::Object(map) = value {
        if map.contains_key("rid") {
            map.insert("rid".to_string(), json!("0".repeat(63)));
        }
        if map.contains_key("time-ms") {
            map.insert("time-ms".to_string(), json!(0));
        }
    }
}

pub fn hit_ids(body: &Value) -> Vec<String> {
    body["hits"]["hit"]
        .as_array()
        .unwrap()
        .iter()
        .map(|hit| hit["id"].as_str().unwrap().to_string())
        .collect()
}
