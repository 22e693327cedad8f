//! Document batch endpoint tests

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use cloudsearch_gateway::engine::SearchEngine;
use common::{companies_app, hit_ids, COMPANIES_DOC_HOST, COMPANIES_HOST};
use serde_json::json;

#[tokio::test]
async fn an_add_batch_loads_documents() {
    let app = companies_app().await;
    let batch = json!([
        { "type": "add", "id": "id10", "version": 1, "lang": "en",
          "fields": { "name": "U.S. Robots and Mechanical Men",
                      "address": "New York, United States",
                      "age": 10, "product": "spd13" } },
        { "type": "add", "id": "id11", "version": 1, "lang": "en",
          "fields": { "name": "Nergal Salvage",
                      "address": "Osaka, Japan",
                      "age": 1, "product": "nadesico" } }
    ]);

    let (status, body) = app
        .post_batch(COMPANIES_DOC_HOST, &batch.to_string())
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "success", "adds": 2, "deletes": 0 }));

    let domain = app.registry.get("companies").unwrap();
    assert_eq!(app.engine.document_count(&domain).await.unwrap(), 6);

    let (_, body) = app.get(COMPANIES_HOST, "/2011-02-01/search?q=Osaka").await;
    assert_eq!(hit_ids(&body), vec!["id11"]);
}

#[tokio::test]
async fn a_delete_batch_removes_documents() {
    let app = companies_app().await;
    let batch = json!([
        { "type": "delete", "id": "id3", "version": 2 }
    ]);

    let (status, body) = app
        .post_batch(COMPANIES_DOC_HOST, &batch.to_string())
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "success", "adds": 0, "deletes": 1 }));

    let (_, body) = app.get(COMPANIES_HOST, "/2011-02-01/search?q=Hongo").await;
    assert_eq!(body["hits"]["found"], 0);
}

#[tokio::test]
async fn reloading_an_id_replaces_the_document() {
    let app = companies_app().await;
    let batch = json!([
        { "type": "add", "id": "id3", "version": 2,
          "fields": { "name": "ClearCode Inc.",
                      "address": "Nagoya, Japan",
                      "age": 4, "product": "groonga" } }
    ]);

    app.post_batch(COMPANIES_DOC_HOST, &batch.to_string()).await;

    let (_, body) = app.get(COMPANIES_HOST, "/2011-02-01/search?q=Hongo").await;
    assert_eq!(body["hits"]["found"], 0);
    let (_, body) = app.get(COMPANIES_HOST, "/2011-02-01/search?q=Nagoya").await;
    assert_eq!(hit_ids(&body), vec!["id3"]);
}

#[tokio::test]
async fn an_invalid_batch_is_rejected_without_loading_anything() {
    let app = companies_app().await;
    let batch = json!([
        { "type": "add", "id": "invalidfield", "version": 1,
          "fields": { "name": null, "unknown1": "x", "unknown2": "y" } },
        { "type": "add", "id": "nofields", "version": 1 },
        { "type": "add", "id": "emptyfields", "version": 1, "fields": {} },
        { "type": "add", "id": "id10", "version": 1,
          "fields": { "name": "Valid but still rejected",
                      "address": "Kyoto, Japan" } }
    ]);

    let (status, body) = app
        .post_batch(COMPANIES_DOC_HOST, &batch.to_string())
        .await;

    // Validation failures come back as an error result with status 200.
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "status": "error",
            "adds": 0,
            "deletes": 0,
            "errors": [
                { "message": "invalidfield: The field \"name\" is null." },
                { "message": "invalidfield: The field \"unknown1\" is unknown. \
                              (available: address,age,description,email_address,name,product)" },
                { "message": "invalidfield: The field \"unknown2\" is unknown. \
                              (available: address,age,description,email_address,name,product)" },
                { "message": "nofields: You must specify \"fields\"." },
                { "message": "emptyfields: You must specify one or more fields to \"fields\"." }
            ]
        })
    );

    // The valid document at the end of the batch was not loaded.
    let (_, body) = app.get(COMPANIES_HOST, "/2011-02-01/search?q=Kyoto").await;
    assert_eq!(body["hits"]["found"], 0);
}

#[tokio::test]
async fn an_unexpected_content_type_is_a_400() {
    let app = companies_app().await;
    let request = Request::builder()
        .method("POST")
        .uri("/2011-02-01/documents/batch")
        .header("host", COMPANIES_DOC_HOST)
        .header("content-type", "text/plain")
        .header("content-length", "2")
        .body(Body::from("[]"))
        .unwrap();

    let (status, body) = app.send(request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({
            "status": "error",
            "adds": 0,
            "deletes": 0,
            "errors": [ { "message": "Invalid Content-Type header: \"text/plain\"" } ]
        })
    );
}

#[tokio::test]
async fn a_missing_content_type_is_a_400() {
    let app = companies_app().await;
    let request = Request::builder()
        .method("POST")
        .uri("/2011-02-01/documents/batch")
        .header("host", COMPANIES_DOC_HOST)
        .header("content-length", "2")
        .body(Body::from("[]"))
        .unwrap();

    let (status, body) = app.send(request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["errors"][0]["message"],
        "The Content-Type header is missing."
    );
}

#[tokio::test]
async fn a_missing_content_length_is_a_401() {
    let app = companies_app().await;
    let request = Request::builder()
        .method("POST")
        .uri("/2011-02-01/documents/batch")
        .header("host", COMPANIES_DOC_HOST)
        .header("content-type", "application/json")
        .body(Body::from("[]"))
        .unwrap();

    let (status, body) = app.send(request).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(
        body["errors"][0]["message"],
        "The Content-Length header is missing."
    );
}

#[tokio::test]
async fn a_malformed_body_is_a_400() {
    let app = companies_app().await;
    let (status, body) = app.post_batch(COMPANIES_DOC_HOST, "{not json").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "error");
    assert!(body["errors"][0]["message"]
        .as_str()
        .unwrap()
        .starts_with("Invalid batch:"));
}
