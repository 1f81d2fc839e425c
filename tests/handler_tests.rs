//! Smoke tests for the HTTP handlers.
//!
//! Each operation gets at least one test covering its success shape and
//! its documented failure semantics, driven through the router with
//! `tower::ServiceExt::oneshot`.
//!
//! Run with: `cargo test --test handler_tests`

use std::fs;
use std::sync::Arc;

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

use entente::config::ServerConfig;
use entente::engine::Engine;
use entente::handlers::build_router;

const TEST_ADMIN_KEY: &str = "handler-smoke-test-key";

// ── test infrastructure ──

struct Harness {
    app: Router,
    _dir: TempDir,
}

impl Harness {
    fn new() -> Self {
        let dir = TempDir::new().expect("create temp dir");

        fs::write(
            dir.path().join("corpus.json"),
            serde_json::to_vec_pretty(&json!([
                {"text": "Quels sont vos horaires d'ouverture ?", "intent": "horaires"},
                {"text": "Combien coûte la livraison ?", "intent": "livraison"}
            ]))
            .unwrap(),
        )
        .unwrap();

        fs::write(
            dir.path().join("catalog.json"),
            serde_json::to_vec_pretty(&json!({
                "intents": {
                    "horaires": {"direct": ["horaire", "ouverture"]},
                    "livraison": ["livraison"]
                },
                "responses": {
                    "horaires": "Nous sommes ouverts de 9h à 18h.",
                    "livraison": "La livraison standard prend 3 jours."
                }
            }))
            .unwrap(),
        )
        .unwrap();

        fs::write(
            dir.path().join("glossary.json"),
            serde_json::to_vec_pretty(&json!({"terms": {"IA": "Intelligence Artificielle"}}))
                .unwrap(),
        )
        .unwrap();

        let config = ServerConfig {
            data_dir: dir.path().to_path_buf(),
            admin_key: TEST_ADMIN_KEY.to_string(),
            ..Default::default()
        };
        let engine = Arc::new(Engine::new(config).expect("create engine"));

        Self {
            app: build_router(engine),
            _dir: dir,
        }
    }
}

// ── request helpers ──

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ── analyze_context ──

#[tokio::test]
async fn analyze_context_resolves_intent() {
    let harness = Harness::new();
    let response = harness
        .app
        .oneshot(post_json(
            "/analyze_context",
            json!({"message": "Quels sont vos horaires ?"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["intent"], "horaires");
    assert_eq!(body["response"], "Nous sommes ouverts de 9h à 18h.");
    assert!(body["keywords"].as_array().unwrap().iter().any(|k| k == "horaire"));
}

#[tokio::test]
async fn analyze_context_empty_message_is_designated_body_not_error() {
    let harness = Harness::new();
    let response = harness
        .app
        .oneshot(post_json("/analyze_context", json!({"message": ""})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["response"], "Message vide.");
    assert_eq!(body["intent"], "unknown");
    assert_eq!(body["keywords"], json!([]));
}

#[tokio::test]
async fn analyze_context_missing_field_defaults_to_empty() {
    let harness = Harness::new();
    let response = harness
        .app
        .oneshot(post_json("/analyze_context", json!({})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

// ── extract_keywords ──

#[tokio::test]
async fn extract_keywords_returns_ordered_list() {
    let harness = Harness::new();
    let response = harness
        .app
        .oneshot(post_json(
            "/extract_keywords",
            json!({"text": "Quels sont vos horaires d'ouverture ?"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert!(!body["keywords"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn extract_keywords_empty_text_is_missing_input() {
    let harness = Harness::new();
    let response = harness
        .app
        .oneshot(post_json("/extract_keywords", json!({"text": "  "})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["code"], "MISSING_INPUT");
}

// ── calculate_relationships ──

#[tokio::test]
async fn relationships_single_pair_is_empty_list() {
    let harness = Harness::new();
    let response = harness
        .app
        .oneshot(post_json(
            "/calculate_relationships",
            json!({"keywords": ["chat", "chien"]}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["relationships"], json!([]));
}

#[tokio::test]
async fn relationships_under_two_keywords_is_empty_not_error() {
    let harness = Harness::new();
    let response = harness
        .app
        .oneshot(post_json(
            "/calculate_relationships",
            json!({"keywords": ["solo"]}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["relationships"], json!([]));
}

#[tokio::test]
async fn relationships_edges_have_source_target_weight() {
    let harness = Harness::new();
    let response = harness
        .app
        .oneshot(post_json(
            "/calculate_relationships",
            json!({"keywords": ["horaire", "ouverture", "livraison", "tarif"]}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    for edge in body["relationships"].as_array().unwrap() {
        assert!(edge["source"].is_string());
        assert!(edge["target"].is_string());
        assert!(edge["weight"].is_number());
    }
}

// ── glossary ──

#[tokio::test]
async fn glossary_known_term() {
    let harness = Harness::new();
    let response = harness
        .app
        .oneshot(post_json("/glossary", json!({"term": "IA"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["term"], "IA");
    assert_eq!(body["definition"], "Intelligence Artificielle");
}

#[tokio::test]
async fn glossary_unknown_term_is_404() {
    let harness = Harness::new();
    let response = harness
        .app
        .oneshot(post_json("/glossary", json!({"term": "ia"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn glossary_empty_term_is_400() {
    let harness = Harness::new();
    let response = harness
        .app
        .oneshot(post_json("/glossary", json!({"term": ""})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ── update-intent ──

#[tokio::test]
async fn update_intent_relabels_existing_entry() {
    let harness = Harness::new();
    let response = harness
        .app
        .oneshot(post_json(
            "/update-intent",
            json!({"text": "Quels sont vos horaires d'ouverture ?", "intent": "accueil"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn update_intent_unknown_text_is_404() {
    let harness = Harness::new();
    let response = harness
        .app
        .oneshot(post_json(
            "/update-intent",
            json!({"text": "Jamais posée", "intent": "accueil"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_intent_missing_fields_is_400() {
    let harness = Harness::new();
    let response = harness
        .app
        .oneshot(post_json("/update-intent", json!({"text": "x"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ── train ──

#[tokio::test]
async fn train_queues_job_and_completes() {
    let harness = Harness::new();

    let response = harness
        .app
        .clone()
        .oneshot(post_json("/train", json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let job_id = body["job_id"].as_str().unwrap().to_string();
    assert_eq!(body["status"], "queued");

    // poll until the background job finishes
    let mut completed = false;
    for _ in 0..50 {
        let response = harness
            .app
            .clone()
            .oneshot(get(&format!("/train/{job_id}")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        match body["status"].as_str().unwrap() {
            "completed" => {
                let summary = &body["summary"];
                assert_eq!(summary["examples"], 2);
                completed = true;
                break;
            }
            "failed" => panic!("training failed: {body}"),
            _ => tokio::time::sleep(std::time::Duration::from_millis(20)).await,
        }
    }
    assert!(completed, "training job never completed");
}

#[tokio::test]
async fn train_status_unknown_job_is_404() {
    let harness = Harness::new();
    let response = harness
        .app
        .oneshot(get(&format!("/train/{}", entente::uuid::Uuid::new_v4())))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn train_empty_corpus_is_schema_error() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("corpus.json"), b"[]").unwrap();
    let config = ServerConfig {
        data_dir: dir.path().to_path_buf(),
        ..Default::default()
    };
    let app = build_router(Arc::new(Engine::new(config).unwrap()));

    let response = app.oneshot(post_json("/train", json!({}))).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["code"], "TRAINING_SCHEMA");
}

// ── reload-data ──

#[tokio::test]
async fn reload_without_credential_is_403() {
    let harness = Harness::new();
    let response = harness
        .app
        .oneshot(post_json("/reload-data", json!({})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = body_json(response).await;
    assert_eq!(body["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn reload_with_credential_succeeds() {
    let harness = Harness::new();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/reload-data")
        .header("content-type", "application/json")
        .header("Authorization", TEST_ADMIN_KEY)
        .body(Body::from("{}"))
        .unwrap();

    let response = harness.app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

// ── precomputed documents ──

#[tokio::test]
async fn clusters_absent_is_404() {
    let harness = Harness::new();
    let response = harness.app.oneshot(get("/explore_clusters")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn statistics_present_is_served_verbatim() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("statistics.json"),
        serde_json::to_vec(&json!({"total_questions": 42})).unwrap(),
    )
    .unwrap();
    let config = ServerConfig {
        data_dir: dir.path().to_path_buf(),
        ..Default::default()
    };
    let app = build_router(Arc::new(Engine::new(config).unwrap()));

    let response = app.oneshot(get("/statistics")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["total_questions"], 42);
}

// ── health ──

#[tokio::test]
async fn health_reports_counters() {
    let harness = Harness::new();
    let response = harness.app.oneshot(get("/health")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["corpus_entries"], 2);
    assert_eq!(body["intents"], 2);
    assert_eq!(body["classifier_ready"], false);
}
