//! Router-level tests for the prediction service.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use phishguard::{
    BoosterParams, Dataset, FeatureExtractor, GradientBoostedTrees, ImportanceTable, Predictor,
    FEATURE_DIM,
};
use phishguard_server::http::{build_router, load_importance, AppState};
use tower::ServiceExt;

fn app(with_importance: bool) -> Router {
    let extractor = FeatureExtractor::simulated(Some(42));
    let dataset = Dataset::sample(&extractor);
    let params = BoosterParams {
        n_trees: 10,
        ..BoosterParams::default()
    };
    let model = GradientBoostedTrees::fit(&dataset, params).unwrap();
    let importance = with_importance.then(|| ImportanceTable::from_model(&model));
    build_router(AppState::new(Predictor::new(model, extractor), importance))
}

async fn read_body(resp: axum::http::Response<Body>) -> serde_json::Value {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn post_predict(body: &str) -> Request<Body> {
    Request::post("/predict")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_owned()))
        .unwrap()
}

// ── POST /predict ───────────────────────────────────────────────

#[tokio::test]
async fn predict_returns_verdict_and_features() {
    let resp = app(false)
        .oneshot(post_predict(r#"{"url": "https://www.google.com"}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let body = read_body(resp).await;
    let result = body["result"].as_str().unwrap();
    assert!(result == "phishing" || result == "legitimate");

    let confidence = body["confidence"].as_f64().unwrap();
    assert!((0.5..=1.0).contains(&confidence));

    let features = body["features"].as_object().unwrap();
    assert_eq!(features.len(), FEATURE_DIM);
    assert_eq!(features["url_length"], 22);
    assert_eq!(features["has_https"], 1);
    assert_eq!(features["has_at"], 0);
    assert_eq!(features["has_ip"], 0);
}

#[tokio::test]
async fn predict_missing_url_returns_400() {
    let resp = app(false).oneshot(post_predict("{}")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body = read_body(resp).await;
    assert_eq!(body["error"], "Missing URL parameter");
    assert_eq!(body["example"]["url"], "https://example.com");
}

#[tokio::test]
async fn predict_malformed_body_returns_400() {
    let resp = app(false).oneshot(post_predict("not json")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = app(false)
        .oneshot(post_predict(r#"{"url": 42}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = app(false)
        .oneshot(post_predict(r#"{"url": null}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(read_body(resp).await["error"], "Missing URL parameter");
}

#[tokio::test]
async fn predict_accepts_empty_url() {
    let resp = app(false)
        .oneshot(post_predict(r#"{"url": ""}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = read_body(resp).await;
    assert_eq!(body["features"]["url_length"], 0);
    assert_eq!(body["features"]["domain_length"], 0);
}

// ── GET /feature-importance ─────────────────────────────────────

#[tokio::test]
async fn feature_importance_absent_returns_404() {
    let resp = app(false)
        .oneshot(Request::get("/feature-importance").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body = read_body(resp).await;
    assert_eq!(body["error"], "Feature importance data not available");
}

#[tokio::test]
async fn feature_importance_lists_every_feature() {
    let resp = app(true)
        .oneshot(Request::get("/feature-importance").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let body = read_body(resp).await;
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), FEATURE_DIM);
    let total: f64 = rows.iter().map(|r| r["importance"].as_f64().unwrap()).sum();
    assert!(total >= 0.0);
    assert!(rows.iter().all(|r| r["feature"].is_string()));
}

#[test]
fn load_importance_missing_file_is_none() {
    let dir = tempfile::tempdir().unwrap();
    assert!(load_importance(&dir.path().join("feature_importance.csv")).is_none());
}

// ── Service metadata ────────────────────────────────────────────

#[tokio::test]
async fn health_returns_ok() {
    let resp = app(false)
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(read_body(resp).await["status"], "ok");
}

#[tokio::test]
async fn index_reports_importance_availability() {
    let resp = app(true)
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = read_body(resp).await;
    assert_eq!(body["service"], "phishguard");
    assert_eq!(body["has_importance"], true);
    assert_eq!(body["model_trees"], 10);
}
