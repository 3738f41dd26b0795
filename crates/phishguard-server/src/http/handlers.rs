use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use phishguard::{FeatureImportance, FeatureVector, Label};
use serde::Serialize;
use serde_json::{json, Value};
use tracing::debug;

use super::error::ApiError;
use super::AppState;

/// Body of a successful `/predict` call.
#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub result: Label,
    pub confidence: f64,
    pub features: FeatureVector,
}

pub async fn index(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "service": "phishguard",
        "version": env!("CARGO_PKG_VERSION"),
        "model_trees": state.predictor.model().params().n_trees,
        "has_importance": state.importance.is_some(),
        "endpoints": [
            { "method": "POST", "path": "/predict", "body": { "url": "https://example.com" } },
            { "method": "GET", "path": "/feature-importance" },
            { "method": "GET", "path": "/health" },
        ],
    }))
}

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub async fn predict(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<PredictResponse>, ApiError> {
    let url = payload
        .ok()
        .and_then(|Json(body)| body.get("url").and_then(Value::as_str).map(str::to_owned))
        .ok_or(ApiError::MissingUrl)?;

    let verdict = state.predictor.predict(&url)?;
    debug!(%url, label = %verdict.label, "served prediction");

    Ok(Json(PredictResponse {
        result: verdict.label,
        confidence: round4(verdict.confidence),
        features: verdict.features,
    }))
}

pub async fn feature_importance(
    State(state): State<AppState>,
) -> Result<Json<Vec<FeatureImportance>>, ApiError> {
    state
        .importance
        .as_ref()
        .map(|table| Json(table.rows().to_vec()))
        .ok_or(ApiError::ImportanceUnavailable)
}

fn round4(v: f64) -> f64 {
    (v * 10_000.0).round() / 10_000.0
}
