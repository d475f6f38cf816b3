pub mod error;

use axum::extract::rejection::QueryRejection;
use axum::extract::{Multipart, Query, State};
use axum::http::HeaderMap;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use textmine_core::{CorpusConfig, CorpusStats, LoadReport, SharedCorpus, TextAnalysis};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::error::ApiError;

#[derive(Deserialize)]
pub struct AddParams {
    pub doc_id: String,
}

#[derive(Serialize)]
pub struct AddResponse {
    pub doc_id: String,
    pub term_count: usize,
    pub distinct_terms: usize,
}

#[derive(Serialize)]
pub struct DocumentSummary {
    pub id: String,
    pub term_count: usize,
}

#[derive(Clone)]
pub struct AppState {
    pub corpus: SharedCorpus,
    pub admin_token: Option<String>,
}

/// Build the corpus from `config`, load its directory, and wire the routes.
pub fn build_app(config: CorpusConfig) -> Router {
    let corpus = SharedCorpus::from_config(config);
    let report = corpus.load_configured();
    tracing::info!(%report, "initial corpus load");
    let admin_token = std::env::var("ADMIN_TOKEN").ok().filter(|t| !t.is_empty());
    router(AppState { corpus, admin_token })
}

pub fn router(state: AppState) -> Router {
    // CORS: read CORS_ALLOW_ORIGIN (comma-separated) or allow Any by default
    let cors = match std::env::var("CORS_ALLOW_ORIGIN") {
        Ok(val) => {
            let origins: Vec<_> = val
                .split(',')
                .filter_map(|s| s.trim().parse().ok())
                .collect();
            if origins.is_empty() {
                CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
            } else {
                CorsLayer::new().allow_origin(AllowOrigin::list(origins)).allow_methods(Any).allow_headers(Any)
            }
        }
        Err(_) => CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any),
    };

    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/corpus/stats", get(stats_handler))
        .route("/corpus/documents", get(documents_handler))
        .route("/corpus/add", post(add_handler))
        .route("/corpus/upload", post(upload_handler))
        .route("/corpus/reload", post(reload_handler))
        .route("/text/mining", post(mining_handler))
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

pub async fn stats_handler(State(state): State<AppState>) -> Json<CorpusStats> {
    Json(state.corpus.stats())
}

pub async fn documents_handler(State(state): State<AppState>) -> Json<Vec<DocumentSummary>> {
    let docs = state.corpus.read(|c| {
        c.documents()
            .iter()
            .map(|d| DocumentSummary { id: d.id().to_string(), term_count: d.len() })
            .collect()
    });
    Json(docs)
}

pub async fn add_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    params: Result<Query<AddParams>, QueryRejection>,
    body: String,
) -> Result<Json<AddResponse>, ApiError> {
    authorize(&state, &headers)?;
    let Query(params) = params?;
    // Runs to completion even if the client goes away.
    let doc = tokio::task::spawn_blocking(move || state.corpus.add_document(&params.doc_id, &body)).await??;
    Ok(Json(AddResponse {
        doc_id: doc.id().to_string(),
        term_count: doc.len(),
        distinct_terms: doc.term_frequency().len(),
    }))
}

pub async fn upload_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Result<Json<LoadReport>, ApiError> {
    authorize(&state, &headers)?;
    let mut items = Vec::new();
    let mut decode_failures = LoadReport::default();
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("files") {
            continue;
        }
        let name = field.file_name().unwrap_or("upload").to_string();
        let bytes = field.bytes().await?;
        if bytes.is_empty() {
            continue;
        }
        match String::from_utf8(bytes.to_vec()) {
            Ok(text) => items.push((name, text)),
            Err(err) => {
                tracing::warn!(file = %name, error = %err, "skipping non UTF-8 upload");
                decode_failures.attempted += 1;
                decode_failures.record_failure(&name, err.to_string());
            }
        }
    }
    let mut report = tokio::task::spawn_blocking(move || state.corpus.add_batch(items)).await?;
    report.attempted += decode_failures.attempted;
    report.failures.extend(decode_failures.failures);
    tracing::info!(%report, "upload processed");
    Ok(Json(report))
}

pub async fn reload_handler(State(state): State<AppState>, headers: HeaderMap) -> Result<Json<LoadReport>, ApiError> {
    authorize(&state, &headers)?;
    let report = tokio::task::spawn_blocking(move || state.corpus.reload()).await?;
    Ok(Json(report))
}

pub async fn mining_handler(State(state): State<AppState>, body: String) -> Result<Json<TextAnalysis>, ApiError> {
    let analysis = tokio::task::spawn_blocking(move || state.corpus.analyze(&body)).await??;
    Ok(Json(analysis))
}

/// Mutating routes need `X-ADMIN-TOKEN` when `ADMIN_TOKEN` is configured.
fn authorize(state: &AppState, headers: &HeaderMap) -> Result<(), ApiError> {
    let required = match &state.admin_token {
        Some(t) => t,
        None => return Ok(()),
    };
    let provided = headers.get("X-ADMIN-TOKEN").and_then(|v| v.to_str().ok()).unwrap_or("");
    if provided == required {
        Ok(())
    } else {
        Err(ApiError::Unauthorized("invalid admin token".into()))
    }
}
