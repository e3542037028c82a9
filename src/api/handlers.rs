//! HTTP request handlers for the enrichment service.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::model::{HttpModelClient, LanguageModel};
use crate::pipeline::ContextualPipeline;
use crate::splitters::list_strategies;
use crate::types::{EnrichedDocument, InputRecord, PipelineConfig, ServiceConfig};

/// Application state shared across handlers.
pub struct AppState {
    pub config: ServiceConfig,
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    status: String,
    version: String,
}

/// Health check endpoint.
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Request to enrich a batch of records.
#[derive(Debug, Deserialize)]
pub struct EnrichRequest {
    /// Records to enrich, in order
    pub records: Vec<InputRecord>,

    /// Per-run pipeline options; defaults apply when omitted
    #[serde(default)]
    pub options: PipelineConfig,
}

/// Summary of an enrichment run: the full document list and its count.
#[derive(Debug, Serialize)]
pub struct EnrichResponse {
    pub count: usize,
    pub documents: Vec<EnrichedDocument>,
}

/// Error payload returned for failed runs.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Enrich the given records and return the ordered document list.
pub async fn enrich(
    State(state): State<Arc<AppState>>,
    Json(request): Json<EnrichRequest>,
) -> Result<Json<EnrichResponse>, (StatusCode, Json<ErrorResponse>)> {
    info!(
        records = request.records.len(),
        splitter = request.options.splitter.strategy_name(),
        "Received enrich request"
    );

    let model: Option<Arc<dyn LanguageModel>> = state.config.model_service_url.as_ref().map(|url| {
        let mut client = HttpModelClient::new(url);
        if let Some(name) = &state.config.model_name {
            client = client.with_model(name.clone());
        }
        Arc::new(client) as Arc<dyn LanguageModel>
    });

    let pipeline = ContextualPipeline::new(request.options, model).map_err(|e| {
        (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        )
    })?;

    let documents = pipeline.run(&request.records).await.map_err(|e| {
        (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        )
    })?;

    Ok(Json(EnrichResponse {
        count: documents.len(),
        documents,
    }))
}

/// Information about one splitting strategy.
#[derive(Debug, Serialize)]
pub struct SplitterInfo {
    name: String,
    description: String,
}

/// List the available splitting strategies.
pub async fn list_splitters() -> Json<Vec<SplitterInfo>> {
    let splitters = list_strategies()
        .into_iter()
        .map(|(name, description)| SplitterInfo {
            name: name.to_string(),
            description: description.to_string(),
        })
        .collect();

    Json(splitters)
}
