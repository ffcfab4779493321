//! Health check endpoint.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::api::types::ApiContext;
use crate::pipeline::analysis::ChatModel;
use crate::pipeline::facilities::FacilityLookup;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub model: String,
}

/// `GET /api/health`: liveness plus the configured model name.
///
/// Does not contact the model server.
pub async fn check<M, L>(State(ctx): State<ApiContext<M, L>>) -> Json<HealthResponse>
where
    M: ChatModel + 'static,
    L: FacilityLookup + 'static,
{
    Json(HealthResponse {
        status: "ok",
        version: crate::config::APP_VERSION,
        model: ctx.analyzer.model().model_name().to_string(),
    })
}
