//! Symptom analysis endpoint.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::actions::{submit_symptoms, validate_input};
use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::models::{AnalysisInput, AnalysisServerResult};
use crate::pipeline::analysis::ChatModel;
use crate::pipeline::facilities::FacilityLookup;

/// `POST /api/analyze`: run one symptom analysis.
///
/// Responds with the `AnalysisServerResult` shape: 200 with the analysis,
/// 400 `{ error }` for a too-short description, 500 `{ error }` when the
/// analysis task failed. A body that is not a valid `AnalysisInput` gets the
/// generic error body.
pub async fn submit<M, L>(
    State(ctx): State<ApiContext<M, L>>,
    payload: Result<Json<AnalysisInput>, JsonRejection>,
) -> Result<Response, ApiError>
where
    M: ChatModel + 'static,
    L: FacilityLookup + 'static,
{
    let Json(input) = payload?;

    if let Err(message) = validate_input(&input) {
        return Ok((StatusCode::BAD_REQUEST, Json(AnalysisServerResult::error(message))).into_response());
    }

    let result = submit_symptoms(Arc::clone(&ctx.analyzer), input).await;
    let status = if result.is_error() {
        StatusCode::INTERNAL_SERVER_ERROR
    } else {
        StatusCode::OK
    };
    Ok((status, Json(result)).into_response())
}
