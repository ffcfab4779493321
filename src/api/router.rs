//! API router.
//!
//! Returns a composable `Router` that can be mounted on any axum server.
//! Routes are nested under `/api/`.
//!
//! Layers (outermost → innermost): trace → CORS → `Cache-Control: no-store`.

use std::sync::Arc;

use axum::http::{header, HeaderValue, Method};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::api::endpoints;
use crate::api::types::ApiContext;
use crate::pipeline::analysis::{ChatModel, SymptomAnalyzer};
use crate::pipeline::facilities::FacilityLookup;

/// Build the API router around a shared analyzer.
pub fn api_router<M, L>(analyzer: Arc<SymptomAnalyzer<M, L>>) -> Router
where
    M: ChatModel + 'static,
    L: FacilityLookup + 'static,
{
    let ctx = ApiContext::new(analyzer);

    let routes = Router::new()
        .route("/health", get(endpoints::health::check::<M, L>))
        .route("/analyze", post(endpoints::analyze::submit::<M, L>))
        .with_state(ctx);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .nest("/api", routes)
        .fallback(endpoints::not_found)
        // Analyses contain health information: never cache.
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
