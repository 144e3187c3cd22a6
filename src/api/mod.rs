//! HTTP API.
//!
//! Axum router serving the calculator page and the `POST /calculate`
//! endpoint. Failures are reported in the response body, never as an HTTP
//! error status.

pub mod routes;
pub mod state;

use axum::{
    http::{header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::calculate::CalculationError;
use crate::models::CalculateResponse;
use state::AppState;

impl IntoResponse for CalculationError {
    fn into_response(self) -> Response {
        match &self {
            CalculationError::Unexpected(msg) => {
                tracing::warn!("Calculation failed: {}", msg);
            }
            other => {
                tracing::info!("Rejected upgrade batch: {}", other);
            }
        }

        (StatusCode::OK, Json(CalculateResponse::failure(self.to_string()))).into_response()
    }
}

fn cors_layer(origin: &str) -> CorsLayer {
    let allow_origin = if origin == "*" {
        AllowOrigin::any()
    } else {
        match HeaderValue::from_str(origin) {
            Ok(value) => AllowOrigin::exact(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin {:?}; allowing any", origin);
                AllowOrigin::any()
            }
        }
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
}

/// Build the application router.
pub fn build_router(state: AppState) -> Router {
    let cors = cors_layer(&state.cors_origin);

    Router::new()
        .route("/", get(routes::index::index))
        .route("/calculate", post(routes::calculate::calculate))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
