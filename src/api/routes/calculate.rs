use axum::body::Bytes;
use axum::extract::State;
use axum::Json;

use crate::api::state::AppState;
use crate::calculate::{calculate_batch, CalculationError};
use crate::models::{CalculateResponse, CalculationInput};

/// `POST /calculate`
///
/// The body is decoded here rather than through the `Json` extractor so a
/// malformed body is reported in-band like any other failure.
pub async fn calculate(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<CalculateResponse>, CalculationError> {
    let input: CalculationInput = serde_json::from_slice(&body)
        .map_err(|e| CalculationError::Unexpected(e.to_string()))?;

    let results = calculate_batch(&input, &state.settings, state.clock.as_ref())?;
    tracing::info!("Calculated {} upgrade completion(s)", results.len());

    Ok(Json(CalculateResponse::success(results)))
}
