//! Sum API handlers.

use axum::{
    extract::{Path, State},
    Json,
};
use tally_types::{ErrorResponse, SessionResponse, SumRequest, SumResponse};
use tracing::{debug, info, warn};

use crate::error::{ApiError, ApiJson};
use crate::state::AppState;
use crate::sum::sum_entries;

/// Sum the digit strings of a list and return the result immediately.
#[utoipa::path(
    post,
    path = "/",
    tag = "sum",
    request_body = SumRequest,
    responses(
        (status = 200, description = "Sum computed", body = SumResponse),
        (status = 422, description = "Body does not match the expected shape", body = ErrorResponse)
    )
)]
pub async fn sum_array(
    ApiJson(req): ApiJson<SumRequest>,
) -> Result<Json<SumResponse>, ApiError> {
    let result = sum_entries(&req.array);
    debug!("Summed {} entries: {}", req.array.len(), result);
    Ok(Json(SumResponse::ok(result)))
}

/// Sum the digit strings of a list and store the result under a new session ID.
///
/// The sum is computed before responding; only its retrieval is deferred.
#[utoipa::path(
    post,
    path = "/async_sum",
    tag = "sum",
    request_body = SumRequest,
    responses(
        (status = 200, description = "Result stored", body = SessionResponse),
        (status = 422, description = "Body does not match the expected shape", body = ErrorResponse)
    )
)]
pub async fn async_sum(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<SumRequest>,
) -> Result<Json<SessionResponse>, ApiError> {
    let response = SumResponse::ok(sum_entries(&req.array));
    let sessions = state.sessions();
    let session_id = sessions.insert(response.clone()).await;
    let stored = sessions.len().await;
    info!(
        "Stored sum {} for session {} ({} stored)",
        response.result, session_id, stored
    );
    Ok(Json(SessionResponse::ok(session_id)))
}

/// Get the result stored for a session.
#[utoipa::path(
    get,
    path = "/get_sum/{session_id}",
    tag = "sum",
    params(
        ("session_id" = String, Path, description = "Session ID returned by /async_sum")
    ),
    responses(
        (status = 200, description = "Stored result", body = SumResponse),
        (status = 404, description = "Session ID not found", body = ErrorResponse)
    )
)]
pub async fn get_sum(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<SumResponse>, ApiError> {
    match state.sessions().get(&session_id).await {
        Some(result) => Ok(Json(result)),
        None => {
            warn!("Unknown session ID requested: {}", session_id);
            Err(ApiError::SessionNotFound)
        }
    }
}
