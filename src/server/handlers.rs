//! Route handlers.
//!
//! Credentials are checked before the body is looked at, and the body is
//! validated before the store is touched.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::HeaderMap;
use tracing::{info, warn};

use crate::auth::{AuthError, Credentials, Identity};
use crate::ingest::create_question;
use crate::protocol::{
    CreateQuestionRequest, CreateQuestionResponse, SelectionRequest, SelectionResponse,
    StatusResponse,
};
use crate::selection::select_random;

use super::error::ApiError;
use super::state::AppState;

fn require_user(state: &AppState, headers: &HeaderMap) -> Result<Identity, ApiError> {
    let credentials = Credentials::from_headers(headers).ok_or(AuthError::MissingCredentials)?;
    state.access.authenticate_user(&credentials).map_err(|err| {
        warn!(username = %credentials.username, "rejected user credentials");
        ApiError::from(err)
    })
}

fn require_admin(state: &AppState, headers: &HeaderMap) -> Result<(), ApiError> {
    let credentials = Credentials::from_headers(headers).ok_or(AuthError::AdminRequired)?;
    state.access.authenticate_admin(&credentials).map_err(|err| {
        warn!(username = %credentials.username, "rejected admin credentials");
        ApiError::from(err)
    })
}

/// Run blocking store work off the async executor.
async fn blocking<T, F>(work: F) -> Result<T, ApiError>
where
    F: FnOnce() -> Result<T, ApiError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|err| ApiError::internal(err.to_string()))?
}

/// Liveness probe, served on `/` and `/status`.
pub async fn health_check() -> Json<StatusResponse> {
    Json(StatusResponse::ok())
}

/// Draw random questions for an authenticated user.
pub async fn random_questions(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Json<SelectionRequest>, JsonRejection>,
) -> Result<Json<SelectionResponse>, ApiError> {
    let identity = require_user(&state, &headers)?;
    let Json(request) = body?;
    let criteria = request.validate()?;

    let selection = blocking(move || {
        select_random(state.store.as_ref(), state.sampler.as_ref(), &criteria)
            .map_err(ApiError::from)
    })
    .await?;

    info!(
        username = %identity.username,
        returned = selection.total_returned,
        "served random questions"
    );

    Ok(Json(SelectionResponse {
        questions: selection.questions,
        total_returned: selection.total_returned,
    }))
}

/// Add a question; administrator only.
pub async fn add_question(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Json<CreateQuestionRequest>, JsonRejection>,
) -> Result<Json<CreateQuestionResponse>, ApiError> {
    require_admin(&state, &headers)?;
    let Json(request) = body?;

    let response = blocking(move || {
        create_question(state.store.as_ref(), &request, state.ingest).map_err(ApiError::from)
    })
    .await?;

    Ok(Json(response))
}
