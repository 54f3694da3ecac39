use crate::core::error::{RegistryError, UserApiError};
use crate::core::state::AppState;
use crate::models::api::{ErrorResponse, UserActionResponse, UserListResponse, UserLookupResponse};
use crate::utils::client::ClientAddr;
use crate::utils::time::iso_timestamp;
use crate::validation::payload::UserActionRequest;
use axum::{
    body::Bytes,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

#[derive(Debug, Default, Deserialize)]
pub struct UserListQuery {
    pub all: Option<String>,
    pub username: Option<String>,
}

/// List users, or look one up by its legacy username
///
/// GET /users
/// GET /users?all=true
/// GET /users?username=<name>
pub async fn list_users_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<UserListQuery>,
) -> Response {
    let list_all = params.all.as_deref() == Some("true");
    let username = params.username.as_deref().filter(|u| !u.is_empty());

    if let (false, Some(username)) = (list_all, username) {
        return match state.registry.find_by_username(username) {
            Some(user) => {
                debug!(user_id = user.id, username = %username, "User found by username");
                (
                    StatusCode::OK,
                    Json(UserLookupResponse {
                        success: true,
                        data: user,
                        message: "User found successfully".to_string(),
                    }),
                )
                    .into_response()
            }
            None => {
                debug!(username = %username, "No user for username");
                (
                    StatusCode::NOT_FOUND,
                    Json(ErrorResponse {
                        success: false,
                        error: "User not found".to_string(),
                        message: format!("No user found with username: {}", username),
                        timestamp: None,
                    }),
                )
                    .into_response()
            }
        };
    }

    (StatusCode::OK, Json(UserListResponse::new(state.registry.list()))).into_response()
}

/// Apply an `add`, `update` or `delete` action to the registry
///
/// POST /users
/// Body: `{"action": "add"|"update"|"delete", "user": {...}}`
///
/// Every failure is answered with the same error envelope; see
/// [`UserApiError`] for how status codes are chosen.
#[instrument(skip(state, client, body), fields(client = %client))]
pub async fn apply_user_action_handler(
    State(state): State<Arc<AppState>>,
    client: ClientAddr,
    body: Bytes,
) -> Result<Response, UserApiError> {
    let distinct_status = state.config.api.distinct_error_status;
    let fail = |error: RegistryError| {
        warn!(error = %error, "User action failed");
        state.metrics.record_action(false);
        UserApiError::new(error, distinct_status)
    };

    if body.iter().all(|b| b.is_ascii_whitespace()) {
        return Err(fail(RegistryError::MalformedRequest(
            "Request body is empty".to_string(),
        )));
    }

    let request: UserActionRequest = serde_json::from_slice(&body)
        .map_err(|e| fail(RegistryError::MalformedRequest(e.to_string())))?;

    info!(
        action = ?request.action,
        user = ?request.user,
        old_user = ?request.old_user,
        device_timestamp = ?request.timestamp,
        source = "Quectel BG95",
        "POST request received from BG95"
    );

    let command = request.validate().map_err(fail)?;
    let action = command.action();

    let outcome = state.registry.apply(command).map_err(fail)?;
    state.metrics.record_action(true);

    info!(
        action,
        user_id = outcome.record.id,
        users = outcome.all_users.len(),
        message = %outcome.message,
        "User action applied"
    );

    let count = outcome.all_users.len();

    Ok((
        StatusCode::OK,
        Json(UserActionResponse {
            success: true,
            message: outcome.message,
            timestamp: iso_timestamp(),
            data: Some(outcome.record),
            old_user: outcome.previous,
            all_users: outcome.all_users,
            count,
        }),
    )
        .into_response())
}
