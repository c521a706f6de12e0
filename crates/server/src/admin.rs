//! Admin-only account management endpoints.

use api_types::user::InactiveUsersResponse;
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use engine::users;

use crate::{ServerError, server::ServerState, user::user_view};

fn require_admin(caller: &users::Model) -> Result<(), ServerError> {
    if caller.is_admin() {
        Ok(())
    } else {
        Err(ServerError::Forbidden)
    }
}

/// Accounts waiting for approval, oldest registration first.
pub async fn inactive_users(
    Extension(caller): Extension<users::Model>,
    State(state): State<ServerState>,
) -> Result<Json<InactiveUsersResponse>, ServerError> {
    require_admin(&caller)?;

    let users = state.engine.inactive_users().await?;
    Ok(Json(InactiveUsersResponse {
        users: users.iter().map(user_view).collect(),
    }))
}

pub async fn activate(
    Extension(caller): Extension<users::Model>,
    State(state): State<ServerState>,
    Path(user_id): Path<i32>,
) -> Result<StatusCode, ServerError> {
    require_admin(&caller)?;

    state.engine.activate_user(user_id).await?;
    tracing::info!("user {user_id} activated by {}", caller.username);
    Ok(StatusCode::NO_CONTENT)
}

pub async fn deactivate(
    Extension(caller): Extension<users::Model>,
    State(state): State<ServerState>,
    Path(user_id): Path<i32>,
) -> Result<StatusCode, ServerError> {
    require_admin(&caller)?;

    state.engine.deactivate_user(user_id).await?;
    tracing::info!("user {user_id} deactivated by {}", caller.username);
    Ok(StatusCode::NO_CONTENT)
}

/// Removes the account together with all of its orders.
pub async fn remove(
    Extension(caller): Extension<users::Model>,
    State(state): State<ServerState>,
    Path(user_id): Path<i32>,
) -> Result<StatusCode, ServerError> {
    require_admin(&caller)?;

    state.engine.delete_user(user_id).await?;
    tracing::info!("user {user_id} deleted by {}", caller.username);
    Ok(StatusCode::NO_CONTENT)
}
