//! Registration, profile and logo endpoints.

use api_types::user::{ProfileUpdate, ProfileView, RegisterUser, UserView};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use engine::{UserUpdate, users};

use crate::{ServerError, server::ServerState};

pub(crate) fn user_view(user: &users::Model) -> UserView {
    UserView {
        id: user.id,
        username: user.username.clone(),
        role: user.role.clone(),
        is_active: user.is_active,
        created_at: user.created_at,
    }
}

fn profile_view(user: &users::Model) -> ProfileView {
    ProfileView {
        id: user.id,
        username: user.username.clone(),
        address: user.address.clone(),
        tel: user.tel.clone(),
        fac: user.fac.clone(),
        has_logo: user.logo_data.is_some(),
    }
}

pub(crate) fn decode_base64(
    field: &str,
    value: Option<String>,
) -> Result<Option<Vec<u8>>, ServerError> {
    value
        .map(|encoded| {
            BASE64
                .decode(encoded.as_bytes())
                .map_err(|_| ServerError::Generic(format!("{field} is not valid base64")))
        })
        .transpose()
}

/// Public registration; the account stays inactive until an admin
/// approves it.
pub async fn register(
    State(state): State<ServerState>,
    Json(payload): Json<RegisterUser>,
) -> Result<(StatusCode, Json<UserView>), ServerError> {
    if payload.password != payload.confirm_password {
        return Err(ServerError::Generic("passwords do not match".to_string()));
    }

    let user = state
        .engine
        .create_user(&payload.username, &payload.password)
        .await?;

    Ok((StatusCode::CREATED, Json(user_view(&user))))
}

pub async fn profile(
    Extension(user): Extension<users::Model>,
) -> Result<Json<ProfileView>, ServerError> {
    Ok(Json(profile_view(&user)))
}

/// Full profile overwrite. The activation flag is carried over from
/// the caller's current state: accounts cannot self-(de)activate.
pub async fn update_profile(
    Extension(user): Extension<users::Model>,
    State(state): State<ServerState>,
    Json(payload): Json<ProfileUpdate>,
) -> Result<Json<ProfileView>, ServerError> {
    let logo_data = decode_base64("logo_data", payload.logo_data)?;

    let update = UserUpdate {
        username: payload.username,
        logo_data,
        logo_content_type: payload.logo_content_type,
        address: payload.address,
        tel: payload.tel,
        fac: payload.fac,
        is_active: user.is_active,
    };

    let updated = state.engine.update_user(user.id, update).await?;
    Ok(Json(profile_view(&updated)))
}

/// Serves a user's logo byte-for-byte with the recorded content type.
pub async fn logo(
    Extension(_): Extension<users::Model>,
    State(state): State<ServerState>,
    Path(user_id): Path<i32>,
) -> Result<impl IntoResponse, ServerError> {
    let owner = state
        .engine
        .find_by_id(user_id)
        .await?
        .ok_or_else(|| ServerError::Engine(engine::EngineError::KeyNotFound(
            "user not exists".to_string(),
        )))?;

    let (Some(data), Some(content_type)) = (owner.logo_data, owner.logo_content_type) else {
        return Err(ServerError::Engine(engine::EngineError::KeyNotFound(
            "logo not exists".to_string(),
        )));
    };

    Ok(([(header::CONTENT_TYPE, content_type)], data))
}
