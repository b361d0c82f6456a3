use crate::db;
use crate::db::connection::DbPool;
use crate::db::models::User;
use crate::error::ApiError;
use crate::startup::AppState;
use axum::{
    extract::{Extension, Json},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
};
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

/// Request header carrying the API key on authenticated calls.
pub const API_KEY_HEADER: &str = "access_token";

// Request/Response DTOs
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub user_id: Uuid,
    pub api_key: String,
}

/// Fresh opaque credential: 32 bytes from the thread CSPRNG, URL-safe base64
/// without padding.
pub fn generate_api_key() -> String {
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill(&mut bytes[..]);
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Resolve the key presented in `headers` to its stored user. A missing
/// header and an unknown key are indistinguishable to the caller.
pub async fn authenticate(pool: &DbPool, headers: &HeaderMap) -> Result<User, ApiError> {
    let presented = headers
        .get(API_KEY_HEADER)
        .and_then(|value| value.to_str().ok())
        .ok_or(ApiError::Unauthorized)?;

    db::find_user_by_key(pool, presented)
        .await?
        .ok_or(ApiError::Unauthorized)
}

/// Register a new account and hand back its API key (shown only here)
pub async fn register_user(
    Extension(app_state): Extension<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if db::find_user_by_username(&app_state.db, &payload.username)
        .await?
        .is_some()
    {
        return Err(ApiError::DuplicateUsername);
    }

    if db::find_user_by_email(&app_state.db, &payload.email)
        .await?
        .is_some()
    {
        return Err(ApiError::DuplicateEmail);
    }

    // The plaintext password is dropped here; only the bcrypt digest is kept
    let password_hash = bcrypt::hash(&payload.password, bcrypt::DEFAULT_COST)?;

    let user = User {
        id: Uuid::new_v4(),
        username: payload.username,
        email: payload.email,
        password_hash,
        api_key: generate_api_key(),
    };

    db::insert_user(&app_state.db, &user).await?;

    info!("Registered user {}", user.username);

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            user_id: user.id,
            api_key: user.api_key,
        }),
    ))
}
