//! Authentication route handlers.
//!
//! Email+password registration and login; the session cookie carries
//! the identity everything else consumes.

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::middleware::{RequireUser, clear_current_user, set_current_user};
use crate::models::{CurrentUser, User};
use crate::services::auth::AuthService;
use crate::state::AppState;

/// Registration/login request body.
#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    pub email: String,
    pub password: String,
}

async fn establish_session(session: &Session, user: &User) -> Result<()> {
    let current = CurrentUser {
        id: user.id,
        email: user.email.clone(),
    };
    set_current_user(session, &current)
        .await
        .map_err(|e| AppError::Internal(format!("failed to persist session: {e}")))
}

/// Register a new account and log it in.
#[instrument(skip_all)]
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    Json(body): Json<CredentialsRequest>,
) -> Result<impl IntoResponse> {
    let user = AuthService::new(state.pool())
        .register_with_password(&body.email, &body.password)
        .await?;

    establish_session(&session, &user).await?;
    tracing::info!(user_id = %user.id, "user registered");

    Ok((StatusCode::CREATED, Json(user)))
}

/// Login with email and password.
#[instrument(skip_all)]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(body): Json<CredentialsRequest>,
) -> Result<Json<User>> {
    let user = AuthService::new(state.pool())
        .login_with_password(&body.email, &body.password)
        .await?;

    // Rotate the session id on privilege change
    session
        .cycle_id()
        .await
        .map_err(|e| AppError::Internal(format!("failed to cycle session: {e}")))?;
    establish_session(&session, &user).await?;

    Ok(Json(user))
}

/// Logout: drop the identity from the session.
#[instrument(skip_all)]
pub async fn logout(session: Session) -> Result<StatusCode> {
    clear_current_user(&session)
        .await
        .map_err(|e| AppError::Internal(format!("failed to clear session: {e}")))?;
    Ok(StatusCode::NO_CONTENT)
}

/// The current session identity.
#[instrument(skip_all)]
pub async fn me(user: RequireUser) -> Json<CurrentUser> {
    Json(user.0)
}
