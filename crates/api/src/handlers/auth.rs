//! Handlers for the `/auth` resource (register, login, me).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use prodhub_core::error::{join_validation_errors, CoreError};
use prodhub_core::users::{validate_registration_fields, MIN_PASSWORD_LEN};
use prodhub_db::models::user::{CreateUser, MeResponse, PublicUser};
use prodhub_db::repositories::UserRepo;
use serde::{Deserialize, Serialize};

use crate::auth::jwt::generate_token;
use crate::auth::password::{hash_password, verify_password};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/register`.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Successful authentication response returned by register and login.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub message: &'static str,
    pub token: String,
    pub user: PublicUser,
}

/// Envelope for `GET /auth/me`.
#[derive(Debug, Serialize)]
pub struct MeEnvelope {
    pub user: MeResponse,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/auth/register
///
/// Create an account and log it in: hash the password, persist the user,
/// issue a token, and stamp the first login.
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<AuthResponse>)> {
    let name = input.name.as_deref().unwrap_or("").trim();
    let email = input.email.as_deref().unwrap_or("").trim();
    let password = input.password.as_deref().unwrap_or("");

    if name.is_empty() || email.is_empty() || password.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Please provide name, email, and password".into(),
        )));
    }

    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters long"
        ))));
    }

    let field_errors = validate_registration_fields(name, email);
    if !field_errors.is_empty() {
        return Err(AppError::Core(join_validation_errors(field_errors)));
    }

    // Case-sensitive duplicate check. The unique constraint backstops the
    // race between check and insert.
    if UserRepo::find_by_email(&state.pool, email).await?.is_some() {
        return Err(AppError::Core(CoreError::Conflict(
            "User with this email already exists".into(),
        )));
    }

    let password_hash = hash_password(password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            name: name.to_string(),
            email: email.to_string(),
            password_hash,
        },
    )
    .await?;

    let token = generate_token(user.id, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    UserRepo::record_login(&state.pool, user.id).await?;

    tracing::info!(user_id = user.id, "User registered");

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            message: "User registered successfully",
            token,
            user: user.public(),
        }),
    ))
}

/// POST /api/auth/login
///
/// Authenticate with email + password. The failure message never reveals
/// whether the email existed.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let email = input.email.as_deref().unwrap_or("").trim();
    let password = input.password.as_deref().unwrap_or("");

    if email.is_empty() || password.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Please provide email and password".into(),
        )));
    }

    let user = UserRepo::find_by_email(&state.pool, email)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Validation("Invalid email or password".into()))
        })?;

    // Deactivation is checked after existence but before the password.
    if !user.is_active {
        return Err(AppError::Core(CoreError::Validation(
            "Account is deactivated. Please contact support.".into(),
        )));
    }

    let password_valid = verify_password(password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;

    if !password_valid {
        return Err(AppError::Core(CoreError::Validation(
            "Invalid email or password".into(),
        )));
    }

    let token = generate_token(user.id, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    UserRepo::record_login(&state.pool, user.id).await?;

    tracing::info!(user_id = user.id, "User logged in");

    Ok(Json(AuthResponse {
        message: "Login successful",
        token,
        user: user.public(),
    }))
}

/// GET /api/auth/me
///
/// Return the authenticated identity's public projection.
pub async fn me(auth: AuthUser) -> AppResult<Json<MeEnvelope>> {
    Ok(Json(MeEnvelope {
        user: MeResponse {
            id: auth.user_id,
            name: auth.name,
            email: auth.email,
            last_login: auth.last_login_at,
            created_at: auth.created_at,
        },
    }))
}
