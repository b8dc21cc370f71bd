use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

use crate::{
    auth::{
        model::PublicUser,
        service::{AuthError, NewUser},
    },
    state::AppState,
};

#[derive(Debug, Default, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    pub email: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub message: String,
    pub user: PublicUser,
}

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub user: PublicUser,
}

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/profile/:id", get(profile))
}

/// Duplicate is the only service failure mapped to a client error; the
/// rest get logged and collapse to a generic 500.
fn map_auth_err(e: AuthError) -> (StatusCode, String) {
    match e {
        AuthError::DuplicateUser => (StatusCode::CONFLICT, "User already exists".into()),
        other => {
            error!(error = %other, "auth service failure");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".into(),
            )
        }
    }
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(mut payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), (StatusCode, String)> {
    payload.username = payload.username.trim().to_string();

    if payload.username.is_empty() || payload.password.is_empty() {
        warn!("missing username or password");
        return Err((
            StatusCode::BAD_REQUEST,
            "Username and password are required".into(),
        ));
    }

    let min_len = state.config.min_password_len;
    if payload.password.chars().count() < min_len {
        warn!("password too short");
        return Err((
            StatusCode::BAD_REQUEST,
            format!("Password must be at least {min_len} characters long"),
        ));
    }

    let email = match payload
        .email
        .as_deref()
        .map(str::trim)
        .filter(|e| !e.is_empty())
    {
        Some(raw) => {
            let normalized = raw.to_lowercase();
            if !is_valid_email(&normalized) {
                warn!(email = %normalized, "invalid email");
                return Err((StatusCode::BAD_REQUEST, "Invalid email".into()));
            }
            Some(normalized)
        }
        None => None,
    };

    let user = state
        .auth
        .register(NewUser {
            username: &payload.username,
            password: &payload.password,
            email: email.as_deref(),
            name: payload.name.as_deref(),
        })
        .await
        .map_err(map_auth_err)?;

    info!(user_id = %user.id, username = %user.username, "user registered");
    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            message: "User created successfully".into(),
            user,
        }),
    ))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(mut payload): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, (StatusCode, String)> {
    payload.username = payload.username.trim().to_string();

    if payload.username.is_empty() || payload.password.is_empty() {
        warn!("missing username or password");
        return Err((
            StatusCode::BAD_REQUEST,
            "Username and password are required".into(),
        ));
    }

    let user = state
        .auth
        .authenticate(&payload.username, &payload.password)
        .await
        .map_err(map_auth_err)?;

    match user {
        Some(user) => {
            info!(user_id = %user.id, username = %user.username, "user logged in");
            Ok(Json(AuthResponse {
                message: "Login successful".into(),
                user,
            }))
        }
        None => {
            warn!(username = %payload.username, "login invalid credentials");
            Err((
                StatusCode::UNAUTHORIZED,
                "Invalid username or password".into(),
            ))
        }
    }
}

#[instrument(skip(state))]
pub async fn profile(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ProfileResponse>, (StatusCode, String)> {
    match state.auth.get_by_id(id).await.map_err(map_auth_err)? {
        Some(user) => Ok(Json(ProfileResponse { user })),
        None => Err((StatusCode::NOT_FOUND, "User not found".into())),
    }
}
