use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Deserialize;
use serde_json::json;

use crate::api::{bad_request, error_response, not_found};
use crate::domain::{CreateUserInput, DomainError, UserPatch};
use crate::infrastructure::auth::{
    create_jwt, hash_password, validate_password, verify_password, Claims,
};
use crate::infrastructure::AppState;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<String>,
}

pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> impl IntoResponse {
    let (username, email, password) = match (payload.username, payload.email, payload.password) {
        (Some(u), Some(e), Some(p)) if !u.is_empty() && !e.is_empty() && !p.is_empty() => {
            (u, e, p)
        }
        _ => return bad_request("Username, email, and password are required"),
    };

    match state.user_repo.find_by_username(&username).await {
        Ok(Some(_)) => return bad_request("Username already exists"),
        Ok(None) => {}
        Err(e) => return error_response(e),
    }
    match state.user_repo.find_by_email(&email).await {
        Ok(Some(_)) => return bad_request("Email already exists"),
        Ok(None) => {}
        Err(e) => return error_response(e),
    }

    if let Err(msg) = validate_password(&password) {
        return bad_request(&msg);
    }

    let password_hash = match hash_password(&password) {
        Ok(hash) => hash,
        Err(e) => return error_response(DomainError::Database(e)),
    };

    let input = CreateUserInput {
        username,
        email,
        password_hash,
        role: payload.role.unwrap_or_else(|| "user".to_string()),
    };

    match state.user_repo.create(input).await {
        Ok(user) => (
            StatusCode::CREATED,
            Json(json!({
                "message": "User registered successfully",
                "user": user
            })),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> impl IntoResponse {
    let (username, password) = match (payload.username, payload.password) {
        (Some(u), Some(p)) if !u.is_empty() && !p.is_empty() => (u, p),
        _ => return bad_request("Username and password are required"),
    };

    tracing::info!("Login attempt for user: {}", username);

    let user = match state.user_repo.find_by_username(&username).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            tracing::warn!("User not found: {}", username);
            return (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": "Invalid username or password" })),
            )
                .into_response();
        }
        Err(e) => return error_response(e),
    };

    match verify_password(&password, &user.password_hash) {
        Ok(true) => {
            let token = match create_jwt(user.id, &user.username, &user.role) {
                Ok(token) => token,
                Err(e) => return error_response(DomainError::Database(e)),
            };
            (
                StatusCode::OK,
                Json(json!({
                    "message": "Login successful",
                    "access_token": token,
                    "user": user
                })),
            )
                .into_response()
        }
        _ => {
            tracing::warn!("Password verification failed for user: {}", user.username);
            (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": "Invalid username or password" })),
            )
                .into_response()
        }
    }
}

pub async fn logout(claims: Claims) -> impl IntoResponse {
    // Stateless tokens: logout is an acknowledgement, the token simply
    // expires client-side.
    (
        StatusCode::OK,
        Json(json!({
            "message": "Logout successful",
            "username": claims.sub
        })),
    )
}

#[derive(Debug, Deserialize)]
pub struct ResetPasswordRequest {
    pub old_password: Option<String>,
    pub new_password: Option<String>,
}

pub async fn reset_password(
    claims: Claims,
    State(state): State<AppState>,
    Json(payload): Json<ResetPasswordRequest>,
) -> impl IntoResponse {
    let old_password = match payload.old_password {
        Some(p) if !p.is_empty() => p,
        _ => return bad_request("Old password is required"),
    };
    let new_password = match payload.new_password {
        Some(p) if !p.is_empty() => p,
        _ => return bad_request("New password is required"),
    };

    let user = match state.user_repo.find_by_id(claims.id).await {
        Ok(Some(user)) => user,
        Ok(None) => return not_found("User not found"),
        Err(e) => return error_response(e),
    };

    match verify_password(&old_password, &user.password_hash) {
        Ok(true) => {}
        _ => {
            return (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": "Invalid old password" })),
            )
                .into_response();
        }
    }

    if let Err(msg) = validate_password(&new_password) {
        return bad_request(&msg);
    }

    let password_hash = match hash_password(&new_password) {
        Ok(hash) => hash,
        Err(e) => return error_response(DomainError::Database(e)),
    };

    let patch = UserPatch {
        password_hash: Some(password_hash),
        ..Default::default()
    };

    match state.user_repo.update(user.id, patch).await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({ "message": "Password reset successfully" })),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}
