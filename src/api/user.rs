use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::json;

use crate::api::{bad_request, error_response, not_found};
use crate::domain::{CreateUserInput, DomainError, UserPatch};
use crate::infrastructure::auth::{hash_password, validate_password};
use crate::infrastructure::AppState;

pub async fn list_users(State(state): State<AppState>) -> impl IntoResponse {
    match state.user_repo.find_all().await {
        Ok(users) => Json(json!({ "users": users, "total": users.len() })).into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn get_user_by_id(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    match state.user_repo.find_by_id(id).await {
        Ok(Some(user)) => Json(json!({ "user": user })).into_response(),
        Ok(None) => not_found("User not found"),
        Err(e) => error_response(e),
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<String>,
}

pub async fn create_user(
    State(state): State<AppState>,
    Json(payload): Json<CreateUserRequest>,
) -> impl IntoResponse {
    let (username, email, password) = match (payload.username, payload.email, payload.password) {
        (Some(u), Some(e), Some(p)) if !u.is_empty() && !e.is_empty() && !p.is_empty() => {
            (u, e, p)
        }
        _ => return bad_request("username, email, and password are required"),
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
                "message": "User created successfully",
                "user": user
            })),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub id: Option<i32>,
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<String>,
}

pub async fn update_user(
    State(state): State<AppState>,
    Json(payload): Json<UpdateUserRequest>,
) -> impl IntoResponse {
    let id = match payload.id {
        Some(id) => id,
        None => return bad_request("User id is required"),
    };

    if let Some(username) = &payload.username {
        match state.user_repo.find_by_username(username).await {
            Ok(Some(existing)) if existing.id != id => {
                return bad_request("Username already exists")
            }
            Ok(_) => {}
            Err(e) => return error_response(e),
        }
    }
    if let Some(email) = &payload.email {
        match state.user_repo.find_by_email(email).await {
            Ok(Some(existing)) if existing.id != id => return bad_request("Email already exists"),
            Ok(_) => {}
            Err(e) => return error_response(e),
        }
    }

    let password_hash = match payload.password {
        Some(password) => {
            if let Err(msg) = validate_password(&password) {
                return bad_request(&msg);
            }
            match hash_password(&password) {
                Ok(hash) => Some(hash),
                Err(e) => return error_response(DomainError::Database(e)),
            }
        }
        None => None,
    };

    let patch = UserPatch {
        username: payload.username,
        email: payload.email,
        password_hash,
        role: payload.role,
    };

    if patch.is_empty() {
        return bad_request("At least one field to update is required");
    }

    match state.user_repo.update(id, patch).await {
        Ok(user) => (
            StatusCode::OK,
            Json(json!({
                "message": "User updated successfully",
                "user": user
            })),
        )
            .into_response(),
        Err(DomainError::NotFound) => not_found("User not found"),
        Err(e) => error_response(e),
    }
}

#[derive(Debug, Deserialize)]
pub struct DeleteRequest {
    pub id: Option<i32>,
}

pub async fn delete_user(
    State(state): State<AppState>,
    Json(payload): Json<DeleteRequest>,
) -> impl IntoResponse {
    let id = match payload.id {
        Some(id) => id,
        None => return bad_request("User id is required"),
    };

    match state.user_repo.delete(id).await {
        Ok(user) => (
            StatusCode::OK,
            Json(json!({
                "message": "User deleted successfully",
                "deleted_user": user
            })),
        )
            .into_response(),
        Err(DomainError::NotFound) => not_found("User not found"),
        Err(e) => error_response(e),
    }
}
