use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::json;

use crate::api::{bad_request, error_response, not_found};
use crate::domain::DomainError;
use crate::infrastructure::AppState;

pub async fn list_categories(State(state): State<AppState>) -> impl IntoResponse {
    match state.category_repo.find_all().await {
        Ok(categories) => {
            Json(json!({ "categories": categories, "total": categories.len() })).into_response()
        }
        Err(e) => error_response(e),
    }
}

pub async fn get_category_by_id(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    match state.category_repo.find_by_id(id).await {
        Ok(Some(category)) => Json(json!({ "category": category })).into_response(),
        Ok(None) => not_found("Category not found"),
        Err(e) => error_response(e),
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateCategoryRequest {
    pub name: Option<String>,
}

pub async fn create_category(
    State(state): State<AppState>,
    Json(payload): Json<CreateCategoryRequest>,
) -> impl IntoResponse {
    let name = match payload.name {
        Some(name) if !name.is_empty() => name,
        _ => return bad_request("Category name is required"),
    };

    match state.category_repo.find_by_name(&name).await {
        Ok(Some(_)) => return bad_request("Category name already exists"),
        Ok(None) => {}
        Err(e) => return error_response(e),
    }

    match state.category_repo.create(name).await {
        Ok(category) => (
            StatusCode::CREATED,
            Json(json!({
                "message": "Category created successfully",
                "category": category
            })),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateCategoryRequest {
    pub id: Option<i32>,
    pub name: Option<String>,
}

pub async fn update_category(
    State(state): State<AppState>,
    Json(payload): Json<UpdateCategoryRequest>,
) -> impl IntoResponse {
    let id = match payload.id {
        Some(id) => id,
        None => return bad_request("Category id is required"),
    };
    let name = match payload.name {
        Some(name) if !name.is_empty() => name,
        _ => return bad_request("Category name is required"),
    };

    match state.category_repo.find_by_name(&name).await {
        Ok(Some(existing)) if existing.id != id => {
            return bad_request("Category name already exists")
        }
        Ok(_) => {}
        Err(e) => return error_response(e),
    }

    match state.category_repo.rename(id, name).await {
        Ok(category) => (
            StatusCode::OK,
            Json(json!({
                "message": "Category updated successfully",
                "category": category
            })),
        )
            .into_response(),
        Err(DomainError::NotFound) => not_found("Category not found"),
        Err(e) => error_response(e),
    }
}

#[derive(Debug, Deserialize)]
pub struct DeleteRequest {
    pub id: Option<i32>,
}

pub async fn delete_category(
    State(state): State<AppState>,
    Json(payload): Json<DeleteRequest>,
) -> impl IntoResponse {
    let id = match payload.id {
        Some(id) => id,
        None => return bad_request("Category id is required"),
    };

    match state.category_repo.delete(id).await {
        Ok(category) => (
            StatusCode::OK,
            Json(json!({
                "message": "Category deleted successfully",
                "deleted_category": category
            })),
        )
            .into_response(),
        Err(DomainError::NotFound) => not_found("Category not found"),
        Err(e) => error_response(e),
    }
}
