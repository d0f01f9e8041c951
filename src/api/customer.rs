use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::json;

use crate::api::{bad_request, error_response, not_found};
use crate::domain::{CreateCustomerInput, CustomerPatch, DomainError};
use crate::infrastructure::AppState;

pub async fn list_customers(State(state): State<AppState>) -> impl IntoResponse {
    match state.customer_repo.find_all().await {
        Ok(customers) => {
            Json(json!({ "customers": customers, "total": customers.len() })).into_response()
        }
        Err(e) => error_response(e),
    }
}

pub async fn get_customer_by_id(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    match state.customer_repo.find_by_id(id).await {
        Ok(Some(customer)) => Json(json!({ "customer": customer })).into_response(),
        Ok(None) => not_found("Customer not found"),
        Err(e) => error_response(e),
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateCustomerRequest {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

pub async fn create_customer(
    State(state): State<AppState>,
    Json(payload): Json<CreateCustomerRequest>,
) -> impl IntoResponse {
    let name = match payload.name {
        Some(name) if !name.is_empty() => name,
        _ => return bad_request("Customer name is required"),
    };

    if let Some(email) = &payload.email {
        match state.customer_repo.find_by_email(email).await {
            Ok(Some(_)) => return bad_request("Email already exists"),
            Ok(None) => {}
            Err(e) => return error_response(e),
        }
    }

    let input = CreateCustomerInput {
        name,
        phone: payload.phone,
        email: payload.email,
    };

    match state.customer_repo.create(input).await {
        Ok(customer) => (
            StatusCode::CREATED,
            Json(json!({
                "message": "Customer created successfully",
                "customer": customer
            })),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateCustomerRequest {
    pub id: Option<i32>,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

pub async fn update_customer(
    State(state): State<AppState>,
    Json(payload): Json<UpdateCustomerRequest>,
) -> impl IntoResponse {
    let id = match payload.id {
        Some(id) => id,
        None => return bad_request("Customer id is required"),
    };

    if let Some(email) = &payload.email {
        match state.customer_repo.find_by_email(email).await {
            Ok(Some(existing)) if existing.id != id => {
                return bad_request("Email already exists")
            }
            Ok(_) => {}
            Err(e) => return error_response(e),
        }
    }

    let patch = CustomerPatch {
        name: payload.name,
        phone: payload.phone,
        email: payload.email,
    };

    if patch.is_empty() {
        return bad_request("At least one field to update is required");
    }

    match state.customer_repo.update(id, patch).await {
        Ok(customer) => (
            StatusCode::OK,
            Json(json!({
                "message": "Customer updated successfully",
                "customer": customer
            })),
        )
            .into_response(),
        Err(DomainError::NotFound) => not_found("Customer not found"),
        Err(e) => error_response(e),
    }
}

#[derive(Debug, Deserialize)]
pub struct DeleteRequest {
    pub id: Option<i32>,
}

pub async fn delete_customer(
    State(state): State<AppState>,
    Json(payload): Json<DeleteRequest>,
) -> impl IntoResponse {
    let id = match payload.id {
        Some(id) => id,
        None => return bad_request("Customer id is required"),
    };

    match state.customer_repo.delete(id).await {
        Ok(customer) => (
            StatusCode::OK,
            Json(json!({
                "message": "Customer deleted successfully",
                "deleted_customer": customer
            })),
        )
            .into_response(),
        Err(DomainError::NotFound) => not_found("Customer not found"),
        Err(e) => error_response(e),
    }
}
