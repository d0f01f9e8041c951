use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::json;

use crate::api::{bad_request, error_response, not_found};
use crate::domain::{CreateInvoiceDetailInput, DomainError, InvoiceDetailPatch};
use crate::infrastructure::AppState;

pub async fn list_invoice_details(State(state): State<AppState>) -> impl IntoResponse {
    match state.invoice_detail_repo.find_all().await {
        Ok(details) => {
            Json(json!({ "invoice_details": details, "total": details.len() })).into_response()
        }
        Err(e) => error_response(e),
    }
}

pub async fn get_invoice_detail_by_id(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    match state.invoice_detail_repo.find_by_id(id).await {
        Ok(Some(detail)) => Json(json!({ "invoice_detail": detail })).into_response(),
        Ok(None) => not_found("Invoice detail not found"),
        Err(e) => error_response(e),
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateInvoiceDetailRequest {
    pub invoice_id: Option<i32>,
    pub product_id: Option<i32>,
    pub price: Option<f64>,
    pub qty: Option<i32>,
}

pub async fn create_invoice_detail(
    State(state): State<AppState>,
    Json(payload): Json<CreateInvoiceDetailRequest>,
) -> impl IntoResponse {
    let invoice_id = match payload.invoice_id {
        Some(id) => id,
        None => return bad_request("Invoice ID is required"),
    };
    let product_id = match payload.product_id {
        Some(id) => id,
        None => return bad_request("Product ID is required"),
    };
    let price = match payload.price {
        Some(price) => price,
        None => return bad_request("Price is required"),
    };
    let qty = match payload.qty {
        Some(qty) => qty,
        None => return bad_request("Quantity is required"),
    };

    let input = CreateInvoiceDetailInput {
        invoice_id,
        product_id,
        price,
        qty,
    };

    match state.invoice_detail_repo.create(input).await {
        Ok(detail) => (
            StatusCode::CREATED,
            Json(json!({
                "message": "Invoice detail created successfully",
                "invoice_detail": detail
            })),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateInvoiceDetailRequest {
    pub id: Option<i32>,
    pub invoice_id: Option<i32>,
    pub product_id: Option<i32>,
    pub price: Option<f64>,
    pub qty: Option<i32>,
}

pub async fn update_invoice_detail(
    State(state): State<AppState>,
    Json(payload): Json<UpdateInvoiceDetailRequest>,
) -> impl IntoResponse {
    let id = match payload.id {
        Some(id) => id,
        None => return bad_request("Invoice detail id is required"),
    };

    let patch = InvoiceDetailPatch {
        invoice_id: payload.invoice_id,
        product_id: payload.product_id,
        price: payload.price,
        qty: payload.qty,
    };

    if patch.is_empty() {
        return bad_request("At least one field to update is required");
    }

    match state.invoice_detail_repo.update(id, patch).await {
        Ok(detail) => (
            StatusCode::OK,
            Json(json!({
                "message": "Invoice detail updated successfully",
                "invoice_detail": detail
            })),
        )
            .into_response(),
        Err(DomainError::NotFound) => not_found("Invoice detail not found"),
        Err(e) => error_response(e),
    }
}

#[derive(Debug, Deserialize)]
pub struct DeleteRequest {
    pub id: Option<i32>,
}

pub async fn delete_invoice_detail(
    State(state): State<AppState>,
    Json(payload): Json<DeleteRequest>,
) -> impl IntoResponse {
    let id = match payload.id {
        Some(id) => id,
        None => return bad_request("Invoice detail id is required"),
    };

    match state.invoice_detail_repo.delete(id).await {
        Ok(detail) => (
            StatusCode::OK,
            Json(json!({
                "message": "Invoice detail deleted successfully",
                "deleted_invoice_detail": detail
            })),
        )
            .into_response(),
        Err(DomainError::NotFound) => not_found("Invoice detail not found"),
        Err(e) => error_response(e),
    }
}
