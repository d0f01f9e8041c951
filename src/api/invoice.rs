use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::json;

use crate::api::{bad_request, error_response, not_found};
use crate::domain::{CreateInvoiceInput, DomainError, InvoicePatch};
use crate::infrastructure::AppState;

pub async fn list_invoices(State(state): State<AppState>) -> impl IntoResponse {
    match state.invoice_repo.find_all().await {
        Ok(invoices) => {
            Json(json!({ "invoices": invoices, "total": invoices.len() })).into_response()
        }
        Err(e) => error_response(e),
    }
}

pub async fn get_invoice_by_id(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    match state.invoice_repo.find_by_id(id).await {
        Ok(Some(invoice)) => Json(json!({ "invoice": invoice })).into_response(),
        Ok(None) => not_found("Invoice not found"),
        Err(e) => error_response(e),
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateInvoiceRequest {
    pub user_id: Option<i32>,
    pub customer_id: Option<i32>,
    pub total_amount: Option<f64>,
    pub status: Option<String>,
}

pub async fn create_invoice(
    State(state): State<AppState>,
    Json(payload): Json<CreateInvoiceRequest>,
) -> impl IntoResponse {
    let user_id = match payload.user_id {
        Some(id) => id,
        None => return bad_request("User ID is required"),
    };
    let total_amount = match payload.total_amount {
        Some(amount) => amount,
        None => return bad_request("Total amount is required"),
    };

    let input = CreateInvoiceInput {
        user_id,
        customer_id: payload.customer_id,
        total_amount,
        status: payload.status.unwrap_or_else(|| "completed".to_string()),
    };

    match state.invoice_repo.create(input).await {
        Ok(invoice) => (
            StatusCode::CREATED,
            Json(json!({
                "message": "Invoice created successfully",
                "invoice": invoice
            })),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateInvoiceRequest {
    pub id: Option<i32>,
    pub user_id: Option<i32>,
    pub customer_id: Option<i32>,
    pub total_amount: Option<f64>,
    pub status: Option<String>,
}

pub async fn update_invoice(
    State(state): State<AppState>,
    Json(payload): Json<UpdateInvoiceRequest>,
) -> impl IntoResponse {
    let id = match payload.id {
        Some(id) => id,
        None => return bad_request("Invoice id is required"),
    };

    let patch = InvoicePatch {
        user_id: payload.user_id,
        customer_id: payload.customer_id,
        total_amount: payload.total_amount,
        status: payload.status,
    };

    if patch.is_empty() {
        return bad_request("At least one field to update is required");
    }

    match state.invoice_repo.update(id, patch).await {
        Ok(invoice) => (
            StatusCode::OK,
            Json(json!({
                "message": "Invoice updated successfully",
                "invoice": invoice
            })),
        )
            .into_response(),
        Err(DomainError::NotFound) => not_found("Invoice not found"),
        Err(e) => error_response(e),
    }
}

#[derive(Debug, Deserialize)]
pub struct DeleteRequest {
    pub id: Option<i32>,
}

pub async fn delete_invoice(
    State(state): State<AppState>,
    Json(payload): Json<DeleteRequest>,
) -> impl IntoResponse {
    let id = match payload.id {
        Some(id) => id,
        None => return bad_request("Invoice id is required"),
    };

    match state.invoice_repo.delete(id).await {
        Ok(invoice) => (
            StatusCode::OK,
            Json(json!({
                "message": "Invoice deleted successfully",
                "deleted_invoice": invoice
            })),
        )
            .into_response(),
        Err(DomainError::NotFound) => not_found("Invoice not found"),
        Err(e) => error_response(e),
    }
}
