//! Sales report endpoints. All of them require a valid bearer token;
//! the `Claims` extractor rejects unauthenticated requests with 401.

use axum::{extract::State, response::IntoResponse, Json};

use crate::api::error_response;
use crate::infrastructure::auth::Claims;
use crate::infrastructure::AppState;
use crate::services::report_service;

pub async fn daily_sales_report(_claims: Claims, State(state): State<AppState>) -> impl IntoResponse {
    match report_service::daily_sales(state.db()).await {
        Ok(report) => Json(report).into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn weekly_sales_report(
    _claims: Claims,
    State(state): State<AppState>,
) -> impl IntoResponse {
    match report_service::weekly_sales(state.db()).await {
        Ok(report) => Json(report).into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn monthly_sales_report(
    _claims: Claims,
    State(state): State<AppState>,
) -> impl IntoResponse {
    match report_service::monthly_sales(state.db()).await {
        Ok(report) => Json(report).into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn sales_by_product(_claims: Claims, State(state): State<AppState>) -> impl IntoResponse {
    match report_service::sales_by_product(state.db()).await {
        Ok(rows) => Json(rows).into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn sales_by_category(
    _claims: Claims,
    State(state): State<AppState>,
) -> impl IntoResponse {
    match report_service::sales_by_category(state.db()).await {
        Ok(rows) => Json(rows).into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn sales_by_user(_claims: Claims, State(state): State<AppState>) -> impl IntoResponse {
    match report_service::sales_by_user(state.db()).await {
        Ok(rows) => Json(rows).into_response(),
        Err(e) => error_response(e),
    }
}
