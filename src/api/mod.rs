pub mod auth;
pub mod category;
pub mod customer;
pub mod health;
pub mod invoice;
pub mod invoice_detail;
pub mod product;
pub mod report;
pub mod user;

use axum::{
    extract::DefaultBodyLimit,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
    Json, Router,
};
use serde_json::json;

use crate::domain::DomainError;
use crate::infrastructure::AppState;

pub fn api_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Auth
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout))
        .route("/auth/reset-password", post(auth::reset_password))
        // Users
        .route("/user/list", get(user::list_users))
        .route("/user/id/:id", get(user::get_user_by_id))
        .route("/user/create", post(user::create_user))
        .route("/user/update", put(user::update_user))
        .route("/user/delete", delete(user::delete_user))
        // Categories
        .route("/category/list", get(category::list_categories))
        .route("/category/id/:id", get(category::get_category_by_id))
        .route("/category/create", post(category::create_category))
        .route("/category/update", put(category::update_category))
        .route("/category/delete", delete(category::delete_category))
        // Customers
        .route("/customer/list", get(customer::list_customers))
        .route("/customer/id/:id", get(customer::get_customer_by_id))
        .route("/customer/create", post(customer::create_customer))
        .route("/customer/update", put(customer::update_customer))
        .route("/customer/delete", delete(customer::delete_customer))
        // Products (multipart create/update for the optional image)
        .route("/product/list", get(product::list_products))
        .route("/product/id/:id", get(product::get_product_by_id))
        .route("/product/create", post(product::create_product))
        .route("/product/update", put(product::update_product))
        .route("/product/delete", delete(product::delete_product))
        // Invoices
        .route("/invoice/list", get(invoice::list_invoices))
        .route("/invoice/id/:id", get(invoice::get_invoice_by_id))
        .route("/invoice/create", post(invoice::create_invoice))
        .route("/invoice/update", put(invoice::update_invoice))
        .route("/invoice/delete", delete(invoice::delete_invoice))
        // Invoice details
        .route("/invoice_detail/list", get(invoice_detail::list_invoice_details))
        .route("/invoice_detail/id/:id", get(invoice_detail::get_invoice_detail_by_id))
        .route("/invoice_detail/create", post(invoice_detail::create_invoice_detail))
        .route("/invoice_detail/update", put(invoice_detail::update_invoice_detail))
        .route("/invoice_detail/delete", delete(invoice_detail::delete_invoice_detail))
        // Sales reports (protected)
        .route("/reports/sales/daily", get(report::daily_sales_report))
        .route("/reports/sales/weekly", get(report::weekly_sales_report))
        .route("/reports/sales/monthly", get(report::monthly_sales_report))
        .route("/reports/sales/by-product", get(report::sales_by_product))
        .route("/reports/sales/by-category", get(report::sales_by_category))
        .route("/reports/sales/by-user", get(report::sales_by_user))
        // Product images go up to 5 MB, above axum's default body cap.
        .layer(DefaultBodyLimit::max(8 * 1024 * 1024))
        .with_state(state)
}

/// Map a domain error onto the standardized `{"error": ...}` body.
pub(crate) fn error_response(err: DomainError) -> Response {
    let (status, message) = match err {
        DomainError::NotFound => (StatusCode::NOT_FOUND, "Resource not found".to_string()),
        DomainError::Validation(msg) | DomainError::Conflict(msg) => {
            (StatusCode::BAD_REQUEST, msg)
        }
        DomainError::Database(msg) => {
            tracing::error!("Storage failure: {}", msg);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            )
        }
    };
    (status, Json(json!({ "error": message }))).into_response()
}

pub(crate) fn bad_request(message: &str) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({ "error": message })),
    )
        .into_response()
}

pub(crate) fn not_found(message: &str) -> Response {
    (StatusCode::NOT_FOUND, Json(json!({ "error": message }))).into_response()
}
