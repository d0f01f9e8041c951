use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use salepoint::{api, auth, db, AppState};
use tower::util::ServiceExt; // for `oneshot`

async fn setup_test_app() -> Router {
    let database = db::init_db("sqlite::memory:")
        .await
        .expect("Failed to init DB");
    let static_dir = std::env::temp_dir().join("salepoint_test_static");
    api::api_router(AppState::new(database, static_dir))
}

fn json_request(method: &str, uri: &str, payload: serde_json::Value) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .method(method)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(&payload).unwrap()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn test_health_check() {
    let app = setup_test_app().await;

    let req = Request::builder()
        .uri("/health")
        .method("GET")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(req).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
}

#[tokio::test]
async fn test_get_missing_resources_return_404() {
    let app = setup_test_app().await;

    for uri in [
        "/user/id/999",
        "/category/id/999",
        "/customer/id/999",
        "/product/id/999",
        "/invoice/id/999",
        "/invoice_detail/id/999",
    ] {
        let req = Request::builder()
            .uri(uri)
            .method("GET")
            .body(Body::empty())
            .unwrap();
        let response = app.clone().oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "GET {}", uri);

        let json = body_json(response).await;
        assert!(json["error"].is_string(), "GET {} body: {}", uri, json);
    }
}

#[tokio::test]
async fn test_reports_require_token() {
    let app = setup_test_app().await;

    for uri in [
        "/reports/sales/daily",
        "/reports/sales/weekly",
        "/reports/sales/monthly",
        "/reports/sales/by-product",
        "/reports/sales/by-category",
        "/reports/sales/by-user",
    ] {
        let req = Request::builder()
            .uri(uri)
            .method("GET")
            .body(Body::empty())
            .unwrap();
        let response = app.clone().oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "GET {}", uri);
    }
}

#[tokio::test]
async fn test_reports_accept_valid_token() {
    let app = setup_test_app().await;
    let token = auth::create_jwt(1, "tester", "admin").expect("Failed to create token");

    let req = Request::builder()
        .uri("/reports/sales/daily")
        .method("GET")
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(req).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["period"], "daily");
    assert_eq!(json["total_sales"], 0.0);
}

#[tokio::test]
async fn test_grouping_reports_return_bare_arrays() {
    let app = setup_test_app().await;
    let token = auth::create_jwt(1, "tester", "admin").expect("Failed to create token");

    for uri in [
        "/reports/sales/by-product",
        "/reports/sales/by-category",
        "/reports/sales/by-user",
    ] {
        let req = Request::builder()
            .uri(uri)
            .method("GET")
            .header(header::AUTHORIZATION, format!("Bearer {}", token))
            .body(Body::empty())
            .unwrap();
        let response = app.clone().oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK, "GET {}", uri);

        let json = body_json(response).await;
        assert!(json.is_array(), "GET {} body: {}", uri, json);
    }
}

#[tokio::test]
async fn test_detail_create_missing_fields_rejected_before_storage() {
    let app = setup_test_app().await;

    // Missing price
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/invoice_detail/create",
            serde_json::json!({ "invoice_id": 1, "product_id": 1, "qty": 2 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Price is required");

    // Missing qty
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/invoice_detail/create",
            serde_json::json!({ "invoice_id": 1, "product_id": 1, "price": 1.5 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Quantity is required");

    // Nothing was persisted by the rejected requests
    let req = Request::builder()
        .uri("/invoice_detail/list")
        .method("GET")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["total"], 0);
}

#[tokio::test]
async fn test_reset_password_flow() {
    let app = setup_test_app().await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/auth/register",
            serde_json::json!({
                "username": "carol",
                "email": "carol@example.com",
                "password": "Str0ng@pass"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/auth/login",
            serde_json::json!({ "username": "carol", "password": "Str0ng@pass" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let token = json["access_token"].as_str().unwrap().to_string();

    let authed_request = |payload: serde_json::Value| {
        Request::builder()
            .uri("/auth/reset-password")
            .method("POST")
            .header(header::AUTHORIZATION, format!("Bearer {}", token))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&payload).unwrap()))
            .unwrap()
    };

    // No token at all
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/auth/reset-password",
            serde_json::json!({ "old_password": "Str0ng@pass", "new_password": "N3w@passwd" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // Wrong old password
    let response = app
        .clone()
        .oneshot(authed_request(serde_json::json!({
            "old_password": "Wr0ng@pass",
            "new_password": "N3w@passwd"
        })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Invalid old password");

    // New password must pass the policy
    let response = app
        .clone()
        .oneshot(authed_request(serde_json::json!({
            "old_password": "Str0ng@pass",
            "new_password": "weakpass"
        })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Password must contain at least one uppercase letter");

    // Successful reset
    let response = app
        .clone()
        .oneshot(authed_request(serde_json::json!({
            "old_password": "Str0ng@pass",
            "new_password": "N3w@passwd"
        })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Password reset successfully");

    // Old password no longer works, the new one does
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/auth/login",
            serde_json::json!({ "username": "carol", "password": "Str0ng@pass" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .oneshot(json_request(
            "POST",
            "/auth/login",
            serde_json::json!({ "username": "carol", "password": "N3w@passwd" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_register_rejects_duplicates_and_weak_passwords() {
    let app = setup_test_app().await;

    // Missing fields
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/auth/register",
            serde_json::json!({ "username": "alice" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Weak password
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/auth/register",
            serde_json::json!({
                "username": "alice",
                "email": "alice@example.com",
                "password": "short"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Password must be at least 8 characters long");

    // Valid registration
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/auth/register",
            serde_json::json!({
                "username": "alice",
                "email": "alice@example.com",
                "password": "Str0ng@pass"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    // The hash never leaks into responses.
    assert!(json["user"].get("password_hash").is_none());

    // Duplicate username
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/auth/register",
            serde_json::json!({
                "username": "alice",
                "email": "other@example.com",
                "password": "Str0ng@pass"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Username already exists");
}

#[tokio::test]
async fn test_login_wrong_password_is_401() {
    let app = setup_test_app().await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/auth/register",
            serde_json::json!({
                "username": "bob",
                "email": "bob@example.com",
                "password": "Str0ng@pass"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/auth/login",
            serde_json::json!({ "username": "bob", "password": "Wr0ng@pass" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Invalid username or password");

    let response = app
        .oneshot(json_request(
            "POST",
            "/auth/login",
            serde_json::json!({ "username": "bob", "password": "Str0ng@pass" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["access_token"].is_string());
}

#[tokio::test]
async fn test_update_without_fields_is_400() {
    let app = setup_test_app().await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/customer/create",
            serde_json::json!({ "name": "Walk-in" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    let id = json["customer"]["id"].as_i64().unwrap();

    let response = app
        .oneshot(json_request(
            "PUT",
            "/customer/update",
            serde_json::json!({ "id": id }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "At least one field to update is required");
}

#[tokio::test]
async fn test_category_delete_with_products_is_400() {
    let app = setup_test_app().await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/category/create",
            serde_json::json!({ "name": "Beverages" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    let category_id = json["category"]["id"].as_i64().unwrap();

    // Multipart product create
    let boundary = "test-boundary";
    let body = format!(
        "--{b}\r\nContent-Disposition: form-data; name=\"name\"\r\n\r\nEspresso\r\n\
         --{b}\r\nContent-Disposition: form-data; name=\"price\"\r\n\r\n1.5\r\n\
         --{b}\r\nContent-Disposition: form-data; name=\"stock\"\r\n\r\n10\r\n\
         --{b}\r\nContent-Disposition: form-data; name=\"category_id\"\r\n\r\n{id}\r\n\
         --{b}--\r\n",
        b = boundary,
        id = category_id
    );
    let req = Request::builder()
        .uri("/product/create")
        .method("POST")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", boundary),
        )
        .body(Body::from(body))
        .unwrap();
    let response = app.clone().oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["product"]["name"], "Espresso");

    // Category now has a dependent product
    let response = app
        .clone()
        .oneshot(json_request(
            "DELETE",
            "/category/delete",
            serde_json::json!({ "id": category_id }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_invoice_lifecycle_end_to_end() {
    let app = setup_test_app().await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/auth/register",
            serde_json::json!({
                "username": "cashier",
                "email": "cashier@example.com",
                "password": "Str0ng@pass"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    let user_id = json["user"]["id"].as_i64().unwrap();

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/category/create",
            serde_json::json!({ "name": "Beverages" }),
        ))
        .await
        .unwrap();
    let json = body_json(response).await;
    let category_id = json["category"]["id"].as_i64().unwrap();

    let boundary = "test-boundary";
    let body = format!(
        "--{b}\r\nContent-Disposition: form-data; name=\"name\"\r\n\r\nEspresso\r\n\
         --{b}\r\nContent-Disposition: form-data; name=\"price\"\r\n\r\n1.5\r\n\
         --{b}\r\nContent-Disposition: form-data; name=\"category_id\"\r\n\r\n{id}\r\n\
         --{b}--\r\n",
        b = boundary,
        id = category_id
    );
    let req = Request::builder()
        .uri("/product/create")
        .method("POST")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", boundary),
        )
        .body(Body::from(body))
        .unwrap();
    let response = app.clone().oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    let product_id = json["product"]["id"].as_i64().unwrap();

    // Invoice defaults to completed when no status is supplied
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/invoice/create",
            serde_json::json!({ "user_id": user_id, "total_amount": 3.0 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    let invoice_id = json["invoice"]["id"].as_i64().unwrap();
    assert_eq!(json["invoice"]["status"], "completed");

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/invoice_detail/create",
            serde_json::json!({
                "invoice_id": invoice_id,
                "product_id": product_id,
                "price": 1.5,
                "qty": 2
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    let detail_id = json["invoice_detail"]["id"].as_i64().unwrap();
    assert_eq!(json["invoice_detail"]["total"], 3.0);

    // Patching qty alone recomputes total against the stored price
    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            "/invoice_detail/update",
            serde_json::json!({ "id": detail_id, "qty": 3 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["invoice_detail"]["total"], 4.5);

    // Fetching the invoice includes its enriched line items
    let req = Request::builder()
        .uri(format!("/invoice/id/{}", invoice_id))
        .method("GET")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["invoice"]["details"][0]["product_name"], "Espresso");
    assert_eq!(json["invoice"]["details"][0]["total"], 4.5);

    // Delete returns the pre-deletion snapshot
    let response = app
        .oneshot(json_request(
            "DELETE",
            "/invoice_detail/delete",
            serde_json::json!({ "id": detail_id }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["deleted_invoice_detail"]["qty"], 3);
    assert_eq!(json["deleted_invoice_detail"]["total"], 4.5);
}
