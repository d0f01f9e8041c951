use axum::{
    body::Bytes,
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::json;

use crate::api::{bad_request, error_response, not_found};
use crate::domain::{CreateProductInput, DomainError, ProductPatch};
use crate::infrastructure::AppState;
use crate::models::product;
use crate::services::upload;

/// Product plus a ready-to-use URL for its image, if any.
fn product_json(product: &product::Model) -> serde_json::Value {
    let mut value = serde_json::to_value(product).unwrap_or_default();
    if let Some(image) = &product.image {
        value["image_url"] = json!(format!("/static/{}", image));
    }
    value
}

pub async fn list_products(State(state): State<AppState>) -> impl IntoResponse {
    match state.product_repo.find_all().await {
        Ok(products) => {
            let products: Vec<serde_json::Value> = products.iter().map(product_json).collect();
            Json(json!({ "products": products, "total": products.len() })).into_response()
        }
        Err(e) => error_response(e),
    }
}

pub async fn get_product_by_id(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    match state.product_repo.find_by_id(id).await {
        Ok(Some(product)) => Json(json!({ "product": product_json(&product) })).into_response(),
        Ok(None) => not_found("Product not found"),
        Err(e) => error_response(e),
    }
}

/// Fields collected from the multipart form. Everything is optional at
/// parse time; requiredness is checked per operation.
#[derive(Default)]
struct ProductForm {
    id: Option<i32>,
    name: Option<String>,
    price: Option<f64>,
    stock: Option<i32>,
    description: Option<String>,
    category_id: Option<i32>,
    image: Option<(String, Bytes)>,
}

async fn parse_product_form(mut multipart: Multipart) -> Result<ProductForm, String> {
    let mut form = ProductForm::default();

    while let Some(field) = multipart.next_field().await.map_err(|e| e.to_string())? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "image" => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                // Browsers send an empty file part when nothing was picked.
                if file_name.is_empty() {
                    continue;
                }
                let data = field.bytes().await.map_err(|e| e.to_string())?;
                form.image = Some((file_name, data));
            }
            "id" => {
                let text = field.text().await.map_err(|e| e.to_string())?;
                form.id = Some(text.parse().map_err(|_| "Invalid id".to_string())?);
            }
            "name" => form.name = Some(field.text().await.map_err(|e| e.to_string())?),
            "price" => {
                let text = field.text().await.map_err(|e| e.to_string())?;
                form.price = Some(text.parse().map_err(|_| "Invalid price".to_string())?);
            }
            "stock" => {
                let text = field.text().await.map_err(|e| e.to_string())?;
                form.stock = Some(text.parse().map_err(|_| "Invalid stock".to_string())?);
            }
            "description" => {
                form.description = Some(field.text().await.map_err(|e| e.to_string())?)
            }
            "category_id" => {
                let text = field.text().await.map_err(|e| e.to_string())?;
                form.category_id =
                    Some(text.parse().map_err(|_| "Invalid category_id".to_string())?);
            }
            _ => {}
        }
    }

    Ok(form)
}

pub async fn create_product(
    State(state): State<AppState>,
    multipart: Multipart,
) -> impl IntoResponse {
    let form = match parse_product_form(multipart).await {
        Ok(form) => form,
        Err(msg) => return bad_request(&msg),
    };

    let name = match form.name {
        Some(name) if !name.is_empty() => name,
        _ => return bad_request("Product name is required"),
    };
    let category_id = match form.category_id {
        Some(id) => id,
        None => return bad_request("Category ID is required"),
    };
    let price = match form.price {
        Some(price) => price,
        None => return bad_request("Product price is required"),
    };

    let image = match form.image {
        Some((file_name, data)) => {
            match upload::save_image(&state.static_dir, &file_name, &data) {
                Ok(relative) => Some(relative),
                Err(msg) => return bad_request(&msg),
            }
        }
        None => None,
    };

    let input = CreateProductInput {
        name,
        price,
        stock: form.stock.unwrap_or(0),
        description: form.description,
        category_id,
        image,
    };

    match state.product_repo.create(input).await {
        Ok(product) => (
            StatusCode::CREATED,
            Json(json!({
                "message": "Product created successfully",
                "product": product_json(&product)
            })),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn update_product(
    State(state): State<AppState>,
    multipart: Multipart,
) -> impl IntoResponse {
    let form = match parse_product_form(multipart).await {
        Ok(form) => form,
        Err(msg) => return bad_request(&msg),
    };

    let id = match form.id {
        Some(id) => id,
        None => return bad_request("Product id is required"),
    };

    let existing = match state.product_repo.find_by_id(id).await {
        Ok(Some(product)) => product,
        Ok(None) => return not_found("Product not found"),
        Err(e) => return error_response(e),
    };

    // Save the replacement first; the old file is only removed once the
    // new one is on disk.
    let image = match form.image {
        Some((file_name, data)) => {
            match upload::save_image(&state.static_dir, &file_name, &data) {
                Ok(relative) => {
                    if let Some(old) = &existing.image {
                        upload::remove_image(&state.static_dir, old);
                    }
                    Some(relative)
                }
                Err(msg) => return bad_request(&msg),
            }
        }
        None => None,
    };

    let patch = ProductPatch {
        name: form.name,
        price: form.price,
        stock: form.stock,
        description: form.description,
        category_id: form.category_id,
        image,
    };

    if patch.is_empty() {
        return bad_request("At least one field to update is required");
    }

    match state.product_repo.update(id, patch).await {
        Ok(product) => (
            StatusCode::OK,
            Json(json!({
                "message": "Product updated successfully",
                "product": product_json(&product)
            })),
        )
            .into_response(),
        Err(DomainError::NotFound) => not_found("Product not found"),
        Err(e) => error_response(e),
    }
}

#[derive(Debug, Deserialize)]
pub struct DeleteRequest {
    pub id: Option<i32>,
}

pub async fn delete_product(
    State(state): State<AppState>,
    Json(payload): Json<DeleteRequest>,
) -> impl IntoResponse {
    let id = match payload.id {
        Some(id) => id,
        None => return bad_request("Product id is required"),
    };

    match state.product_repo.delete(id).await {
        Ok(product) => {
            if let Some(image) = &product.image {
                upload::remove_image(&state.static_dir, image);
            }
            (
                StatusCode::OK,
                Json(json!({
                    "message": "Product deleted successfully",
                    "deleted_product": product_json(&product)
                })),
            )
                .into_response()
        }
        Err(DomainError::NotFound) => not_found("Product not found"),
        Err(e) => error_response(e),
    }
}
