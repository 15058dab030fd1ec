//! Product handlers and route definitions.
//!
//! Each handler is a plain function over [`RequestContext`]: it reads
//! params/query/body, performs store operations, and writes exactly one
//! terminal response.

use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Json, Response};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::routing::{PatternError, RequestContext, RouteTable};
use crate::store::Document;

/// Table holding the product documents.
pub const PRODUCTS_TABLE: &str = "products";

/// The API route table, in declaration order.
pub fn api_routes() -> Result<RouteTable, PatternError> {
    Ok(RouteTable::new()
        .route(Method::GET, "/products", list_products)?
        .route(Method::POST, "/products", create_product)?
        .route(Method::PUT, "/products/:id", update_product)?
        .route(Method::DELETE, "/products/:id", delete_product)?)
}

/// GET /products — all product documents, in insertion order.
fn list_products(ctx: RequestContext) -> Response {
    Json(ctx.store.select(PRODUCTS_TABLE)).into_response()
}

/// POST /products — create a product from the request body.
///
/// The id is generated here, not by the store. Absent or malformed
/// bodies are tolerated; missing fields are stored as null.
fn create_product(ctx: RequestContext) -> Response {
    let body = ctx.body.unwrap_or(Value::Null);

    let mut doc = Document::new();
    doc.insert("id".to_string(), Value::String(Uuid::new_v4().to_string()));
    doc.insert("name".to_string(), body_field(&body, "name"));
    doc.insert("price".to_string(), body_field(&body, "price"));

    match ctx.store.insert(PRODUCTS_TABLE, doc.clone()) {
        Ok(()) => (StatusCode::CREATED, Json(Value::Object(doc))).into_response(),
        Err(error) => {
            tracing::error!(%error, "Failed to persist new product");
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to persist product").into_response()
        }
    }
}

/// PUT /products/:id — update name/price from query parameters.
fn update_product(ctx: RequestContext) -> Response {
    let id = ctx.params.get("id").map(String::as_str).unwrap_or_default();

    let mut patch = Map::new();
    for field in ["name", "price"] {
        if let Some(value) = ctx.query.get(field) {
            patch.insert(field.to_string(), Value::String(value.clone()));
        }
    }

    match ctx.store.update(PRODUCTS_TABLE, id, patch.clone()) {
        Ok(true) => Json(Value::Object(patch)).into_response(),
        Ok(false) => (StatusCode::NOT_FOUND, "Product not found").into_response(),
        Err(error) => {
            tracing::error!(%error, product_id = %id, "Failed to persist product update");
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to persist product").into_response()
        }
    }
}

/// DELETE /products/:id — remove the product.
fn delete_product(ctx: RequestContext) -> Response {
    let id = ctx.params.get("id").map(String::as_str).unwrap_or_default();

    match ctx.store.delete(PRODUCTS_TABLE, id) {
        Ok(true) => format!("Product deleted: {}", id).into_response(),
        Ok(false) => (StatusCode::NOT_FOUND, "Product not found").into_response(),
        Err(error) => {
            tracing::error!(%error, product_id = %id, "Failed to persist product deletion");
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to persist product").into_response()
        }
    }
}

fn body_field(body: &Value, field: &str) -> Value {
    body.get(field).cloned().unwrap_or(Value::Null)
}
