// src/handlers/catalog.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    common::{
        error::AppError,
        filter::{Facet, SearchFilter},
    },
    config::AppState,
    models::catalog::{CategoryDraft, CategoryPatch, ProductDraft, ProductPatch},
};

// ?search=lap&category=Electronics
#[derive(Debug, Default, Deserialize)]
pub struct ProductListQuery {
    pub search: Option<String>,
    pub category: Option<String>,
}

impl ProductListQuery {
    fn filter(&self) -> SearchFilter {
        SearchFilter::new(self.search.as_deref(), Facet::parse(self.category.as_deref()))
    }
}

// ---
// Produtos
// ---

// GET /api/products
pub async fn list_products(
    State(app_state): State<AppState>,
    Query(query): Query<ProductListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let db = app_state.db.read().await;
    let products = app_state.catalog_service.list_products(&db, &query.filter());
    Ok((StatusCode::OK, Json(products)))
}

// GET /api/products/{id}
pub async fn get_product(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let db = app_state.db.read().await;
    let product = app_state.catalog_service.get_product(&db, id)?;
    Ok((StatusCode::OK, Json(product)))
}

// POST /api/products
pub async fn create_product(
    State(app_state): State<AppState>,
    Json(payload): Json<ProductDraft>,
) -> Result<impl IntoResponse, AppError> {
    let mut db = app_state.db.write().await;
    let product = app_state.catalog_service.create_product(&mut db, payload)?;
    Ok((StatusCode::CREATED, Json(product)))
}

// PUT /api/products/{id}
pub async fn update_product(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ProductPatch>,
) -> Result<impl IntoResponse, AppError> {
    let mut db = app_state.db.write().await;
    let product = app_state.catalog_service.update_product(&mut db, id, payload)?;
    Ok((StatusCode::OK, Json(product)))
}

// DELETE /api/products/{id}
pub async fn delete_product(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let mut db = app_state.db.write().await;
    app_state.catalog_service.delete_product(&mut db, id)?;
    Ok(StatusCode::NO_CONTENT)
}

// ---
// Categorias e subcategorias
// ---

// GET /api/categories
pub async fn list_categories(State(app_state): State<AppState>) -> impl IntoResponse {
    let db = app_state.db.read().await;
    Json(app_state.catalog_service.list_categories(&db))
}

// POST /api/categories
pub async fn create_category(
    State(app_state): State<AppState>,
    Json(payload): Json<CategoryDraft>,
) -> Result<impl IntoResponse, AppError> {
    let mut db = app_state.db.write().await;
    let category = app_state.catalog_service.create_category(&mut db, payload)?;
    Ok((StatusCode::CREATED, Json(category)))
}

// PUT /api/categories/{id}
pub async fn update_category(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<CategoryPatch>,
) -> Result<impl IntoResponse, AppError> {
    let mut db = app_state.db.write().await;
    let category = app_state.catalog_service.update_category(&mut db, id, payload)?;
    Ok((StatusCode::OK, Json(category)))
}

// DELETE /api/categories/{id}
pub async fn delete_category(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let mut db = app_state.db.write().await;
    app_state.catalog_service.delete_category(&mut db, id)?;
    Ok(StatusCode::NO_CONTENT)
}

// POST /api/categories/{id}/subcategories
pub async fn create_subcategory(
    State(app_state): State<AppState>,
    Path(category_id): Path<Uuid>,
    Json(payload): Json<CategoryDraft>,
) -> Result<impl IntoResponse, AppError> {
    let mut db = app_state.db.write().await;
    let sub = app_state
        .catalog_service
        .create_subcategory(&mut db, category_id, payload)?;
    Ok((StatusCode::CREATED, Json(sub)))
}

// PUT /api/categories/{id}/subcategories/{sub_id}
pub async fn update_subcategory(
    State(app_state): State<AppState>,
    Path((category_id, sub_id)): Path<(Uuid, Uuid)>,
    Json(payload): Json<CategoryPatch>,
) -> Result<impl IntoResponse, AppError> {
    let mut db = app_state.db.write().await;
    let sub = app_state
        .catalog_service
        .update_subcategory(&mut db, category_id, sub_id, payload)?;
    Ok((StatusCode::OK, Json(sub)))
}

// DELETE /api/categories/{id}/subcategories/{sub_id}
pub async fn delete_subcategory(
    State(app_state): State<AppState>,
    Path((category_id, sub_id)): Path<(Uuid, Uuid)>,
) -> Result<impl IntoResponse, AppError> {
    let mut db = app_state.db.write().await;
    app_state
        .catalog_service
        .delete_subcategory(&mut db, category_id, sub_id)?;
    Ok(StatusCode::NO_CONTENT)
}
