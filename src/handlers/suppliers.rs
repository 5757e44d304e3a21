// src/handlers/suppliers.rs

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
    models::supplier::{
        PurchaseOrderDraft, PurchaseOrderPatch, PurchaseOrderStatusChange, SupplierDraft,
        SupplierPatch,
    },
};

// ?search=tech&status=active (fornecedores e pedidos)
#[derive(Debug, Default, Deserialize)]
pub struct StatusListQuery {
    pub search: Option<String>,
    pub status: Option<String>,
}

impl StatusListQuery {
    pub fn filter(&self) -> SearchFilter {
        SearchFilter::new(self.search.as_deref(), Facet::parse(self.status.as_deref()))
    }
}

// ---
// Fornecedores
// ---

// GET /api/suppliers
pub async fn list_suppliers(
    State(app_state): State<AppState>,
    Query(query): Query<StatusListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let db = app_state.db.read().await;
    let suppliers = app_state.supplier_service.list_suppliers(&db, &query.filter());
    Ok((StatusCode::OK, Json(suppliers)))
}

// GET /api/suppliers/{id}
pub async fn get_supplier(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let db = app_state.db.read().await;
    let supplier = app_state.supplier_service.get_supplier(&db, id)?;
    Ok((StatusCode::OK, Json(supplier)))
}

// POST /api/suppliers
pub async fn create_supplier(
    State(app_state): State<AppState>,
    Json(payload): Json<SupplierDraft>,
) -> Result<impl IntoResponse, AppError> {
    let mut db = app_state.db.write().await;
    let supplier = app_state.supplier_service.create_supplier(&mut db, payload)?;
    Ok((StatusCode::CREATED, Json(supplier)))
}

// PUT /api/suppliers/{id}
pub async fn update_supplier(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<SupplierPatch>,
) -> Result<impl IntoResponse, AppError> {
    let mut db = app_state.db.write().await;
    let supplier = app_state.supplier_service.update_supplier(&mut db, id, payload)?;
    Ok((StatusCode::OK, Json(supplier)))
}

// DELETE /api/suppliers/{id}
pub async fn delete_supplier(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let mut db = app_state.db.write().await;
    app_state.supplier_service.delete_supplier(&mut db, id)?;
    Ok(StatusCode::NO_CONTENT)
}

// ---
// Pedidos de compra
// ---

// GET /api/purchase-orders
pub async fn list_purchase_orders(
    State(app_state): State<AppState>,
    Query(query): Query<StatusListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let db = app_state.db.read().await;
    let orders = app_state
        .supplier_service
        .list_purchase_orders(&db, &query.filter());
    Ok((StatusCode::OK, Json(orders)))
}

// GET /api/purchase-orders/{id}
pub async fn get_purchase_order(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let db = app_state.db.read().await;
    let order = app_state.supplier_service.get_purchase_order(&db, id)?;
    Ok((StatusCode::OK, Json(order)))
}

// POST /api/purchase-orders
pub async fn create_purchase_order(
    State(app_state): State<AppState>,
    Json(payload): Json<PurchaseOrderDraft>,
) -> Result<impl IntoResponse, AppError> {
    let mut db = app_state.db.write().await;
    let order = app_state
        .supplier_service
        .create_purchase_order(&mut db, payload)?;
    Ok((StatusCode::CREATED, Json(order)))
}

// PUT /api/purchase-orders/{id}
pub async fn update_purchase_order(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<PurchaseOrderPatch>,
) -> Result<impl IntoResponse, AppError> {
    let mut db = app_state.db.write().await;
    let order = app_state
        .supplier_service
        .update_purchase_order(&mut db, id, payload)?;
    Ok((StatusCode::OK, Json(order)))
}

// POST /api/purchase-orders/{id}/status
pub async fn transition_purchase_order(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<PurchaseOrderStatusChange>,
) -> Result<impl IntoResponse, AppError> {
    let mut db = app_state.db.write().await;
    let order = app_state
        .supplier_service
        .transition_purchase_order(&mut db, id, payload.status)?;
    Ok((StatusCode::OK, Json(order)))
}
