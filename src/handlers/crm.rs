// src/handlers/crm.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    config::AppState,
    handlers::suppliers::StatusListQuery,
    models::crm::{CustomerDraft, CustomerPatch},
};

// GET /api/customers?search=&status=vip
pub async fn list_customers(
    State(app_state): State<AppState>,
    Query(query): Query<StatusListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let db = app_state.db.read().await;
    let customers = app_state.crm_service.list_customers(&db, &query.filter());
    Ok((StatusCode::OK, Json(customers)))
}

// GET /api/customers/{id}
pub async fn get_customer(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let db = app_state.db.read().await;
    let customer = app_state.crm_service.get_customer(&db, id)?;
    Ok((StatusCode::OK, Json(customer)))
}

// POST /api/customers
pub async fn create_customer(
    State(app_state): State<AppState>,
    Json(payload): Json<CustomerDraft>,
) -> Result<impl IntoResponse, AppError> {
    let mut db = app_state.db.write().await;
    let customer = app_state.crm_service.create_customer(&mut db, payload)?;
    Ok((StatusCode::CREATED, Json(customer)))
}

// PUT /api/customers/{id}
pub async fn update_customer(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<CustomerPatch>,
) -> Result<impl IntoResponse, AppError> {
    let mut db = app_state.db.write().await;
    let customer = app_state.crm_service.update_customer(&mut db, id, payload)?;
    Ok((StatusCode::OK, Json(customer)))
}

// DELETE /api/customers/{id}
pub async fn delete_customer(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let mut db = app_state.db.write().await;
    app_state.crm_service.delete_customer(&mut db, id)?;
    Ok(StatusCode::NO_CONTENT)
}
