// src/handlers/inventory.rs

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
    models::inventory::StockMovementDraft,
};

// ?search=laptop&type=in
#[derive(Debug, Default, Deserialize)]
pub struct MovementListQuery {
    pub search: Option<String>,
    #[serde(rename = "type")]
    pub movement_type: Option<String>,
}

// GET /api/inventory/movements
pub async fn list_movements(
    State(app_state): State<AppState>,
    Query(query): Query<MovementListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let filter = SearchFilter::new(
        query.search.as_deref(),
        Facet::parse(query.movement_type.as_deref()),
    );
    let db = app_state.db.read().await;
    let movements = app_state.inventory_service.list_movements(&db, &filter);
    Ok((StatusCode::OK, Json(movements)))
}

// GET /api/inventory/movements/{id}
pub async fn get_movement(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let db = app_state.db.read().await;
    let movement = app_state.inventory_service.get_movement(&db, id)?;
    Ok((StatusCode::OK, Json(movement)))
}

// POST /api/inventory/movements
// Entrada, saída ou ajuste; o saldo do produto muda junto.
pub async fn record_movement(
    State(app_state): State<AppState>,
    Json(payload): Json<StockMovementDraft>,
) -> Result<impl IntoResponse, AppError> {
    let mut db = app_state.db.write().await;
    let recorded = app_state.inventory_service.record_movement(&mut db, payload)?;
    Ok((StatusCode::CREATED, Json(recorded)))
}

// GET /api/alerts/low-stock
pub async fn low_stock_alerts(State(app_state): State<AppState>) -> impl IntoResponse {
    let db = app_state.db.read().await;
    Json(app_state.inventory_service.low_stock_alerts(&db))
}
