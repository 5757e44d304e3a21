// src/handlers/finance.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse},
    Json,
};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    config::AppState,
    handlers::suppliers::StatusListQuery,
    models::finance::{BillDraft, InvoiceStatusChange},
};

// POST /api/bills/preview
// Só calcula; nada é gravado.
pub async fn preview_bill(
    State(app_state): State<AppState>,
    Json(payload): Json<BillDraft>,
) -> Result<impl IntoResponse, AppError> {
    let bill = app_state.finance_service.preview(&payload)?;
    Ok((StatusCode::OK, Json(bill)))
}

// GET /api/invoices?search=&status=paid
pub async fn list_invoices(
    State(app_state): State<AppState>,
    Query(query): Query<StatusListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let db = app_state.db.read().await;
    let invoices = app_state.finance_service.list_invoices(&db, &query.filter());
    Ok((StatusCode::OK, Json(invoices)))
}

// POST /api/invoices
pub async fn issue_invoice(
    State(app_state): State<AppState>,
    Json(payload): Json<BillDraft>,
) -> Result<impl IntoResponse, AppError> {
    let mut db = app_state.db.write().await;
    let invoice = app_state.finance_service.issue_invoice(&mut db, payload)?;
    Ok((StatusCode::CREATED, Json(invoice)))
}

// GET /api/invoices/{id}
pub async fn get_invoice(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let db = app_state.db.read().await;
    let invoice = app_state.finance_service.get_invoice(&db, id)?;
    Ok((StatusCode::OK, Json(invoice)))
}

// POST /api/invoices/{id}/status
pub async fn set_invoice_status(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<InvoiceStatusChange>,
) -> Result<impl IntoResponse, AppError> {
    let mut db = app_state.db.write().await;
    let invoice = app_state
        .finance_service
        .set_invoice_status(&mut db, id, payload.status)?;
    Ok((StatusCode::OK, Json(invoice)))
}

// GET /api/invoices/{id}/print
pub async fn print_invoice(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let db = app_state.db.read().await;
    let html = app_state.finance_service.print_invoice(&db, id)?;
    Ok(Html(html))
}
