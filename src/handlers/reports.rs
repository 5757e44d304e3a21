// src/handlers/reports.rs

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse},
    Json,
};
use chrono::Utc;

use crate::{
    common::{error::AppError, export},
    config::AppState,
    models::reports::{ReportKind, ReportQuery},
};

// GET /api/reports/{kind}?from=2024-01-01&to=2024-01-31
pub async fn get_report(
    State(app_state): State<AppState>,
    Path(kind): Path<ReportKind>,
    Query(query): Query<ReportQuery>,
) -> Result<impl IntoResponse, AppError> {
    let db = app_state.db.read().await;
    let response = app_state.report_service.response(&db, kind, &query)?;
    Ok((StatusCode::OK, Json(response)))
}

// GET /api/reports/{kind}/csv
pub async fn export_report_csv(
    State(app_state): State<AppState>,
    Path(kind): Path<ReportKind>,
    Query(query): Query<ReportQuery>,
) -> Result<impl IntoResponse, AppError> {
    let db = app_state.db.read().await;
    let report = app_state.report_service.generate(&db, kind, &query)?;
    let csv = export::to_csv(&report.records()?);

    let headers = [
        (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}_report.csv\"", kind.slug()),
        ),
    ];
    Ok((StatusCode::OK, headers, csv))
}

// GET /api/reports/{kind}/print
pub async fn print_report(
    State(app_state): State<AppState>,
    Path(kind): Path<ReportKind>,
    Query(query): Query<ReportQuery>,
) -> Result<impl IntoResponse, AppError> {
    let db = app_state.db.read().await;
    let report = app_state.report_service.generate(&db, kind, &query)?;
    let html = export::render_report_html(
        kind.title(),
        query.period(),
        Utc::now().date_naive(),
        &report.records()?,
    );
    Ok(Html(html))
}
