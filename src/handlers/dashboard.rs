// src/handlers/dashboard.rs

use axum::{extract::State, response::IntoResponse, Json};

use crate::config::AppState;

// GET /api/dashboard/summary
pub async fn get_summary(State(app_state): State<AppState>) -> impl IntoResponse {
    let db = app_state.db.read().await;
    Json(app_state.dashboard_service.summary(&db))
}

// GET /api/dashboard/analytics
pub async fn get_analytics(State(app_state): State<AppState>) -> impl IntoResponse {
    let db = app_state.db.read().await;
    Json(app_state.dashboard_service.analytics(&db))
}
