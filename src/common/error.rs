// src/common/error.rs

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use rust_decimal::Decimal;
use serde_json::json;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("{kind} não encontrado: {id}")]
    NotFound { kind: &'static str, id: Uuid },

    // Referência para um registro que não existe (ex: categoryId inválido)
    #[error("Referência inválida em '{field}': {id}")]
    InvalidReference { field: &'static str, id: Uuid },

    // O registro ainda é usado por outro (ex: categoria com produtos)
    #[error("{kind} {id} ainda está em uso")]
    ReferenceInUse { kind: &'static str, id: Uuid },

    #[error("Estoque insuficiente para o produto {product_id}: disponível {available}, solicitado {requested}")]
    InsufficientStock {
        product_id: Uuid,
        available: Decimal,
        requested: Decimal,
    },

    #[error("Transição de status inválida: {from} -> {to}")]
    InvalidStatusTransition { from: String, to: String },

    #[error("Conflito: {0}")]
    Conflict(String),

    #[error("Erro de serialização: {0}")]
    SerializationError(#[from] serde_json::Error),

    // `anyhow::Error` captura o contexto de qualquer outro erro inesperado.
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),
}

impl AppError {
    pub fn not_found(kind: &'static str, id: Uuid) -> Self {
        AppError::NotFound { kind, id }
    }

    /// Monta um `ValidationErrors` de um único campo, para regras que o derive não cobre.
    pub fn field(field: &'static str, code: &'static str, message: &'static str) -> Self {
        let mut err = validator::ValidationError::new(code);
        err.message = Some(message.into());
        let mut errors = validator::ValidationErrors::new();
        errors.add(field, err);
        AppError::ValidationError(errors)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            // Retorna todos os detalhes da validação, campo a campo.
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .map(|e| {
                            e.message
                                .as_ref()
                                .map(|m| m.to_string())
                                .unwrap_or_else(|| e.code.to_string())
                        })
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "error": "Um ou mais campos são inválidos.",
                    "details": details,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            ref e @ AppError::NotFound { .. } => (StatusCode::NOT_FOUND, e.to_string()),
            ref e @ AppError::InvalidReference { .. } => {
                (StatusCode::UNPROCESSABLE_ENTITY, e.to_string())
            }
            ref e @ (AppError::ReferenceInUse { .. }
            | AppError::InsufficientStock { .. }
            | AppError::InvalidStatusTransition { .. }
            | AppError::Conflict(_)) => (StatusCode::CONFLICT, e.to_string()),

            // Todos os outros erros viram 500. O `tracing` loga a mensagem detalhada.
            ref e => {
                tracing::error!("Erro Interno do Servidor: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Ocorreu um erro inesperado.".to_string(),
                )
            }
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
