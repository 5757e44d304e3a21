// src/models/inventory.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::common::filter::Searchable;
use crate::common::validation::validate_not_negative;
use crate::db::store::{Creatable, Entity};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MovementType {
    In,         // Entrada: soma ao estoque
    Out,        // Saída: subtrai do estoque
    Adjustment, // Recontagem: o estoque passa a ser a quantidade informada
}

impl MovementType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MovementType::In => "in",
            MovementType::Out => "out",
            MovementType::Adjustment => "adjustment",
        }
    }
}

// --- STOCK MOVEMENT (Histórico, só inserção) ---
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockMovement {
    pub id: Uuid,
    pub product_id: Uuid,
    #[serde(rename = "type")]
    pub movement_type: MovementType,
    pub quantity: Decimal,
    pub reason: String,
    pub reference: Option<String>,
    pub batch_number: Option<String>,
    pub expiry_date: Option<NaiveDate>,
    pub date: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct StockMovementDraft {
    pub product_id: Uuid,

    #[serde(rename = "type")]
    pub movement_type: MovementType,

    #[validate(custom(function = "validate_not_negative"))]
    pub quantity: Decimal,

    #[validate(length(min = 1, message = "O motivo é obrigatório."))]
    pub reason: String,

    pub reference: Option<String>,
    pub batch_number: Option<String>,
    pub expiry_date: Option<NaiveDate>,
}

impl StockMovementDraft {
    /// Entradas e saídas precisam de quantidade positiva; ajuste aceita zero.
    pub fn validate_consistency(&self) -> Result<(), validator::ValidationError> {
        if self.movement_type != MovementType::Adjustment && self.quantity <= Decimal::ZERO {
            let mut err = validator::ValidationError::new("range");
            err.message = Some("A quantidade deve ser maior que zero.".into());
            return Err(err);
        }
        Ok(())
    }
}

impl Entity for StockMovement {
    const KIND: &'static str = "Movimentação de estoque";

    fn id(&self) -> Uuid {
        self.id
    }
}

impl Creatable for StockMovement {
    type Draft = StockMovementDraft;

    fn from_draft(id: Uuid, now: DateTime<Utc>, draft: StockMovementDraft) -> Self {
        Self {
            id,
            product_id: draft.product_id,
            movement_type: draft.movement_type,
            quantity: draft.quantity,
            reason: draft.reason,
            reference: draft.reference,
            batch_number: draft.batch_number,
            expiry_date: draft.expiry_date,
            date: now,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StockMovementDetail {
    #[serde(flatten)]
    pub movement: StockMovement,
    pub product_name: Option<String>,
}

impl Searchable for StockMovementDetail {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = Vec::with_capacity(2);
        if let Some(name) = &self.product_name {
            fields.push(name.as_str());
        }
        fields.push(&self.movement.reason);
        fields
    }

    fn facet(&self) -> Option<&str> {
        Some(self.movement.movement_type.as_str())
    }
}

/// Resultado de uma movimentação: o registro e o novo saldo.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordedMovement {
    pub movement: StockMovement,
    pub previous_stock: Decimal,
    pub stock_level: Decimal,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LowStockAlert {
    pub product_id: Uuid,
    pub name: String,
    pub unit: String,
    pub stock_level: Decimal,
    pub min_stock_level: Decimal,
    pub shortfall: Decimal,
    pub supplier_name: Option<String>,
}
