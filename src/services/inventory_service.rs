// src/services/inventory_service.rs

use rust_decimal::Decimal;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::{alerts, error::AppError, filter::SearchFilter},
    db::Database,
    models::inventory::{
        LowStockAlert, MovementType, RecordedMovement, StockMovement, StockMovementDetail,
        StockMovementDraft,
    },
};

#[derive(Clone, Default)]
pub struct InventoryService;

impl InventoryService {
    pub fn new() -> Self {
        Self
    }

    /// Novo saldo depois da movimentação.
    fn next_stock_level(
        &self,
        product_id: Uuid,
        current: Decimal,
        movement_type: MovementType,
        quantity: Decimal,
    ) -> Result<Decimal, AppError> {
        match movement_type {
            MovementType::In => Ok(current + quantity),
            MovementType::Out if quantity > current => Err(AppError::InsufficientStock {
                product_id,
                available: current,
                requested: quantity,
            }),
            MovementType::Out => Ok(current - quantity),
            MovementType::Adjustment => Ok(quantity),
        }
    }

    // --- REGISTRAR MOVIMENTAÇÃO ---
    // Grava o histórico e aplica ao estoque do produto no mesmo `&mut Database`.
    pub fn record_movement(
        &self,
        db: &mut Database,
        draft: StockMovementDraft,
    ) -> Result<RecordedMovement, AppError> {
        draft.validate()?;
        draft.validate_consistency().map_err(|e| {
            let mut errors = validator::ValidationErrors::new();
            errors.add("quantity", e);
            AppError::ValidationError(errors)
        })?;

        let product = db.products.get(draft.product_id).ok_or(AppError::InvalidReference {
            field: "productId",
            id: draft.product_id,
        })?;
        let previous_stock = product.stock_level;
        let stock_level = self.next_stock_level(
            product.id,
            previous_stock,
            draft.movement_type,
            draft.quantity,
        )?;

        let movement = db.stock_movements.create(draft)?;
        let product = db.products.get_mut(movement.product_id)?;
        product.stock_level = stock_level;
        product.updated_at = movement.date;

        tracing::info!(
            "📦 Movimentação '{}' de {} em '{}': {} -> {}",
            movement.movement_type.as_str(),
            movement.quantity,
            product.name,
            previous_stock,
            stock_level
        );

        Ok(RecordedMovement { movement, previous_stock, stock_level })
    }

    fn movement_detail(&self, db: &Database, movement: &StockMovement) -> StockMovementDetail {
        StockMovementDetail {
            product_name: db.product_name(movement.product_id),
            movement: movement.clone(),
        }
    }

    pub fn list_movements(&self, db: &Database, filter: &SearchFilter) -> Vec<StockMovementDetail> {
        let details: Vec<StockMovementDetail> = db
            .stock_movements
            .all()
            .iter()
            .map(|m| self.movement_detail(db, m))
            .collect();
        filter.apply(&details).into_iter().cloned().collect()
    }

    pub fn get_movement(&self, db: &Database, id: Uuid) -> Result<StockMovementDetail, AppError> {
        let movement = db.stock_movements.find(id)?;
        Ok(self.movement_detail(db, movement))
    }

    // --- ALERTAS DE ESTOQUE BAIXO ---
    pub fn low_stock_alerts(&self, db: &Database) -> Vec<LowStockAlert> {
        alerts::low_stock(db.products.all())
            .into_iter()
            .map(|p| LowStockAlert {
                product_id: p.id,
                name: p.name.clone(),
                unit: p.unit.clone(),
                stock_level: p.stock_level,
                min_stock_level: p.min_stock_level,
                shortfall: p.min_stock_level - p.stock_level,
                supplier_name: p.supplier_id.and_then(|id| db.supplier_name(id)),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::filter::Facet;

    fn draft(product_id: Uuid, movement_type: MovementType, quantity: i64) -> StockMovementDraft {
        StockMovementDraft {
            product_id,
            movement_type,
            quantity: Decimal::from(quantity),
            reason: "Teste".into(),
            reference: None,
            batch_number: None,
            expiry_date: None,
        }
    }

    fn laptop(db: &Database) -> Uuid {
        db.products.all().iter().find(|p| p.name == "Laptop").unwrap().id
    }

    #[test]
    fn in_and_out_move_the_stock() {
        let service = InventoryService::new();
        let mut db = Database::with_sample_data();
        let id = laptop(&db);

        let recorded = service.record_movement(&mut db, draft(id, MovementType::In, 10)).unwrap();
        assert_eq!(recorded.previous_stock, Decimal::from(5));
        assert_eq!(recorded.stock_level, Decimal::from(15));

        service.record_movement(&mut db, draft(id, MovementType::Out, 15)).unwrap();
        assert_eq!(db.products.get(id).unwrap().stock_level, Decimal::ZERO);
    }

    #[test]
    fn out_beyond_stock_records_nothing() {
        let service = InventoryService::new();
        let mut db = Database::with_sample_data();
        let id = laptop(&db);
        let movements_before = db.stock_movements.len();

        let err = service.record_movement(&mut db, draft(id, MovementType::Out, 6)).unwrap_err();

        assert!(matches!(err, AppError::InsufficientStock { .. }));
        assert_eq!(db.stock_movements.len(), movements_before);
        assert_eq!(db.products.get(id).unwrap().stock_level, Decimal::from(5));
    }

    #[test]
    fn adjustment_sets_the_count() {
        let service = InventoryService::new();
        let mut db = Database::with_sample_data();
        let id = laptop(&db);

        service.record_movement(&mut db, draft(id, MovementType::Adjustment, 0)).unwrap();
        assert_eq!(db.products.get(id).unwrap().stock_level, Decimal::ZERO);

        // Entrada com quantidade zero não é aceita
        let err = service.record_movement(&mut db, draft(id, MovementType::In, 0)).unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }

    #[test]
    fn unknown_product_is_invalid_reference() {
        let service = InventoryService::new();
        let mut db = Database::with_sample_data();
        let err = service
            .record_movement(&mut db, draft(Uuid::new_v4(), MovementType::In, 1))
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidReference { field: "productId", .. }));
    }

    #[test]
    fn alerts_follow_movements() {
        let service = InventoryService::new();
        let mut db = Database::with_sample_data();
        let id = laptop(&db);

        let alerts = service.low_stock_alerts(&db);
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].shortfall, Decimal::from(5));
        assert_eq!(alerts[0].supplier_name.as_deref(), Some("Tech Supplies Co."));

        service.record_movement(&mut db, draft(id, MovementType::In, 6)).unwrap();
        assert!(service.low_stock_alerts(&db).is_empty());
    }

    #[test]
    fn movements_filter_by_type_and_text() {
        let service = InventoryService::new();
        let db = Database::with_sample_data();

        let outs = service.list_movements(&db, &SearchFilter::new(None, Facet::parse(Some("out"))));
        assert_eq!(outs.len(), 1);
        assert_eq!(outs[0].product_name.as_deref(), Some("T-Shirt"));

        let purchases = service.list_movements(&db, &SearchFilter::new(Some("purchase"), Facet::All));
        assert_eq!(purchases.len(), 1);
        assert_eq!(purchases[0].movement.reference.as_deref(), Some("PO-001"));
    }
}
