// src/services/supplier_service.rs

use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::{error::AppError, filter::SearchFilter},
    db::{Database, Entity},
    models::{
        inventory::{MovementType, StockMovementDraft},
        supplier::{
            PurchaseOrder, PurchaseOrderDetail, PurchaseOrderDraft, PurchaseOrderLine,
            PurchaseOrderPatch, PurchaseOrderStatus, Supplier, SupplierDraft, SupplierPatch,
            SupplierStatus,
        },
    },
    services::inventory_service::InventoryService,
};

#[derive(Clone)]
pub struct SupplierService {
    inventory_service: InventoryService,
}

impl SupplierService {
    pub fn new(inventory_service: InventoryService) -> Self {
        Self { inventory_service }
    }

    // --- FORNECEDORES ---

    pub fn list_suppliers(&self, db: &Database, filter: &SearchFilter) -> Vec<Supplier> {
        filter.apply(db.suppliers.all()).into_iter().cloned().collect()
    }

    pub fn get_supplier(&self, db: &Database, id: Uuid) -> Result<Supplier, AppError> {
        db.suppliers.find(id).cloned()
    }

    pub fn create_supplier(
        &self,
        db: &mut Database,
        draft: SupplierDraft,
    ) -> Result<Supplier, AppError> {
        let supplier = db.suppliers.create(draft)?;
        tracing::info!("✅ Fornecedor criado: {} ({})", supplier.name, supplier.id);
        Ok(supplier)
    }

    pub fn update_supplier(
        &self,
        db: &mut Database,
        id: Uuid,
        patch: SupplierPatch,
    ) -> Result<Supplier, AppError> {
        let supplier = db.suppliers.update(id, patch)?;
        tracing::info!("✏️ Fornecedor atualizado: {}", supplier.name);
        Ok(supplier)
    }

    pub fn delete_supplier(&self, db: &mut Database, id: Uuid) -> Result<Supplier, AppError> {
        db.suppliers.find(id)?;
        let in_use = db.products.all().iter().any(|p| p.supplier_id == Some(id))
            || db.purchase_orders.all().iter().any(|po| po.supplier_id == id);
        if in_use {
            return Err(AppError::ReferenceInUse { kind: Supplier::KIND, id });
        }
        let removed = db.suppliers.delete(id)?;
        tracing::info!("🗑️ Fornecedor removido: {}", removed.name);
        Ok(removed)
    }

    // --- PEDIDOS DE COMPRA ---

    fn order_detail(&self, db: &Database, order: &PurchaseOrder) -> PurchaseOrderDetail {
        PurchaseOrderDetail {
            supplier_name: db.supplier_name(order.supplier_id),
            order: order.clone(),
        }
    }

    fn check_lines(&self, db: &Database, items: &[PurchaseOrderLine]) -> Result<(), AppError> {
        for product_id in items.iter().filter_map(|line| line.product_id) {
            if !db.products.contains(product_id) {
                return Err(AppError::InvalidReference { field: "productId", id: product_id });
            }
        }
        Ok(())
    }

    pub fn list_purchase_orders(
        &self,
        db: &Database,
        filter: &SearchFilter,
    ) -> Vec<PurchaseOrderDetail> {
        let details: Vec<PurchaseOrderDetail> = db
            .purchase_orders
            .all()
            .iter()
            .map(|po| self.order_detail(db, po))
            .collect();
        filter.apply(&details).into_iter().cloned().collect()
    }

    pub fn get_purchase_order(
        &self,
        db: &Database,
        id: Uuid,
    ) -> Result<PurchaseOrderDetail, AppError> {
        let order = db.purchase_orders.find(id)?;
        Ok(self.order_detail(db, order))
    }

    pub fn create_purchase_order(
        &self,
        db: &mut Database,
        draft: PurchaseOrderDraft,
    ) -> Result<PurchaseOrderDetail, AppError> {
        draft.validate()?;

        let supplier = db.suppliers.get(draft.supplier_id).ok_or(AppError::InvalidReference {
            field: "supplierId",
            id: draft.supplier_id,
        })?;
        if supplier.status != SupplierStatus::Active {
            return Err(AppError::field(
                "supplierId",
                "inactive",
                "O fornecedor está inativo.",
            ));
        }
        self.check_lines(db, &draft.items)?;

        let order = db.purchase_orders.create(draft)?;
        tracing::info!(
            "🧾 Pedido {} criado para o fornecedor {} (total {})",
            order.code,
            order.supplier_id,
            order.total_amount
        );
        Ok(self.order_detail(db, &order))
    }

    pub fn update_purchase_order(
        &self,
        db: &mut Database,
        id: Uuid,
        patch: PurchaseOrderPatch,
    ) -> Result<PurchaseOrderDetail, AppError> {
        let order = db.purchase_orders.find(id)?;
        if order.status != PurchaseOrderStatus::Pending {
            return Err(AppError::InvalidStatusTransition {
                from: order.status.as_str().to_string(),
                to: PurchaseOrderStatus::Pending.as_str().to_string(),
            });
        }
        patch.validate()?;
        if let Some(items) = &patch.items {
            self.check_lines(db, items)?;
        }

        let order = db.purchase_orders.update(id, patch)?;
        tracing::info!("✏️ Pedido {} atualizado (total {})", order.code, order.total_amount);
        Ok(self.order_detail(db, &order))
    }

    // --- MUDANÇA DE STATUS ---
    // Entrega: entrada de estoque por linha com produto + totais do fornecedor.
    pub fn transition_purchase_order(
        &self,
        db: &mut Database,
        id: Uuid,
        next: PurchaseOrderStatus,
    ) -> Result<PurchaseOrderDetail, AppError> {
        let order = db.purchase_orders.find(id)?.clone();
        if !order.status.can_transition_to(next) {
            return Err(AppError::InvalidStatusTransition {
                from: order.status.as_str().to_string(),
                to: next.as_str().to_string(),
            });
        }

        if next == PurchaseOrderStatus::Delivered {
            // Tudo conferido antes da primeira escrita
            self.check_lines(db, &order.items)?;
            db.suppliers.find(order.supplier_id)?;

            for line in &order.items {
                let Some(product_id) = line.product_id else {
                    continue;
                };
                self.inventory_service.record_movement(
                    db,
                    StockMovementDraft {
                        product_id,
                        movement_type: MovementType::In,
                        quantity: line.quantity,
                        reason: "Purchase order".to_string(),
                        reference: Some(order.code.clone()),
                        batch_number: None,
                        expiry_date: None,
                    },
                )?;
            }

            let supplier = db.suppliers.get_mut(order.supplier_id)?;
            supplier.total_orders += 1;
            supplier.total_value += order.total_amount;
            supplier.updated_at = Utc::now();
        }

        let stored = db.purchase_orders.get_mut(id)?;
        stored.status = next;
        stored.updated_at = Utc::now();
        let updated = stored.clone();

        tracing::info!(
            "🔄 Pedido {}: {} -> {}",
            updated.code,
            order.status.as_str(),
            next.as_str()
        );
        Ok(self.order_detail(db, &updated))
    }
}
