// src/db/db.rs

use crate::db::store::EntityStore;
use crate::models::{
    catalog::{Category, Product},
    crm::Customer,
    finance::Invoice,
    inventory::StockMovement,
    supplier::{PurchaseOrder, Supplier},
};

// O "banco" em memória: uma coleção por entidade.
// Quem recebe `&mut Database` tem acesso exclusivo a tudo, então uma operação
// que mexe em várias coleções é atômica por construção.
#[derive(Debug, Clone, Default)]
pub struct Database {
    pub products: EntityStore<Product>,
    pub categories: EntityStore<Category>,
    pub suppliers: EntityStore<Supplier>,
    pub purchase_orders: EntityStore<PurchaseOrder>,
    pub stock_movements: EntityStore<StockMovement>,
    pub customers: EntityStore<Customer>,
    pub invoices: EntityStore<Invoice>,
}

impl Database {
    pub fn new() -> Self {
        Self::default()
    }

    // ---
    // Joins de leitura (nome pelo id)
    // ---

    pub fn category_name(&self, id: uuid::Uuid) -> Option<String> {
        self.categories.get(id).map(|c| c.name.clone())
    }

    pub fn supplier_name(&self, id: uuid::Uuid) -> Option<String> {
        self.suppliers.get(id).map(|s| s.name.clone())
    }

    pub fn product_name(&self, id: uuid::Uuid) -> Option<String> {
        self.products.get(id).map(|p| p.name.clone())
    }

    pub fn customer_name(&self, id: uuid::Uuid) -> Option<String> {
        self.customers.get(id).map(|c| c.full_name.clone())
    }
}
