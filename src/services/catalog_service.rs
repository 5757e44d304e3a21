// src/services/catalog_service.rs

use uuid::Uuid;
use validator::Validate;

use crate::{
    common::{alerts, error::AppError, filter::SearchFilter},
    db::{Database, Entity},
    models::{
        catalog::{
            Category, CategoryDraft, CategoryPatch, Product, ProductDetail, ProductDraft,
            ProductPatch, Subcategory, SubcategoryDraft, SubcategoryPatch,
        },
        supplier::PurchaseOrderStatus,
    },
};

const SUBCATEGORY: &str = "Subcategoria";

#[derive(Clone, Default)]
pub struct CatalogService;

impl CatalogService {
    pub fn new() -> Self {
        Self
    }

    /// Categoria, subcategoria (da mesma categoria) e fornecedor precisam existir.
    fn check_references(
        &self,
        db: &Database,
        category_id: Uuid,
        subcategory_id: Option<Uuid>,
        supplier_id: Option<Uuid>,
    ) -> Result<(), AppError> {
        let category = db.categories.get(category_id).ok_or(AppError::InvalidReference {
            field: "categoryId",
            id: category_id,
        })?;

        if let Some(sub_id) = subcategory_id {
            if category.subcategory(sub_id).is_none() {
                return Err(AppError::InvalidReference { field: "subcategoryId", id: sub_id });
            }
        }

        if let Some(supplier_id) = supplier_id {
            if !db.suppliers.contains(supplier_id) {
                return Err(AppError::InvalidReference { field: "supplierId", id: supplier_id });
            }
        }
        Ok(())
    }

    fn warn_on_margin(&self, product: &Product) {
        if product.selling_price <= product.cost_price {
            tracing::warn!(
                "⚠️ Produto '{}' com preço de venda ({}) <= custo ({})",
                product.name,
                product.selling_price,
                product.cost_price
            );
        }
    }

    pub fn product_detail(&self, db: &Database, product: &Product) -> ProductDetail {
        let category = db.categories.get(product.category_id);
        ProductDetail {
            category_name: category.map(|c| c.name.clone()),
            subcategory_name: category
                .zip(product.subcategory_id)
                .and_then(|(c, sub_id)| c.subcategory(sub_id))
                .map(|s| s.name.clone()),
            supplier_name: product.supplier_id.and_then(|id| db.supplier_name(id)),
            margin: product.selling_price - product.cost_price,
            low_stock: alerts::is_low_stock(product),
            product: product.clone(),
        }
    }

    // --- PRODUTOS ---

    pub fn list_products(&self, db: &Database, filter: &SearchFilter) -> Vec<ProductDetail> {
        let details: Vec<ProductDetail> = db
            .products
            .all()
            .iter()
            .map(|p| self.product_detail(db, p))
            .collect();
        filter.apply(&details).into_iter().cloned().collect()
    }

    pub fn get_product(&self, db: &Database, id: Uuid) -> Result<ProductDetail, AppError> {
        let product = db.products.find(id)?;
        Ok(self.product_detail(db, product))
    }

    pub fn create_product(
        &self,
        db: &mut Database,
        draft: ProductDraft,
    ) -> Result<ProductDetail, AppError> {
        draft.validate()?;
        self.check_references(db, draft.category_id, draft.subcategory_id, draft.supplier_id)?;

        let product = db.products.create(draft)?;
        self.warn_on_margin(&product);
        tracing::info!("✅ Produto criado: {} ({})", product.name, product.id);
        Ok(self.product_detail(db, &product))
    }

    pub fn update_product(
        &self,
        db: &mut Database,
        id: Uuid,
        patch: ProductPatch,
    ) -> Result<ProductDetail, AppError> {
        let current = db.products.find(id)?;
        patch.validate()?;

        // Referências como ficarão depois do patch
        let category_id = patch.category_id.unwrap_or(current.category_id);
        let subcategory_id = match patch.subcategory_id {
            Some(sub_id) => sub_id,
            None if category_id != current.category_id => None,
            None => current.subcategory_id,
        };
        let supplier_id = patch.supplier_id.unwrap_or(current.supplier_id);
        self.check_references(db, category_id, subcategory_id, supplier_id)?;

        let product = db.products.update(id, patch)?;
        self.warn_on_margin(&product);
        tracing::info!("✏️ Produto atualizado: {} ({})", product.name, product.id);
        Ok(self.product_detail(db, &product))
    }

    /// Bloqueado enquanto houver pedido não cancelado ou movimentação apontando para o produto.
    pub fn delete_product(&self, db: &mut Database, id: Uuid) -> Result<Product, AppError> {
        db.products.find(id)?;
        let on_open_order = db.purchase_orders.all().iter().any(|po| {
            po.status != PurchaseOrderStatus::Cancelled
                && po.items.iter().any(|line| line.product_id == Some(id))
        });
        let has_movements = db.stock_movements.all().iter().any(|m| m.product_id == id);
        if on_open_order || has_movements {
            return Err(AppError::ReferenceInUse { kind: Product::KIND, id });
        }

        let removed = db.products.delete(id)?;
        tracing::info!("🗑️ Produto removido: {} ({})", removed.name, removed.id);
        Ok(removed)
    }

    // --- CATEGORIAS ---

    pub fn list_categories(&self, db: &Database) -> Vec<Category> {
        db.categories.all().to_vec()
    }

    pub fn create_category(
        &self,
        db: &mut Database,
        draft: CategoryDraft,
    ) -> Result<Category, AppError> {
        let category = db.categories.create(draft)?;
        tracing::info!("✅ Categoria criada: {}", category.name);
        Ok(category)
    }

    pub fn update_category(
        &self,
        db: &mut Database,
        id: Uuid,
        patch: CategoryPatch,
    ) -> Result<Category, AppError> {
        let category = db.categories.update(id, patch)?;
        tracing::info!("✏️ Categoria atualizada: {}", category.name);
        Ok(category)
    }

    pub fn delete_category(&self, db: &mut Database, id: Uuid) -> Result<Category, AppError> {
        db.categories.find(id)?;
        if db.products.all().iter().any(|p| p.category_id == id) {
            return Err(AppError::ReferenceInUse { kind: Category::KIND, id });
        }
        let removed = db.categories.delete(id)?;
        tracing::info!("🗑️ Categoria removida: {}", removed.name);
        Ok(removed)
    }

    // --- SUBCATEGORIAS ---

    pub fn create_subcategory(
        &self,
        db: &mut Database,
        category_id: Uuid,
        draft: SubcategoryDraft,
    ) -> Result<Subcategory, AppError> {
        let sub = db.categories.create_subcategory(category_id, draft)?;
        tracing::info!("✅ Subcategoria criada: {} em {}", sub.name, category_id);
        Ok(sub)
    }

    pub fn update_subcategory(
        &self,
        db: &mut Database,
        category_id: Uuid,
        subcategory_id: Uuid,
        patch: SubcategoryPatch,
    ) -> Result<Subcategory, AppError> {
        db.categories.update_subcategory(category_id, subcategory_id, patch)
    }

    pub fn delete_subcategory(
        &self,
        db: &mut Database,
        category_id: Uuid,
        subcategory_id: Uuid,
    ) -> Result<Subcategory, AppError> {
        db.categories
            .find(category_id)?
            .subcategory(subcategory_id)
            .ok_or_else(|| AppError::not_found(SUBCATEGORY, subcategory_id))?;

        if db.products.all().iter().any(|p| p.subcategory_id == Some(subcategory_id)) {
            return Err(AppError::ReferenceInUse { kind: SUBCATEGORY, id: subcategory_id });
        }
        let removed = db.categories.delete_subcategory(category_id, subcategory_id)?;
        tracing::info!("🗑️ Subcategoria removida: {}", removed.name);
        Ok(removed)
    }
}
