// src/models/catalog.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::common::filter::Searchable;
use crate::common::patch::{apply_nullable, nullable};
use crate::common::validation::validate_not_negative;
use crate::db::store::{Creatable, Entity, Patchable};

// --- 1. Categorias ---
// A categoria é dona das suas subcategorias.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub subcategories: Vec<Subcategory>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subcategory {
    pub id: Uuid,
    pub category_id: Uuid,
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDraft {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CategoryPatch {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub name: Option<String>,
    pub description: Option<String>,
}

// Subcategorias usam os mesmos campos
pub type SubcategoryDraft = CategoryDraft;
pub type SubcategoryPatch = CategoryPatch;

impl Entity for Category {
    const KIND: &'static str = "Categoria";

    fn id(&self) -> Uuid {
        self.id
    }
}

impl Creatable for Category {
    type Draft = CategoryDraft;

    fn from_draft(id: Uuid, now: DateTime<Utc>, draft: CategoryDraft) -> Self {
        Self {
            id,
            name: draft.name,
            description: draft.description,
            subcategories: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }
}

impl Patchable for Category {
    type Patch = CategoryPatch;

    fn apply_patch(&mut self, patch: CategoryPatch, now: DateTime<Utc>) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(description) = patch.description {
            self.description = Some(description);
        }
        self.updated_at = now;
    }
}

impl Category {
    pub fn subcategory(&self, id: Uuid) -> Option<&Subcategory> {
        self.subcategories.iter().find(|s| s.id == id)
    }
}

// --- 2. Produtos ---
// Categoria, subcategoria e fornecedor são referenciados por id; os nomes
// entram só na leitura (ProductDetail).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub category_id: Uuid,
    pub subcategory_id: Option<Uuid>,
    pub unit: String,
    pub cost_price: Decimal,
    pub selling_price: Decimal,
    pub stock_level: Decimal,
    pub min_stock_level: Decimal,
    pub supplier_id: Option<Uuid>,
    pub batch_number: Option<String>,
    pub expiry_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn default_min_stock_level() -> Decimal {
    Decimal::TEN
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProductDraft {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub name: String,

    pub category_id: Uuid,
    pub subcategory_id: Option<Uuid>,

    #[validate(length(min = 1, message = "A unidade é obrigatória."))]
    pub unit: String,

    #[validate(custom(function = "validate_not_negative"))]
    pub cost_price: Decimal,

    #[validate(custom(function = "validate_not_negative"))]
    pub selling_price: Decimal,

    // Estoque inicial; depois disso só muda via movimentação
    #[validate(custom(function = "validate_not_negative"))]
    #[serde(default)]
    pub stock_level: Decimal,

    #[validate(custom(function = "validate_not_negative"))]
    #[serde(default = "default_min_stock_level")]
    pub min_stock_level: Decimal,

    pub supplier_id: Option<Uuid>,
    pub batch_number: Option<String>,
    pub expiry_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProductPatch {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub name: Option<String>,

    pub category_id: Option<Uuid>,

    // `null` desvincula; trocar de categoria sem informar a subcategoria também
    #[serde(default, deserialize_with = "nullable")]
    pub subcategory_id: Option<Option<Uuid>>,

    #[validate(length(min = 1, message = "A unidade é obrigatória."))]
    pub unit: Option<String>,

    #[validate(custom(function = "validate_not_negative"))]
    pub cost_price: Option<Decimal>,

    #[validate(custom(function = "validate_not_negative"))]
    pub selling_price: Option<Decimal>,

    #[validate(custom(function = "validate_not_negative"))]
    pub min_stock_level: Option<Decimal>,

    #[serde(default, deserialize_with = "nullable")]
    pub supplier_id: Option<Option<Uuid>>,
    #[serde(default, deserialize_with = "nullable")]
    pub batch_number: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub expiry_date: Option<Option<NaiveDate>>,
}

impl Entity for Product {
    const KIND: &'static str = "Produto";

    fn id(&self) -> Uuid {
        self.id
    }
}

impl Creatable for Product {
    type Draft = ProductDraft;

    fn from_draft(id: Uuid, now: DateTime<Utc>, draft: ProductDraft) -> Self {
        Self {
            id,
            name: draft.name,
            category_id: draft.category_id,
            subcategory_id: draft.subcategory_id,
            unit: draft.unit,
            cost_price: draft.cost_price,
            selling_price: draft.selling_price,
            stock_level: draft.stock_level,
            min_stock_level: draft.min_stock_level,
            supplier_id: draft.supplier_id,
            batch_number: draft.batch_number,
            expiry_date: draft.expiry_date,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Patchable for Product {
    type Patch = ProductPatch;

    fn apply_patch(&mut self, patch: ProductPatch, now: DateTime<Utc>) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(category_id) = patch.category_id {
            // Trocar de categoria invalida a subcategoria antiga
            if category_id != self.category_id {
                self.subcategory_id = None;
            }
            self.category_id = category_id;
        }
        apply_nullable(&mut self.subcategory_id, patch.subcategory_id);
        if let Some(unit) = patch.unit {
            self.unit = unit;
        }
        if let Some(cost_price) = patch.cost_price {
            self.cost_price = cost_price;
        }
        if let Some(selling_price) = patch.selling_price {
            self.selling_price = selling_price;
        }
        if let Some(min_stock_level) = patch.min_stock_level {
            self.min_stock_level = min_stock_level;
        }
        apply_nullable(&mut self.supplier_id, patch.supplier_id);
        apply_nullable(&mut self.batch_number, patch.batch_number);
        apply_nullable(&mut self.expiry_date, patch.expiry_date);
        self.updated_at = now;
    }
}

/// Produto com os nomes relacionados resolvidos na leitura.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetail {
    #[serde(flatten)]
    pub product: Product,
    pub category_name: Option<String>,
    pub subcategory_name: Option<String>,
    pub supplier_name: Option<String>,
    pub margin: Decimal,
    pub low_stock: bool,
}

impl Searchable for ProductDetail {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.product.name.as_str()];
        if let Some(category) = &self.category_name {
            fields.push(category);
        }
        fields
    }

    fn facet(&self) -> Option<&str> {
        self.category_name.as_deref()
    }
}
