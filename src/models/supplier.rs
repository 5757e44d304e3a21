// src/models/supplier.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::common::filter::Searchable;
use crate::common::money::{self, LineItem, TaxPolicy};
use crate::common::patch::{apply_nullable, nullable};
use crate::common::validation::{validate_not_negative, validate_positive};
use crate::db::store::{Creatable, Entity, Patchable};

// --- Enums ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SupplierStatus {
    #[default]
    Active,
    Inactive,
}

impl SupplierStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SupplierStatus::Active => "active",
            SupplierStatus::Inactive => "inactive",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PurchaseOrderStatus {
    Pending,
    Delivered,
    Cancelled,
}

impl PurchaseOrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PurchaseOrderStatus::Pending => "pending",
            PurchaseOrderStatus::Delivered => "delivered",
            PurchaseOrderStatus::Cancelled => "cancelled",
        }
    }

    /// Só um pedido pendente muda de status; entregue/cancelado é final.
    pub fn can_transition_to(&self, next: PurchaseOrderStatus) -> bool {
        matches!(
            (self, next),
            (PurchaseOrderStatus::Pending, PurchaseOrderStatus::Delivered)
                | (PurchaseOrderStatus::Pending, PurchaseOrderStatus::Cancelled)
        )
    }
}

// --- Fornecedor ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Supplier {
    pub id: Uuid,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub contact_person: Option<String>,
    pub gst_number: Option<String>,
    pub payment_terms: Option<String>,
    pub status: SupplierStatus,
    // Saldo de abertura + pedidos entregues
    pub total_orders: u32,
    pub total_value: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SupplierDraft {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub name: String,

    #[validate(email(message = "E-mail inválido."))]
    pub email: Option<String>,

    pub phone: Option<String>,
    pub address: Option<String>,
    pub contact_person: Option<String>,

    // GSTIN tem 15 caracteres
    #[validate(length(equal = 15, message = "O GST deve ter 15 caracteres."))]
    pub gst_number: Option<String>,

    pub payment_terms: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SupplierPatch {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub name: Option<String>,

    // Campos opcionais aceitam `null` para apagar
    #[validate(email(message = "E-mail inválido."))]
    #[serde(default, deserialize_with = "nullable")]
    pub email: Option<Option<String>>,

    #[serde(default, deserialize_with = "nullable")]
    pub phone: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub address: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub contact_person: Option<Option<String>>,

    #[validate(length(equal = 15, message = "O GST deve ter 15 caracteres."))]
    #[serde(default, deserialize_with = "nullable")]
    pub gst_number: Option<Option<String>>,

    #[serde(default, deserialize_with = "nullable")]
    pub payment_terms: Option<Option<String>>,
    pub status: Option<SupplierStatus>,
}

impl Entity for Supplier {
    const KIND: &'static str = "Fornecedor";

    fn id(&self) -> Uuid {
        self.id
    }
}

impl Creatable for Supplier {
    type Draft = SupplierDraft;

    fn from_draft(id: Uuid, now: DateTime<Utc>, draft: SupplierDraft) -> Self {
        Self {
            id,
            name: draft.name,
            email: draft.email,
            phone: draft.phone,
            address: draft.address,
            contact_person: draft.contact_person,
            gst_number: draft.gst_number,
            payment_terms: draft.payment_terms,
            status: SupplierStatus::Active,
            total_orders: 0,
            total_value: Decimal::ZERO,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Patchable for Supplier {
    type Patch = SupplierPatch;

    fn apply_patch(&mut self, patch: SupplierPatch, now: DateTime<Utc>) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        apply_nullable(&mut self.email, patch.email);
        apply_nullable(&mut self.phone, patch.phone);
        apply_nullable(&mut self.address, patch.address);
        apply_nullable(&mut self.contact_person, patch.contact_person);
        apply_nullable(&mut self.gst_number, patch.gst_number);
        apply_nullable(&mut self.payment_terms, patch.payment_terms);
        if let Some(status) = patch.status {
            self.status = status;
        }
        self.updated_at = now;
    }
}

impl Searchable for Supplier {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str()];
        if let Some(email) = &self.email {
            fields.push(email);
        }
        fields
    }

    fn facet(&self) -> Option<&str> {
        Some(self.status.as_str())
    }
}

// --- Pedido de Compra ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseOrderLine {
    // Opcional: linhas de texto livre não movimentam estoque na entrega
    pub product_id: Option<Uuid>,

    #[validate(length(min = 1, message = "O nome do produto é obrigatório."))]
    pub product_name: String,

    #[validate(custom(function = "validate_positive"))]
    pub quantity: Decimal,

    #[validate(custom(function = "validate_not_negative"))]
    pub unit_price: Decimal,
}

impl LineItem for PurchaseOrderLine {
    fn quantity(&self) -> Decimal {
        self.quantity
    }

    fn rate(&self) -> Decimal {
        self.unit_price
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseOrder {
    pub id: Uuid,
    pub code: String,
    pub supplier_id: Uuid,
    pub order_date: DateTime<Utc>,
    pub expected_delivery: Option<NaiveDate>,
    pub status: PurchaseOrderStatus,
    pub items: Vec<PurchaseOrderLine>,
    pub total_amount: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseOrderDraft {
    pub supplier_id: Uuid,
    pub expected_delivery: Option<NaiveDate>,

    #[validate(length(min = 1, message = "O pedido precisa de pelo menos um item."), nested)]
    pub items: Vec<PurchaseOrderLine>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseOrderPatch {
    pub expected_delivery: Option<NaiveDate>,

    #[validate(length(min = 1, message = "O pedido precisa de pelo menos um item."), nested)]
    pub items: Option<Vec<PurchaseOrderLine>>,
}

/// Total do pedido: soma das linhas, sem imposto.
pub fn purchase_order_total(items: &[PurchaseOrderLine]) -> Decimal {
    money::compute_totals(items, TaxPolicy::none()).total
}

/// Código legível, derivado do id (ex: PO-1A2B3C4D).
pub fn purchase_order_code(id: Uuid) -> String {
    let simple = id.simple().to_string().to_uppercase();
    format!("PO-{}", &simple[..8])
}

impl Entity for PurchaseOrder {
    const KIND: &'static str = "Pedido de compra";

    fn id(&self) -> Uuid {
        self.id
    }
}

impl Creatable for PurchaseOrder {
    type Draft = PurchaseOrderDraft;

    fn from_draft(id: Uuid, now: DateTime<Utc>, draft: PurchaseOrderDraft) -> Self {
        let total_amount = purchase_order_total(&draft.items);
        Self {
            id,
            code: purchase_order_code(id),
            supplier_id: draft.supplier_id,
            order_date: now,
            expected_delivery: draft.expected_delivery,
            status: PurchaseOrderStatus::Pending,
            items: draft.items,
            total_amount,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Patchable for PurchaseOrder {
    type Patch = PurchaseOrderPatch;

    fn apply_patch(&mut self, patch: PurchaseOrderPatch, now: DateTime<Utc>) {
        if patch.expected_delivery.is_some() {
            self.expected_delivery = patch.expected_delivery;
        }
        if let Some(items) = patch.items {
            // O total acompanha sempre as linhas
            self.total_amount = purchase_order_total(&items);
            self.items = items;
        }
        self.updated_at = now;
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseOrderDetail {
    #[serde(flatten)]
    pub order: PurchaseOrder,
    pub supplier_name: Option<String>,
}

impl Searchable for PurchaseOrderDetail {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.order.code.as_str()];
        if let Some(name) = &self.supplier_name {
            fields.push(name);
        }
        fields
    }

    fn facet(&self) -> Option<&str> {
        Some(self.order.status.as_str())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseOrderStatusChange {
    pub status: PurchaseOrderStatus,
}
