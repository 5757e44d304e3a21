// src/models/finance.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::common::filter::Searchable;
use crate::common::money::LineItem;
use crate::common::validation::validate_not_negative;
use crate::db::store::{Creatable, Entity};

/// Nome exibido quando a fatura não tem cliente.
pub const WALK_IN_CUSTOMER: &str = "Consumidor Final";

// --- Enums ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TaxKind {
    #[default]
    Standard, // Imposto padrão da fatura (BILL_TAX_RATE)
    Gst,      // GST (GST_RATE)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    Pending, // Aberto
    Paid,    // Quitado
    Overdue, // Vencido
}

impl InvoiceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Pending => "pending",
            InvoiceStatus::Paid => "paid",
            InvoiceStatus::Overdue => "overdue",
        }
    }

    pub fn can_transition_to(&self, next: InvoiceStatus) -> bool {
        matches!(
            (self, next),
            (InvoiceStatus::Pending, InvoiceStatus::Paid)
                | (InvoiceStatus::Pending, InvoiceStatus::Overdue)
                | (InvoiceStatus::Overdue, InvoiceStatus::Paid)
        )
    }
}

// --- Itens da fatura ---

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BillItemDraft {
    #[validate(length(min = 1, message = "A descrição é obrigatória."))]
    pub description: String,

    #[validate(custom(function = "validate_not_negative"))]
    pub quantity: Decimal,

    #[validate(custom(function = "validate_not_negative"))]
    pub rate: Decimal,
}

impl LineItem for BillItemDraft {
    fn quantity(&self) -> Decimal {
        self.quantity
    }

    fn rate(&self) -> Decimal {
        self.rate
    }
}

/// Item calculado: amount = quantity × rate (arredondado).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillItem {
    pub description: String,
    pub quantity: Decimal,
    pub rate: Decimal,
    pub amount: Decimal,
}

fn default_apply_tax() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BillDraft {
    pub customer_id: Option<Uuid>,
    pub invoice_number: Option<String>,
    pub invoice_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    pub notes: Option<String>,

    #[validate(nested)]
    #[serde(default)]
    pub items: Vec<BillItemDraft>,

    #[serde(default = "default_apply_tax")]
    pub apply_tax: bool,

    #[serde(default)]
    pub tax_kind: TaxKind,
}

/// Resumo da fatura (prévia, nada é gravado).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Bill {
    pub items: Vec<BillItem>,
    pub subtotal: Decimal,
    pub tax_rate: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
}

// --- Fatura emitida ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub id: Uuid,
    pub number: String,
    pub customer_id: Option<Uuid>,
    pub invoice_date: NaiveDate,
    pub due_date: NaiveDate,
    pub status: InvoiceStatus,
    pub items: Vec<BillItem>,
    pub subtotal: Decimal,
    pub tax_rate: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Draft interno: a fatura já calculada, montada pelo FinanceService.
#[derive(Debug, Clone, Validate)]
pub struct NewInvoice {
    #[validate(length(min = 1))]
    pub number: String,
    pub customer_id: Option<Uuid>,
    pub invoice_date: NaiveDate,
    pub due_date: NaiveDate,
    pub bill: Bill,
    pub notes: Option<String>,
}

impl Entity for Invoice {
    const KIND: &'static str = "Fatura";

    fn id(&self) -> Uuid {
        self.id
    }
}

impl Creatable for Invoice {
    type Draft = NewInvoice;

    fn from_draft(id: Uuid, now: DateTime<Utc>, draft: NewInvoice) -> Self {
        Self {
            id,
            number: draft.number,
            customer_id: draft.customer_id,
            invoice_date: draft.invoice_date,
            due_date: draft.due_date,
            status: InvoiceStatus::Pending,
            items: draft.bill.items,
            subtotal: draft.bill.subtotal,
            tax_rate: draft.bill.tax_rate,
            tax: draft.bill.tax,
            total: draft.bill.total,
            notes: draft.notes,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceDetail {
    #[serde(flatten)]
    pub invoice: Invoice,
    pub customer_name: Option<String>,
}

impl Searchable for InvoiceDetail {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.invoice.number.as_str()];
        fields.extend(self.customer_name.as_deref());
        fields
    }

    fn facet(&self) -> Option<&str> {
        Some(self.invoice.status.as_str())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceStatusChange {
    pub status: InvoiceStatus,
}
