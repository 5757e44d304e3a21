// src/models/crm.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::common::filter::Searchable;
use crate::common::patch::{apply_nullable, nullable};
use crate::db::store::{Creatable, Entity, Patchable};

// --- ENUMS ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CustomerStatus {
    #[default]
    Active,
    Vip,
    Inactive,
}

impl CustomerStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CustomerStatus::Active => "active",
            CustomerStatus::Vip => "vip",
            CustomerStatus::Inactive => "inactive",
        }
    }
}

// --- CLIENTE ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: Uuid,
    pub full_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub status: CustomerStatus,
    pub join_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDraft {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub full_name: String,

    #[validate(email(message = "E-mail inválido."))]
    pub email: Option<String>,

    pub phone: Option<String>,
    pub location: Option<String>,

    #[serde(default)]
    pub status: CustomerStatus,

    // Sem data, vale o dia do cadastro
    pub join_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CustomerPatch {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub full_name: Option<String>,

    #[validate(email(message = "E-mail inválido."))]
    #[serde(default, deserialize_with = "nullable")]
    pub email: Option<Option<String>>,

    #[serde(default, deserialize_with = "nullable")]
    pub phone: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub location: Option<Option<String>>,
    pub status: Option<CustomerStatus>,
}

impl Entity for Customer {
    const KIND: &'static str = "Cliente";

    fn id(&self) -> Uuid {
        self.id
    }
}

impl Creatable for Customer {
    type Draft = CustomerDraft;

    fn from_draft(id: Uuid, now: DateTime<Utc>, draft: CustomerDraft) -> Self {
        Self {
            id,
            full_name: draft.full_name,
            email: draft.email,
            phone: draft.phone,
            location: draft.location,
            status: draft.status,
            join_date: draft.join_date.unwrap_or_else(|| now.date_naive()),
            created_at: now,
            updated_at: now,
        }
    }
}

impl Patchable for Customer {
    type Patch = CustomerPatch;

    fn apply_patch(&mut self, patch: CustomerPatch, now: DateTime<Utc>) {
        if let Some(full_name) = patch.full_name {
            self.full_name = full_name;
        }
        apply_nullable(&mut self.email, patch.email);
        apply_nullable(&mut self.phone, patch.phone);
        apply_nullable(&mut self.location, patch.location);
        if let Some(status) = patch.status {
            self.status = status;
        }
        self.updated_at = now;
    }
}

/// Cliente com os números derivados das faturas.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDetail {
    #[serde(flatten)]
    pub customer: Customer,
    pub orders: usize,
    pub total_spent: Decimal,
}

impl Searchable for CustomerDetail {
    fn search_fields(&self) -> Vec<&str> {
        let c = &self.customer;
        let mut fields = vec![c.full_name.as_str()];
        fields.extend(c.email.as_deref());
        fields.extend(c.location.as_deref());
        fields
    }

    fn facet(&self) -> Option<&str> {
        Some(self.customer.status.as_str())
    }
}
