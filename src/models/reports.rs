// src/models/reports.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ReportKind {
    Inventory,
    Sales,
    Purchase,
    ProfitLoss,
}

impl ReportKind {
    pub fn slug(&self) -> &'static str {
        match self {
            ReportKind::Inventory => "inventory",
            ReportKind::Sales => "sales",
            ReportKind::Purchase => "purchase",
            ReportKind::ProfitLoss => "profitLoss",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ReportKind::Inventory => "Inventory Report",
            ReportKind::Sales => "Sales Report",
            ReportKind::Purchase => "Purchase Report",
            ReportKind::ProfitLoss => "Profit & Loss Report",
        }
    }
}

/// Filtros de query string: ?from=2024-01-01&to=2024-01-31&supplier=<id>&product=<id>
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportQuery {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub supplier: Option<Uuid>,
    pub product: Option<Uuid>,
}

impl ReportQuery {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from.is_none_or(|from| date >= from) && self.to.is_none_or(|to| date <= to)
    }

    pub fn period(&self) -> Option<(NaiveDate, NaiveDate)> {
        self.from.zip(self.to)
    }
}

// --- Linhas (valores como texto fixo para CSV/impressão) ---

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryReportRow {
    pub product: String,
    pub category: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub stock: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub value: Decimal,
    pub supplier: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesReportRow {
    pub date: NaiveDate,
    pub invoice: String,
    pub product: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub quantity: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
    pub customer: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseReportRow {
    pub date: NaiveDate,
    pub code: String,
    pub supplier: String,
    pub product: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub quantity: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfitLossRow {
    pub period: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub revenue: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub expenses: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub profit: Decimal,
    pub margin: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Report {
    Inventory(Vec<InventoryReportRow>),
    Sales(Vec<SalesReportRow>),
    Purchase(Vec<PurchaseReportRow>),
    ProfitLoss(Vec<ProfitLossRow>),
}

impl Report {
    pub fn len(&self) -> usize {
        match self {
            Report::Inventory(rows) => rows.len(),
            Report::Sales(rows) => rows.len(),
            Report::Purchase(rows) => rows.len(),
            Report::ProfitLoss(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Linhas como objetos JSON, com as chaves na ordem dos campos.
    pub fn records(&self) -> Result<Vec<Map<String, Value>>, serde_json::Error> {
        match self {
            Report::Inventory(rows) => to_records(rows),
            Report::Sales(rows) => to_records(rows),
            Report::Purchase(rows) => to_records(rows),
            Report::ProfitLoss(rows) => to_records(rows),
        }
    }
}

fn to_records<T: Serialize>(rows: &[T]) -> Result<Vec<Map<String, Value>>, serde_json::Error> {
    rows.iter()
        .map(|row| {
            Ok(match serde_json::to_value(row)? {
                Value::Object(map) => map,
                other => {
                    let mut map = Map::new();
                    map.insert("value".to_string(), other);
                    map
                }
            })
        })
        .collect()
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportResponse {
    pub kind: ReportKind,
    pub title: &'static str,
    pub generated_on: NaiveDate,
    pub rows: Report,
}
