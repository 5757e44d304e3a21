// src/models/dashboard.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{crm::CustomerStatus, finance::InvoiceStatus};

// Os cards do topo
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_revenue: Decimal,     // Faturas pagas
    pub outstanding_amount: Decimal, // Faturas pendentes + vencidas
    pub invoice_count: usize,
    pub product_count: usize,
    pub low_stock_count: usize,
    pub inventory_value: Decimal, // Estoque × custo
    pub pending_purchase_orders: usize,
    pub active_suppliers: usize,
    pub customer_count: usize,
    pub recent_sales: Vec<RecentSale>,
}

// Lista "vendas recentes": faturas mais novas com o cliente resolvido
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentSale {
    pub invoice_number: String,
    pub date: NaiveDate,
    pub customer: String,
    pub email: Option<String>,
    pub amount: Decimal,
    pub status: InvoiceStatus,
}

// --- Analytics (sempre sobre faturas pagas) ---

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Analytics {
    pub paid_invoices: usize,
    pub average_order_value: Decimal,
    pub top_products: Vec<TopProduct>,
    pub customer_segments: Vec<CustomerSegment>,
}

/// Agrupado pela descrição do item faturado.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopProduct {
    pub name: String,
    pub sales: Decimal, // Quantidade vendida
    pub revenue: Decimal,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerSegment {
    pub segment: CustomerStatus,
    pub customers: usize,
    pub revenue: Decimal,
    pub percentage: Decimal, // Fatia da receita com cliente, 1 casa
}
