// src/services/report_service.rs

use chrono::{Datelike, NaiveDate, Utc};
use rust_decimal::Decimal;
use std::collections::BTreeMap;

use crate::{
    common::{
        error::AppError,
        money::{fixed_money, LineItem},
    },
    db::Database,
    models::{
        finance::{InvoiceStatus, WALK_IN_CUSTOMER},
        reports::{
            InventoryReportRow, ProfitLossRow, PurchaseReportRow, Report, ReportKind,
            ReportQuery, ReportResponse, SalesReportRow,
        },
        supplier::PurchaseOrderStatus,
    },
};

#[derive(Clone, Default)]
pub struct ReportService;

/// "40.0%"; receita zero dá "0.0%".
fn margin_percent(profit: Decimal, revenue: Decimal) -> String {
    let mut pct = if revenue.is_zero() {
        Decimal::ZERO
    } else {
        (profit * Decimal::ONE_HUNDRED / revenue).round_dp(1)
    };
    pct.rescale(1);
    format!("{pct}%")
}

fn month_label(year: i32, month: u32) -> String {
    NaiveDate::from_ymd_opt(year, month, 1)
        .map(|d| d.format("%b %Y").to_string())
        .unwrap_or_else(|| format!("{month:02}/{year}"))
}

impl ReportService {
    pub fn new() -> Self {
        Self
    }

    fn check_range(&self, query: &ReportQuery) -> Result<(), AppError> {
        if let (Some(from), Some(to)) = (query.from, query.to) {
            if from > to {
                return Err(AppError::field(
                    "from",
                    "range",
                    "A data inicial deve ser anterior ou igual à final.",
                ));
            }
        }
        Ok(())
    }

    pub fn generate(
        &self,
        db: &Database,
        kind: ReportKind,
        query: &ReportQuery,
    ) -> Result<Report, AppError> {
        self.check_range(query)?;
        let report = match kind {
            ReportKind::Inventory => Report::Inventory(self.inventory(db, query)),
            ReportKind::Sales => Report::Sales(self.sales(db, query)),
            ReportKind::Purchase => Report::Purchase(self.purchases(db, query)),
            ReportKind::ProfitLoss => Report::ProfitLoss(self.profit_loss(db, query)),
        };
        tracing::info!("📊 Relatório '{}' gerado com {} linhas", kind.slug(), report.len());
        Ok(report)
    }

    pub fn response(
        &self,
        db: &Database,
        kind: ReportKind,
        query: &ReportQuery,
    ) -> Result<ReportResponse, AppError> {
        Ok(ReportResponse {
            kind,
            title: kind.title(),
            generated_on: Utc::now().date_naive(),
            rows: self.generate(db, kind, query)?,
        })
    }

    // --- ESTOQUE (foto atual, sem período) ---
    fn inventory(&self, db: &Database, query: &ReportQuery) -> Vec<InventoryReportRow> {
        db.products
            .all()
            .iter()
            .filter(|p| query.product.is_none_or(|id| p.id == id))
            .filter(|p| query.supplier.is_none_or(|id| p.supplier_id == Some(id)))
            .map(|p| InventoryReportRow {
                product: p.name.clone(),
                category: db.category_name(p.category_id).unwrap_or_default(),
                stock: p.stock_level,
                value: fixed_money(p.stock_level * p.cost_price),
                supplier: p
                    .supplier_id
                    .and_then(|id| db.supplier_name(id))
                    .unwrap_or_default(),
            })
            .collect()
    }

    // --- VENDAS: uma linha por item de fatura ---
    fn sales(&self, db: &Database, query: &ReportQuery) -> Vec<SalesReportRow> {
        db.invoices
            .all()
            .iter()
            .filter(|i| query.contains(i.invoice_date))
            .flat_map(|invoice| {
                let customer = invoice
                    .customer_id
                    .and_then(|id| db.customer_name(id))
                    .unwrap_or_else(|| WALK_IN_CUSTOMER.to_string());
                invoice.items.iter().map(move |item| SalesReportRow {
                    date: invoice.invoice_date,
                    invoice: invoice.number.clone(),
                    product: item.description.clone(),
                    quantity: item.quantity,
                    amount: fixed_money(item.amount),
                    customer: customer.clone(),
                })
            })
            .collect()
    }

    // --- COMPRAS: uma linha por item de pedido não cancelado ---
    fn purchases(&self, db: &Database, query: &ReportQuery) -> Vec<PurchaseReportRow> {
        db.purchase_orders
            .all()
            .iter()
            .filter(|po| po.status != PurchaseOrderStatus::Cancelled)
            .filter(|po| query.contains(po.order_date.date_naive()))
            .filter(|po| query.supplier.is_none_or(|id| po.supplier_id == id))
            .flat_map(|po| {
                let supplier = db.supplier_name(po.supplier_id).unwrap_or_default();
                po.items
                    .iter()
                    .filter(|line| query.product.is_none_or(|id| line.product_id == Some(id)))
                    .map(move |line| PurchaseReportRow {
                        date: po.order_date.date_naive(),
                        code: po.code.clone(),
                        supplier: supplier.clone(),
                        product: line.product_name.clone(),
                        quantity: line.quantity,
                        amount: fixed_money(line.amount()),
                    })
            })
            .collect()
    }

    // --- DRE MENSAL: receita paga x pedidos entregues, mais recente primeiro ---
    fn profit_loss(&self, db: &Database, query: &ReportQuery) -> Vec<ProfitLossRow> {
        let mut months: BTreeMap<(i32, u32), (Decimal, Decimal)> = BTreeMap::new();

        for invoice in db.invoices.all() {
            if invoice.status == InvoiceStatus::Paid && query.contains(invoice.invoice_date) {
                let key = (invoice.invoice_date.year(), invoice.invoice_date.month());
                months.entry(key).or_default().0 += invoice.total;
            }
        }
        for po in db.purchase_orders.all() {
            let date = po.order_date.date_naive();
            if po.status == PurchaseOrderStatus::Delivered && query.contains(date) {
                months.entry((date.year(), date.month())).or_default().1 += po.total_amount;
            }
        }

        months
            .into_iter()
            .rev()
            .map(|((year, month), (revenue, expenses))| {
                let profit = revenue - expenses;
                ProfitLossRow {
                    period: month_label(year, month),
                    revenue: fixed_money(revenue),
                    expenses: fixed_money(expenses),
                    profit: fixed_money(profit),
                    margin: margin_percent(profit, revenue),
                }
            })
            .collect()
    }
}
