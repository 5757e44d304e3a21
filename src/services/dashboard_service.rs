// src/services/dashboard_service.rs

use rust_decimal::Decimal;
use std::collections::HashMap;

use crate::{
    common::{alerts, money::round_money},
    db::Database,
    models::{
        crm::CustomerStatus,
        dashboard::{Analytics, CustomerSegment, DashboardSummary, RecentSale, TopProduct},
        finance::{Invoice, InvoiceStatus, WALK_IN_CUSTOMER},
        supplier::{PurchaseOrderStatus, SupplierStatus},
    },
};

const RECENT_SALES: usize = 5;
const TOP_PRODUCTS: usize = 5;
const SEGMENTS: [CustomerStatus; 3] =
    [CustomerStatus::Active, CustomerStatus::Vip, CustomerStatus::Inactive];

fn share_percent(part: Decimal, whole: Decimal) -> Decimal {
    let mut pct = if whole.is_zero() {
        Decimal::ZERO
    } else {
        (part * Decimal::ONE_HUNDRED / whole).round_dp(1)
    };
    pct.rescale(1);
    pct
}

#[derive(Clone, Default)]
pub struct DashboardService;

impl DashboardService {
    pub fn new() -> Self {
        Self
    }

    pub fn summary(&self, db: &Database) -> DashboardSummary {
        let invoices = db.invoices.all();
        let sum_where = |pred: fn(InvoiceStatus) -> bool| -> Decimal {
            invoices.iter().filter(|i| pred(i.status)).map(|i| i.total).sum()
        };

        DashboardSummary {
            total_revenue: sum_where(|s| s == InvoiceStatus::Paid),
            outstanding_amount: sum_where(|s| {
                matches!(s, InvoiceStatus::Pending | InvoiceStatus::Overdue)
            }),
            invoice_count: invoices.len(),
            product_count: db.products.len(),
            low_stock_count: alerts::low_stock(db.products.all()).len(),
            inventory_value: round_money(
                db.products
                    .all()
                    .iter()
                    .map(|p| p.stock_level * p.cost_price)
                    .sum(),
            ),
            pending_purchase_orders: db
                .purchase_orders
                .filter(|po| po.status == PurchaseOrderStatus::Pending)
                .len(),
            active_suppliers: db
                .suppliers
                .filter(|s| s.status == SupplierStatus::Active)
                .len(),
            customer_count: db.customers.len(),
            recent_sales: self.recent_sales(db),
        }
    }

    /// Mais nova primeiro; no mesmo dia, o maior número vem antes.
    pub fn recent_sales(&self, db: &Database) -> Vec<RecentSale> {
        let mut invoices: Vec<&Invoice> = db.invoices.all().iter().collect();
        invoices.sort_by(|a, b| {
            b.invoice_date
                .cmp(&a.invoice_date)
                .then_with(|| b.number.cmp(&a.number))
        });

        invoices
            .into_iter()
            .take(RECENT_SALES)
            .map(|invoice| {
                let customer = invoice.customer_id.and_then(|id| db.customers.get(id));
                RecentSale {
                    invoice_number: invoice.number.clone(),
                    date: invoice.invoice_date,
                    customer: customer
                        .map(|c| c.full_name.clone())
                        .unwrap_or_else(|| WALK_IN_CUSTOMER.to_string()),
                    email: customer.and_then(|c| c.email.clone()),
                    amount: invoice.total,
                    status: invoice.status,
                }
            })
            .collect()
    }

    pub fn analytics(&self, db: &Database) -> Analytics {
        let paid = db.invoices.filter(|i| i.status == InvoiceStatus::Paid);
        let paid_total: Decimal = paid.iter().map(|i| i.total).sum();
        let average_order_value = if paid.is_empty() {
            Decimal::ZERO
        } else {
            round_money(paid_total / Decimal::from(paid.len()))
        };

        let mut by_product: HashMap<&str, (Decimal, Decimal)> = HashMap::new();
        for item in paid.iter().flat_map(|i| i.items.iter()) {
            let entry = by_product.entry(item.description.as_str()).or_default();
            entry.0 += item.quantity;
            entry.1 += item.amount;
        }
        let mut top_products: Vec<TopProduct> = by_product
            .into_iter()
            .map(|(name, (sales, revenue))| TopProduct { name: name.to_string(), sales, revenue })
            .collect();
        top_products.sort_by(|a, b| b.revenue.cmp(&a.revenue).then_with(|| a.name.cmp(&b.name)));
        top_products.truncate(TOP_PRODUCTS);

        // Receita por status do cliente; venda sem cliente fica fora dos segmentos
        let revenue_of = |status: CustomerStatus| -> Decimal {
            paid.iter()
                .filter(|i| {
                    i.customer_id
                        .and_then(|id| db.customers.get(id))
                        .is_some_and(|c| c.status == status)
                })
                .map(|i| i.total)
                .sum()
        };
        let revenues: Vec<(CustomerStatus, Decimal)> =
            SEGMENTS.iter().map(|&s| (s, revenue_of(s))).collect();
        let segmented: Decimal = revenues.iter().map(|(_, r)| *r).sum();
        let customer_segments = revenues
            .into_iter()
            .map(|(segment, revenue)| CustomerSegment {
                segment,
                customers: db.customers.filter(|c| c.status == segment).len(),
                revenue,
                percentage: share_percent(revenue, segmented),
            })
            .collect();

        tracing::debug!("📈 Analytics calculado sobre {} faturas pagas", paid.len());
        Analytics {
            paid_invoices: paid.len(),
            average_order_value,
            top_products,
            customer_segments,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::finance::BillItem;

    #[test]
    fn summary_of_sample_data() {
        let summary = DashboardService::new().summary(&Database::with_sample_data());

        assert_eq!(summary.total_revenue, Decimal::new(512_344, 2));
        assert_eq!(summary.outstanding_amount, Decimal::new(186_419, 2));
        assert_eq!(summary.invoice_count, 5);
        assert_eq!(summary.product_count, 2);
        assert_eq!(summary.low_stock_count, 1);
        assert_eq!(summary.inventory_value, Decimal::from(4750));
        assert_eq!(summary.pending_purchase_orders, 1);
        assert_eq!(summary.active_suppliers, 2);
        assert_eq!(summary.customer_count, 5);
        assert_eq!(summary.recent_sales.len(), 5);
    }

    #[test]
    fn recent_sales_newest_first_with_customer() {
        let sales = DashboardService::new().recent_sales(&Database::with_sample_data());

        let numbers: Vec<&str> = sales.iter().map(|s| s.invoice_number.as_str()).collect();
        assert_eq!(numbers, ["INV-001", "INV-002", "INV-003", "INV-004", "INV-005"]);
        assert_eq!(sales[0].customer, "John Doe");
        assert_eq!(sales[0].email.as_deref(), Some("john.doe@example.com"));
        assert_eq!(sales[0].amount, Decimal::new(123_456, 2));
    }

    #[test]
    fn recent_sales_without_customer_are_walk_in() {
        let mut db = Database::with_sample_data();
        let id = db.invoices.all()[0].id;
        db.invoices.get_mut(id).unwrap().customer_id = None;

        let sales = DashboardService::new().recent_sales(&db);
        assert_eq!(sales[0].customer, WALK_IN_CUSTOMER);
        assert_eq!(sales[0].email, None);
    }

    #[test]
    fn analytics_of_sample_data() {
        let analytics = DashboardService::new().analytics(&Database::with_sample_data());

        // 5123.44 / 3
        assert_eq!(analytics.paid_invoices, 3);
        assert_eq!(analytics.average_order_value, Decimal::new(170_781, 2));

        assert_eq!(analytics.top_products.len(), 1);
        assert_eq!(analytics.top_products[0].sales, Decimal::from(3));
        assert_eq!(analytics.top_products[0].revenue, Decimal::new(512_344, 2));

        let segments = &analytics.customer_segments;
        assert_eq!(segments[0].segment, CustomerStatus::Active);
        assert_eq!(segments[0].customers, 3);
        assert_eq!(segments[0].revenue, Decimal::new(277_777, 2));
        assert_eq!(segments[0].percentage.to_string(), "54.2");
        assert_eq!(segments[1].percentage.to_string(), "45.8");
        assert_eq!(segments[2].revenue, Decimal::ZERO);
        assert_eq!(segments[2].percentage.to_string(), "0.0");
    }

    #[test]
    fn top_products_ranked_by_revenue() {
        let mut db = Database::with_sample_data();
        let id = db.invoices.all().iter().find(|i| i.number == "INV-003").unwrap().id;
        db.invoices.get_mut(id).unwrap().items.push(BillItem {
            description: "Laptop".into(),
            quantity: Decimal::from(2),
            rate: Decimal::from(5000),
            amount: Decimal::from(10_000),
        });

        let analytics = DashboardService::new().analytics(&db);
        assert_eq!(analytics.top_products[0].name, "Laptop");
        assert_eq!(analytics.top_products[0].sales, Decimal::from(2));
        assert_eq!(analytics.top_products[1].name, "Serviços");
    }

    #[test]
    fn empty_database_is_all_zero() {
        let service = DashboardService::new();
        let summary = service.summary(&Database::new());
        assert_eq!(summary.total_revenue, Decimal::ZERO);
        assert_eq!(summary.inventory_value, Decimal::ZERO);
        assert_eq!(summary.low_stock_count, 0);
        assert!(summary.recent_sales.is_empty());

        let analytics = service.analytics(&Database::new());
        assert_eq!(analytics.average_order_value, Decimal::ZERO);
        assert!(analytics.top_products.is_empty());
        assert!(analytics.customer_segments.iter().all(|s| s.percentage.is_zero()));
    }
}
