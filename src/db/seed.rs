// src/db/seed.rs

use chrono::{Days, NaiveDate, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    common::money::{self, LineItem, TaxPolicy},
    db::db::Database,
    models::{
        catalog::{Category, Product, Subcategory},
        crm::{Customer, CustomerStatus},
        finance::{BillItem, BillItemDraft, Invoice, InvoiceStatus},
        inventory::{MovementType, StockMovement},
        supplier::{
            purchase_order_total, PurchaseOrder, PurchaseOrderLine, PurchaseOrderStatus, Supplier,
            SupplierStatus,
        },
    },
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or(NaiveDate::MIN)
}

fn category(name: &str, description: &str, subs: &[(&str, &str)]) -> Category {
    let id = Uuid::new_v4();
    let now = Utc::now();
    Category {
        id,
        name: name.into(),
        description: Some(description.into()),
        subcategories: subs
            .iter()
            .map(|(n, d)| Subcategory {
                id: Uuid::new_v4(),
                category_id: id,
                name: (*n).into(),
                description: Some((*d).into()),
            })
            .collect(),
        created_at: now,
        updated_at: now,
    }
}

#[allow(clippy::too_many_arguments)]
fn supplier(
    name: &str,
    email: &str,
    phone: &str,
    address: &str,
    contact: &str,
    gst: &str,
    terms: &str,
    total_orders: u32,
    total_value: i64,
) -> Supplier {
    let now = Utc::now();
    Supplier {
        id: Uuid::new_v4(),
        name: name.into(),
        email: Some(email.into()),
        phone: Some(phone.into()),
        address: Some(address.into()),
        contact_person: Some(contact.into()),
        gst_number: Some(gst.into()),
        payment_terms: Some(terms.into()),
        status: SupplierStatus::Active,
        total_orders,
        total_value: Decimal::from(total_value),
        created_at: now,
        updated_at: now,
    }
}

fn customer(name: &str, email: &str, phone: &str, location: &str, status: CustomerStatus, joined: NaiveDate) -> Customer {
    let now = Utc::now();
    Customer {
        id: Uuid::new_v4(),
        full_name: name.into(),
        email: Some(email.into()),
        phone: Some(phone.into()),
        location: Some(location.into()),
        status,
        join_date: joined,
        created_at: now,
        updated_at: now,
    }
}

fn invoice(number: &str, customer_id: Uuid, cents: i64, status: InvoiceStatus, issued: NaiveDate) -> Invoice {
    let now = Utc::now();
    let line = BillItemDraft {
        description: "Serviços".into(),
        quantity: Decimal::ONE,
        rate: Decimal::new(cents, 2),
    };
    let totals = money::compute_totals(std::slice::from_ref(&line), TaxPolicy::none());
    Invoice {
        id: Uuid::new_v4(),
        number: number.into(),
        customer_id: Some(customer_id),
        invoice_date: issued,
        due_date: issued.checked_add_days(Days::new(30)).unwrap_or(issued),
        status,
        items: vec![BillItem {
            amount: line.amount(),
            description: line.description,
            quantity: line.quantity,
            rate: line.rate,
        }],
        subtotal: totals.subtotal,
        tax_rate: Decimal::ZERO,
        tax: totals.tax,
        total: totals.total,
        notes: None,
        created_at: now,
        updated_at: now,
    }
}

impl Database {
    /// Os dados de exemplo do painel original.
    pub fn with_sample_data() -> Self {
        let mut db = Database::new();
        let now = Utc::now();

        // --- Catálogo ---
        let electronics = db.categories.insert(category(
            "Electronics",
            "Electronic devices and accessories",
            &[("Computers", "Laptops, PCs, tablets"), ("Mobile", "Smartphones and accessories")],
        ));
        let clothing = db.categories.insert(category(
            "Clothing",
            "Apparel and fashion items",
            &[("Casual", "Casual wear"), ("Formal", "Formal attire")],
        ));
        db.categories.insert(category("Food", "Groceries and perishables", &[]));
        db.categories.insert(category("Books", "Books and printed media", &[]));

        // --- Fornecedores ---
        let tech = db.suppliers.insert(supplier(
            "Tech Supplies Co.",
            "contact@techsupplies.com",
            "+91 9876543210",
            "123 Tech Street, Mumbai, Maharashtra",
            "John Doe",
            "27AABCT1234L1Z5",
            "30 days",
            15,
            150_000,
        ));
        let fashion = db.suppliers.insert(supplier(
            "Fashion Hub",
            "orders@fashionhub.com",
            "+91 9876543211",
            "456 Fashion Avenue, Delhi",
            "Jane Smith",
            "07AABCF1234L1Z5",
            "15 days",
            8,
            75_000,
        ));

        // --- Produtos ---
        let laptop = db.products.insert(Product {
            id: Uuid::new_v4(),
            name: "Laptop".into(),
            category_id: electronics.id,
            subcategory_id: electronics.subcategories.first().map(|s| s.id),
            unit: "pcs".into(),
            cost_price: Decimal::from(800),
            selling_price: Decimal::from(1200),
            stock_level: Decimal::from(5),
            min_stock_level: Decimal::from(10),
            supplier_id: Some(tech.id),
            batch_number: None,
            expiry_date: None,
            created_at: now,
            updated_at: now,
        });
        let tshirt = db.products.insert(Product {
            id: Uuid::new_v4(),
            name: "T-Shirt".into(),
            category_id: clothing.id,
            subcategory_id: clothing.subcategories.first().map(|s| s.id),
            unit: "pcs".into(),
            cost_price: Decimal::from(15),
            selling_price: Decimal::from(25),
            stock_level: Decimal::from(50),
            min_stock_level: Decimal::from(20),
            supplier_id: Some(fashion.id),
            batch_number: None,
            expiry_date: None,
            created_at: now,
            updated_at: now,
        });

        // --- Pedido de compra pendente ---
        let items = vec![PurchaseOrderLine {
            product_id: Some(laptop.id),
            product_name: laptop.name.clone(),
            quantity: Decimal::from(5),
            unit_price: Decimal::from(50_000),
        }];
        db.purchase_orders.insert(PurchaseOrder {
            id: Uuid::new_v4(),
            code: "PO-001".into(),
            supplier_id: tech.id,
            order_date: now,
            expected_delivery: now.date_naive().checked_add_days(Days::new(7)),
            status: PurchaseOrderStatus::Pending,
            total_amount: purchase_order_total(&items),
            items,
            created_at: now,
            updated_at: now,
        });

        // --- Histórico de movimentações (já refletido nos saldos acima) ---
        db.stock_movements.insert(StockMovement {
            id: Uuid::new_v4(),
            product_id: laptop.id,
            movement_type: MovementType::In,
            quantity: Decimal::from(10),
            reason: "Purchase order".into(),
            reference: Some("PO-001".into()),
            batch_number: None,
            expiry_date: None,
            date: now,
        });
        db.stock_movements.insert(StockMovement {
            id: Uuid::new_v4(),
            product_id: tshirt.id,
            movement_type: MovementType::Out,
            quantity: Decimal::from(5),
            reason: "Sale".into(),
            reference: Some("SALE-001".into()),
            batch_number: None,
            expiry_date: None,
            date: now,
        });

        // --- Clientes e faturas ---
        let john = db.customers.insert(customer(
            "John Doe", "john.doe@example.com", "+1 (555) 123-4567", "New York, NY",
            CustomerStatus::Active, date(2023, 6, 15),
        ));
        let jane = db.customers.insert(customer(
            "Jane Smith", "jane.smith@example.com", "+1 (555) 987-6543", "Los Angeles, CA",
            CustomerStatus::Active, date(2023, 7, 22),
        ));
        let bob = db.customers.insert(customer(
            "Bob Johnson", "bob.johnson@example.com", "+1 (555) 456-7890", "Chicago, IL",
            CustomerStatus::Vip, date(2023, 3, 10),
        ));
        let alice = db.customers.insert(customer(
            "Alice Brown", "alice.brown@example.com", "+1 (555) 321-0987", "Houston, TX",
            CustomerStatus::Inactive, date(2023, 11, 5),
        ));
        let charlie = db.customers.insert(customer(
            "Charlie Wilson", "charlie.wilson@example.com", "+1 (555) 654-3210", "Phoenix, AZ",
            CustomerStatus::Active, date(2023, 8, 18),
        ));

        db.invoices.insert(invoice("INV-001", john.id, 123_456, InvoiceStatus::Paid, date(2024, 1, 15)));
        db.invoices.insert(invoice("INV-002", jane.id, 98_765, InvoiceStatus::Pending, date(2024, 1, 14)));
        db.invoices.insert(invoice("INV-003", bob.id, 234_567, InvoiceStatus::Paid, date(2024, 1, 13)));
        db.invoices.insert(invoice("INV-004", alice.id, 87_654, InvoiceStatus::Overdue, date(2024, 1, 12)));
        db.invoices.insert(invoice("INV-005", charlie.id, 154_321, InvoiceStatus::Paid, date(2024, 1, 11)));

        tracing::info!(
            "✅ Dados de exemplo carregados: {} produtos, {} fornecedores, {} clientes",
            db.products.len(),
            db.suppliers.len(),
            db.customers.len()
        );
        db
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::alerts;

    #[test]
    fn sample_data_is_consistent() {
        let db = Database::with_sample_data();

        assert_eq!(db.categories.len(), 4);
        assert_eq!(db.products.len(), 2);
        assert_eq!(db.invoices.len(), 5);

        // Toda referência aponta para algo que existe
        for p in db.products.all() {
            assert!(db.categories.contains(p.category_id));
            let cat = db.categories.get(p.category_id).unwrap();
            assert!(cat.subcategory(p.subcategory_id.unwrap()).is_some());
            assert!(db.suppliers.contains(p.supplier_id.unwrap()));
        }
        for po in db.purchase_orders.all() {
            assert!(db.suppliers.contains(po.supplier_id));
        }

        // Laptop: 5 <= 10
        let low = alerts::low_stock(db.products.all());
        assert_eq!(low.len(), 1);
        assert_eq!(low[0].name, "Laptop");
    }
}
