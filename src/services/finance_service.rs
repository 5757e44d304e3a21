// src/services/finance_service.rs

use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::{
        error::AppError,
        export,
        filter::SearchFilter,
        money::{self, LineItem, TaxPolicy},
    },
    config::BillingConfig,
    db::Database,
    models::finance::{
        Bill, BillDraft, BillItem, Invoice, InvoiceDetail, InvoiceStatus, NewInvoice, TaxKind,
    },
};

const INVOICE_PREFIX: &str = "INV-";

#[derive(Clone)]
pub struct FinanceService {
    billing: BillingConfig,
}

impl FinanceService {
    pub fn new(billing: BillingConfig) -> Self {
        Self { billing }
    }

    fn tax_policy(&self, draft: &BillDraft) -> TaxPolicy {
        let rate = match draft.tax_kind {
            TaxKind::Standard => self.billing.standard_tax_rate,
            TaxKind::Gst => self.billing.gst_rate,
        };
        TaxPolicy::new(draft.apply_tax, rate)
    }

    // --- PRÉVIA (nada é gravado) ---
    pub fn preview(&self, draft: &BillDraft) -> Result<Bill, AppError> {
        draft.validate()?;

        let policy = self.tax_policy(draft);
        let totals = money::compute_totals(&draft.items, policy);
        let items = draft
            .items
            .iter()
            .map(|item| BillItem {
                description: item.description.clone(),
                quantity: item.quantity,
                rate: item.rate,
                amount: item.amount(),
            })
            .collect();

        Ok(Bill {
            items,
            subtotal: totals.subtotal,
            tax_rate: policy.effective_rate(),
            tax: totals.tax,
            total: totals.total,
        })
    }

    /// Próximo número livre: maior sufixo numérico + 1 (INV-006 depois de INV-005).
    pub fn next_invoice_number(&self, db: &Database) -> Result<String, AppError> {
        let highest = db
            .invoices
            .all()
            .iter()
            .filter_map(|i| i.number.strip_prefix(INVOICE_PREFIX))
            .filter_map(|suffix| suffix.parse::<u64>().ok())
            .max()
            .unwrap_or(0);
        let next = highest.checked_add(1).ok_or_else(|| {
            AppError::Conflict("A numeração automática de faturas se esgotou".to_string())
        })?;
        Ok(format!("{INVOICE_PREFIX}{next:03}"))
    }

    fn invoice_detail(&self, db: &Database, invoice: &Invoice) -> InvoiceDetail {
        InvoiceDetail {
            customer_name: invoice.customer_id.and_then(|id| db.customer_name(id)),
            invoice: invoice.clone(),
        }
    }

    // --- EMITIR FATURA ---
    pub fn issue_invoice(
        &self,
        db: &mut Database,
        draft: BillDraft,
    ) -> Result<InvoiceDetail, AppError> {
        let bill = self.preview(&draft)?;
        if bill.items.is_empty() {
            return Err(AppError::field(
                "items",
                "length",
                "A fatura precisa de pelo menos um item.",
            ));
        }

        if let Some(customer_id) = draft.customer_id {
            if !db.customers.contains(customer_id) {
                return Err(AppError::InvalidReference { field: "customerId", id: customer_id });
            }
        }

        let number = match draft.invoice_number.as_deref().map(str::trim) {
            Some(number) if !number.is_empty() => {
                if db.invoices.all().iter().any(|i| i.number == number) {
                    return Err(AppError::Conflict(format!("A fatura {number} já existe")));
                }
                number.to_string()
            }
            _ => self.next_invoice_number(db)?,
        };

        let invoice_date = draft.invoice_date.unwrap_or_else(|| Utc::now().date_naive());
        let due_date = draft.due_date.unwrap_or(invoice_date);
        if due_date < invoice_date {
            return Err(AppError::field(
                "dueDate",
                "range",
                "O vencimento não pode ser anterior à emissão.",
            ));
        }

        let invoice = db.invoices.create(NewInvoice {
            number,
            customer_id: draft.customer_id,
            invoice_date,
            due_date,
            bill,
            notes: draft.notes,
        })?;
        tracing::info!("🧾 Fatura {} emitida (total {})", invoice.number, invoice.total);
        Ok(self.invoice_detail(db, &invoice))
    }

    pub fn set_invoice_status(
        &self,
        db: &mut Database,
        id: Uuid,
        next: InvoiceStatus,
    ) -> Result<InvoiceDetail, AppError> {
        let invoice = db.invoices.get_mut(id)?;
        if !invoice.status.can_transition_to(next) {
            return Err(AppError::InvalidStatusTransition {
                from: invoice.status.as_str().to_string(),
                to: next.as_str().to_string(),
            });
        }
        let previous = invoice.status;
        invoice.status = next;
        invoice.updated_at = Utc::now();
        let updated = invoice.clone();

        tracing::info!(
            "🔄 Fatura {}: {} -> {}",
            updated.number,
            previous.as_str(),
            next.as_str()
        );
        Ok(self.invoice_detail(db, &updated))
    }

    pub fn list_invoices(&self, db: &Database, filter: &SearchFilter) -> Vec<InvoiceDetail> {
        let details: Vec<InvoiceDetail> = db
            .invoices
            .all()
            .iter()
            .map(|i| self.invoice_detail(db, i))
            .collect();
        filter.apply(&details).into_iter().cloned().collect()
    }

    pub fn get_invoice(&self, db: &Database, id: Uuid) -> Result<InvoiceDetail, AppError> {
        let invoice = db.invoices.find(id)?;
        Ok(self.invoice_detail(db, invoice))
    }

    pub fn print_invoice(&self, db: &Database, id: Uuid) -> Result<String, AppError> {
        let detail = self.get_invoice(db, id)?;
        Ok(export::render_invoice_html(&detail.invoice, detail.customer_name.as_deref()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::filter::Facet;
    use crate::models::finance::BillItemDraft;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn d(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn service() -> FinanceService {
        FinanceService::new(BillingConfig::default())
    }

    fn item(description: &str, quantity: &str, rate: &str) -> BillItemDraft {
        BillItemDraft {
            description: description.into(),
            quantity: d(quantity),
            rate: d(rate),
        }
    }

    fn bill(items: Vec<BillItemDraft>, apply_tax: bool, tax_kind: TaxKind) -> BillDraft {
        BillDraft {
            customer_id: None,
            invoice_number: None,
            invoice_date: None,
            due_date: None,
            notes: None,
            items,
            apply_tax,
            tax_kind,
        }
    }

    #[test]
    fn preview_gst_on_thousand() {
        let preview = service()
            .preview(&bill(vec![item("Consulting", "1", "1000")], true, TaxKind::Gst))
            .unwrap();
        assert_eq!(preview.subtotal, d("1000"));
        assert_eq!(preview.tax_rate, d("0.18"));
        assert_eq!(preview.tax, d("180.00"));
        assert_eq!(preview.total, d("1180.00"));
    }

    #[test]
    fn preview_standard_and_disabled_tax() {
        let items = vec![item("A", "2", "12.50"), item("B", "3", "4.10")];

        let standard = service().preview(&bill(items.clone(), true, TaxKind::Standard)).unwrap();
        assert_eq!(standard.subtotal, d("37.30"));
        assert_eq!(standard.tax, d("3.73"));
        assert_eq!(standard.total, d("41.03"));
        assert_eq!(standard.items[0].amount, d("25.00"));

        let untaxed = service().preview(&bill(items, false, TaxKind::Gst)).unwrap();
        assert_eq!(untaxed.tax, Decimal::ZERO);
        assert_eq!(untaxed.tax_rate, Decimal::ZERO);
        assert_eq!(untaxed.total, untaxed.subtotal);
    }

    #[test]
    fn preview_of_no_items_is_zero() {
        let preview = service().preview(&bill(vec![], true, TaxKind::Gst)).unwrap();
        assert_eq!(preview.total, Decimal::ZERO);
        assert!(preview.items.is_empty());
    }

    #[test]
    fn negative_rate_is_rejected() {
        let err = service()
            .preview(&bill(vec![item("A", "1", "-5")], true, TaxKind::Gst))
            .unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }

    #[test]
    fn issue_allocates_next_number() {
        let mut db = Database::with_sample_data();
        let issued = service()
            .issue_invoice(&mut db, bill(vec![item("Laptop", "1", "1200")], true, TaxKind::Gst))
            .unwrap();

        assert_eq!(issued.invoice.number, "INV-006");
        assert_eq!(issued.invoice.status, InvoiceStatus::Pending);
        assert_eq!(issued.invoice.total, d("1416.00"));
        assert_eq!(issued.customer_name, None);
        assert_eq!(db.invoices.len(), 6);
    }

    #[test]
    fn issue_rejects_duplicates_empty_and_unknown_customer() {
        let mut db = Database::with_sample_data();

        let mut dup = bill(vec![item("A", "1", "1")], false, TaxKind::Standard);
        dup.invoice_number = Some("INV-001".into());
        assert!(matches!(service().issue_invoice(&mut db, dup), Err(AppError::Conflict(_))));

        let empty = bill(vec![], true, TaxKind::Standard);
        assert!(matches!(
            service().issue_invoice(&mut db, empty),
            Err(AppError::ValidationError(_))
        ));

        let mut stranger = bill(vec![item("A", "1", "1")], false, TaxKind::Standard);
        stranger.customer_id = Some(Uuid::new_v4());
        assert!(matches!(
            service().issue_invoice(&mut db, stranger),
            Err(AppError::InvalidReference { field: "customerId", .. })
        ));

        assert_eq!(db.invoices.len(), 5);
    }

    #[test]
    fn exhausted_numbering_is_a_conflict() {
        let mut db = Database::with_sample_data();
        let mut last = bill(vec![item("A", "1", "1")], false, TaxKind::Standard);
        last.invoice_number = Some(format!("INV-{}", u64::MAX));
        service().issue_invoice(&mut db, last).unwrap();

        let err = service()
            .issue_invoice(&mut db, bill(vec![item("B", "1", "1")], false, TaxKind::Standard))
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
        assert!(service().next_invoice_number(&db).is_err());
        assert_eq!(db.invoices.len(), 6);
    }

    #[test]
    fn preview_subtotal_keeps_sub_cent_lines() {
        let items = vec![item("A", "1", "0.005"), item("B", "1", "0.005"), item("C", "1", "0.005")];
        let preview = service().preview(&bill(items, false, TaxKind::Standard)).unwrap();
        assert_eq!(preview.subtotal, d("0.02"));
        assert_eq!(preview.total, d("0.02"));
    }

    #[test]
    fn status_transitions() {
        let mut db = Database::with_sample_data();
        let pending = db.invoices.all().iter().find(|i| i.number == "INV-002").unwrap().id;
        let paid = db.invoices.all().iter().find(|i| i.number == "INV-001").unwrap().id;

        let overdue = service().set_invoice_status(&mut db, pending, InvoiceStatus::Overdue).unwrap();
        assert_eq!(overdue.invoice.status, InvoiceStatus::Overdue);
        service().set_invoice_status(&mut db, pending, InvoiceStatus::Paid).unwrap();

        let err = service().set_invoice_status(&mut db, paid, InvoiceStatus::Pending).unwrap_err();
        assert!(matches!(err, AppError::InvalidStatusTransition { .. }));
    }

    #[test]
    fn list_filters_and_print() {
        let db = Database::with_sample_data();

        let paid = service().list_invoices(&db, &SearchFilter::new(None, Facet::parse(Some("paid"))));
        assert_eq!(paid.len(), 3);

        let jane = service().list_invoices(&db, &SearchFilter::new(Some("jane"), Facet::All));
        assert_eq!(jane.len(), 1);
        assert_eq!(jane[0].invoice.number, "INV-002");

        let html = service().print_invoice(&db, jane[0].invoice.id).unwrap();
        assert!(html.contains("Bill to: Jane Smith"));
        assert!(html.contains("Total: 987.65"));
    }
}
