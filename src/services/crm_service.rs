// src/services/crm_service.rs

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    common::{error::AppError, filter::SearchFilter},
    db::{Database, Entity},
    models::{
        crm::{Customer, CustomerDetail, CustomerDraft, CustomerPatch},
        finance::InvoiceStatus,
    },
};

#[derive(Clone, Default)]
pub struct CrmService;

impl CrmService {
    pub fn new() -> Self {
        Self
    }

    /// Pedidos = faturas do cliente; total gasto = só as pagas.
    fn customer_detail(&self, db: &Database, customer: &Customer) -> CustomerDetail {
        let invoices = db.invoices.filter(|i| i.customer_id == Some(customer.id));
        let total_spent: Decimal = invoices
            .iter()
            .filter(|i| i.status == InvoiceStatus::Paid)
            .map(|i| i.total)
            .sum();
        CustomerDetail {
            orders: invoices.len(),
            total_spent,
            customer: customer.clone(),
        }
    }

    pub fn list_customers(&self, db: &Database, filter: &SearchFilter) -> Vec<CustomerDetail> {
        let details: Vec<CustomerDetail> = db
            .customers
            .all()
            .iter()
            .map(|c| self.customer_detail(db, c))
            .collect();
        filter.apply(&details).into_iter().cloned().collect()
    }

    pub fn get_customer(&self, db: &Database, id: Uuid) -> Result<CustomerDetail, AppError> {
        let customer = db.customers.find(id)?;
        Ok(self.customer_detail(db, customer))
    }

    pub fn create_customer(
        &self,
        db: &mut Database,
        draft: CustomerDraft,
    ) -> Result<CustomerDetail, AppError> {
        let customer = db.customers.create(draft)?;
        tracing::info!("✅ Cliente criado: {} ({})", customer.full_name, customer.id);
        Ok(self.customer_detail(db, &customer))
    }

    pub fn update_customer(
        &self,
        db: &mut Database,
        id: Uuid,
        patch: CustomerPatch,
    ) -> Result<CustomerDetail, AppError> {
        let customer = db.customers.update(id, patch)?;
        tracing::info!("✏️ Cliente atualizado: {}", customer.full_name);
        Ok(self.customer_detail(db, &customer))
    }

    pub fn delete_customer(&self, db: &mut Database, id: Uuid) -> Result<Customer, AppError> {
        db.customers.find(id)?;
        if db.invoices.all().iter().any(|i| i.customer_id == Some(id)) {
            return Err(AppError::ReferenceInUse { kind: Customer::KIND, id });
        }
        let removed = db.customers.delete(id)?;
        tracing::info!("🗑️ Cliente removido: {}", removed.full_name);
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::filter::Facet;
    use crate::models::crm::CustomerStatus;

    fn draft(name: &str) -> CustomerDraft {
        CustomerDraft {
            full_name: name.into(),
            email: None,
            phone: None,
            location: Some("Austin, TX".into()),
            status: CustomerStatus::Active,
            join_date: None,
        }
    }

    #[test]
    fn detail_derives_orders_and_spent() {
        let service = CrmService::new();
        let db = Database::with_sample_data();

        let john = service
            .list_customers(&db, &SearchFilter::new(Some("john doe"), Facet::All))
            .pop()
            .unwrap();
        assert_eq!(john.orders, 1);
        assert_eq!(john.total_spent, Decimal::new(123_456, 2));

        // Fatura vencida não conta como gasto
        let alice = service
            .list_customers(&db, &SearchFilter::new(Some("alice"), Facet::All))
            .pop()
            .unwrap();
        assert_eq!(alice.orders, 1);
        assert_eq!(alice.total_spent, Decimal::ZERO);
    }

    #[test]
    fn filters_by_status_and_location() {
        let service = CrmService::new();
        let db = Database::with_sample_data();

        let vip = service.list_customers(&db, &SearchFilter::new(None, Facet::parse(Some("vip"))));
        assert_eq!(vip.len(), 1);
        assert_eq!(vip[0].customer.full_name, "Bob Johnson");

        let phoenix = service.list_customers(&db, &SearchFilter::new(Some("phoenix"), Facet::All));
        assert_eq!(phoenix.len(), 1);
    }

    #[test]
    fn create_update_delete() {
        let service = CrmService::new();
        let mut db = Database::with_sample_data();

        let created = service.create_customer(&mut db, draft("Dana White")).unwrap();
        assert_eq!(created.orders, 0);
        assert_eq!(created.customer.join_date, created.customer.created_at.date_naive());

        let updated = service
            .update_customer(
                &mut db,
                created.customer.id,
                CustomerPatch { status: Some(CustomerStatus::Vip), ..Default::default() },
            )
            .unwrap();
        assert_eq!(updated.customer.status, CustomerStatus::Vip);
        assert_eq!(updated.customer.full_name, "Dana White");

        service.delete_customer(&mut db, created.customer.id).unwrap();
        assert!(matches!(
            service.get_customer(&db, created.customer.id),
            Err(AppError::NotFound { .. })
        ));
    }

    #[test]
    fn customer_with_invoices_cannot_be_deleted() {
        let service = CrmService::new();
        let mut db = Database::with_sample_data();
        let john = db.customers.all()[0].id;
        assert!(matches!(
            service.delete_customer(&mut db, john),
            Err(AppError::ReferenceInUse { kind: "Cliente", .. })
        ));
    }

    #[test]
    fn invalid_email_is_rejected() {
        let service = CrmService::new();
        let mut db = Database::new();
        let mut bad = draft("Eve");
        bad.email = Some("eve-at-example".into());
        assert!(matches!(
            service.create_customer(&mut db, bad),
            Err(AppError::ValidationError(_))
        ));
        assert!(db.customers.is_empty());
    }
}
