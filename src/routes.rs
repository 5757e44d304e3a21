// src/routes.rs

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::{config::AppState, handlers};

pub fn build_router(app_state: AppState) -> Router {
    let catalog_routes = Router::new()
        .route(
            "/products",
            get(handlers::catalog::list_products).post(handlers::catalog::create_product),
        )
        .route(
            "/products/{id}",
            get(handlers::catalog::get_product)
                .put(handlers::catalog::update_product)
                .delete(handlers::catalog::delete_product),
        )
        .route(
            "/categories",
            get(handlers::catalog::list_categories).post(handlers::catalog::create_category),
        )
        .route(
            "/categories/{id}",
            put(handlers::catalog::update_category).delete(handlers::catalog::delete_category),
        )
        .route(
            "/categories/{id}/subcategories",
            post(handlers::catalog::create_subcategory),
        )
        .route(
            "/categories/{id}/subcategories/{sub_id}",
            put(handlers::catalog::update_subcategory)
                .delete(handlers::catalog::delete_subcategory),
        );

    let inventory_routes = Router::new()
        .route(
            "/inventory/movements",
            get(handlers::inventory::list_movements).post(handlers::inventory::record_movement),
        )
        .route("/inventory/movements/{id}", get(handlers::inventory::get_movement))
        .route("/alerts/low-stock", get(handlers::inventory::low_stock_alerts));

    let supplier_routes = Router::new()
        .route(
            "/suppliers",
            get(handlers::suppliers::list_suppliers).post(handlers::suppliers::create_supplier),
        )
        .route(
            "/suppliers/{id}",
            get(handlers::suppliers::get_supplier)
                .put(handlers::suppliers::update_supplier)
                .delete(handlers::suppliers::delete_supplier),
        )
        .route(
            "/purchase-orders",
            get(handlers::suppliers::list_purchase_orders)
                .post(handlers::suppliers::create_purchase_order),
        )
        .route(
            "/purchase-orders/{id}",
            get(handlers::suppliers::get_purchase_order)
                .put(handlers::suppliers::update_purchase_order),
        )
        .route(
            "/purchase-orders/{id}/status",
            post(handlers::suppliers::transition_purchase_order),
        );

    let crm_routes = Router::new()
        .route(
            "/customers",
            get(handlers::crm::list_customers).post(handlers::crm::create_customer),
        )
        .route(
            "/customers/{id}",
            get(handlers::crm::get_customer)
                .put(handlers::crm::update_customer)
                .delete(handlers::crm::delete_customer),
        );

    let finance_routes = Router::new()
        .route("/bills/preview", post(handlers::finance::preview_bill))
        .route(
            "/invoices",
            get(handlers::finance::list_invoices).post(handlers::finance::issue_invoice),
        )
        .route("/invoices/{id}", get(handlers::finance::get_invoice))
        .route("/invoices/{id}/status", post(handlers::finance::set_invoice_status))
        .route("/invoices/{id}/print", get(handlers::finance::print_invoice));

    let report_routes = Router::new()
        .route("/reports/{kind}", get(handlers::reports::get_report))
        .route("/reports/{kind}/csv", get(handlers::reports::export_report_csv))
        .route("/reports/{kind}/print", get(handlers::reports::print_report))
        .route("/dashboard/summary", get(handlers::dashboard::get_summary))
        .route("/dashboard/analytics", get(handlers::dashboard::get_analytics));

    // Combina tudo no router principal
    let api = Router::new()
        .route("/health", get(|| async { "OK" }))
        .merge(catalog_routes)
        .merge(inventory_routes)
        .merge(supplier_routes)
        .merge(crm_routes)
        .merge(finance_routes)
        .merge(report_routes);

    Router::new().nest("/api", api).with_state(app_state)
}
