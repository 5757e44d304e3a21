pub mod catalog_service;
pub mod crm_service;
pub mod dashboard_service;
pub mod finance_service;
pub mod inventory_service;
pub mod report_service;
pub mod supplier_service;
