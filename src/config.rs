// src/config.rs

use anyhow::Context;
use rust_decimal::Decimal;
use std::{str::FromStr, sync::Arc};
use tokio::sync::RwLock;

use crate::{
    db::Database,
    services::{
        catalog_service::CatalogService, crm_service::CrmService,
        dashboard_service::DashboardService, finance_service::FinanceService,
        inventory_service::InventoryService, report_service::ReportService,
        supplier_service::SupplierService,
    },
};

/// Taxas usadas na geração de faturas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BillingConfig {
    pub standard_tax_rate: Decimal, // BILL_TAX_RATE
    pub gst_rate: Decimal,          // GST_RATE
}

impl Default for BillingConfig {
    fn default() -> Self {
        Self {
            standard_tax_rate: Decimal::new(10, 2),
            gst_rate: Decimal::new(18, 2),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub server_addr: String,
    pub seed_sample_data: bool,
    pub billing: BillingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_addr: "0.0.0.0:3000".to_string(),
            seed_sample_data: true,
            billing: BillingConfig::default(),
        }
    }
}

fn parse_bool(key: &str, raw: &str) -> anyhow::Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => anyhow::bail!("{key} deve ser booleano, recebido '{other}'"),
    }
}

fn parse_rate(key: &str, raw: &str) -> anyhow::Result<Decimal> {
    let rate = Decimal::from_str(raw.trim())
        .with_context(|| format!("{key} deve ser um decimal (ex: 0.18)"))?;
    anyhow::ensure!(
        rate >= Decimal::ZERO && rate <= Decimal::ONE,
        "{key} deve estar entre 0 e 1, recebido {rate}"
    );
    Ok(rate)
}

impl Config {
    /// Lê o `.env` (se existir) e depois as variáveis de ambiente.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();

        let server_addr = lookup("SERVER_ADDR").unwrap_or(defaults.server_addr);
        let seed_sample_data = match lookup("SEED_SAMPLE_DATA") {
            Some(raw) => parse_bool("SEED_SAMPLE_DATA", &raw)?,
            None => defaults.seed_sample_data,
        };
        let standard_tax_rate = match lookup("BILL_TAX_RATE") {
            Some(raw) => parse_rate("BILL_TAX_RATE", &raw)?,
            None => defaults.billing.standard_tax_rate,
        };
        let gst_rate = match lookup("GST_RATE") {
            Some(raw) => parse_rate("GST_RATE", &raw)?,
            None => defaults.billing.gst_rate,
        };

        Ok(Self {
            server_addr,
            seed_sample_data,
            billing: BillingConfig {
                standard_tax_rate,
                gst_rate,
            },
        })
    }
}

// O estado compartilhado que será acessível em toda a aplicação
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<RwLock<Database>>,
    pub config: Arc<Config>,
    pub catalog_service: CatalogService,
    pub inventory_service: InventoryService,
    pub supplier_service: SupplierService,
    pub crm_service: CrmService,
    pub finance_service: FinanceService,
    pub report_service: ReportService,
    pub dashboard_service: DashboardService,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let db = if config.seed_sample_data {
            Database::with_sample_data()
        } else {
            tracing::info!("Iniciando com o banco vazio (SEED_SAMPLE_DATA=false)");
            Database::new()
        };
        Self::with_database(config, db)
    }

    pub fn with_database(config: Config, db: Database) -> Self {
        // --- Monta o gráfico de dependências ---
        let inventory_service = InventoryService::new();
        let supplier_service = SupplierService::new(inventory_service.clone());
        let finance_service = FinanceService::new(config.billing);

        Self {
            db: Arc::new(RwLock::new(db)),
            config: Arc::new(config),
            catalog_service: CatalogService::new(),
            inventory_service,
            supplier_service,
            crm_service: CrmService::new(),
            finance_service,
            report_service: ReportService::new(),
            dashboard_service: DashboardService::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.billing.gst_rate, Decimal::new(18, 2));
        assert_eq!(config.billing.standard_tax_rate, Decimal::new(10, 2));
    }

    #[test]
    fn reads_every_variable() {
        let config = Config::from_lookup(lookup(&[
            ("SERVER_ADDR", "127.0.0.1:8080"),
            ("SEED_SAMPLE_DATA", "false"),
            ("BILL_TAX_RATE", "0.05"),
            ("GST_RATE", "0.12"),
        ]))
        .unwrap();

        assert_eq!(config.server_addr, "127.0.0.1:8080");
        assert!(!config.seed_sample_data);
        assert_eq!(config.billing.standard_tax_rate, Decimal::new(5, 2));
        assert_eq!(config.billing.gst_rate, Decimal::new(12, 2));
    }

    #[test]
    fn rejects_bad_values() {
        assert!(Config::from_lookup(lookup(&[("GST_RATE", "abc")])).is_err());
        assert!(Config::from_lookup(lookup(&[("GST_RATE", "1.5")])).is_err());
        assert!(Config::from_lookup(lookup(&[("SEED_SAMPLE_DATA", "maybe")])).is_err());
    }

    #[test]
    fn state_keeps_the_loaded_config() {
        let config = Config::from_lookup(lookup(&[
            ("SERVER_ADDR", "127.0.0.1:9000"),
            ("SEED_SAMPLE_DATA", "false"),
        ]))
        .unwrap();
        let state = AppState::new(config.clone());

        assert_eq!(*state.config, config);
        assert!(state.db.try_read().unwrap().products.is_empty());
    }
}
