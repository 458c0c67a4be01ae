// src/config.rs

use std::{env, path::PathBuf, sync::Arc, time::Duration};

use anyhow::{Context, bail};

use crate::{api::ApiClient, panels::Dashboard, services::OrderService};

const DEFAULT_API_BASE_URL: &str = "http://localhost:5000/api";

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    pub api_base_url: String,
    pub refresh_interval: Duration,
    pub request_timeout: Duration,
    pub recent_orders_limit: usize,
    // Onde o binário grava os relatórios baixados (opcional)
    pub report_dir: Option<PathBuf>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            refresh_interval: Duration::from_secs(30),
            request_timeout: Duration::from_secs(10),
            recent_orders_limit: 10,
            report_dir: None,
        }
    }
}

impl DashboardConfig {
    /// Lê o ambiente (e o `.env`, se existir). Variáveis ausentes usam o padrão.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    // Separado de `from_env` para os testes não mexerem no ambiente do processo
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let api_base_url = lookup("API_BASE_URL")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or(defaults.api_base_url);
        if !api_base_url.starts_with("http://") && !api_base_url.starts_with("https://") {
            bail!("API_BASE_URL deve começar com http:// ou https:// (recebido: {})", api_base_url);
        }

        let refresh_secs = parse_or(&lookup, "REFRESH_INTERVAL_SECS", 30u64)?;
        if refresh_secs == 0 {
            bail!("REFRESH_INTERVAL_SECS deve ser maior que zero");
        }
        let timeout_secs = parse_or(&lookup, "REQUEST_TIMEOUT_SECS", 10u64)?;
        let recent_orders_limit = parse_or(&lookup, "RECENT_ORDERS_LIMIT", defaults.recent_orders_limit)?;

        Ok(Self {
            api_base_url,
            refresh_interval: Duration::from_secs(refresh_secs),
            request_timeout: Duration::from_secs(timeout_secs),
            recent_orders_limit,
            report_dir: lookup("REPORT_DIR").filter(|v| !v.trim().is_empty()).map(PathBuf::from),
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> anyhow::Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{} inválido: '{}'", key, raw)),
        None => Ok(default),
    }
}

// O estado compartilhado do binário
#[derive(Clone)]
pub struct AppState {
    pub config: DashboardConfig,
    pub client: Arc<ApiClient>,
    pub dashboard: Arc<Dashboard<ApiClient>>,
}

impl AppState {
    pub fn new(config: DashboardConfig) -> anyhow::Result<Self> {
        // --- Monta o gráfico de dependências ---
        let client = Arc::new(
            ApiClient::new(&config.api_base_url, config.request_timeout)
                .context("Falha ao criar o cliente HTTP")?,
        );
        let order_service = OrderService::new(config.recent_orders_limit);
        let dashboard = Arc::new(Dashboard::new(
            Arc::clone(&client),
            order_service,
            config.refresh_interval,
        ));

        tracing::info!("✅ Dashboard configurado para {}", client.base_url());

        Ok(Self { config, client, dashboard })
    }
}
