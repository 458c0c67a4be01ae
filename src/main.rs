//src/main.rs

use std::sync::Arc;

use chrono::Local;
use tracing_subscriber::EnvFilter;

use dashboard::{
    api::{ApiClient, DashboardBackend},
    charts::peak_hours_chart,
    config::{AppState, DashboardConfig},
    models::{analytics::ComparisonState, report::QuickRange},
    panels::Dashboard,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Inicializa o logger (RUST_LOG sobrescreve o nível padrão)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .compact()
        .init();

    // Se a configuração falhar, a aplicação não deve iniciar.
    let config = DashboardConfig::from_env()?;
    let app_state = AppState::new(config)?;

    // Backend fora do ar não é fatal: os painéis mostram o banner e tentam de novo
    if let Err(e) = app_state.client.health().await {
        tracing::warn!("🔥 Backend indisponível em {}: {}", app_state.client.base_url(), e);
    }

    app_state.dashboard.refresh_dishes().await;

    if app_state.dashboard.preview_report(Local::now().date_naive()).await {
        if let Some(preview) = app_state.dashboard.report_preview.data().await {
            tracing::info!(
                "Relatório de {}: {} prato(s), {} ingrediente(s) usados",
                preview.date,
                preview.dishes.len(),
                preview.ingredients_used.len()
            );
        }
    }

    if let Some(dir) = &app_state.config.report_dir {
        if let Err(e) = app_state.dashboard.download_quick_report(QuickRange::Today, dir).await {
            tracing::warn!("Não foi possível salvar o relatório de hoje: {:#}", e);
        }
    }

    let mut handles = app_state.dashboard.spawn_refresh_loops();
    handles.push(spawn_reporter(Arc::clone(&app_state.dashboard), app_state.config.refresh_interval));

    tracing::info!("🚀 Dashboard rodando; Ctrl+C para sair");
    tokio::signal::ctrl_c().await?;

    for handle in handles {
        handle.abort();
    }
    tracing::info!("Dashboard encerrado");
    Ok(())
}

// Sem interface gráfica: registra no log o que cada painel exibiria
fn spawn_reporter(
    dashboard: Arc<Dashboard<ApiClient>>,
    period: std::time::Duration,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        loop {
            ticker.tick().await;

            let orders = dashboard.orders.snapshot().await;
            if let Some(overview) = &orders.data {
                tracing::info!(
                    "Hoje: ${:.2} em {} pedidos, mais pedido: {}",
                    overview.total_sales,
                    overview.total_orders,
                    overview.most_popular_dish.label()
                );
            }

            let analytics = dashboard.analytics.snapshot().await;
            if let Some(view) = &analytics.data {
                let series_count = peak_hours_chart(&view.aggregated).series.len();
                match &view.comparison {
                    ComparisonState::Available(result) => tracing::info!(
                        "Análise {}: ticket médio ${:.2} ({}), vendas {} vs dia anterior, {} série(s) por hora",
                        view.aggregated.date,
                        view.aggregated.average_order_value,
                        result.average_order_value.percent_label(),
                        result.sales.percent_label(),
                        series_count
                    ),
                    ComparisonState::NoPreviousData => tracing::info!(
                        "Análise {}: ticket médio ${:.2}, sem dados do dia anterior",
                        view.aggregated.date,
                        view.aggregated.average_order_value
                    ),
                }
            }

            let inventory = dashboard.inventory.snapshot().await;
            if let Some(evaluation) = &inventory.data {
                tracing::info!(
                    "Estoque: {} ingredientes, {} baixos, valor estimado ${:.2}",
                    evaluation.summary.ingredient_count,
                    evaluation.summary.low_stock_count,
                    evaluation.summary.total_estimated_value
                );
            }

            for banner in [&orders.error, &analytics.error, &inventory.error].into_iter().flatten() {
                tracing::warn!("⚠️ {}", banner);
            }
        }
    })
}
