// src/panels/analytics.rs

use chrono::NaiveDate;
use serde::Serialize;

use crate::{
    api::DashboardBackend,
    common::error::AppError,
    models::analytics::{AggregatedView, ComparisonState, DailyMetrics},
    services::{AnalyticsAggregator, ComparisonEngine, report_service::previous_day},
};

// Aba de análises: cards + gráficos do dia escolhido e comparação com o dia anterior
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsView {
    pub aggregated: AggregatedView,
    pub comparison: ComparisonState,
}

pub async fn load_analytics_for_date<B>(backend: &B, date: NaiveDate) -> Result<AnalyticsView, AppError>
where
    B: DashboardBackend + ?Sized,
{
    let aggregator = AnalyticsAggregator::new();
    let engine = ComparisonEngine::new(aggregator);

    // As duas buscas são independentes
    let (current, previous) = tokio::join!(
        backend.get_analytics_for_date(date),
        backend.get_analytics_for_date(previous_day(date)),
    );

    // Dia escolhido sem registro é exibido zerado
    let current = current?.unwrap_or_else(|| DailyMetrics::empty(date));
    let aggregated = aggregator.aggregate(&current)?;

    // Falha no dia anterior não derruba o painel: só não há comparação
    let previous = match previous {
        Ok(previous) => previous,
        Err(e) => {
            tracing::warn!("Sem dados do dia anterior a {}: {}", date, e);
            None
        }
    };

    Ok(AnalyticsView {
        comparison: engine.compare_with(&current, previous.as_ref()),
        aggregated,
    })
}
