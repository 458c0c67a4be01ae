// src/services/comparison_service.rs

use rust_decimal::Decimal;

use crate::{
    common::number_utils::{percent_of, round2},
    models::analytics::{ComparisonResult, ComparisonState, DailyMetrics, MetricDelta, Trend},
    services::analytics_service::AnalyticsAggregator,
};

#[derive(Debug, Clone, Copy, Default)]
pub struct ComparisonEngine {
    aggregator: AnalyticsAggregator,
}

impl ComparisonEngine {
    pub fn new(aggregator: AnalyticsAggregator) -> Self {
        Self { aggregator }
    }

    pub fn compare(&self, current: &DailyMetrics, previous: &DailyMetrics) -> ComparisonResult {
        // Ticket médio calculado de cada lado antes da diferença,
        // nunca a partir da diferença dos totais.
        let avg_current = self.aggregator.average_order_value(current);
        let avg_previous = self.aggregator.average_order_value(previous);

        ComparisonResult {
            sales: delta(round2(current.total_sales), round2(previous.total_sales)),
            orders: delta(
                Decimal::from(current.total_orders),
                Decimal::from(previous.total_orders),
            ),
            average_order_value: delta(avg_current, avg_previous),
        }
    }

    /// Ramo do chamador: sem dia anterior não existe comparação.
    pub fn compare_with(
        &self,
        current: &DailyMetrics,
        previous: Option<&DailyMetrics>,
    ) -> ComparisonState {
        match previous {
            Some(previous) => ComparisonState::Available(self.compare(current, previous)),
            None => ComparisonState::NoPreviousData,
        }
    }
}

// Base zero -> 0.0% (exibido como estável), mesmo com variação absoluta.
fn delta(current: Decimal, previous: Decimal) -> MetricDelta {
    let absolute_change = current - previous;
    MetricDelta {
        current,
        previous,
        absolute_change,
        percent_change: percent_of(absolute_change, previous),
        trend: Trend::of(absolute_change),
    }
}
