// src/services/analytics_service.rs

use indexmap::IndexMap;
use rust_decimal::Decimal;

use crate::{
    common::{error::AppError, number_utils::round2},
    models::analytics::{AggregatedView, DailyMetrics, HourlySeries, PopularDish},
};

// Transforma o payload diário nas métricas dos cards e nas séries dos gráficos.
// Sem estado: mesma entrada, mesma saída.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnalyticsAggregator;

impl AnalyticsAggregator {
    pub fn new() -> Self {
        Self
    }

    pub fn aggregate(&self, metrics: &DailyMetrics) -> Result<AggregatedView, AppError> {
        Ok(AggregatedView {
            date: metrics.date,
            total_sales: metrics.total_sales,
            total_orders: metrics.total_orders,
            average_order_value: self.average_order_value(metrics),
            most_popular_dish: self.most_popular_dish(metrics),
            hourly_series_by_dish: self.hourly_series_by_dish(metrics)?,
        })
    }

    // Zero pedidos -> 0.00, nunca divisão por zero
    pub fn average_order_value(&self, metrics: &DailyMetrics) -> Decimal {
        if metrics.total_orders == 0 {
            return Decimal::ZERO;
        }
        round2(metrics.total_sales / Decimal::from(metrics.total_orders))
    }

    // Maior contagem estritamente; empate fica com a primeira chave do mapa.
    // Pratos com zero vendas nunca ganham.
    pub fn most_popular_dish(&self, metrics: &DailyMetrics) -> PopularDish {
        let mut popular = PopularDish::NoData;
        let mut max_qty = 0;

        for (dish, &qty) in &metrics.dishes_sold {
            if qty > max_qty {
                max_qty = qty;
                popular = PopularDish::Dish { name: dish.clone(), quantity: qty };
            }
        }
        popular
    }

    pub fn hourly_series_by_dish(
        &self,
        metrics: &DailyMetrics,
    ) -> Result<IndexMap<String, HourlySeries>, AppError> {
        let mut series = IndexMap::with_capacity(metrics.peak_hours.len());

        // 1. Repassa as séries do backend (validando o tamanho)
        for (dish, raw) in &metrics.peak_hours {
            series.insert(dish.clone(), HourlySeries::from_raw(dish, raw)?);
        }

        // 2. Prato vendido sem série vira série zerada, para o gráfico ficar completo
        for dish in metrics.dishes_sold.keys() {
            if !series.contains_key(dish) {
                series.insert(dish.clone(), HourlySeries::zeros());
            }
        }

        Ok(series)
    }
}
