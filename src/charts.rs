// src/charts.rs

use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::{
    models::{
        analytics::{AggregatedView, HOURS_PER_DAY},
        inventory::{IngredientRow, StockLevel},
    },
    services::inventory_service::CRITICAL_FILL_PERCENT,
};

// Só dados: labels + séries. Cores, fontes e tooltips ficam com quem desenha.

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSeries {
    pub label: String,
    pub values: Vec<Decimal>,
    // Uma flag por ponto (só o gráfico de estoque usa)
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub critical: Vec<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartData {
    pub labels: Vec<String>,
    pub series: Vec<ChartSeries>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub danger_line: Option<Decimal>,
}

pub fn hour_labels() -> Vec<String> {
    (0..HOURS_PER_DAY).map(|h| format!("{}:00", h)).collect()
}

// Barras por hora (pico de pedidos)
pub fn peak_hours_chart(view: &AggregatedView) -> ChartData {
    let series = if view.hourly_series_by_dish.is_empty() {
        vec![ChartSeries {
            label: "No Data".to_string(),
            values: vec![Decimal::ZERO; HOURS_PER_DAY],
            critical: Vec::new(),
        }]
    } else {
        view.hourly_series_by_dish
            .iter()
            .map(|(dish, hourly)| ChartSeries {
                label: dish.clone(),
                values: hourly.values().iter().map(|&v| Decimal::from(v)).collect(),
                critical: Vec::new(),
            })
            .collect()
    };

    ChartData { labels: hour_labels(), series, danger_line: None }
}

/// Linhas por hora: mesmos pontos das barras, desenhados como tendência.
pub fn hourly_trend_chart(view: &AggregatedView) -> ChartData {
    peak_hours_chart(view)
}

pub fn dishes_share_chart(dishes_sold: &IndexMap<String, u32>) -> ChartData {
    ChartData {
        labels: dishes_sold.keys().cloned().collect(),
        series: vec![ChartSeries {
            label: "Dishes Sold".to_string(),
            values: dishes_sold.values().map(|&v| Decimal::from(v)).collect(),
            critical: Vec::new(),
        }],
        danger_line: None,
    }
}

pub fn ingredients_chart(rows: &[IngredientRow]) -> ChartData {
    ChartData {
        labels: rows.iter().map(|r| r.name.clone()).collect(),
        series: vec![ChartSeries {
            label: "Stock %".to_string(),
            values: rows.iter().map(|r| r.fill_percent).collect(),
            critical: rows.iter().map(|r| r.stock_level == StockLevel::Critical).collect(),
        }],
        danger_line: Some(CRITICAL_FILL_PERCENT),
    }
}

// ---
// Posse do gráfico: um slot, no máximo um gráfico vivo
// ---

/// Recurso de gráfico criado pela camada de desenho.
pub trait ChartHandle {
    fn destroy(self);
}

pub struct ChartSlot<H: ChartHandle> {
    current: Option<H>,
}

impl<H: ChartHandle> ChartSlot<H> {
    pub fn new() -> Self {
        Self { current: None }
    }

    /// Destrói o gráfico anterior e só então cria o novo.
    pub fn replace<F>(&mut self, data: &ChartData, create: F) -> &H
    where
        F: FnOnce(&ChartData) -> H,
    {
        if let Some(old) = self.current.take() {
            old.destroy();
        }
        self.current.insert(create(data))
    }

    pub fn current(&self) -> Option<&H> {
        self.current.as_ref()
    }

    pub fn clear(&mut self) {
        if let Some(old) = self.current.take() {
            old.destroy();
        }
    }
}

impl<H: ChartHandle> Default for ChartSlot<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: ChartHandle> Drop for ChartSlot<H> {
    fn drop(&mut self) {
        self.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::analytics::DailyMetrics;
    use crate::models::inventory::{Ingredient, IngredientStatus};
    use crate::services::{AnalyticsAggregator, InventoryStatusEvaluator};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct FakeChart {
        id: u32,
        log: Rc<RefCell<Vec<String>>>,
    }

    impl ChartHandle for FakeChart {
        fn destroy(self) {
            self.log.borrow_mut().push(format!("destroy {}", self.id));
        }
    }

    fn view(peak: &[(&str, Vec<u32>)]) -> AggregatedView {
        let mut m = DailyMetrics::empty(NaiveDate::from_ymd_opt(2024, 3, 10).unwrap());
        for (dish, series) in peak {
            m.peak_hours.insert(dish.to_string(), series.clone());
        }
        AnalyticsAggregator::new().aggregate(&m).unwrap()
    }

    #[test]
    fn empty_day_has_placeholder_series() {
        let chart = peak_hours_chart(&view(&[]));
        assert_eq!(chart.labels.len(), 24);
        assert_eq!(chart.labels[13], "13:00");
        assert_eq!(chart.series.len(), 1);
        assert_eq!(chart.series[0].label, "No Data");
        assert_eq!(chart.series[0].values.len(), 24);
    }

    #[test]
    fn all_zero_dish_still_has_full_series() {
        let chart = peak_hours_chart(&view(&[("Pasta", vec![0; 24])]));
        assert_eq!(chart.series.len(), 1);
        assert_eq!(chart.series[0].label, "Pasta");
        assert_eq!(chart.series[0].values, vec![Decimal::ZERO; 24]);
    }

    #[test]
    fn trend_chart_matches_peak_hours() {
        let mut pasta = vec![0; 24];
        pasta[12] = 3;
        let v = view(&[("Pasta", pasta)]);

        let trend = hourly_trend_chart(&v);
        assert_eq!(trend, peak_hours_chart(&v));
        assert_eq!(trend.series[0].values[12], dec!(3));
        assert_eq!(hourly_trend_chart(&view(&[])).series[0].label, "No Data");
    }

    #[test]
    fn dishes_share_keeps_payload_order() {
        let mut sold = IndexMap::new();
        sold.insert("Salad".to_string(), 2);
        sold.insert("Pasta".to_string(), 5);

        let chart = dishes_share_chart(&sold);
        assert_eq!(chart.labels, vec!["Salad", "Pasta"]);
        assert_eq!(chart.series[0].values, vec![dec!(2), dec!(5)]);
        assert_eq!(chart.danger_line, None);
    }

    #[test]
    fn ingredients_chart_flags_critical_bars() {
        let ingredients = vec![
            Ingredient {
                id: 1,
                name: "Tomato".into(),
                unit: "kg".into(),
                stock_quantity: dec!(12),
                reorder_level: dec!(5),
                status: IngredientStatus::Normal,
                percentage: None,
            },
            Ingredient {
                id: 2,
                name: "Cheese".into(),
                unit: "kg".into(),
                stock_quantity: dec!(80),
                reorder_level: dec!(90),
                status: IngredientStatus::Low,
                percentage: None,
            },
        ];
        let rows = InventoryStatusEvaluator::new().evaluate(&ingredients).rows;

        let chart = ingredients_chart(&rows);
        assert_eq!(chart.series[0].critical, vec![true, false]);
        assert_eq!(chart.danger_line, Some(dec!(25)));
    }

    #[test]
    fn replace_destroys_before_creating() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let data = peak_hours_chart(&view(&[]));
        let mut slot = ChartSlot::new();

        for id in 1..=2 {
            let log_for_create = Rc::clone(&log);
            let log_for_handle = Rc::clone(&log);
            slot.replace(&data, move |_| {
                log_for_create.borrow_mut().push(format!("create {}", id));
                FakeChart { id, log: log_for_handle }
            });
        }
        assert_eq!(slot.current().map(|c| c.id), Some(2));

        drop(slot);
        assert_eq!(*log.borrow(), vec!["create 1", "destroy 1", "create 2", "destroy 2"]);
    }
}
