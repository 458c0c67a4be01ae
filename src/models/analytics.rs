// src/models/analytics.rs

use chrono::NaiveDate;
use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::common::error::AppError;

/// Número de posições de uma série horária (uma por hora do dia).
pub const HOURS_PER_DAY: usize = 24;

// --- 1. Payload diário vindo do backend ---
// Os mapas usam IndexMap para manter a ordem em que o backend enviou as chaves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyMetrics {
    pub date: NaiveDate,
    #[serde(default)]
    pub total_sales: Decimal,
    #[serde(default)]
    pub total_orders: u32,
    #[serde(default)]
    pub dishes_sold: IndexMap<String, u32>,
    // Ainda não validado: o tamanho 24 é checado no agregador
    #[serde(default)]
    pub peak_hours: IndexMap<String, Vec<u32>>,
    #[serde(default)]
    pub ingredients_used: IndexMap<String, Decimal>,
}

impl DailyMetrics {
    /// Dia sem nenhum pedido.
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            total_sales: Decimal::ZERO,
            total_orders: 0,
            dishes_sold: IndexMap::new(),
            peak_hours: IndexMap::new(),
            ingredients_used: IndexMap::new(),
        }
    }
}

// --- 2. Pedido recente (lista da aba de pedidos) ---
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentOrder {
    // Mantido como texto: o backend manda ISO sem fuso e às vezes lixo
    pub order_time: String,
    pub dish_name: String,
    pub quantity: u32,
    pub price: Decimal,
}

// GET /analytics/today
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TodayAnalytics {
    pub today: DailyMetrics,
    #[serde(default)]
    pub yesterday: Option<DailyMetrics>,
    #[serde(default)]
    pub orders: Vec<RecentOrder>,
}

// --- 3. Série horária (sempre 24 posições) ---
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct HourlySeries([u32; HOURS_PER_DAY]);

impl HourlySeries {
    pub fn zeros() -> Self {
        Self([0; HOURS_PER_DAY])
    }

    /// Converte a série crua do backend; tamanho diferente de 24 é erro,
    /// nunca truncamos nem completamos (desalinharia as horas).
    pub fn from_raw(dish: &str, raw: &[u32]) -> Result<Self, AppError> {
        let values: [u32; HOURS_PER_DAY] = raw.try_into().map_err(|_| {
            AppError::ValidationError(format!(
                "série horária de '{}' tem {} posições, esperado {}",
                dish,
                raw.len(),
                HOURS_PER_DAY
            ))
        })?;
        Ok(Self(values))
    }

    pub fn values(&self) -> &[u32; HOURS_PER_DAY] {
        &self.0
    }

    pub fn total(&self) -> u64 {
        self.0.iter().map(|&v| u64::from(v)).sum()
    }

    /// Hora com mais pedidos (a primeira em caso de empate); None se tudo zero.
    pub fn peak_hour(&self) -> Option<usize> {
        let mut best: Option<(usize, u32)> = None;
        for (hour, &count) in self.0.iter().enumerate() {
            if count > best.map_or(0, |(_, c)| c) {
                best = Some((hour, count));
            }
        }
        best.map(|(hour, _)| hour)
    }
}

// --- 4. Visão agregada (saída do AnalyticsAggregator) ---
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum PopularDish {
    Dish { name: String, quantity: u32 },
    NoData,
}

impl PopularDish {
    /// Texto exibido no card ("-" quando não há vendas).
    pub fn label(&self) -> &str {
        match self {
            PopularDish::Dish { name, .. } => name,
            PopularDish::NoData => "-",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregatedView {
    pub date: NaiveDate,
    pub total_sales: Decimal,
    pub total_orders: u32,
    pub average_order_value: Decimal,
    pub most_popular_dish: PopularDish,
    pub hourly_series_by_dish: IndexMap<String, HourlySeries>,
}

// --- 5. Comparação entre dois dias ---
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Positive,
    Negative,
    Neutral,
}

impl Trend {
    pub fn of(change: Decimal) -> Self {
        if change > Decimal::ZERO {
            Trend::Positive
        } else if change < Decimal::ZERO {
            Trend::Negative
        } else {
            Trend::Neutral
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            Trend::Positive => Trend::Negative,
            Trend::Negative => Trend::Positive,
            Trend::Neutral => Trend::Neutral,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricDelta {
    pub current: Decimal,
    pub previous: Decimal,
    pub absolute_change: Decimal,
    pub percent_change: Decimal,
    pub trend: Trend,
}

impl MetricDelta {
    /// Rótulo do badge: "+12.5%", "-3.0%", "0.0%".
    pub fn percent_label(&self) -> String {
        let sign = if self.trend == Trend::Positive { "+" } else { "" };
        format!("{}{:.1}%", sign, self.percent_change)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonResult {
    pub sales: MetricDelta,
    pub orders: MetricDelta,
    pub average_order_value: MetricDelta,
}

// Dia anterior ausente NÃO é o mesmo que dia anterior zerado.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum ComparisonState {
    Available(ComparisonResult),
    NoPreviousData,
}

impl ComparisonState {
    pub fn result(&self) -> Option<&ComparisonResult> {
        match self {
            ComparisonState::Available(result) => Some(result),
            ComparisonState::NoPreviousData => None,
        }
    }
}
