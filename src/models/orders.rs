// src/models/orders.rs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::analytics::{ComparisonState, PopularDish};

// GET /dishes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dish {
    pub id: i64,
    pub name: String,
    pub price: Decimal,
}

impl Dish {
    /// Texto da opção no seletor de pratos ("Pasta — $12.99").
    pub fn option_label(&self) -> String {
        format!("{} — ${:.2}", self.name, self.price)
    }
}

// ---
// Payload: POST /orders
// ---
#[derive(Debug, Clone, PartialEq, Serialize, Validate)]
pub struct NewOrder {
    // None = nenhum prato selecionado no formulário
    #[validate(required(message = "Selecione um prato."))]
    pub dish_id: Option<i64>,

    #[validate(range(min = 1, message = "A quantidade deve ser pelo menos 1."))]
    pub quantity: u32,
}

// Linha da tabela de pedidos recentes
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    pub order_time: String,
    pub dish_name: String,
    pub quantity: u32,
    pub line_total: Decimal,
}

// Aba de pedidos: tabela + cards rápidos + comparação com ontem
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TodayOverview {
    pub recent_orders: Vec<OrderLine>,
    pub total_sales: Decimal,
    pub total_orders: u32,
    pub most_popular_dish: PopularDish,
    pub comparison: ComparisonState,
}
