//! Fixtures compartilhadas pelos testes de integração.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use dashboard::api::ApiClient;
use serde_json::{Value, json};
use wiremock::MockServer;

pub async fn start_backend() -> (MockServer, Arc<ApiClient>) {
    let server = MockServer::start().await;
    let client = ApiClient::new(&format!("{}/api", server.uri()), Duration::from_secs(5))
        .expect("cliente HTTP");
    (server, Arc::new(client))
}

/// Payload diário como o backend envia (snake_case, floats).
pub fn daily_json(date: &str, total_sales: f64, total_orders: u32, dishes: &[(&str, u32)]) -> Value {
    let mut dishes_sold = serde_json::Map::new();
    let mut peak_hours = serde_json::Map::new();
    for (dish, qty) in dishes {
        dishes_sold.insert(dish.to_string(), json!(qty));
        let mut hours = vec![0u32; 24];
        hours[12] = *qty;
        peak_hours.insert(dish.to_string(), json!(hours));
    }
    json!({
        "date": date,
        "total_sales": total_sales,
        "total_orders": total_orders,
        "dishes_sold": dishes_sold,
        "ingredients_used": { "Flour": 1.5 },
        "peak_hours": peak_hours,
    })
}

pub fn ingredients_json() -> Value {
    json!([
        { "id": 1, "name": "Tomato", "stock_quantity": 10.0, "unit": "kg",
          "reorder_level": 20.0, "percentage": 10.0, "status": "Low" },
        { "id": 2, "name": "Cheese", "stock_quantity": 90.0, "unit": "kg",
          "reorder_level": 20.0, "percentage": 90.0, "status": "Good" }
    ])
}
