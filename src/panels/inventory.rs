// src/panels/inventory.rs

use crate::{
    api::DashboardBackend,
    common::error::AppError,
    models::inventory::InventoryEvaluation,
    services::InventoryStatusEvaluator,
};

pub async fn load_inventory<B>(backend: &B) -> Result<InventoryEvaluation, AppError>
where
    B: DashboardBackend + ?Sized,
{
    let ingredients = backend.get_ingredients().await?;
    let evaluation = InventoryStatusEvaluator::new().evaluate(&ingredients);

    if evaluation.summary.low_stock_count > 0 {
        tracing::warn!(
            "⚠️ {} ingrediente(s) com estoque baixo: {}",
            evaluation.summary.low_stock_count,
            evaluation
                .low_stock_alerts
                .iter()
                .map(|a| a.name.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        );
    }

    Ok(evaluation)
}
