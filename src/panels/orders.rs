// src/panels/orders.rs

use crate::{
    api::DashboardBackend,
    common::error::AppError,
    models::orders::{Dish, NewOrder, TodayOverview},
    services::OrderService,
};

pub async fn load_today_overview<B>(backend: &B, service: &OrderService) -> Result<TodayOverview, AppError>
where
    B: DashboardBackend + ?Sized,
{
    let data = backend.get_today_analytics().await?;
    Ok(service.today_overview(&data))
}

pub async fn load_dishes<B>(backend: &B) -> Result<Vec<Dish>, AppError>
where
    B: DashboardBackend + ?Sized,
{
    let dishes = backend.get_dishes().await?;
    tracing::info!("Carregados {} pratos no seletor", dishes.len());
    Ok(dishes)
}

// Validação local primeiro: pedido inválido nunca chega ao backend.
pub async fn submit_order<B>(backend: &B, service: &OrderService, order: &NewOrder) -> Result<(), AppError>
where
    B: DashboardBackend + ?Sized,
{
    service.validate_new_order(order)?;
    backend.place_order(order).await?;
    tracing::info!("✅ Pedido registrado: prato {:?} x{}", order.dish_id, order.quantity);
    Ok(())
}
