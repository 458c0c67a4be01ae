// src/api/backend.rs

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::{
    common::error::AppError,
    models::{
        analytics::{DailyMetrics, TodayAnalytics},
        inventory::{Ingredient, IngredientUpdate, NewIngredient},
        orders::{Dish, NewOrder},
        report::ReportFile,
    },
};

// Contrato do backend consumido pelo dashboard.
// O ApiClient é a implementação real; os testes trocam por dublês.
#[async_trait]
pub trait DashboardBackend: Send + Sync {
    async fn health(&self) -> Result<(), AppError>;

    async fn get_dishes(&self) -> Result<Vec<Dish>, AppError>;

    async fn place_order(&self, order: &NewOrder) -> Result<(), AppError>;

    async fn get_today_analytics(&self) -> Result<TodayAnalytics, AppError>;

    /// `Ok(None)` quando o backend não tem registro para o dia.
    async fn get_analytics_for_date(&self, date: NaiveDate) -> Result<Option<DailyMetrics>, AppError>;

    async fn get_ingredients(&self) -> Result<Vec<Ingredient>, AppError>;

    async fn add_ingredient(&self, ingredient: &NewIngredient) -> Result<i64, AppError>;

    async fn deliver_ingredient(&self, id: i64) -> Result<(), AppError>;

    async fn update_ingredient(&self, id: i64, update: &IngredientUpdate) -> Result<(), AppError>;

    async fn delete_ingredient(&self, id: i64) -> Result<(), AppError>;

    async fn download_report(&self, date: NaiveDate) -> Result<ReportFile, AppError>;
}
