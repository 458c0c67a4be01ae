// src/models/report.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

// Atalhos de download da aba de relatórios
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuickRange {
    Today,
    Yesterday,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DishShare {
    pub dish: String,
    pub quantity: u32,
    pub share_percent: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IngredientUsage {
    pub ingredient: String,
    pub quantity: Decimal,
}

// Prévia exibida antes do download
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportPreview {
    pub date: NaiveDate,
    pub total_sales: Decimal,
    pub total_orders: u32,
    pub dishes: Vec<DishShare>,
    pub ingredients_used: Vec<IngredientUsage>,
}

impl ReportPreview {
    pub fn has_dishes(&self) -> bool {
        !self.dishes.is_empty()
    }

    pub fn has_ingredients(&self) -> bool {
        !self.ingredients_used.is_empty()
    }
}

// GET /reports/download/{date}: conteúdo opaco
#[derive(Debug, Clone, PartialEq)]
pub struct ReportFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}
