// src/services/inventory_service.rs

use rust_decimal::Decimal;
use rust_decimal::prelude::Zero;
use rust_decimal_macros::dec;
use validator::Validate;

use crate::{
    common::{error::AppError, number_utils::round1},
    models::inventory::{
        Ingredient, IngredientRow, IngredientStatus, IngredientUpdate, InventoryEvaluation,
        InventorySummary, LowStockAlert, NewIngredient, StockLevel,
    },
};

/// Valor fictício por unidade em estoque. Placeholder, NÃO é preço real.
pub const UNIT_VALUE_CONSTANT: Decimal = Decimal::TWO;

/// Teto de normalização das barras (uma entrega completa repõe até aqui).
pub const NORMALIZATION_CEILING: Decimal = Decimal::ONE_HUNDRED;

/// Percentual do teto a partir do qual a barra fica vermelha.
pub const CRITICAL_FILL_PERCENT: Decimal = dec!(25);

#[derive(Debug, Clone, Copy, Default)]
pub struct InventoryStatusEvaluator;

impl InventoryStatusEvaluator {
    pub fn new() -> Self {
        Self
    }

    pub fn evaluate(&self, ingredients: &[Ingredient]) -> InventoryEvaluation {
        let rows: Vec<IngredientRow> = ingredients
            .iter()
            .map(|ing| {
                let fill_percent = self.fill_percent(ing.stock_quantity);
                IngredientRow {
                    id: ing.id,
                    name: ing.name.clone(),
                    unit: ing.unit.clone(),
                    stock_quantity: ing.stock_quantity,
                    reorder_level: ing.reorder_level,
                    // Status confiado ao backend, não recalculado aqui
                    status: ing.status,
                    fill_percent,
                    stock_level: self.stock_level(fill_percent),
                }
            })
            .collect();

        let low_stock_alerts: Vec<LowStockAlert> = ingredients
            .iter()
            .filter(|ing| ing.status == IngredientStatus::Low)
            .map(|ing| LowStockAlert {
                name: ing.name.clone(),
                stock_quantity: ing.stock_quantity,
                unit: ing.unit.clone(),
                reorder_level: ing.reorder_level,
            })
            .collect();

        let total_estimated_value = ingredients
            .iter()
            .fold(Decimal::zero(), |acc, ing| acc + ing.stock_quantity * UNIT_VALUE_CONSTANT);

        let summary = InventorySummary {
            low_stock_count: low_stock_alerts.len(),
            total_estimated_value,
            ingredient_count: ingredients.len(),
        };

        InventoryEvaluation { rows, summary, low_stock_alerts }
    }

    // min(estoque / 100 * 100, 100), uma casa
    pub fn fill_percent(&self, stock_quantity: Decimal) -> Decimal {
        let pct = stock_quantity * Decimal::ONE_HUNDRED / NORMALIZATION_CEILING;
        round1(pct.min(Decimal::ONE_HUNDRED).max(Decimal::ZERO))
    }

    pub fn stock_level(&self, fill_percent: Decimal) -> StockLevel {
        if fill_percent <= CRITICAL_FILL_PERCENT {
            StockLevel::Critical
        } else {
            StockLevel::Healthy
        }
    }

    // --- Validação local do editor (bloqueia antes de qualquer requisição) ---

    pub fn validate_update(&self, update: IngredientUpdate) -> Result<IngredientUpdate, AppError> {
        let update = update.trimmed();
        update.validate()?;
        Ok(update)
    }

    pub fn validate_new(&self, ingredient: NewIngredient) -> Result<NewIngredient, AppError> {
        ingredient.validate()?;
        Ok(ingredient)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::error::ErrorKind;

    fn ingredient(id: i64, stock: Decimal, status: IngredientStatus) -> Ingredient {
        Ingredient {
            id,
            name: format!("ing-{}", id),
            unit: "kg".into(),
            stock_quantity: stock,
            reorder_level: dec!(20),
            status,
            percentage: None,
        }
    }

    #[test]
    fn counts_low_from_payload_status() {
        let evaluation = InventoryStatusEvaluator::new().evaluate(&[
            ingredient(1, dec!(10), IngredientStatus::Low),
            ingredient(2, dec!(90), IngredientStatus::Normal),
        ]);

        assert_eq!(evaluation.summary.low_stock_count, 1);
        assert_eq!(evaluation.summary.ingredient_count, 2);
        assert_eq!(evaluation.summary.total_estimated_value, dec!(200));
        assert_eq!(evaluation.low_stock_alerts.len(), 1);
        assert_eq!(evaluation.low_stock_alerts[0].name, "ing-1");
    }

    #[test]
    fn status_is_never_recomputed() {
        // Estoque alto marcado Low pelo backend continua Low;
        // estoque baixíssimo marcado Normal continua Normal.
        let evaluation = InventoryStatusEvaluator::new().evaluate(&[
            ingredient(1, dec!(95), IngredientStatus::Low),
            ingredient(2, dec!(3), IngredientStatus::Normal),
        ]);

        assert_eq!(evaluation.rows[0].status, IngredientStatus::Low);
        assert_eq!(evaluation.rows[0].stock_level, StockLevel::Healthy);
        assert_eq!(evaluation.rows[1].status, IngredientStatus::Normal);
        assert_eq!(evaluation.rows[1].stock_level, StockLevel::Critical);
        assert_eq!(evaluation.summary.low_stock_count, 1);
    }

    #[test]
    fn critical_threshold_is_inclusive_and_capped() {
        let evaluator = InventoryStatusEvaluator::new();
        assert_eq!(evaluator.stock_level(evaluator.fill_percent(dec!(25))), StockLevel::Critical);
        assert_eq!(evaluator.stock_level(evaluator.fill_percent(dec!(25.1))), StockLevel::Healthy);
        assert_eq!(evaluator.fill_percent(dec!(250)), dec!(100));
        assert_eq!(evaluator.fill_percent(dec!(33.33)), dec!(33.3));
    }

    #[test]
    fn empty_inventory_summary() {
        let evaluation = InventoryStatusEvaluator::new().evaluate(&[]);
        assert_eq!(evaluation.summary.low_stock_count, 0);
        assert_eq!(evaluation.summary.total_estimated_value, Decimal::ZERO);
        assert!(evaluation.rows.is_empty());
    }

    #[test]
    fn blank_name_is_user_input_error() {
        let update = IngredientUpdate { name: "   ".into(), unit: "kg".into(), stock_quantity: dec!(5) };
        let err = InventoryStatusEvaluator::new().validate_update(update).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UserInput);
    }

    #[test]
    fn negative_stock_is_user_input_error() {
        let update = IngredientUpdate { name: "Flour".into(), unit: "kg".into(), stock_quantity: dec!(-1) };
        assert!(InventoryStatusEvaluator::new().validate_update(update).is_err());
    }

    #[test]
    fn update_is_trimmed_before_sending() {
        let update = IngredientUpdate { name: "  Flour ".into(), unit: " kg".into(), stock_quantity: dec!(5) };
        let update = InventoryStatusEvaluator::new().validate_update(update).unwrap();
        assert_eq!(update.name, "Flour");
        assert_eq!(update.unit, "kg");
    }

    #[test]
    fn new_ingredient_form_defaults() {
        let ing = NewIngredient::from_form(" Basil ", "  ", None);
        assert_eq!(ing.unit, "units");
        assert_eq!(ing.stock_quantity, dec!(100));
        assert!(InventoryStatusEvaluator::new().validate_new(ing).is_ok());

        let blank = NewIngredient::from_form("", "g", Some(dec!(3)));
        assert!(InventoryStatusEvaluator::new().validate_new(blank).is_err());
    }
}
