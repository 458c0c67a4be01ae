// src/models/inventory.rs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

// --- 1. Status vindo do backend (autoritativo) ---
// O backend hoje escreve "Good" para o estado normal; aceitamos os dois.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IngredientStatus {
    Low,
    #[serde(alias = "Good")]
    Normal,
}

// --- 2. Ingrediente (GET /ingredients) ---
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub id: i64,
    pub name: String,
    #[serde(default = "default_unit")]
    pub unit: String,
    pub stock_quantity: Decimal,
    #[serde(default)]
    pub reorder_level: Decimal,
    pub status: IngredientStatus,
    // Calculado pelo backend; só informativo
    #[serde(default)]
    pub percentage: Option<Decimal>,
}

fn default_unit() -> String {
    "units".to_string()
}

// --- 3. Nível visual (cor da barra / linha de perigo do gráfico) ---
// Heurística de apresentação: independente do `reorder_level` e do status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StockLevel {
    Critical,
    Healthy,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IngredientRow {
    pub id: i64,
    pub name: String,
    pub unit: String,
    pub stock_quantity: Decimal,
    pub reorder_level: Decimal,
    pub status: IngredientStatus,
    pub fill_percent: Decimal,
    pub stock_level: StockLevel,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LowStockAlert {
    pub name: String,
    pub stock_quantity: Decimal,
    pub unit: String,
    pub reorder_level: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventorySummary {
    pub low_stock_count: usize,
    pub total_estimated_value: Decimal,
    pub ingredient_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryEvaluation {
    pub rows: Vec<IngredientRow>,
    pub summary: InventorySummary,
    pub low_stock_alerts: Vec<LowStockAlert>,
}

// ---
// Validação Customizada
// ---
fn validate_not_negative(val: &Decimal) -> Result<(), ValidationError> {
    if val.is_sign_negative() && !val.is_zero() {
        let mut err = ValidationError::new("range");
        err.add_param("min".into(), &0.0);
        err.message = Some("O estoque não pode ser negativo.".into());
        return Err(err);
    }
    Ok(())
}

fn validate_not_blank(val: &str) -> Result<(), ValidationError> {
    if val.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("O nome não pode ficar vazio.".into());
        return Err(err);
    }
    Ok(())
}

// ---
// Payload: PUT /ingredients/{id}
// ---
#[derive(Debug, Clone, PartialEq, Serialize, Validate)]
pub struct IngredientUpdate {
    #[validate(custom(function = "validate_not_blank"))]
    pub name: String,

    pub unit: String,

    #[validate(custom(function = "validate_not_negative"))]
    pub stock_quantity: Decimal,
}

impl IngredientUpdate {
    // Os campos chegam do formulário com espaços nas pontas
    pub fn trimmed(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            unit: self.unit.trim().to_string(),
            stock_quantity: self.stock_quantity,
        }
    }
}

// ---
// Payload: POST /ingredients
// ---
#[derive(Debug, Clone, PartialEq, Serialize, Validate)]
pub struct NewIngredient {
    #[validate(custom(function = "validate_not_blank"))]
    pub name: String,

    pub unit: String,

    #[validate(custom(function = "validate_not_negative"))]
    pub stock_quantity: Decimal,
}

impl NewIngredient {
    /// Formulário de cadastro: unidade vazia vira "units", estoque ausente vira 100.
    pub fn from_form(name: &str, unit: &str, stock_quantity: Option<Decimal>) -> Self {
        let unit = unit.trim();
        Self {
            name: name.trim().to_string(),
            unit: if unit.is_empty() { default_unit() } else { unit.to_string() },
            stock_quantity: stock_quantity.unwrap_or(Decimal::ONE_HUNDRED),
        }
    }
}
