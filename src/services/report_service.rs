// src/services/report_service.rs

use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;
use validator::{ValidationError, ValidationErrors};

use crate::{
    common::{
        error::AppError,
        number_utils::{percent_of, round2},
    },
    models::{
        analytics::DailyMetrics,
        report::{DishShare, IngredientUsage, QuickRange, ReportPreview},
    },
};

#[derive(Debug, Clone, Copy, Default)]
pub struct ReportService;

impl ReportService {
    pub fn new() -> Self {
        Self
    }

    pub fn preview(&self, metrics: &DailyMetrics) -> ReportPreview {
        // Nada vendido -> denominador 1, evita divisão por zero
        // Soma em Decimal: contagens grandes estourariam u32
        let units_sold: Decimal = metrics.dishes_sold.values().map(|&q| Decimal::from(q)).sum();
        let denominator = units_sold.max(Decimal::ONE);

        let dishes = metrics
            .dishes_sold
            .iter()
            .map(|(dish, &quantity)| DishShare {
                dish: dish.clone(),
                quantity,
                share_percent: percent_of(Decimal::from(quantity), denominator),
            })
            .collect();

        let ingredients_used = metrics
            .ingredients_used
            .iter()
            .map(|(ingredient, &quantity)| IngredientUsage {
                ingredient: ingredient.clone(),
                quantity: round2(quantity),
            })
            .collect();

        ReportPreview {
            date: metrics.date,
            total_sales: metrics.total_sales,
            total_orders: metrics.total_orders,
            dishes,
            ingredients_used,
        }
    }

    pub fn report_date(&self, range: QuickRange, today: NaiveDate) -> NaiveDate {
        match range {
            QuickRange::Today => today,
            QuickRange::Yesterday => previous_day(today),
        }
    }

    /// O backend só gera relatório de um dia: intervalos baixam a data inicial.
    pub fn range_download_date(&self, start: NaiveDate, end: NaiveDate) -> Result<NaiveDate, AppError> {
        if end < start {
            let mut err = ValidationError::new("range");
            err.message = Some("A data final não pode ser anterior à inicial.".into());
            let mut errors = ValidationErrors::new();
            errors.add("endDate", err);
            return Err(AppError::UserInputError(errors));
        }
        if end != start {
            tracing::warn!(
                "Download por intervalo ainda não suportado; baixando apenas {} ({}..{})",
                start, start, end
            );
        }
        Ok(start)
    }

    pub fn default_file_name(&self, date: NaiveDate) -> String {
        format!("food_sales_report_{}.csv", date.format("%Y-%m-%d"))
    }
}

/// Dia anterior no calendário (sem fuso: datas puras).
pub fn previous_day(date: NaiveDate) -> NaiveDate {
    date.checked_sub_days(Days::new(1)).unwrap_or(date)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn preview_shares_follow_units_sold() {
        let mut m = DailyMetrics::empty(date(2024, 3, 10));
        m.dishes_sold.insert("Pasta".into(), 3);
        m.dishes_sold.insert("Salad".into(), 1);
        m.ingredients_used.insert("Flour".into(), dec!(0.755));

        let preview = ReportService::new().preview(&m);
        assert_eq!(preview.dishes[0].share_percent, dec!(75.0));
        assert_eq!(preview.dishes[1].share_percent, dec!(25.0));
        assert_eq!(preview.ingredients_used[0].quantity, dec!(0.76));
        assert!(preview.has_dishes());
    }

    #[test]
    fn preview_handles_counts_near_u32_max() {
        let mut m = DailyMetrics::empty(date(2024, 3, 10));
        m.dishes_sold.insert("Pasta".into(), 3_000_000_000);
        m.dishes_sold.insert("Salad".into(), 3_000_000_000);
        m.dishes_sold.insert("Soup".into(), u32::MAX);

        let preview = ReportService::new().preview(&m);
        let total: Decimal = preview.dishes.iter().map(|d| d.share_percent).sum();
        assert_eq!(preview.dishes[0].share_percent, preview.dishes[1].share_percent);
        assert!(preview.dishes[2].share_percent > preview.dishes[0].share_percent);
        assert!(total > dec!(99.8) && total < dec!(100.2));
    }

    #[test]
    fn empty_preview() {
        let preview = ReportService::new().preview(&DailyMetrics::empty(date(2024, 3, 10)));
        assert!(!preview.has_dishes());
        assert!(!preview.has_ingredients());
    }

    #[test]
    fn quick_ranges_and_month_boundary() {
        let service = ReportService::new();
        assert_eq!(service.report_date(QuickRange::Today, date(2024, 3, 1)), date(2024, 3, 1));
        assert_eq!(service.report_date(QuickRange::Yesterday, date(2024, 3, 1)), date(2024, 2, 29));
    }

    #[test]
    fn range_downloads_start_date() {
        let service = ReportService::new();
        assert_eq!(service.range_download_date(date(2024, 3, 1), date(2024, 3, 5)).unwrap(), date(2024, 3, 1));
        assert!(service.range_download_date(date(2024, 3, 5), date(2024, 3, 1)).is_err());
    }

    #[test]
    fn file_name_uses_iso_date() {
        assert_eq!(
            ReportService::new().default_file_name(date(2024, 3, 9)),
            "food_sales_report_2024-03-09.csv"
        );
    }
}
