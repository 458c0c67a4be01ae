// src/services/order_service.rs

use validator::Validate;

use crate::{
    common::error::AppError,
    models::{
        analytics::TodayAnalytics,
        orders::{NewOrder, OrderLine, TodayOverview},
    },
    services::{analytics_service::AnalyticsAggregator, comparison_service::ComparisonEngine},
};

#[derive(Debug, Clone, Copy)]
pub struct OrderService {
    aggregator: AnalyticsAggregator,
    comparison: ComparisonEngine,
    recent_limit: usize,
}

impl OrderService {
    pub fn new(recent_limit: usize) -> Self {
        let aggregator = AnalyticsAggregator::new();
        Self {
            aggregator,
            comparison: ComparisonEngine::new(aggregator),
            recent_limit,
        }
    }

    /// Prato não selecionado ou quantidade < 1 bloqueiam o pedido localmente.
    pub fn validate_new_order(&self, order: &NewOrder) -> Result<(), AppError> {
        order.validate()?;
        Ok(())
    }

    pub fn today_overview(&self, data: &TodayAnalytics) -> TodayOverview {
        let recent_orders = data
            .orders
            .iter()
            .take(self.recent_limit)
            .map(|order| OrderLine {
                order_time: order.order_time.clone(),
                dish_name: order.dish_name.clone(),
                quantity: order.quantity,
                line_total: order.price * rust_decimal::Decimal::from(order.quantity),
            })
            .collect();

        TodayOverview {
            recent_orders,
            total_sales: data.today.total_sales,
            total_orders: data.today.total_orders,
            most_popular_dish: self.aggregator.most_popular_dish(&data.today),
            comparison: self.comparison.compare_with(&data.today, data.yesterday.as_ref()),
        }
    }
}

impl Default for OrderService {
    fn default() -> Self {
        Self::new(10)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::analytics::{ComparisonState, DailyMetrics, RecentOrder, Trend};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn order(n: u32) -> RecentOrder {
        RecentOrder {
            order_time: format!("2024-03-10T12:{:02}:00", n),
            dish_name: "Pasta".into(),
            quantity: 2,
            price: dec!(12.50),
        }
    }

    fn today() -> DailyMetrics {
        let mut m = DailyMetrics::empty(NaiveDate::from_ymd_opt(2024, 3, 10).unwrap());
        m.total_sales = dec!(50);
        m.total_orders = 2;
        m.dishes_sold.insert("Pasta".into(), 4);
        m
    }

    #[test]
    fn rejects_missing_dish_and_zero_quantity() {
        let service = OrderService::default();
        assert!(service.validate_new_order(&NewOrder { dish_id: None, quantity: 1 }).is_err());
        assert!(service.validate_new_order(&NewOrder { dish_id: Some(3), quantity: 0 }).is_err());
        assert!(service.validate_new_order(&NewOrder { dish_id: Some(3), quantity: 1 }).is_ok());
    }

    #[test]
    fn overview_limits_recent_orders() {
        let data = TodayAnalytics {
            today: today(),
            yesterday: None,
            orders: (0..15).map(order).collect(),
        };

        let overview = OrderService::default().today_overview(&data);
        assert_eq!(overview.recent_orders.len(), 10);
        assert_eq!(overview.recent_orders[0].line_total, dec!(25.00));
        assert_eq!(overview.most_popular_dish.label(), "Pasta");
        assert_eq!(overview.comparison, ComparisonState::NoPreviousData);
    }

    #[test]
    fn overview_compares_with_yesterday_when_present() {
        let mut yesterday = DailyMetrics::empty(NaiveDate::from_ymd_opt(2024, 3, 9).unwrap());
        yesterday.total_sales = dec!(100);
        yesterday.total_orders = 4;

        let data = TodayAnalytics { today: today(), yesterday: Some(yesterday), orders: vec![] };
        let overview = OrderService::new(5).today_overview(&data);

        let result = overview.comparison.result().expect("ontem presente");
        assert_eq!(result.sales.trend, Trend::Negative);
        assert_eq!(result.sales.percent_change, dec!(-50.0));
        assert!(overview.recent_orders.is_empty());
    }
}
