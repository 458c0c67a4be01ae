pub mod analytics_service;
pub use analytics_service::AnalyticsAggregator;
pub mod comparison_service;
pub use comparison_service::ComparisonEngine;
pub mod inventory_service;
pub use inventory_service::InventoryStatusEvaluator;
pub mod order_service;
pub use order_service::OrderService;
pub mod report_service;
pub use report_service::ReportService;
