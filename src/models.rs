pub mod analytics;
pub mod inventory;
pub mod orders;
pub mod report;
