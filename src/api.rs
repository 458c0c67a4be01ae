pub mod backend;
pub use backend::DashboardBackend;
pub mod client;
pub use client::ApiClient;
