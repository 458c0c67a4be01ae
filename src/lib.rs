//src/lib.rs

pub mod api;
pub mod charts;
pub mod common;
pub mod config;
pub mod models;
pub mod panels;
pub mod services;
