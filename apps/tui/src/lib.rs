// Terminal front end for the retail analytics dashboard

pub mod api;
pub mod app;
pub mod cli;
pub mod config;
pub mod event;
pub mod logging;
pub mod terminal;
pub mod ui;

pub use api::{HttpMetricsSource, MetricsSource};
pub use config::AppConfig;
