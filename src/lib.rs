//! Daily activity log service.
//!
//! One log per UTC calendar day records which of five habits were done. The
//! HTTP API upserts logs by day and serves the history plus derived streak
//! and calendar views.

use std::sync::Arc;

pub mod app;
pub mod config;
pub mod day;
pub mod db;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod models;
pub mod service;
pub mod stats;
pub mod store;

pub use app::router;
pub use config::Config;
pub use day::DayKey;
pub use service::LogService;

use store::LogStore;

#[derive(Clone)]
pub struct AppState {
    pub logs: LogService,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(store: Arc<dyn LogStore>, config: Arc<Config>) -> Self {
        Self {
            logs: LogService::new(store),
            config,
        }
    }
}
