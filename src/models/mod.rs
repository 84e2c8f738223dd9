pub mod activity;
pub mod activity_log;
