pub mod activities;
pub mod health;
pub mod logs;
pub mod stats;
