//! API handlers for Mega Zap REST endpoints

pub mod health;
pub mod openapi;
pub mod records;
