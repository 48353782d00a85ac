//! HTTP handlers for the AI service.

pub mod analyze;
pub mod health;
pub mod metrics;
pub mod recommend;
