//! Database models and configuration for the versment store.

pub mod client;
pub mod config;
pub mod versment;
