//! Client payment ("versment") records: SQLite store, service layer and the
//! model of the entry dialog used to create or edit them.

pub mod db;
pub mod dialog;
pub mod domain;
pub mod error_conversions;
pub mod forms;
pub mod models;
pub mod repository;
pub mod schema;
pub mod services;
