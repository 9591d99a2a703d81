//! Domain entities shared by the repository, services and the entry dialog.

pub mod client;
pub mod types;
pub mod versment;
