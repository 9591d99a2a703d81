//! Configuration model loaded from external sources.

use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
/// Settings required to open the versment store.
pub struct AppConfig {
    pub database_url: String,
}
