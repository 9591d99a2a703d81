use bigdecimal::BigDecimal;

use crate::{
    db::{DbConnection, DbPool, get_connection},
    domain::{
        client::{Client, NewClient},
        types::{ClientId, VersmentId},
        versment::Versment,
    },
    repository::errors::RepositoryResult,
};

pub mod client;
pub mod errors;
#[cfg(any(test, feature = "test-mocks"))]
pub mod mock;
pub mod versment;

/// Diesel-backed store implementing every repository trait.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(get_connection(&self.pool)?)
    }
}

/// Directory of known clients.
pub trait ClientReader {
    fn list_clients(&self) -> RepositoryResult<Vec<Client>>;
    fn get_client_by_id(&self, id: ClientId) -> RepositoryResult<Option<Client>>;
}

pub trait ClientWriter {
    fn create_client(&self, new_client: &NewClient) -> RepositoryResult<Client>;
}

pub trait VersmentReader {
    fn list_versments(&self) -> RepositoryResult<Vec<Versment>>;
    fn list_versments_by_client(&self, client_id: ClientId) -> RepositoryResult<Vec<Versment>>;
    fn get_versment_by_id(&self, id: VersmentId) -> RepositoryResult<Option<Versment>>;
    /// Sum of every amount recorded for the client, zero when there is none.
    fn total_versments_by_client(&self, client_id: ClientId) -> RepositoryResult<BigDecimal>;
}

pub trait VersmentWriter {
    /// Stores a new record and returns the identifier assigned to it.
    fn insert_versment(&self, versment: &Versment) -> RepositoryResult<VersmentId>;
    /// Rewrites a stored record. Returns `false` when no row matched.
    fn update_versment(&self, versment: &Versment) -> RepositoryResult<bool>;
    /// Returns `false` when no row matched.
    fn delete_versment(&self, id: VersmentId) -> RepositoryResult<bool>;
}
