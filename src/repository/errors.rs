//! Failures reported by the SQLite store.

use diesel::r2d2::{Error as R2D2Error, PoolError};
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use thiserror::Error;

use crate::domain::types::ClientId;

#[derive(Debug, Error)]
pub enum RepositoryError {
    /// A versment was written for a client missing from the directory.
    #[error("client {0} does not exist")]
    UnknownClient(ClientId),

    /// A stored row no longer converts into a domain value.
    #[error("stored record is invalid: {0}")]
    InvalidRecord(String),

    #[error("constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("database error: {0}")]
    Database(String),

    #[error("database unavailable: {0}")]
    Connection(String),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

impl RepositoryError {
    /// Maps the failure of an insert or update of a versment row.
    ///
    /// The only foreign key of `versments` points at `clients`, so a foreign
    /// key failure names the client the row was written for.
    pub fn from_versment_write(err: DieselError, client_id: ClientId) -> Self {
        match err {
            DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
                RepositoryError::UnknownClient(client_id)
            }
            err => err.into(),
        }
    }
}

impl From<DieselError> for RepositoryError {
    fn from(err: DieselError) -> Self {
        match err {
            DieselError::DatabaseError(
                kind @ (DatabaseErrorKind::UniqueViolation
                | DatabaseErrorKind::ForeignKeyViolation
                | DatabaseErrorKind::NotNullViolation
                | DatabaseErrorKind::CheckViolation),
                info,
            ) => RepositoryError::ConstraintViolation(format!("{kind:?}: {}", info.message())),
            DieselError::DeserializationError(e) => RepositoryError::InvalidRecord(e.to_string()),
            err => RepositoryError::Database(err.to_string()),
        }
    }
}

impl From<R2D2Error> for RepositoryError {
    fn from(err: R2D2Error) -> Self {
        RepositoryError::Connection(err.to_string())
    }
}

impl From<PoolError> for RepositoryError {
    fn from(err: PoolError) -> Self {
        RepositoryError::Connection(err.to_string())
    }
}
