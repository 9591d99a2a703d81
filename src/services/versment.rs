//! Versment operations forwarded to the repository.

use bigdecimal::BigDecimal;

use crate::domain::types::{ClientId, VersmentId};
use crate::domain::versment::Versment;
use crate::repository::errors::RepositoryError;
use crate::repository::{VersmentReader, VersmentWriter};
use crate::services::{ServiceError, ServiceResult};

/// Lists every stored versment.
pub fn fetch_all_versments<R>(repo: &R) -> ServiceResult<Vec<Versment>>
where
    R: VersmentReader + ?Sized,
{
    repo.list_versments().map_err(ServiceError::from)
}

/// Lists the versments recorded for one client.
pub fn fetch_versments_by_client<R>(repo: &R, client_id: ClientId) -> ServiceResult<Vec<Versment>>
where
    R: VersmentReader + ?Sized,
{
    repo.list_versments_by_client(client_id)
        .map_err(ServiceError::from)
}

pub fn get_versment_by_id<R>(repo: &R, id: VersmentId) -> ServiceResult<Option<Versment>>
where
    R: VersmentReader + ?Sized,
{
    repo.get_versment_by_id(id).map_err(ServiceError::from)
}

/// Stores a new versment returning its identifier.
pub fn add_versment<R>(repo: &R, versment: &Versment) -> ServiceResult<VersmentId>
where
    R: VersmentWriter + ?Sized,
{
    repo.insert_versment(versment).map_err(ServiceError::from)
}

pub fn update_versment<R>(repo: &R, versment: &Versment) -> ServiceResult<bool>
where
    R: VersmentWriter + ?Sized,
{
    repo.update_versment(versment).map_err(ServiceError::from)
}

pub fn delete_versment<R>(repo: &R, id: VersmentId) -> ServiceResult<bool>
where
    R: VersmentWriter + ?Sized,
{
    repo.delete_versment(id).map_err(ServiceError::from)
}

/// Total amount paid by a client, zero when nothing was recorded.
pub fn total_versments_by_client<R>(repo: &R, client_id: ClientId) -> ServiceResult<BigDecimal>
where
    R: VersmentReader + ?Sized,
{
    repo.total_versments_by_client(client_id)
        .map_err(ServiceError::from)
}

/// Inserts records that were never stored and updates the others.
///
/// Returns the identifier of the stored record. Updating a record whose row
/// has disappeared yields [`ServiceError::NotFound`].
pub fn save_versment<R>(repo: &R, versment: &Versment) -> ServiceResult<VersmentId>
where
    R: VersmentWriter + ?Sized,
{
    match versment.id {
        None => {
            let id = add_versment(repo, versment).inspect_err(|err| match err {
                ServiceError::Repository(RepositoryError::UnknownClient(client_id)) => {
                    log::warn!("Versment not added, client {client_id} does not exist");
                }
                err => log::error!("Failed to add versment: {err}"),
            })?;
            log::info!("Created versment {id} for client {}", versment.client_id);
            Ok(id)
        }
        Some(id) => {
            let updated = update_versment(repo, versment).map_err(|err| {
                log::error!("Failed to update versment {id}: {err}");
                err
            })?;
            if !updated {
                return Err(ServiceError::NotFound);
            }
            log::info!("Updated versment {id}");
            Ok(id)
        }
    }
}
