use crate::domain::client::{Client, NewClient};
use crate::repository::{ClientReader, ClientWriter};
use crate::services::{ServiceError, ServiceResult};

/// Returns every known client in insertion order.
pub fn fetch_all_clients<R>(repo: &R) -> ServiceResult<Vec<Client>>
where
    R: ClientReader + ?Sized,
{
    repo.list_clients().map_err(ServiceError::from)
}

/// Persists a new client.
pub fn create_client<R>(repo: &R, new_client: &NewClient) -> ServiceResult<Client>
where
    R: ClientWriter + ?Sized,
{
    let client = repo.create_client(new_client).map_err(|err| {
        log::error!("Failed to add a client: {err}");
        ServiceError::from(err)
    })?;
    log::info!("Created client {}", client.id);
    Ok(client)
}
