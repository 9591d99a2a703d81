//! Mock repository implementations for isolating services in tests.

use bigdecimal::BigDecimal;
use mockall::mock;

use crate::domain::client::{Client, NewClient};
use crate::domain::types::{ClientId, VersmentId};
use crate::domain::versment::Versment;
use crate::repository::errors::RepositoryResult;
use crate::repository::{ClientReader, ClientWriter, VersmentReader, VersmentWriter};

mock! {
    pub Repository {}

    impl ClientReader for Repository {
        fn list_clients(&self) -> RepositoryResult<Vec<Client>>;
        fn get_client_by_id(&self, id: ClientId) -> RepositoryResult<Option<Client>>;
    }

    impl ClientWriter for Repository {
        fn create_client(&self, new_client: &NewClient) -> RepositoryResult<Client>;
    }

    impl VersmentReader for Repository {
        fn list_versments(&self) -> RepositoryResult<Vec<Versment>>;
        fn list_versments_by_client(&self, client_id: ClientId) -> RepositoryResult<Vec<Versment>>;
        fn get_versment_by_id(&self, id: VersmentId) -> RepositoryResult<Option<Versment>>;
        fn total_versments_by_client(&self, client_id: ClientId) -> RepositoryResult<BigDecimal>;
    }

    impl VersmentWriter for Repository {
        fn insert_versment(&self, versment: &Versment) -> RepositoryResult<VersmentId>;
        fn update_versment(&self, versment: &Versment) -> RepositoryResult<bool>;
        fn delete_versment(&self, id: VersmentId) -> RepositoryResult<bool>;
    }
}
