use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::{
    client::{Client as DomainClient, NewClient as DomainNewClient},
    types::{ClientId, TypeConstraintError},
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::clients)]
/// Diesel model for [`crate::domain::client::Client`].
pub struct Client {
    pub id: i32,
    pub last_name: String,
    pub first_name: Option<String>,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::clients)]
/// Insertable form of [`Client`].
pub struct NewClient<'a> {
    pub last_name: &'a str,
    pub first_name: Option<&'a str>,
    pub created_at: NaiveDateTime,
}

impl TryFrom<Client> for DomainClient {
    type Error = TypeConstraintError;

    fn try_from(client: Client) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ClientId::new(client.id)?,
            last_name: client.last_name,
            first_name: client.first_name,
            created_at: client.created_at,
        })
    }
}

impl<'a> NewClient<'a> {
    pub fn from_domain(client: &'a DomainNewClient, created_at: NaiveDateTime) -> Self {
        Self {
            last_name: client.last_name.as_str(),
            first_name: client.first_name.as_deref(),
            created_at,
        }
    }
}
