//! Diesel models for storing client versments.

use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use crate::domain::{
    types::{
        ClientId, NonEmptyString, TypeConstraintError, VersmentId, VersmentType, parse_amount,
    },
    versment::Versment as DomainVersment,
};
use crate::models::client::Client;

#[derive(Debug, Clone, Identifiable, Queryable, Selectable, Associations)]
#[diesel(belongs_to(Client, foreign_key = client_id))]
#[diesel(table_name = crate::schema::versments)]
pub struct Versment {
    pub id: i32,
    pub client_id: i32,
    pub amount: String, // canonical decimal text
    pub versment_type: String,
    pub payment_date: NaiveDate,
    pub year_concerned: String,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::versments)]
pub struct NewVersment<'a> {
    pub client_id: i32,
    pub amount: String,
    pub versment_type: &'static str,
    pub payment_date: NaiveDate,
    pub year_concerned: &'a str,
    pub created_at: NaiveDateTime,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::versments)]
/// Columns rewritten by an update; `created_at` is never touched.
pub struct UpdateVersment<'a> {
    pub client_id: i32,
    pub amount: String,
    pub versment_type: &'static str,
    pub payment_date: NaiveDate,
    pub year_concerned: &'a str,
}

impl TryFrom<Versment> for DomainVersment {
    type Error = TypeConstraintError;

    fn try_from(versment: Versment) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Some(VersmentId::new(versment.id)?),
            client_id: ClientId::new(versment.client_id)?,
            amount: parse_amount(&versment.amount)?,
            kind: VersmentType::try_from(versment.versment_type)?,
            payment_date: versment.payment_date,
            year_concerned: NonEmptyString::new(versment.year_concerned)?,
            created_at: Some(versment.created_at),
        })
    }
}

impl<'a> NewVersment<'a> {
    /// Uses the record's own `created_at` when present, `now` otherwise.
    pub fn from_domain(versment: &'a DomainVersment, now: NaiveDateTime) -> Self {
        Self {
            client_id: versment.client_id.get(),
            amount: versment.amount.to_string(),
            versment_type: versment.kind.as_str(),
            payment_date: versment.payment_date,
            year_concerned: versment.year_concerned.as_str(),
            created_at: versment.created_at.unwrap_or(now),
        }
    }
}

impl<'a> From<&'a DomainVersment> for UpdateVersment<'a> {
    fn from(versment: &'a DomainVersment) -> Self {
        Self {
            client_id: versment.client_id.get(),
            amount: versment.amount.to_string(),
            versment_type: versment.kind.as_str(),
            payment_date: versment.payment_date,
            year_concerned: versment.year_concerned.as_str(),
        }
    }
}
