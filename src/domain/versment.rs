use bigdecimal::BigDecimal;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::domain::types::{ClientId, NonEmptyString, VersmentId, VersmentType};

/// Payment received from a client.
///
/// `id` is `None` until the record has been stored. `created_at` is stamped
/// once, when the record is first saved, and is left untouched by updates.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Versment {
    pub id: Option<VersmentId>,
    pub client_id: ClientId,
    pub amount: BigDecimal,
    pub kind: VersmentType,
    pub payment_date: NaiveDate,
    pub year_concerned: NonEmptyString,
    pub created_at: Option<NaiveDateTime>,
}

impl Versment {
    /// Builds an unsaved record.
    #[must_use]
    pub fn new(
        client_id: ClientId,
        amount: BigDecimal,
        kind: VersmentType,
        payment_date: NaiveDate,
        year_concerned: NonEmptyString,
    ) -> Self {
        Self {
            id: None,
            client_id,
            amount,
            kind,
            payment_date,
            year_concerned,
            created_at: None,
        }
    }
}
