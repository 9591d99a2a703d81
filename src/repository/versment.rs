//! Repository implementation for client versments.

use bigdecimal::BigDecimal;
use chrono::Utc;
use diesel::prelude::*;

use crate::{
    domain::{
        types::{ClientId, VersmentId, parse_amount},
        versment::Versment,
    },
    models::versment::{
        NewVersment as DbNewVersment, UpdateVersment as DbUpdateVersment,
        Versment as DbVersment,
    },
    repository::{
        DieselRepository, VersmentReader, VersmentWriter,
        errors::{RepositoryError, RepositoryResult},
    },
};

fn into_domain(rows: Vec<DbVersment>) -> RepositoryResult<Vec<Versment>> {
    rows.into_iter()
        .map(|row| Versment::try_from(row).map_err(RepositoryError::from))
        .collect()
}

impl VersmentReader for DieselRepository {
    fn list_versments(&self) -> RepositoryResult<Vec<Versment>> {
        use crate::schema::versments;

        let mut conn = self.conn()?;

        let rows = versments::table
            .order((versments::payment_date.desc(), versments::id.desc()))
            .select(DbVersment::as_select())
            .load::<DbVersment>(&mut conn)?;

        into_domain(rows)
    }

    fn list_versments_by_client(&self, client_id: ClientId) -> RepositoryResult<Vec<Versment>> {
        use crate::schema::versments;

        let mut conn = self.conn()?;

        let rows = versments::table
            .filter(versments::client_id.eq(client_id.get()))
            .order((versments::payment_date.desc(), versments::id.desc()))
            .select(DbVersment::as_select())
            .load::<DbVersment>(&mut conn)?;

        into_domain(rows)
    }

    fn get_versment_by_id(&self, id: VersmentId) -> RepositoryResult<Option<Versment>> {
        use crate::schema::versments;

        let mut conn = self.conn()?;

        let row = versments::table
            .find(id.get())
            .select(DbVersment::as_select())
            .first::<DbVersment>(&mut conn)
            .optional()?;

        row.map(|row| Versment::try_from(row).map_err(RepositoryError::from))
            .transpose()
    }

    fn total_versments_by_client(&self, client_id: ClientId) -> RepositoryResult<BigDecimal> {
        use crate::schema::versments;

        let mut conn = self.conn()?;

        // Amounts are stored as text, summing in SQL would go through floats.
        let amounts = versments::table
            .filter(versments::client_id.eq(client_id.get()))
            .select(versments::amount)
            .load::<String>(&mut conn)?;

        amounts.iter().try_fold(BigDecimal::from(0), |total, amount| {
            Ok(total + parse_amount(amount).map_err(RepositoryError::from)?)
        })
    }
}

impl VersmentWriter for DieselRepository {
    fn insert_versment(&self, versment: &Versment) -> RepositoryResult<VersmentId> {
        use crate::schema::versments;

        let mut conn = self.conn()?;

        let insertable = DbNewVersment::from_domain(versment, Utc::now().naive_utc());
        let id = diesel::insert_into(versments::table)
            .values(&insertable)
            .returning(versments::id)
            .get_result::<i32>(&mut conn)
            .map_err(|err| RepositoryError::from_versment_write(err, versment.client_id))?;

        VersmentId::new(id).map_err(RepositoryError::from)
    }

    fn update_versment(&self, versment: &Versment) -> RepositoryResult<bool> {
        use crate::schema::versments;

        let Some(id) = versment.id else {
            return Ok(false);
        };

        let mut conn = self.conn()?;

        let changes: DbUpdateVersment = versment.into();
        let affected = diesel::update(versments::table.find(id.get()))
            .set(&changes)
            .execute(&mut conn)
            .map_err(|err| RepositoryError::from_versment_write(err, versment.client_id))?;

        Ok(affected > 0)
    }

    fn delete_versment(&self, id: VersmentId) -> RepositoryResult<bool> {
        use crate::schema::versments;

        let mut conn = self.conn()?;

        let affected = diesel::delete(versments::table.find(id.get())).execute(&mut conn)?;

        Ok(affected > 0)
    }
}
