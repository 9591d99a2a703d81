use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use validator::Validate;

use crate::domain::types::{ClientId, NonEmptyString, VersmentType, parse_amount, parse_date};
use crate::domain::versment::Versment;
use crate::forms::FormError;

pub const BACKSPACE: char = '\u{8}';
pub const DELETE: char = '\u{7f}';

/// Returns whether a character typed into the amount field is kept.
pub fn is_amount_char(c: char) -> bool {
    c.is_ascii_digit() || c == '.' || c == BACKSPACE || c == DELETE
}

#[derive(Debug, Clone, Validate)]
/// Raw text of the versment fields, trimmed.
pub struct VersmentForm {
    #[validate(length(min = 1))]
    pub amount: String,
    #[validate(required)]
    pub kind: Option<VersmentType>,
    #[validate(length(min = 1))]
    pub payment_date: String,
    #[validate(length(min = 1))]
    pub year_concerned: String,
}

/// Field values that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct VersmentPayload {
    pub amount: BigDecimal,
    pub kind: VersmentType,
    pub payment_date: NaiveDate,
    pub year_concerned: NonEmptyString,
}

impl VersmentForm {
    pub fn new(
        amount: &str,
        kind: Option<VersmentType>,
        payment_date: &str,
        year_concerned: &str,
    ) -> Self {
        Self {
            amount: amount.trim().to_string(),
            kind,
            payment_date: payment_date.trim().to_string(),
            year_concerned: year_concerned.trim().to_string(),
        }
    }

    /// Checks the required fields, then the amount and date formats.
    ///
    /// Only the first failure is reported, in field order.
    pub fn parse(&self) -> Result<VersmentPayload, FormError> {
        if let Err(errors) = self.validate() {
            let first_missing = {
                let missing = errors.field_errors();
                [
                    ("amount", FormError::AmountRequired),
                    ("kind", FormError::TypeRequired),
                    ("payment_date", FormError::PaymentDateRequired),
                    ("year_concerned", FormError::YearConcernedRequired),
                ]
                .into_iter()
                .find(|(field, _)| missing.contains_key(*field))
                .map(|(_, error)| error)
            };
            return Err(first_missing.unwrap_or(FormError::Validation(errors)));
        }

        let amount = parse_amount(&self.amount).map_err(|_| FormError::InvalidAmount)?;
        let payment_date = parse_date(&self.payment_date).map_err(|_| FormError::InvalidDate)?;
        let year_concerned = NonEmptyString::new(self.year_concerned.as_str())
            .map_err(|_| FormError::YearConcernedRequired)?;
        let kind = self.kind.ok_or(FormError::TypeRequired)?;

        Ok(VersmentPayload {
            amount,
            kind,
            payment_date,
            year_concerned,
        })
    }
}

impl VersmentPayload {
    /// Applies the payload on top of `base`, or builds a fresh record.
    pub fn into_versment(self, client_id: ClientId, base: Option<Versment>) -> Versment {
        match base {
            Some(mut versment) => {
                versment.client_id = client_id;
                versment.amount = self.amount;
                versment.kind = self.kind;
                versment.payment_date = self.payment_date;
                versment.year_concerned = self.year_concerned;
                versment
            }
            None => Versment::new(
                client_id,
                self.amount,
                self.kind,
                self.payment_date,
                self.year_concerned,
            ),
        }
    }
}
